pub mod db;
pub mod ingest;
pub mod init;
pub mod log;
pub mod report;
