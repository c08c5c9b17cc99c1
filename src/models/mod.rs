pub mod business_interval;
pub mod observation;
pub mod report_row;
pub mod status;

pub use business_interval::BusinessInterval;
pub use observation::Observation;
pub use report_row::ReportRow;
pub use status::Status;
