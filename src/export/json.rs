use crate::errors::{AppError, AppResult};
use crate::export::ReportSink;
use crate::models::ReportRow;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Sink writing the report rows as a pretty-printed JSON array.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for JsonFileSink {
    fn write_rows(&mut self, rows: &[ReportRow]) -> AppResult<()> {
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, rows).map_err(|e| AppError::Export(e.to_string()))
    }
}
