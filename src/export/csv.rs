use crate::errors::{AppError, AppResult};
use crate::export::ReportSink;
use crate::models::report_row::{REPORT_HEADER, ReportRow};
use csv::{Reader, Writer};
use std::fs;
use std::path::PathBuf;

/// Render report rows as the tabular CSV artifact (fixed header order).
pub fn render_report_csv(rows: &[ReportRow]) -> AppResult<String> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(REPORT_HEADER)?;
    for row in rows {
        wtr.write_record(&row.csv_record())?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

/// Parse a stored CSV artifact back into report rows (used to re-render
/// a fetched report in another format).
pub fn parse_report_csv(data: &str) -> AppResult<Vec<ReportRow>> {
    let mut rdr = Reader::from_reader(data.as_bytes());
    let mut rows = Vec::new();
    for result in rdr.deserialize::<ReportRow>() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Sink writing the CSV artifact to one file.
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for CsvFileSink {
    fn write_rows(&mut self, rows: &[ReportRow]) -> AppResult<()> {
        let data = render_report_csv(rows)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
