// src/export/mod.rs

mod fs_utils;

pub mod csv;
pub mod json;

pub use csv::{CsvFileSink, parse_report_csv, render_report_csv};
pub use json::JsonFileSink;

use crate::errors::AppResult;
use crate::models::ReportRow;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) use fs_utils::ensure_writable;

/// Destination for assembled report rows. Injected where a report is
/// produced; there is no process-wide output directory.
pub trait ReportSink {
    fn write_rows(&mut self, rows: &[ReportRow]) -> AppResult<()>;
}

/// Shared completion message for export commands.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
