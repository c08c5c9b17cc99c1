use crate::cli::parser::ReportAction;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::{
    CsvFileSink, ExportFormat, JsonFileSink, ReportSink, ensure_writable, notify_export_success,
    parse_report_csv,
};
use crate::jobs::{self, JobStatus};
use crate::ui::messages::{info, success, warning};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

pub fn handle(action: &ReportAction, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    match action {
        ReportAction::Trigger { at } => {
            let reference = parse_reference(at)?;
            let (report_id, status) = jobs::trigger(&mut pool, cfg, reference)?;

            info(format!("Report id: {report_id}"));
            match status {
                JobStatus::Complete => {
                    success(format!(
                        "Report complete: {}",
                        jobs::artifact_path(cfg, &report_id).display()
                    ));
                }
                _ => {
                    let record = jobs::poll(&pool.conn, &report_id)?;
                    warning(format!(
                        "Report failed: {}",
                        record.error.unwrap_or_else(|| "unknown error".to_string())
                    ));
                }
            }
        }

        ReportAction::Status { id } => {
            let record = jobs::poll(&pool.conn, id)?;
            info(format!("Status: {}", record.status));
            info(format!("Created: {}", record.created_at));
            if let Some(done) = record.completed_at {
                info(format!("Completed: {done}"));
            }
            if let Some(rows) = record.row_count {
                info(format!("Rows: {rows}"));
            }
            if let Some(err) = record.error {
                warning(format!("Error: {err}"));
            }
        }

        ReportAction::Fetch {
            id,
            out,
            format,
            force,
        } => {
            let csv = jobs::fetch_csv(&pool.conn, id)?;
            let path = Path::new(out);
            ensure_writable(path, *force)?;
            match format {
                ExportFormat::Csv => fs::write(path, csv)?,
                ExportFormat::Json => {
                    let rows = parse_report_csv(&csv)?;
                    JsonFileSink::new(path).write_rows(&rows)?;
                }
            }
            notify_export_success("Report", path);
        }

        ReportAction::Run {
            out,
            at,
            format,
            force,
        } => {
            let reference = parse_reference(at)?;
            let (outcome, _) = jobs::generate(&mut pool, cfg, reference)?;

            let path = Path::new(out);
            ensure_writable(path, *force)?;
            let mut sink: Box<dyn ReportSink> = match format {
                ExportFormat::Csv => Box::new(CsvFileSink::new(path)),
                ExportFormat::Json => Box::new(JsonFileSink::new(path)),
            };
            sink.write_rows(&outcome.rows)?;

            if outcome.skipped_observations > 0 {
                warning(format!(
                    "{} observation rows skipped (bad timestamp or status)",
                    outcome.skipped_observations
                ));
            }
            for failure in &outcome.failures {
                warning(format!(
                    "store {} excluded: {}",
                    failure.store_id, failure.reason
                ));
            }
            info(format!(
                "{} rows, reference instant {}",
                outcome.rows.len(),
                outcome.reference.to_rfc3339()
            ));
            notify_export_success("Report", path);
        }
    }

    Ok(())
}

fn parse_reference(at: &Option<String>) -> AppResult<Option<DateTime<Utc>>> {
    match at {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| AppError::InvalidTimestamp(raw.clone())),
    }
}
