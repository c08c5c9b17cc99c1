//! Report job records and the submit-and-poll queue.
//!
//! A job row is inserted with status `Running` and a fresh id before any
//! computation starts; completion is observed by polling that row. Jobs
//! run on a single bounded queue worker (never one thread per request),
//! each opening its own SQLite connection.

use crate::config::Config;
use crate::core::{BusinessHoursIndex, ObservationSeries, ReportAssembler, RunOutcome, TimezoneResolver};
use crate::db::log::splog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    self, ReportRecord, insert_running_report, mark_report_complete, mark_report_failed,
};
use crate::errors::{AppError, AppResult};
use crate::export::render_report_csv;
use crate::ui::messages::error;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{SyncSender, sync_channel};
use std::thread::{self, JoinHandle};
use uuid::Uuid;

/// Lifecycle of a report job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Complete,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Running => "Running",
            JobStatus::Complete => "Complete",
            JobStatus::Failed => "Failed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Running" => Some(JobStatus::Running),
            "Complete" => Some(JobStatus::Complete),
            "Failed" => Some(JobStatus::Failed),
            _ => None,
        }
    }
}

/// Build the lookup tables from the source tables and run the assembler.
/// Returns the outcome together with the rendered CSV artifact.
pub fn generate(
    pool: &mut DbPool,
    cfg: &Config,
    reference: Option<DateTime<Utc>>,
) -> AppResult<(RunOutcome, String)> {
    let default_zone: Tz = cfg
        .default_timezone
        .parse()
        .map_err(|_| AppError::Config(format!("unknown default timezone: {}", cfg.default_timezone)))?;

    let status_rows = queries::load_status_rows(&pool.conn)?;
    let hours_rows = queries::load_hours_rows(&pool.conn)?;
    let tz_rows = queries::load_timezone_rows(&pool.conn)?;

    let series = ObservationSeries::from_rows(status_rows);
    let (hours, rejected) = BusinessHoursIndex::build(&hours_rows);
    let resolver = TimezoneResolver::from_rows(&tz_rows, default_zone);

    let assembler = ReportAssembler::new(series, hours, rejected, resolver, cfg.worker_threads);
    let outcome = assembler.run(reference)?;

    for failure in &outcome.failures {
        splog(
            &pool.conn,
            "report_store_failed",
            &failure.store_id,
            &failure.reason,
        )?;
    }

    let csv = render_report_csv(&outcome.rows)?;
    Ok((outcome, csv))
}

/// Execute an already-registered job and record its terminal status.
/// Returns the number of rows produced; the error path marks the job
/// `Failed` before re-surfacing the error.
pub fn run_job(
    pool: &mut DbPool,
    cfg: &Config,
    report_id: &str,
    reference: Option<DateTime<Utc>>,
) -> AppResult<usize> {
    match generate(pool, cfg, reference) {
        Ok((outcome, csv)) => {
            let artifact = artifact_path(cfg, report_id);
            if let Some(parent) = artifact.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&artifact, &csv)?;

            mark_report_complete(&pool.conn, report_id, &csv, outcome.rows.len() as i64)?;
            splog(
                &pool.conn,
                "report_complete",
                report_id,
                &format!(
                    "{} rows, {} stores failed, {} observations skipped, reference {}",
                    outcome.rows.len(),
                    outcome.failures.len(),
                    outcome.skipped_observations,
                    outcome.reference.to_rfc3339()
                ),
            )?;
            Ok(outcome.rows.len())
        }
        Err(e) => {
            mark_report_failed(&pool.conn, report_id, &e.to_string())?;
            splog(&pool.conn, "report_failed", report_id, &e.to_string())?;
            Err(e)
        }
    }
}

/// Register and run a job in one call (the synchronous CLI path).
/// Always returns the job id together with its terminal status; the
/// failure detail lives on the job record.
pub fn trigger(
    pool: &mut DbPool,
    cfg: &Config,
    reference: Option<DateTime<Utc>>,
) -> AppResult<(String, JobStatus)> {
    let report_id = Uuid::new_v4().to_string();
    insert_running_report(&pool.conn, &report_id)?;

    match run_job(pool, cfg, &report_id, reference) {
        Ok(_) => Ok((report_id, JobStatus::Complete)),
        Err(_) => Ok((report_id, JobStatus::Failed)),
    }
}

/// Look up a job record.
pub fn poll(conn: &Connection, report_id: &str) -> AppResult<ReportRecord> {
    queries::get_report(conn, report_id)?
        .ok_or_else(|| AppError::UnknownReport(report_id.to_string()))
}

/// The stored CSV artifact of a completed job.
pub fn fetch_csv(conn: &Connection, report_id: &str) -> AppResult<String> {
    let record = poll(conn, report_id)?;
    match record.csv_data {
        Some(csv) if record.status == JobStatus::Complete.as_str() => Ok(csv),
        _ => Err(AppError::ReportNotReady {
            id: report_id.to_string(),
            status: record.status,
        }),
    }
}

pub fn artifact_path(cfg: &Config, report_id: &str) -> PathBuf {
    PathBuf::from(&cfg.reports_dir).join(format!("report_{report_id}.csv"))
}

enum JobRequest {
    Run {
        report_id: String,
        reference: Option<DateTime<Utc>>,
    },
    Shutdown,
}

/// Background queue for report jobs: submit returns an id immediately,
/// completion is observed by polling the job record. One worker drains
/// the queue; the channel bound applies backpressure to submitters.
pub struct JobRunner {
    tx: SyncSender<JobRequest>,
    handle: Option<JoinHandle<()>>,
}

impl JobRunner {
    pub fn start(db_path: String, cfg: Config, queue_depth: usize) -> Self {
        let (tx, rx) = sync_channel::<JobRequest>(queue_depth.max(1));

        let handle = thread::spawn(move || {
            while let Ok(request) = rx.recv() {
                match request {
                    JobRequest::Run {
                        report_id,
                        reference,
                    } => {
                        // The job row carries the failure detail, so the
                        // worker just records it and moves on.
                        match DbPool::new(&db_path) {
                            Ok(mut pool) => {
                                let _ = run_job(&mut pool, &cfg, &report_id, reference);
                            }
                            Err(e) => {
                                // Without a connection the row cannot be
                                // marked Failed; leave a trace on stderr.
                                error(format!(
                                    "report job {report_id}: cannot open database: {e}"
                                ));
                            }
                        }
                    }
                    JobRequest::Shutdown => break,
                }
            }
        });

        Self {
            tx,
            handle: Some(handle),
        }
    }

    /// Register a Running job row and queue it for generation.
    pub fn submit(
        &self,
        conn: &Connection,
        reference: Option<DateTime<Utc>>,
    ) -> AppResult<String> {
        let report_id = Uuid::new_v4().to_string();
        insert_running_report(conn, &report_id)?;

        self.tx
            .send(JobRequest::Run {
                report_id: report_id.clone(),
                reference,
            })
            .map_err(|_| AppError::Other("job runner has stopped".to_string()))?;

        Ok(report_id)
    }

    /// Drain remaining jobs and stop the worker.
    pub fn shutdown(mut self) {
        let _ = self.tx.send(JobRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
