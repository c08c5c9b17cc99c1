//! Bulk CSV → SQLite loading of the three source datasets.
//!
//! Poll export timestamps arrive in several shapes, often with a trailing
//! " UTC" marker; they are normalized to RFC 3339 on the way in. Rows
//! that cannot be parsed are skipped and counted, never fatal.

use crate::db::log::splog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    HoursRow, StatusRow, TimezoneRow, insert_hours_row, insert_status_row, insert_timezone_row,
};
use crate::errors::AppResult;
use crate::models::Status;
use crate::utils::time::parse_utc_timestamp;
use std::path::Path;

/// Row counts from one ingest invocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestSummary {
    pub status_inserted: usize,
    pub status_skipped: usize,
    pub hours_inserted: usize,
    pub hours_skipped: usize,
    pub timezone_inserted: usize,
    pub timezone_skipped: usize,
}

/// Load store status polls. Each row's timestamp is normalized; rows with
/// an unparseable timestamp or an unknown status string are skipped.
pub fn ingest_status(pool: &mut DbPool, path: &Path) -> AppResult<(usize, usize)> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut inserted = 0usize;
    let mut skipped = 0usize;

    let tx = pool.conn.transaction()?;
    for result in rdr.deserialize::<StatusRow>() {
        let mut row = match result {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let ts = match parse_utc_timestamp(&row.timestamp_utc) {
            Some(ts) => ts,
            None => {
                skipped += 1;
                continue;
            }
        };
        if Status::from_db_str(row.status.trim()).is_none() {
            skipped += 1;
            continue;
        }
        row.timestamp_utc = ts.to_rfc3339();
        row.status = row.status.trim().to_string();
        insert_status_row(&tx, &row)?;
        inserted += 1;
    }
    splog(
        &tx,
        "ingest",
        "store_status",
        &format!("{inserted} rows inserted, {skipped} skipped"),
    )?;
    tx.commit()?;

    Ok((inserted, skipped))
}

/// Load weekly business hours. Structural validation (overlaps, start
/// after end) happens later at index construction; here only rows the
/// CSV reader cannot shape are skipped.
pub fn ingest_hours(pool: &mut DbPool, path: &Path) -> AppResult<(usize, usize)> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut inserted = 0usize;
    let mut skipped = 0usize;

    let tx = pool.conn.transaction()?;
    for result in rdr.deserialize::<HoursRow>() {
        match result {
            Ok(row) if (0..=6).contains(&row.day_of_week) => {
                insert_hours_row(&tx, &row)?;
                inserted += 1;
            }
            _ => skipped += 1,
        }
    }
    splog(
        &tx,
        "ingest",
        "business_hours",
        &format!("{inserted} rows inserted, {skipped} skipped"),
    )?;
    tx.commit()?;

    Ok((inserted, skipped))
}

/// Load store → timezone mappings (last row wins per store).
pub fn ingest_timezones(pool: &mut DbPool, path: &Path) -> AppResult<(usize, usize)> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut inserted = 0usize;
    let mut skipped = 0usize;

    let tx = pool.conn.transaction()?;
    for result in rdr.deserialize::<TimezoneRow>() {
        match result {
            Ok(row) => {
                insert_timezone_row(&tx, &row)?;
                inserted += 1;
            }
            Err(_) => skipped += 1,
        }
    }
    splog(
        &tx,
        "ingest",
        "store_timezone",
        &format!("{inserted} rows inserted, {skipped} skipped"),
    )?;
    tx.commit()?;

    Ok((inserted, skipped))
}

/// Ingest whichever of the three datasets were supplied.
pub fn ingest_all(
    pool: &mut DbPool,
    status: Option<&Path>,
    hours: Option<&Path>,
    timezones: Option<&Path>,
) -> AppResult<IngestSummary> {
    let mut summary = IngestSummary::default();

    if let Some(path) = status {
        (summary.status_inserted, summary.status_skipped) = ingest_status(pool, path)?;
    }
    if let Some(path) = hours {
        (summary.hours_inserted, summary.hours_skipped) = ingest_hours(pool, path)?;
    }
    if let Some(path) = timezones {
        (summary.timezone_inserted, summary.timezone_skipped) = ingest_timezones(pool, path)?;
    }

    Ok(summary)
}
