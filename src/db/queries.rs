//! Raw row types and SQL helpers for the three source tables and the
//! report job table. The raw structs double as the CSV ingest targets,
//! so their field names match both the table columns and the CSV headers.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result, params};
use serde::Deserialize;

/// One `store_status` row as stored (timestamps still text).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRow {
    pub store_id: String,
    pub timestamp_utc: String,
    pub status: String,
}

/// One `business_hours` row as stored (times still text).
#[derive(Debug, Clone, Deserialize)]
pub struct HoursRow {
    pub store_id: String,
    pub day_of_week: i64,
    pub start_time_local: String,
    pub end_time_local: String,
}

/// One `store_timezone` row.
#[derive(Debug, Clone, Deserialize)]
pub struct TimezoneRow {
    pub store_id: String,
    pub timezone_str: String,
}

// ---------------------------
// Source table reads
// ---------------------------

pub fn load_status_rows(conn: &Connection) -> Result<Vec<StatusRow>> {
    let mut stmt =
        conn.prepare_cached("SELECT store_id, timestamp_utc, status FROM store_status")?;
    let rows = stmt.query_map([], |row| {
        Ok(StatusRow {
            store_id: row.get(0)?,
            timestamp_utc: row.get(1)?,
            status: row.get(2)?,
        })
    })?;
    rows.collect()
}

pub fn load_hours_rows(conn: &Connection) -> Result<Vec<HoursRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT store_id, day_of_week, start_time_local, end_time_local FROM business_hours",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(HoursRow {
            store_id: row.get(0)?,
            day_of_week: row.get(1)?,
            start_time_local: row.get(2)?,
            end_time_local: row.get(3)?,
        })
    })?;
    rows.collect()
}

pub fn load_timezone_rows(conn: &Connection) -> Result<Vec<TimezoneRow>> {
    let mut stmt = conn.prepare_cached("SELECT store_id, timezone_str FROM store_timezone")?;
    let rows = stmt.query_map([], |row| {
        Ok(TimezoneRow {
            store_id: row.get(0)?,
            timezone_str: row.get(1)?,
        })
    })?;
    rows.collect()
}

// ---------------------------
// Source table writes (used by ingest, inside a transaction)
// ---------------------------

pub fn insert_status_row(conn: &Connection, row: &StatusRow) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO store_status (store_id, timestamp_utc, status) VALUES (?1, ?2, ?3)",
    )?;
    stmt.execute(params![row.store_id, row.timestamp_utc, row.status])?;
    Ok(())
}

pub fn insert_hours_row(conn: &Connection, row: &HoursRow) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO business_hours (store_id, day_of_week, start_time_local, end_time_local) \
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![
        row.store_id,
        row.day_of_week,
        row.start_time_local,
        row.end_time_local
    ])?;
    Ok(())
}

/// Upsert: at most one timezone row per store.
pub fn insert_timezone_row(conn: &Connection, row: &TimezoneRow) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO store_timezone (store_id, timezone_str) VALUES (?1, ?2) \
         ON CONFLICT(store_id) DO UPDATE SET timezone_str = excluded.timezone_str",
    )?;
    stmt.execute(params![row.store_id, row.timezone_str])?;
    Ok(())
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    // Table names come from a fixed internal set, never from user input.
    let sql = format!("SELECT COUNT(*) FROM {table}");
    conn.query_row(&sql, [], |r| r.get(0))
}

// ---------------------------
// Report job records
// ---------------------------

/// One row of the `reports` table.
#[derive(Debug, Clone)]
pub struct ReportRecord {
    pub report_id: String,
    pub status: String,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub error: Option<String>,
    pub row_count: Option<i64>,
    pub csv_data: Option<String>,
}

pub fn insert_running_report(conn: &Connection, report_id: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO reports (report_id, status, created_at) VALUES (?1, 'Running', ?2)",
        params![report_id, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn mark_report_complete(
    conn: &Connection,
    report_id: &str,
    csv_data: &str,
    row_count: i64,
) -> Result<()> {
    conn.execute(
        "UPDATE reports SET status = 'Complete', completed_at = ?1, row_count = ?2, \
         csv_data = ?3, error = NULL WHERE report_id = ?4",
        params![Utc::now().to_rfc3339(), row_count, csv_data, report_id],
    )?;
    Ok(())
}

pub fn mark_report_failed(conn: &Connection, report_id: &str, error: &str) -> Result<()> {
    conn.execute(
        "UPDATE reports SET status = 'Failed', completed_at = ?1, error = ?2 \
         WHERE report_id = ?3",
        params![Utc::now().to_rfc3339(), error, report_id],
    )?;
    Ok(())
}

pub fn get_report(conn: &Connection, report_id: &str) -> Result<Option<ReportRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT report_id, status, created_at, completed_at, error, row_count, csv_data \
         FROM reports WHERE report_id = ?1",
    )?;
    stmt.query_row([report_id], |row| {
        Ok(ReportRecord {
            report_id: row.get(0)?,
            status: row.get(1)?,
            created_at: row.get(2)?,
            completed_at: row.get(3)?,
            error: row.get(4)?,
            row_count: row.get(5)?,
            csv_data: row.get(6)?,
        })
    })
    .optional()
}
