#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Utc};
use std::env;
use std::fs;
use std::path::PathBuf;
use storepulse::db::queries::{HoursRow, StatusRow, TimezoneRow};

pub fn sp() -> Command {
    cargo_bin_cmd!("storepulse")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_storepulse.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Create a temporary reports directory path
pub fn temp_reports_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_storepulse_reports", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_dir_all(&p).ok();
    p
}

pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC 3339 fixture timestamp")
        .with_timezone(&Utc)
}

pub fn status_row(store_id: &str, timestamp_utc: &str, status: &str) -> StatusRow {
    StatusRow {
        store_id: store_id.to_string(),
        timestamp_utc: timestamp_utc.to_string(),
        status: status.to_string(),
    }
}

pub fn hours_row(store_id: &str, day_of_week: i64, start: &str, end: &str) -> HoursRow {
    HoursRow {
        store_id: store_id.to_string(),
        day_of_week,
        start_time_local: start.to_string(),
        end_time_local: end.to_string(),
    }
}

pub fn timezone_row(store_id: &str, timezone_str: &str) -> TimezoneRow {
    TimezoneRow {
        store_id: store_id.to_string(),
        timezone_str: timezone_str.to_string(),
    }
}
