mod common;

use common::{setup_test_db, temp_out};
use std::fs;
use std::path::Path;
use storepulse::db::initialize::init_db;
use storepulse::db::pool::DbPool;
use storepulse::db::queries;
use storepulse::ingest::ingest_all;

fn write_fixture(name: &str, contents: &str) -> String {
    let path = temp_out(name, "csv");
    fs::write(&path, contents).expect("write fixture csv");
    path
}

fn open_pool(name: &str) -> DbPool {
    let pool = DbPool::new(&setup_test_db(name)).expect("open db");
    init_db(&pool.conn).expect("init schema");
    pool
}

#[test]
fn ingest_loads_all_three_datasets() {
    let mut pool = open_pool("ingest_all");

    let status = write_fixture(
        "ingest_status",
        "store_id,status,timestamp_utc\n\
         s1,active,2023-01-25 10:00:00.123456 UTC\n\
         s1,inactive,2023-01-25 11:00:00 UTC\n",
    );
    let hours = write_fixture(
        "ingest_hours",
        "store_id,day_of_week,start_time_local,end_time_local\n\
         s1,0,09:00:00,17:00:00\n",
    );
    let timezones = write_fixture(
        "ingest_tz",
        "store_id,timezone_str\ns1,America/New_York\n",
    );

    let summary = ingest_all(
        &mut pool,
        Some(Path::new(&status)),
        Some(Path::new(&hours)),
        Some(Path::new(&timezones)),
    )
    .expect("ingest");

    assert_eq!(summary.status_inserted, 2);
    assert_eq!(summary.status_skipped, 0);
    assert_eq!(summary.hours_inserted, 1);
    assert_eq!(summary.timezone_inserted, 1);

    // Timestamps are normalized to RFC 3339 on the way in.
    let rows = queries::load_status_rows(&pool.conn).expect("load");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.timestamp_utc.contains('T')));
}

#[test]
fn bad_rows_are_skipped_and_counted() {
    let mut pool = open_pool("ingest_skip");

    let status = write_fixture(
        "ingest_bad_status",
        "store_id,status,timestamp_utc\n\
         s1,active,2023-01-25 10:00:00 UTC\n\
         s1,active,yesterday-ish\n\
         s1,sleeping,2023-01-25 11:00:00 UTC\n",
    );
    let hours = write_fixture(
        "ingest_bad_hours",
        "store_id,day_of_week,start_time_local,end_time_local\n\
         s1,0,09:00:00,17:00:00\n\
         s1,9,09:00:00,17:00:00\n",
    );

    let summary = ingest_all(
        &mut pool,
        Some(Path::new(&status)),
        Some(Path::new(&hours)),
        None,
    )
    .expect("ingest");

    assert_eq!(summary.status_inserted, 1);
    assert_eq!(summary.status_skipped, 2);
    assert_eq!(summary.hours_inserted, 1);
    assert_eq!(summary.hours_skipped, 1);
}

#[test]
fn timezone_ingest_upserts_per_store() {
    let mut pool = open_pool("ingest_upsert");

    let timezones = write_fixture(
        "ingest_tz_twice",
        "store_id,timezone_str\n\
         s1,America/Chicago\n\
         s1,America/Denver\n",
    );
    ingest_all(&mut pool, None, None, Some(Path::new(&timezones))).expect("ingest");

    let rows = queries::load_timezone_rows(&pool.conn).expect("load");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].timezone_str, "America/Denver");
}

#[test]
fn ingest_writes_audit_log_entries() {
    let mut pool = open_pool("ingest_log");

    let status = write_fixture(
        "ingest_logged",
        "store_id,status,timestamp_utc\ns1,active,2023-01-25 10:00:00 UTC\n",
    );
    ingest_all(&mut pool, Some(Path::new(&status)), None, None).expect("ingest");

    let log = storepulse::db::log::list_log(&pool.conn, 10).expect("log");
    assert!(log.iter().any(|row| row.operation == "ingest" && row.target == "store_status"));
}
