use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the audit `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Ensure the three source tables fed by ingestion exist.
fn ensure_source_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS store_status (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id      TEXT NOT NULL,
            timestamp_utc TEXT NOT NULL,
            status        TEXT NOT NULL CHECK(status IN ('active','inactive'))
        );

        CREATE TABLE IF NOT EXISTS business_hours (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id         TEXT NOT NULL,
            day_of_week      INTEGER NOT NULL CHECK(day_of_week BETWEEN 0 AND 6),
            start_time_local TEXT NOT NULL,
            end_time_local   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS store_timezone (
            store_id     TEXT PRIMARY KEY,
            timezone_str TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_status_store_ts
            ON store_status(store_id, timestamp_utc);
        CREATE INDEX IF NOT EXISTS idx_hours_store_day
            ON business_hours(store_id, day_of_week);
        "#,
    )?;
    Ok(())
}

/// Ensure the report job table exists.
fn ensure_reports_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reports (
            report_id    TEXT PRIMARY KEY,
            status       TEXT NOT NULL CHECK(status IN ('Running','Complete','Failed')),
            created_at   TEXT NOT NULL,
            completed_at TEXT,
            error        TEXT,
            row_count    INTEGER,
            csv_data     TEXT
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists (used by `db check`).
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name = ?1")?;
    let found: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(found.is_some())
}

/// Bring the schema up to date. Safe to call repeatedly.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    ensure_source_tables(conn)?;
    ensure_reports_table(conn)?;
    Ok(())
}
