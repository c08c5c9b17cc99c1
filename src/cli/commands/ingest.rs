use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ingest::ingest_all;
use crate::ui::messages::{success, warning};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ingest {
        status,
        hours,
        timezones,
    } = cmd
    {
        if status.is_none() && hours.is_none() && timezones.is_none() {
            warning("Nothing to ingest: pass --status, --hours and/or --timezones.");
            return Ok(());
        }

        let mut pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;

        let summary = ingest_all(
            &mut pool,
            status.as_deref().map(Path::new),
            hours.as_deref().map(Path::new),
            timezones.as_deref().map(Path::new),
        )?;

        if status.is_some() {
            success(format!(
                "store_status: {} rows ingested ({} skipped)",
                summary.status_inserted, summary.status_skipped
            ));
        }
        if hours.is_some() {
            success(format!(
                "business_hours: {} rows ingested ({} skipped)",
                summary.hours_inserted, summary.hours_skipped
            ));
        }
        if timezones.is_some() {
            success(format!(
                "store_timezone: {} rows ingested ({} skipped)",
                summary.timezone_inserted, summary.timezone_skipped
            ));
        }
    }
    Ok(())
}
