use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{run_pending_migrations, table_exists};
use crate::db::pool::DbPool;
use crate::db::queries::count_rows;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

const TABLES: [&str; 5] = [
    "store_status",
    "business_hours",
    "store_timezone",
    "reports",
    "log",
];

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        info: show_info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            run_pending_migrations(&pool.conn)?;
            success("Migrations up to date.");
        }

        if *check {
            let result: String =
                pool.conn
                    .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            if result != "ok" {
                return Err(AppError::Migration(format!("integrity check: {result}")));
            }
            for table in TABLES {
                if !table_exists(&pool.conn, table)? {
                    return Err(AppError::Migration(format!("missing table: {table}")));
                }
            }
            success("Database integrity OK.");
        }

        if *show_info {
            info(format!("Database: {}", cfg.database));
            for table in TABLES {
                info(format!("{table}: {} rows", count_rows(&pool.conn, table)?));
            }
        }
    }
    Ok(())
}
