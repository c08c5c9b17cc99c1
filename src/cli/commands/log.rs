use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::list_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print, limit } = cmd
        && *print
    {
        let pool = DbPool::new(&cfg.database)?;
        for row in list_log(&pool.conn, *limit)? {
            info(format!(
                "[{}] {} {} {}",
                row.date, row.operation, row.target, row.message
            ));
        }
    }
    Ok(())
}
