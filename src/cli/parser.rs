use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for storepulse
#[derive(Parser)]
#[command(
    name = "storepulse",
    version = env!("CARGO_PKG_VERSION"),
    about = "Ingest store status polls and generate uptime/downtime reports over business hours",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Load source CSV files into the database
    Ingest {
        /// Store status polls CSV (store_id, timestamp_utc, status)
        #[arg(long, value_name = "FILE")]
        status: Option<String>,

        /// Business hours CSV (store_id, day_of_week, start_time_local, end_time_local)
        #[arg(long, value_name = "FILE")]
        hours: Option<String>,

        /// Store timezone CSV (store_id, timezone_str)
        #[arg(long, value_name = "FILE")]
        timezones: Option<String>,
    },

    /// Generate and inspect uptime reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print rows from the internal audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, default_value_t = 50, help = "Maximum rows to print")]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Register a report job, run it, and print the job id
    Trigger {
        /// Reference instant (RFC 3339); defaults to the latest poll timestamp
        #[arg(long = "at", value_name = "TIMESTAMP")]
        at: Option<String>,
    },

    /// Poll a report job's status
    Status {
        #[arg(long)]
        id: String,
    },

    /// Write a completed report's stored artifact to a file
    Fetch {
        #[arg(long)]
        id: String,

        #[arg(long, value_name = "FILE")]
        out: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// One-shot: compute a report and write it straight to a file
    Run {
        #[arg(long, value_name = "FILE")]
        out: String,

        /// Reference instant (RFC 3339); defaults to the latest poll timestamp
        #[arg(long = "at", value_name = "TIMESTAMP")]
        at: Option<String>,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
