use chrono::{NaiveDate, Weekday};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// weekly-backup — buffer, archive and report on the week's files
#[derive(Parser, Debug)]
#[command(
    name = "weekly-backup",
    version,
    about = "Weekly archive routine for database dumps and other generated files",
    long_about = "Moves the week's files from a source directory into a <year>/<MONTH>\n\
                  archive, keeps a copy of weekday files in a buffer directory and\n\
                  emails a report. Every setting can come from the environment or a .env file.",
    after_help = "EXAMPLES:\n  \
        weekly-backup                                  Run with settings from .env\n  \
        weekly-backup --date 2024-02-26                Run as if today were 2024-02-26\n  \
        weekly-backup --extension txt --format json    Archive .txt files, JSON summary"
)]
pub struct Cli {
    /// Directory holding the files to archive
    #[arg(long, env = "FROMPATH", value_name = "DIR")]
    pub source: PathBuf,

    /// Archive root; files land in <DIR>/<year>/<MONTH>
    #[arg(long, env = "TOPATH", value_name = "DIR")]
    pub destination: PathBuf,

    /// Buffer directory receiving copies of weekday files
    #[arg(long, env = "BUFFER", value_name = "DIR")]
    pub buffer: PathBuf,

    /// Sender address, also used as the SMTP login
    #[arg(long, env = "FROM_EMAIL", value_name = "ADDRESS")]
    pub from_email: String,

    /// Recipient of the report
    #[arg(long, env = "TO_EMAIL", value_name = "ADDRESS")]
    pub to_email: String,

    /// SMTP credential for the sender address
    #[arg(long, env = "PASSWORD_EMAIL", hide_env_values = true, value_name = "SECRET")]
    pub email_password: String,

    /// Only files whose name ends with this suffix are archived
    #[arg(long, env = "BACKUP_EXTENSION", default_value = "sql")]
    pub extension: String,

    /// The routine only runs on this day of the week
    #[arg(long, env = "BACKUP_WEEKDAY", default_value = "monday", value_parser = parse_weekday)]
    pub weekday: Weekday,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, env = "BACKUP_DATE", value_name = "DATE", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// File receiving the log lines
    #[arg(long, env = "BACKUP_LOG_FILE", default_value = "backup.log", value_name = "FILE")]
    pub log_file: PathBuf,

    /// SMTP relay (implicit TLS)
    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value = "465")]
    pub smtp_port: u16,

    /// Output format of the final summary
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

fn parse_weekday(s: &str) -> Result<Weekday, String> {
    s.parse::<Weekday>()
        .map_err(|_| format!("'{}' is not a day of the week (e.g. monday, tue)", s))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("'{}' is not a YYYY-MM-DD date: {}", s, e))
}
