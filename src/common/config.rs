use chrono::{Local, NaiveDate, Weekday};
use std::path::{Path, PathBuf};

use crate::cli::args::Cli;

/// The three directories a run works with
#[derive(Debug, Clone, PartialEq)]
pub struct BackupDirs {
    /// Where the files are produced
    pub source: PathBuf,
    /// Archive root holding <year>/<MONTH> directories
    pub destination: PathBuf,
    /// Staging area that receives copies of weekday files
    pub buffer: PathBuf,
}

impl BackupDirs {
    /// All three paths, in validation order
    pub fn all(&self) -> [&Path; 3] {
        [&self.source, &self.destination, &self.buffer]
    }
}

/// SMTP delivery settings for the report
#[derive(Clone, PartialEq)]
pub struct EmailSettings {
    pub from: String,
    pub to: String,
    pub password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl std::fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSettings")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("password", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

/// Run configuration, built once at startup and passed down by reference
#[derive(Debug, Clone)]
pub struct Config {
    pub dirs: BackupDirs,
    pub email: EmailSettings,

    /// File name suffix selecting the files to archive
    pub extension: String,

    /// Day of the week the routine is allowed to run
    pub run_weekday: Weekday,

    /// Fixed "today", when set
    pub reference_date: Option<NaiveDate>,

    pub log_file: PathBuf,
}

impl Config {
    /// Build the config from parsed arguments (values may come from the environment)
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            dirs: BackupDirs {
                source: cli.source.clone(),
                destination: cli.destination.clone(),
                buffer: cli.buffer.clone(),
            },
            email: EmailSettings {
                from: cli.from_email.clone(),
                to: cli.to_email.clone(),
                password: cli.email_password.clone(),
                smtp_host: cli.smtp_host.clone(),
                smtp_port: cli.smtp_port,
            },
            extension: cli.extension.clone(),
            run_weekday: cli.weekday,
            reference_date: cli.date,
            log_file: cli.log_file.clone(),
        }
    }

    /// Config with the stock defaults for everything but the directories
    pub fn with_dirs(dirs: BackupDirs) -> Self {
        Self {
            dirs,
            email: EmailSettings {
                from: String::new(),
                to: String::new(),
                password: String::new(),
                smtp_host: "smtp.gmail.com".to_string(),
                smtp_port: 465,
            },
            extension: "sql".to_string(),
            run_weekday: Weekday::Mon,
            reference_date: None,
            log_file: PathBuf::from("backup.log"),
        }
    }

    /// The date the run should behave as if it were
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "weekly-backup",
            "--source",
            "/data/dumps",
            "--destination",
            "/mnt/archive",
            "--buffer",
            "/mnt/buffer",
            "--from-email",
            "ops@example.com",
            "--to-email",
            "dba@example.com",
            "--email-password",
            "secret",
            "--date",
            "2024-02-26",
        ])
        .unwrap();

        let config = Config::from_cli(&cli);
        assert_eq!(config.dirs.source, PathBuf::from("/data/dumps"));
        assert_eq!(config.dirs.all()[1], Path::new("/mnt/archive"));
        assert_eq!(config.email.to, "dba@example.com");
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let mut config = Config::with_dirs(BackupDirs {
            source: "/a".into(),
            destination: "/b".into(),
            buffer: "/c".into(),
        });
        config.email.password = "hunter2".to_string();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
