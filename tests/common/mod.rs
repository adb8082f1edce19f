#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, TimeZone};
use filetime::FileTime;
use tempfile::TempDir;

use weekly_backup::common::config::{BackupDirs, Config};
use weekly_backup::common::errors::BackupError;
use weekly_backup::notify::Notifier;
use weekly_backup::storage::{StorageInfo, StorageProbe};

/// Scratch source/destination/buffer directories
pub struct Workspace {
    pub root: TempDir,
    pub dirs: BackupDirs,
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let dirs = BackupDirs {
            source: root.path().join("source"),
            destination: root.path().join("destination"),
            buffer: root.path().join("buffer"),
        };
        for dir in dirs.all() {
            std::fs::create_dir_all(dir).unwrap();
        }
        Self { root, dirs }
    }

    /// Config for this workspace archiving `.txt` files on Mondays
    pub fn config(&self) -> Config {
        let mut config = Config::with_dirs(self.dirs.clone());
        config.extension = "txt".to_string();
        config
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Write `per_day` files for every day from `from` to `to` inclusive,
/// each stamped at midday (plus one minute per file) of its day.
pub fn seed_days(dir: &Path, from: NaiveDate, to: NaiveDate, per_day: u32) -> Vec<PathBuf> {
    let mut created = Vec::new();
    let mut date = from;
    while date <= to {
        for i in 1..=per_day {
            let name = format!("dump_{}_{}.txt", date.format("%Y%m%d"), i);
            let path = dir.join(&name);
            std::fs::write(&path, format!("This is the file {}", name)).unwrap();

            let ts = Local
                .from_local_datetime(&date.and_hms_opt(12, i, 0).unwrap())
                .single()
                .unwrap();
            filetime::set_file_mtime(&path, FileTime::from_unix_time(ts.timestamp(), 0)).unwrap();
            created.push(path);
        }
        date = date.succ_opt().unwrap();
    }
    created
}

pub fn count_files(dir: &Path) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .count(),
        Err(_) => 0,
    }
}

/// Probe reporting fixed free space, per path or a default
pub struct FixedProbe {
    pub free: HashMap<PathBuf, u64>,
    pub default_free: u64,
}

impl FixedProbe {
    pub fn roomy() -> Self {
        Self {
            free: HashMap::new(),
            default_free: u64::MAX / 2,
        }
    }

    pub fn with_free(path: &Path, free: u64) -> Self {
        let mut probe = Self::roomy();
        probe.free.insert(path.to_path_buf(), free);
        probe
    }
}

impl StorageProbe for FixedProbe {
    fn probe(&self, path: &Path) -> Result<StorageInfo, BackupError> {
        let free_bytes = self.free.get(path).copied().unwrap_or(self.default_free);
        Ok(StorageInfo {
            total_bytes: u64::MAX,
            used_bytes: u64::MAX - free_bytes,
            free_bytes,
        })
    }
}

/// Keeps every message instead of sending it
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: RefCell<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn send(&self, subject: &str, body: &str) -> anyhow::Result<()> {
        self.sent
            .borrow_mut()
            .push((subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Always fails to deliver
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send(&self, _subject: &str, _body: &str) -> anyhow::Result<()> {
        anyhow::bail!("SMTP relay unreachable")
    }
}
