use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use std::ffi::OsString;
use std::path::Path;
use walkdir::WalkDir;

use crate::common::errors::BackupError;

/// A file picked for archiving
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    /// File name inside the source directory, exactly as stored on disk
    #[serde(skip)]
    pub file_name: OsString,

    /// Printable form of the name, for reports and logs
    pub name: String,

    /// Last modification time, local timezone
    pub modified_at: DateTime<Local>,

    pub size_bytes: u64,
}

impl FileRecord {
    pub fn new(
        file_name: impl Into<OsString>,
        modified_at: DateTime<Local>,
        size_bytes: u64,
    ) -> Self {
        let file_name = file_name.into();
        Self {
            name: file_name.to_string_lossy().to_string(),
            file_name,
            modified_at,
            size_bytes,
        }
    }

    /// Calendar day the file was last written
    pub fn modified_date(&self) -> NaiveDate {
        self.modified_at.date_naive()
    }
}

/// Files eligible for this run, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionResult {
    pub files: Vec<FileRecord>,
    pub total_size_bytes: u64,
}

impl SelectionResult {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// List the files of `dir` that should be archived.
///
/// Only direct children that are regular files (or symlinks to one), end
/// with `extension` and were last modified on a day other than `reference`
/// are kept. Files written on the reference day may still be in progress.
pub fn select_files(
    dir: &Path,
    extension: &str,
    reference: NaiveDate,
) -> Result<SelectionResult, BackupError> {
    let mut files = Vec::new();
    let mut total_size_bytes = 0u64;

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            BackupError::io(path, e.into())
        })?;

        if !entry.file_name().to_string_lossy().ends_with(extension) {
            continue;
        }

        // Follows symlinks, so a link to a dump is archived like the dump
        let metadata = match std::fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            Err(e) if entry.path_is_symlink() => {
                tracing::warn!(file = %entry.path().display(), error = %e, "skipping dangling symlink");
                continue;
            }
            Err(e) => return Err(BackupError::io(entry.path(), e)),
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata
            .modified()
            .map_err(|e| BackupError::io(entry.path(), e))?;
        let modified_at: DateTime<Local> = modified.into();

        let record = FileRecord::new(entry.file_name(), modified_at, metadata.len());
        if record.modified_date() == reference {
            tracing::debug!(file = %record.name, "skipping file written today");
            continue;
        }

        total_size_bytes += record.size_bytes;
        files.push(record);
    }

    // Directory order is OS-defined; name breaks timestamp ties
    files.sort_by(|a, b| {
        a.modified_at
            .cmp(&b.modified_at)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });

    Ok(SelectionResult {
        files,
        total_size_bytes,
    })
}
