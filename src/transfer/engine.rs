use chrono::{Datelike, NaiveDate, Weekday};
use filetime::FileTime;
use std::io;
use std::path::Path;

use super::outcome::{TransferOutcome, TransferStatus};
use crate::archive;
use crate::common::config::BackupDirs;
use crate::common::errors::BackupError;
use crate::common::format;
use crate::scanner::FileRecord;

/// Archive the selected files.
///
/// Weekday files are copied into the buffer first, then every file is
/// moved into its month directory. The loop stops at the first failure;
/// files already archived stay recorded in the outcome and the rest are
/// left untouched in the source directory.
pub fn transfer_files(
    files: &[FileRecord],
    dirs: &BackupDirs,
    reference: NaiveDate,
) -> TransferOutcome {
    let mut outcome = TransferOutcome::new(files.len());

    if let Err(e) = archive_files(files, dirs, reference, &mut outcome) {
        tracing::error!(error = %e, date = %reference, "file transfer aborted");
        outcome.fail(TransferStatus::GenericError, e.to_string());
    }

    tracing::info!(
        moved = outcome.moved_files.len(),
        requested = outcome.total_files_requested,
        size = %format::format_size(outcome.total_size_bytes),
        status = %outcome.status,
        "transfer finished"
    );
    for file in &outcome.moved_files {
        tracing::debug!(
            file = %file.name,
            modified = %file.modified_at,
            size = %format::format_size(file.size_bytes),
            "archived"
        );
    }

    outcome
}

fn archive_files(
    files: &[FileRecord],
    dirs: &BackupDirs,
    reference: NaiveDate,
    outcome: &mut TransferOutcome,
) -> Result<(), BackupError> {
    let archive = archive::resolve(&dirs.destination, reference)?;

    for file in files {
        let from = dirs.source.join(&file.file_name);
        let file_date = file.modified_date();

        if is_business_day(file_date) {
            let buffered = dirs.buffer.join(&file.file_name);
            copy_preserving_times(&from, &buffered).map_err(|e| BackupError::io(&buffered, e))?;
        }

        let month_dir = archive.month_dir_for(file_date, reference);
        if !month_dir.is_dir() {
            std::fs::create_dir_all(month_dir).map_err(|e| BackupError::io(month_dir, e))?;
            tracing::info!(dir = %month_dir.display(), "created archive directory");
        }

        match move_file(&from, &month_dir.join(&file.file_name)) {
            Ok(()) => outcome.record_moved(file.clone()),
            Err(source) => {
                let err = BackupError::FileTransfer {
                    name: file.name.clone(),
                    source,
                };
                tracing::error!(error = %err, date = %reference, "stopping transfer");
                outcome.fail(TransferStatus::FileError, err.to_string());
                break;
            }
        }
    }

    Ok(())
}

/// Monday to Friday
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Copy a file, carrying over permissions and access/modification times
pub fn copy_preserving_times(from: &Path, to: &Path) -> io::Result<()> {
    let metadata = std::fs::metadata(from)?;
    std::fs::copy(from, to)?;
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
}

/// Move a single file, falling back to copy + delete across filesystems
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if !from.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a file", from.display()),
        ));
    }

    // Try rename first (fast, same filesystem)
    match std::fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(e) if !is_cross_device(&e) => return Err(e),
        Err(_) => {}
    }

    let existed = to.exists();
    if let Err(e) = copy_preserving_times(from, to) {
        if !existed {
            let _ = std::fs::remove_file(to);
        }
        return Err(e);
    }
    std::fs::remove_file(from)
}

/// Whether a rename failed only because source and target sit on
/// different filesystems
fn is_cross_device(err: &io::Error) -> bool {
    #[cfg(unix)]
    const EXDEV: i32 = 18;
    #[cfg(windows)]
    const EXDEV: i32 = 17; // ERROR_NOT_SAME_DEVICE
    #[cfg(not(any(unix, windows)))]
    const EXDEV: i32 = -1;

    err.raw_os_error() == Some(EXDEV)
}
