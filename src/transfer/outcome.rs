use serde::Serialize;

use crate::scanner::FileRecord;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    /// Every selected file was archived
    Success,
    /// A file could not be moved; the rest were left in place
    FileError,
    /// The run stopped before touching any file
    PathError,
    /// Anything else went wrong mid-transfer
    GenericError,
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferStatus::Success => write!(f, "success"),
            TransferStatus::FileError => write!(f, "file_error"),
            TransferStatus::PathError => write!(f, "path_error"),
            TransferStatus::GenericError => write!(f, "generic_error"),
        }
    }
}

/// Result of one run, built up file by file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferOutcome {
    /// Archived files, in the order they were moved
    pub moved_files: Vec<FileRecord>,
    pub status: TransferStatus,
    pub error_message: Option<String>,
    /// Sum of the sizes of `moved_files`
    pub total_size_bytes: u64,
    /// Number of files selected for the run
    pub total_files_requested: usize,
}

impl TransferOutcome {
    /// Fresh outcome for `requested` selected files
    pub fn new(requested: usize) -> Self {
        Self {
            moved_files: Vec::new(),
            status: TransferStatus::Success,
            error_message: None,
            total_size_bytes: 0,
            total_files_requested: requested,
        }
    }

    /// Outcome of a run that stopped before any transfer
    pub fn path_error(message: impl Into<String>) -> Self {
        let mut outcome = Self::new(0);
        outcome.fail(TransferStatus::PathError, message);
        outcome
    }

    /// Record a successfully archived file
    pub fn record_moved(&mut self, file: FileRecord) {
        self.total_size_bytes += file.size_bytes;
        self.moved_files.push(file);
    }

    /// Mark the run as failed
    pub fn fail(&mut self, status: TransferStatus, message: impl Into<String>) {
        self.status = status;
        self.error_message = Some(message.into());
    }

    pub fn is_success(&self) -> bool {
        self.status == TransferStatus::Success
    }

    /// Selected files that were not archived
    pub fn files_left_behind(&self) -> usize {
        self.total_files_requested.saturating_sub(self.moved_files.len())
    }
}
