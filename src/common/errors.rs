use std::path::PathBuf;

use thiserror::Error;

use crate::common::format::format_size;

/// Error types for backup operations.
/// We use `anyhow` at the top level for startup failures,
/// but these typed errors let each stage say exactly what went wrong.
#[derive(Debug, Error)]
pub enum BackupError {
    /// A configured directory does not exist
    #[error("The path '{}' does not exist", path.display())]
    PathNotFound { path: PathBuf },

    /// A configured path exists but is not a directory
    #[error("The path '{}' is not a directory", path.display())]
    PathNotDirectory { path: PathBuf },

    /// Destination or buffer cannot hold the selected files
    #[error(
        "The directory '{}' does not have enough free space ({} needed, {} available)",
        path.display(),
        format_size(*needed),
        format_size(*available)
    )]
    InsufficientCapacity {
        path: PathBuf,
        needed: u64,
        available: u64,
    },

    /// A single file could not be moved into the archive
    #[error("Failed to move '{name}' into the archive: {source}")]
    FileTransfer {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// File system operation failed
    #[error("I/O error at '{}': {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BackupError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BackupError::Io {
            path: path.into(),
            source,
        }
    }
}
