use serde::Serialize;
use std::path::Path;

use crate::common::errors::BackupError;

/// Snapshot of the filesystem holding a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageInfo {
    pub total_bytes: u64,
    pub used_bytes: u64,
    /// Space available to this process
    pub free_bytes: u64,
}

/// Reports capacity for a directory
pub trait StorageProbe {
    fn probe(&self, path: &Path) -> Result<StorageInfo, BackupError>;
}

/// Queries the OS through `fs2`
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskProbe;

impl StorageProbe for DiskProbe {
    fn probe(&self, path: &Path) -> Result<StorageInfo, BackupError> {
        let total_bytes = fs2::total_space(path).map_err(|e| BackupError::io(path, e))?;
        let unreserved = fs2::free_space(path).map_err(|e| BackupError::io(path, e))?;
        let free_bytes = fs2::available_space(path).map_err(|e| BackupError::io(path, e))?;

        Ok(StorageInfo {
            total_bytes,
            used_bytes: total_bytes.saturating_sub(unreserved),
            free_bytes,
        })
    }
}
