pub mod config;
pub mod errors;
pub mod format;
pub mod logging;

pub use config::{BackupDirs, Config, EmailSettings};
pub use errors::BackupError;
