use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

use crate::common::errors::BackupError;

/// Month directory names used by the archive, January first
pub const MONTH_NAMES: [&str; 12] = [
    "JANEIRO",
    "FEVEREIRO",
    "MARCO",
    "ABRIL",
    "MAIO",
    "JUNHO",
    "JULHO",
    "AGOSTO",
    "SETEMBRO",
    "OUTUBRO",
    "NOVEMBRO",
    "DEZEMBRO",
];

/// Directory name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// Archive directories relevant to one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePaths {
    /// `<root>/<year>`
    pub year_dir: PathBuf,
    /// `<root>/<year>/<MONTH>`
    pub current_month_dir: PathBuf,
    /// Month before the reference month; previous year's DEZEMBRO in January
    pub previous_month_dir: PathBuf,
}

impl ArchivePaths {
    /// Compute the paths without touching the filesystem
    pub fn for_date(root: &Path, reference: NaiveDate) -> Self {
        let year_dir = root.join(reference.year().to_string());
        let current_month_dir = year_dir.join(month_name(reference.month()));

        let previous_month_dir = if reference.month() == 1 {
            root.join((reference.year() - 1).to_string())
                .join(month_name(12))
        } else {
            year_dir.join(month_name(reference.month() - 1))
        };

        Self {
            year_dir,
            current_month_dir,
            previous_month_dir,
        }
    }

    /// Where a file last modified on `file_date` is archived
    pub fn month_dir_for(&self, file_date: NaiveDate, reference: NaiveDate) -> &Path {
        if file_date.year() == reference.year() && file_date.month() == reference.month() {
            &self.current_month_dir
        } else {
            &self.previous_month_dir
        }
    }
}

/// Resolve the archive layout for `reference` and make sure the year and
/// current-month directories exist. The previous-month directory is only
/// created when a file is actually routed there.
pub fn resolve(root: &Path, reference: NaiveDate) -> Result<ArchivePaths, BackupError> {
    let paths = ArchivePaths::for_date(root, reference);

    for dir in [&paths.year_dir, &paths.current_month_dir] {
        if !dir.is_dir() {
            std::fs::create_dir_all(dir).map_err(|e| BackupError::io(dir, e))?;
            tracing::info!(dir = %dir.display(), "created archive directory");
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "JANEIRO");
        assert_eq!(month_name(2), "FEVEREIRO");
        assert_eq!(month_name(12), "DEZEMBRO");
    }

    #[test]
    fn test_paths_mid_year() {
        let paths = ArchivePaths::for_date(Path::new("/archive"), day(2024, 2, 26));
        assert_eq!(paths.year_dir, PathBuf::from("/archive/2024"));
        assert_eq!(paths.current_month_dir, PathBuf::from("/archive/2024/FEVEREIRO"));
        assert_eq!(paths.previous_month_dir, PathBuf::from("/archive/2024/JANEIRO"));
    }

    #[test]
    fn test_january_previous_month_is_last_year() {
        let paths = ArchivePaths::for_date(Path::new("/archive"), day(2024, 1, 8));
        assert_eq!(paths.current_month_dir, PathBuf::from("/archive/2024/JANEIRO"));
        assert_eq!(paths.previous_month_dir, PathBuf::from("/archive/2023/DEZEMBRO"));
    }

    #[test]
    fn test_month_routing() {
        let reference = day(2024, 3, 4);
        let paths = ArchivePaths::for_date(Path::new("/archive"), reference);
        assert_eq!(paths.month_dir_for(day(2024, 3, 1), reference), paths.current_month_dir);
        assert_eq!(paths.month_dir_for(day(2024, 2, 29), reference), paths.previous_month_dir);
    }

    #[test]
    fn test_resolve_creates_year_and_current_month_only() {
        let root = TempDir::new().unwrap();
        let paths = resolve(root.path(), day(2024, 2, 26)).unwrap();
        assert!(paths.year_dir.is_dir());
        assert!(paths.current_month_dir.is_dir());
        assert!(!paths.previous_month_dir.exists());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let root = TempDir::new().unwrap();
        let first = resolve(root.path(), day(2024, 2, 26)).unwrap();
        let second = resolve(root.path(), day(2024, 2, 26)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_fails_when_year_is_a_file() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("2024"), "not a dir").unwrap();
        let err = resolve(root.path(), day(2024, 2, 26)).unwrap_err();
        assert!(matches!(err, BackupError::Io { .. }));
    }
}
