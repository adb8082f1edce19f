pub mod resolver;

pub use resolver::{month_name, resolve, ArchivePaths, MONTH_NAMES};
