pub mod selector;

pub use selector::{select_files, FileRecord, SelectionResult};
