pub mod probe;

pub use probe::{DiskProbe, StorageInfo, StorageProbe};
