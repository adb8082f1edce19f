pub mod engine;
pub mod outcome;

pub use engine::{is_business_day, move_file, transfer_files};
pub use outcome::{TransferOutcome, TransferStatus};
