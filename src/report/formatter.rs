use chrono::NaiveDate;
use std::fmt::Write;

use crate::common::format::{format_date, format_size};
use crate::transfer::{TransferOutcome, TransferStatus};

/// Subject line of the report email
pub fn subject(date: NaiveDate) -> String {
    format!("Weekly backup routine | ({})", format_date(date))
}

/// Render the outcome of a run as the plain-text report body
pub fn render(outcome: &TransferOutcome) -> String {
    let detail = outcome.error_message.as_deref().unwrap_or("unknown error");

    let mut body = match outcome.status {
        TransferStatus::PathError => {
            return format!("The weekly backup could not be performed.\n{}", detail);
        }
        TransferStatus::Success => "File transfer completed successfully.".to_string(),
        TransferStatus::FileError | TransferStatus::GenericError => {
            format!("A problem occurred while transferring files.\n{}", detail)
        }
    };

    body.push_str("\n\nTransfer details:\n");
    let _ = writeln!(body, "Files to transfer: {}", outcome.total_files_requested);
    let _ = writeln!(body, "Files transferred: {}", outcome.moved_files.len());
    let _ = writeln!(
        body,
        "Total storage used: {}",
        format_size(outcome.total_size_bytes)
    );
    body.push_str("\nTransferred files:\n");

    // One heading per day, files are already oldest first
    let mut current_date = None;
    for file in &outcome.moved_files {
        let date = file.modified_date();
        if current_date != Some(date) {
            let _ = writeln!(body, "\n({})", format_date(date));
            current_date = Some(date);
        }
        let _ = writeln!(body, "{} ({})", file.name, format_size(file.size_bytes));
    }

    body
}
