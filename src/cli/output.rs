use colored::*;

use crate::common::format::{format_count, format_size_colored};
use crate::routine::RunSummary;
use crate::transfer::TransferStatus;

/// Print a one-line summary of the run in human-readable format
pub fn print_summary(summary: &RunSummary) {
    match summary {
        RunSummary::Skipped { date, weekday } => {
            println!(
                "  {} {} is a {}, skipping the weekly backup",
                "○".dimmed(),
                date,
                weekday
            );
        }
        RunSummary::Completed { outcome, notified } => {
            let moved = format!(
                "{} of {} archived ({})",
                format_count(outcome.moved_files.len()),
                outcome.total_files_requested,
                format_size_colored(outcome.total_size_bytes)
            );

            match outcome.status {
                TransferStatus::Success => {
                    println!("  {} {}", "✔".green(), moved);
                }
                TransferStatus::PathError => {
                    println!(
                        "  {} {}",
                        "✘".red().bold(),
                        outcome.error_message.as_deref().unwrap_or("backup not started")
                    );
                }
                TransferStatus::FileError | TransferStatus::GenericError => {
                    println!("  {} {}", "✘".red().bold(), moved);
                    if let Some(ref msg) = outcome.error_message {
                        println!("    {}", msg.red());
                    }
                    let left = outcome.files_left_behind();
                    if left > 0 {
                        println!(
                            "    {} left in the source directory",
                            format_count(left).yellow()
                        );
                    }
                }
            }

            if !notified {
                println!("  {} report email could not be sent, see the log", "!".yellow());
            }
        }
    }
}

/// Print the summary as JSON
pub fn print_summary_json(summary: &RunSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize summary: {}", e),
    }
}
