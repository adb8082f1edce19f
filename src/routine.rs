//! One run of the weekly backup, from weekday guard to report.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::cell::Cell;

use crate::common::config::Config;
use crate::common::errors::BackupError;
use crate::notify::Notifier;
use crate::report;
use crate::scanner::{self, SelectionResult};
use crate::storage::StorageProbe;
use crate::transfer::{self, TransferOutcome};

/// Stages of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    ValidatingPaths,
    ProbingStorage,
    Selecting,
    CapacityCheck,
    Transferring,
    Failed,
    Reporting,
    Done,
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RunSummary {
    /// Not the designated weekday; nothing was touched
    Skipped { date: NaiveDate, weekday: Weekday },
    /// The routine ran and a report was sent (or attempted)
    Completed {
        outcome: TransferOutcome,
        notified: bool,
    },
}

/// Drives one backup run with injectable storage and notification
pub struct Routine<'a, P, N> {
    config: &'a Config,
    probe: P,
    notifier: N,
    state: Cell<RunState>,
}

impl<'a, P: StorageProbe, N: Notifier> Routine<'a, P, N> {
    pub fn new(config: &'a Config, probe: P, notifier: N) -> Self {
        Self {
            config,
            probe,
            notifier,
            state: Cell::new(RunState::Idle),
        }
    }

    /// Current stage
    pub fn state(&self) -> RunState {
        self.state.get()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run the routine as if `today` were the current date
    pub fn run(&self, today: NaiveDate) -> RunSummary {
        if today.weekday() != self.config.run_weekday {
            tracing::info!(
                %today,
                weekday = %today.weekday(),
                scheduled = %self.config.run_weekday,
                "not the scheduled weekday, skipping"
            );
            self.enter(RunState::Done);
            return RunSummary::Skipped {
                date: today,
                weekday: today.weekday(),
            };
        }

        let outcome = match self.prepare(today) {
            Ok(selection) => {
                self.enter(RunState::Transferring);
                let outcome =
                    transfer::transfer_files(&selection.files, &self.config.dirs, today);
                if !outcome.is_success() {
                    self.enter(RunState::Failed);
                }
                outcome
            }
            Err(e) => {
                tracing::error!(error = %e, %today, "backup could not start");
                self.enter(RunState::Failed);
                TransferOutcome::path_error(e.to_string())
            }
        };

        self.enter(RunState::Reporting);
        let notified = self.notify(today, &outcome);
        self.enter(RunState::Done);

        RunSummary::Completed { outcome, notified }
    }

    /// Everything up to the transfer: validation, probing, selection, capacity
    fn prepare(&self, today: NaiveDate) -> Result<SelectionResult, BackupError> {
        let dirs = &self.config.dirs;

        self.enter(RunState::ValidatingPaths);
        for path in dirs.all() {
            if !path.exists() {
                return Err(BackupError::PathNotFound {
                    path: path.to_path_buf(),
                });
            }
            if !path.is_dir() {
                return Err(BackupError::PathNotDirectory {
                    path: path.to_path_buf(),
                });
            }
        }

        self.enter(RunState::ProbingStorage);
        let destination = self.probe.probe(&dirs.destination)?;
        let buffer = self.probe.probe(&dirs.buffer)?;

        self.enter(RunState::Selecting);
        let selection = scanner::select_files(&dirs.source, &self.config.extension, today)?;
        tracing::info!(
            files = selection.files.len(),
            bytes = selection.total_size_bytes,
            "files selected"
        );
        if selection.is_empty() {
            tracing::info!(dir = %dirs.source.display(), "nothing to archive this week");
        }

        self.enter(RunState::CapacityCheck);
        if selection.total_size_bytes > destination.free_bytes {
            return Err(BackupError::InsufficientCapacity {
                path: dirs.destination.clone(),
                needed: selection.total_size_bytes,
                available: destination.free_bytes,
            });
        }
        if selection.total_size_bytes > buffer.free_bytes {
            return Err(BackupError::InsufficientCapacity {
                path: dirs.buffer.clone(),
                needed: selection.total_size_bytes,
                available: buffer.free_bytes,
            });
        }

        Ok(selection)
    }

    fn notify(&self, today: NaiveDate, outcome: &TransferOutcome) -> bool {
        let subject = report::subject(today);
        let body = report::render(outcome);

        match self.notifier.send(&subject, &body) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), %today, "report could not be sent");
                false
            }
        }
    }

    fn enter(&self, next: RunState) {
        tracing::debug!(from = ?self.state.get(), to = ?next, "state");
        self.state.set(next);
    }
}
