//! # weekly-backup
//!
//! A scheduled weekly archive routine for generated files such as
//! database dumps.
//!
//! On the scheduled weekday it:
//!
//! - **Selects** files in the source directory with the configured suffix,
//!   skipping anything written today
//! - **Buffers** a copy of every file written Monday to Friday
//! - **Archives** every selected file into `<destination>/<year>/<MONTH>`
//! - **Reports** the outcome by email, including partial progress when a
//!   transfer stops early
//!
//! Capacity of the destination and buffer is checked before any file is
//! touched.

pub mod archive;
pub mod cli;
pub mod common;
pub mod notify;
pub mod report;
pub mod routine;
pub mod scanner;
pub mod storage;
pub mod transfer;
