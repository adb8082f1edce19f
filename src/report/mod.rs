pub mod formatter;

pub use formatter::{render, subject};
