//! Ferrybox to CSV converter library
//!
//! Converts per-instrument Ferrybox sensor exports into one merged,
//! time-aligned CSV file per date.
//!
//! This library provides tools for:
//! - Validating the input folder layout (flat files or one level of folders)
//! - Grouping instrument files by the date token in their names
//! - Skipping the variable-length preamble of each file
//! - Loading one measurement series (plus ship position) per file
//! - Outer-joining all series of a date on their timestamps
//! - Writing column-ordered CSV output

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod header;
pub mod models;
pub mod processor;

// Re-export commonly used types
pub use config::ConvertConfig;
pub use error::{FerryboxError, Result};
pub use models::{DateTable, DateToken, InputLayout, ProcessingStats, RawFile, SeriesTable};
pub use processor::DatasetProcessor;
