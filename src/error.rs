//! Error handling for Ferrybox conversion.
//!
//! Every variant is fatal for the run: the processor stops at the first
//! error and reports the offending path.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FerryboxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input folder not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Input folder must contain all files or all folders: {path}")]
    MixedLayout { path: PathBuf },

    #[error("Found sub-folder \"{path}\" - subfolders are not allowed")]
    NestedFolder { path: PathBuf },

    #[error("Cannot extract date from file name: {path} - {reason}")]
    InvalidFilename { path: PathBuf, reason: String },

    #[error("Invalid search pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Directory traversal error: {0}")]
    DirectoryTraversal(#[from] walkdir::Error),

    #[error("Failed to read header from {path}: no line contains '{marker}'")]
    NoHeaderMarker { path: PathBuf, marker: String },

    #[error("Invalid Ferrybox format in file: {path} - {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("No variable column in file: {path} (found {found} column(s))")]
    MissingVariableColumn { path: PathBuf, found: usize },

    #[error("Failed to parse data in file: {path} - {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("No files found for date {date}")]
    NoFilesForDate { date: String },

    #[error("Processing failed for: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, FerryboxError>;
