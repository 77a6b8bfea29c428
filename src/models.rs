//! Core data structures for Ferrybox conversion.
//!
//! Defines the file and date identifiers produced by discovery, the
//! tables passed between loading and merging, and run statistics.

use crate::constants::INPUT_EXTENSION;
use polars::prelude::DataFrame;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `<instrument>_<digits>.txt`, greedy on the instrument so the last
/// underscore separates the date
static FILE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?P<instrument>.*)_(?P<date>\d+)\.{INPUT_EXTENSION}$"))
        .expect("file name pattern is valid")
});

/// Date token taken from a file name suffix (digits, not length-checked)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateToken(String);

impl DateToken {
    /// Build a token from a digit string
    pub fn parse(token: &str) -> Option<Self> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(token.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a file name does not carry a date token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    NotUnicode,
    WrongExtension,
    MissingDate,
}

impl fmt::Display for FilenameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilenameError::NotUnicode => write!(f, "file name is not valid unicode"),
            FilenameError::WrongExtension => {
                write!(f, "file name does not end in .{INPUT_EXTENSION}")
            }
            FilenameError::MissingDate => {
                write!(f, "file name does not match *_<digits>.{INPUT_EXTENSION}")
            }
        }
    }
}

/// One instrument file for one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub path: PathBuf,
    pub instrument: String,
    pub date: DateToken,
}

impl RawFile {
    /// Parse the instrument name and date token from the file name
    pub fn from_path(path: &Path) -> Result<Self, FilenameError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(FilenameError::NotUnicode)?;

        let caps = FILE_NAME_PATTERN.captures(file_name).ok_or_else(|| {
            if path.extension().is_some_and(|ext| ext == INPUT_EXTENSION) {
                FilenameError::MissingDate
            } else {
                FilenameError::WrongExtension
            }
        })?;

        let date = DateToken::parse(&caps["date"]).ok_or(FilenameError::MissingDate)?;

        Ok(Self {
            path: path.to_path_buf(),
            instrument: caps["instrument"].to_string(),
            date,
        })
    }
}

/// Shape of the input folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputLayout {
    /// Instrument files directly inside the input folder
    Files,
    /// One level of sub-folders, each holding instrument files
    Folders,
}

/// Measurement series loaded from a single file
#[derive(Debug, Clone)]
pub struct SeriesTable {
    pub frame: DataFrame,
    pub variable: String,
    pub has_position: bool,
}

/// All series of one date, joined on timestamp
#[derive(Debug, Clone)]
pub struct DateTable {
    pub date: DateToken,
    pub frame: DataFrame,
    pub file_count: usize,
}

impl DateTable {
    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

/// Processing statistics
#[derive(Debug, Default, Serialize)]
pub struct ProcessingStats {
    pub dates_written: usize,
    pub files_processed: usize,
    pub total_rows: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}
