//! File discovery module for Ferrybox datasets
//!
//! Validates the input folder layout, collects the date tokens carried by
//! file names and enumerates the files belonging to one date.

use crate::constants::{DATE_SEPARATOR, INPUT_EXTENSION};
use crate::error::{FerryboxError, Result};
use crate::models::{DateToken, InputLayout, RawFile};
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// File discovery component for Ferrybox datasets
#[derive(Debug)]
pub struct FileDiscovery {
    input_path: PathBuf,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(input_path: PathBuf) -> Self {
        Self { input_path }
    }

    /// Check that the input folder holds only files or only folders
    ///
    /// Supported layouts:
    /// ```text
    /// input/                 input/
    ///   Temp_20230101.txt      leg1/
    ///   Sal_20230101.txt         Temp_20230101.txt
    ///                          leg2/
    ///                            Temp_20230102.txt
    /// ```
    /// Sub-folders may not contain further folders.
    pub async fn classify(&self) -> Result<InputLayout> {
        let mut has_files = false;
        let mut has_folders = false;

        let mut dir = fs::read_dir(&self.input_path).await?;

        while let Some(entry) = dir.next_entry().await? {
            if is_hidden_name(&entry.file_name().to_string_lossy()) {
                continue;
            }

            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                has_folders = true;
                self.check_no_nested_folders(&entry.path()).await?;
            } else {
                has_files = true;
            }

            if has_files && has_folders {
                return Err(FerryboxError::MixedLayout {
                    path: self.input_path.clone(),
                });
            }
        }

        let layout = if has_files {
            InputLayout::Files
        } else {
            InputLayout::Folders
        };
        debug!("Input folder {} layout: {:?}", self.input_path.display(), layout);
        Ok(layout)
    }

    async fn check_no_nested_folders(&self, folder: &Path) -> Result<()> {
        let mut sub_dir = fs::read_dir(folder).await?;

        while let Some(entry) = sub_dir.next_entry().await? {
            if is_hidden_name(&entry.file_name().to_string_lossy()) {
                continue;
            }
            if entry.file_type().await?.is_dir() {
                return Err(FerryboxError::NestedFolder { path: entry.path() });
            }
        }

        Ok(())
    }

    /// Collect the date token of every file below the input folder
    pub fn collect_dates(&self) -> Result<BTreeSet<DateToken>> {
        let mut dates = BTreeSet::new();

        let walker = WalkDir::new(&self.input_path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let raw_file =
                RawFile::from_path(entry.path()).map_err(|e| FerryboxError::InvalidFilename {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                })?;
            dates.insert(raw_file.date);
        }

        debug!(
            "Found {} dates in {}",
            dates.len(),
            self.input_path.display()
        );
        Ok(dates)
    }

    /// Find every file below the input folder named `*_<date>.txt`
    pub fn files_for_date(&self, date: &DateToken) -> Result<Vec<RawFile>> {
        let pattern = format!(
            "{}/**/*{}{}.{}",
            Pattern::escape(&self.input_path.to_string_lossy()),
            DATE_SEPARATOR,
            date,
            INPUT_EXTENSION
        );

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let paths = glob::glob_with(&pattern, options).map_err(|e| {
            FerryboxError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut files = Vec::new();
        for path in paths {
            let path = path.map_err(|e| FerryboxError::Io(e.into()))?;
            if !path.is_file() {
                continue;
            }
            let raw_file =
                RawFile::from_path(&path).map_err(|e| FerryboxError::InvalidFilename {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            files.push(raw_file);
        }

        debug!("Found {} files for date {}", files.len(), date);
        Ok(files)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && is_hidden_name(&entry.file_name().to_string_lossy())
}

/// Dot-files are ignored, as a shell glob would
fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}
