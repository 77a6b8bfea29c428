//! Ferrybox preamble scanning.
//!
//! Instrument files start with a free-form preamble of varying length. The
//! last preamble line contains the `$DATASETS` marker; the tabular section
//! begins on the following line.

use crate::error::{FerryboxError, Result};
use encoding_rs::WINDOWS_1252;
use std::path::Path;
use tracing::debug;

/// Read a whole instrument file, decoding it as Windows-1252
pub fn read_legacy_text(file_path: &Path) -> Result<String> {
    let bytes = std::fs::read(file_path)?;
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(&bytes);
    Ok(text.into_owned())
}

/// Count preamble lines, including the marker line
///
/// The returned value is the number of lines to skip before the column
/// header row.
pub fn header_line_count(text: &str, marker: &str, file_path: &Path) -> Result<usize> {
    let position = text
        .lines()
        .position(|line| line.contains(marker))
        .ok_or_else(|| FerryboxError::NoHeaderMarker {
            path: file_path.to_path_buf(),
            marker: marker.to_string(),
        })?;

    let header_lines = position + 1;
    debug!(
        "Header for {} ends at line {}",
        file_path.display(),
        header_lines
    );
    Ok(header_lines)
}

/// Decoded file contents with the length of their preamble
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub text: String,
    pub header_lines: usize,
}

/// Read a file and count its preamble lines
pub fn scan_header(file_path: &Path, marker: &str) -> Result<ScannedFile> {
    let text = read_legacy_text(file_path)?;
    let header_lines = header_line_count(&text, marker, file_path)?;
    Ok(ScannedFile { text, header_lines })
}
