//! Per-date merging of instrument series
//!
//! Series sharing a date are folded together with full outer joins on the
//! timestamp, then projected to a fixed column order so every output file
//! has the same layout.

use super::loader::load_file;
use crate::config::ConvertConfig;
use crate::constants::{FIXED_COLUMNS, TIMESTAMP_COLUMN};
use crate::error::{FerryboxError, Result};
use crate::models::{DateTable, DateToken, RawFile, SeriesTable};

use polars::prelude::*;
use tracing::debug;

/// Full outer join of two tables on `Timestamp`, sorted by time
///
/// Rows present on one side only are kept with nulls for the other side's
/// columns. Duplicate timestamps are not collapsed. A variable already
/// present on the left gets `suffix` appended on the right.
pub fn merge(merged: DataFrame, next: DataFrame, suffix: &str) -> Result<DataFrame> {
    let mut args = JoinArgs::new(JoinType::Full)
        .with_coalesce(JoinCoalesce::CoalesceColumns)
        .with_suffix(Some(suffix.into()));
    args.maintain_order = MaintainOrderJoin::LeftRight;

    let joined = merged
        .lazy()
        .join(
            next.lazy(),
            [col(TIMESTAMP_COLUMN)],
            [col(TIMESTAMP_COLUMN)],
            args,
        )
        .sort_by_exprs(
            [col(TIMESTAMP_COLUMN)],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    Ok(joined)
}

/// Fold tables in order; a single table is returned untouched
///
/// The n-th joined table uses `_<n>` as its collision suffix, so repeated
/// variable names stay distinct however many times they occur.
pub fn merge_all(tables: Vec<DataFrame>) -> Result<Option<DataFrame>> {
    let mut tables = tables.into_iter().enumerate();
    let Some((_, first)) = tables.next() else {
        return Ok(None);
    };
    tables
        .try_fold(first, |merged, (index, next)| {
            merge(merged, next, &format!("_{index}"))
        })
        .map(Some)
}

/// Reorder columns to `Timestamp, Longitude, Latitude` then variables A-Z
///
/// Position columns are only placed when present; a date without any
/// position data has neither.
pub fn order_columns(frame: DataFrame) -> Result<DataFrame> {
    let present: Vec<String> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let mut ordered: Vec<String> = FIXED_COLUMNS
        .iter()
        .filter(|fixed| present.iter().any(|name| name == *fixed))
        .map(|fixed| fixed.to_string())
        .collect();

    let mut variables: Vec<String> = present
        .into_iter()
        .filter(|name| !FIXED_COLUMNS.contains(&name.as_str()))
        .collect();
    variables.sort();
    ordered.extend(variables);

    Ok(frame.select(ordered)?)
}

/// Running state of one date's fold
///
/// `position_captured` records whether some earlier file already supplied
/// `Longitude`/`Latitude`; later files are loaded without them.
#[derive(Debug, Default)]
pub struct DateFold {
    tables: Vec<DataFrame>,
    position_captured: bool,
}

impl DateFold {
    pub fn position_captured(&self) -> bool {
        self.position_captured
    }

    /// Add one loaded series to the date
    pub fn absorb(mut self, series: SeriesTable) -> Self {
        self.position_captured |= series.has_position;
        self.tables.push(series.frame);
        self
    }

    /// Load a file and add its series to the date
    pub fn absorb_file(self, raw_file: &RawFile, config: &ConvertConfig) -> Result<Self> {
        let need_position = !self.position_captured;
        debug!(
            "Loading {} from {} (need position: {})",
            raw_file.instrument,
            raw_file.path.display(),
            need_position
        );
        let series = load_file(raw_file, need_position, config)?;
        Ok(self.absorb(series))
    }

    /// Join every series in load order, then order the columns
    pub fn finish(self, date: DateToken) -> Result<DateTable> {
        let file_count = self.tables.len();
        let merged = merge_all(self.tables)?.ok_or_else(|| FerryboxError::NoFilesForDate {
            date: date.to_string(),
        })?;

        Ok(DateTable {
            date,
            frame: order_columns(merged)?,
            file_count,
        })
    }
}

/// Load and merge every file of one date
pub fn build_date_table(
    date: DateToken,
    files: &[RawFile],
    config: &ConvertConfig,
) -> Result<DateTable> {
    let fold = files
        .iter()
        .try_fold(DateFold::default(), |fold, file| fold.absorb_file(file, config))?;
    fold.finish(date)
}
