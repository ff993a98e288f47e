use std::collections::BTreeMap;

use super::Row;
use crate::error::Result;
use crate::merge::{check_no_overlap, MergeRange};

/// A single worksheet: rows, column widths and merged ranges.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    rows: Vec<Row>,
    /// 1-based column index -> column properties
    columns: BTreeMap<u32, Column>,
    merges: Vec<MergeRange>,
    next_row: u32,
}

/// Column-level properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    /// Width in Excel character units (always > 0 once stored)
    pub width: f32,
}

impl Sheet {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            rows: Vec::new(),
            columns: BTreeMap::new(),
            merges: Vec::new(),
            next_row: 1,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a row. Rows are numbered sequentially from 1.
    #[allow(clippy::indexing_slicing)] // index of the element just pushed
    pub fn add_row(&mut self) -> &mut Row {
        let idx = self.rows.len();
        self.rows.push(Row::new(self.next_row));
        self.next_row = self.next_row.saturating_add(1);
        &mut self.rows[idx]
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Row with the given 1-based number, if it has been added.
    #[must_use]
    pub fn row(&self, number: u32) -> Option<&Row> {
        let idx = usize::try_from(number.checked_sub(1)?).ok()?;
        self.rows.get(idx)
    }

    /// Set the width of a 1-based column.
    ///
    /// A width <= 0 or a non-finite width removes the override so the column
    /// reverts to the default width. Column 0 is ignored.
    pub fn set_column_width(&mut self, column: u32, width: f32) {
        if column == 0 {
            return;
        }
        if !width.is_finite() || width <= 0.0 {
            self.columns.remove(&column);
        } else {
            self.columns.insert(column, Column { width });
        }
    }

    /// Column overrides, ordered by column index.
    #[must_use]
    pub fn columns(&self) -> &BTreeMap<u32, Column> {
        &self.columns
    }

    /// Merge a range given as text, e.g. `"A1:B2"`.
    ///
    /// The range is normalized before it is stored, so `"B2:A1"` is kept as
    /// `"A1:B2"`. Fails without modifying the sheet if the reference is
    /// malformed, covers a single cell, or overlaps an existing merge.
    pub fn merge(&mut self, reference: &str) -> Result<()> {
        let range = MergeRange::parse(reference)?;
        self.push_merge(range)
    }

    /// Merge a range given by two 1-based corners in any order.
    pub fn merge_range(
        &mut self,
        start_col: u32,
        start_row: u32,
        end_col: u32,
        end_row: u32,
    ) -> Result<()> {
        let range = MergeRange::from_corners(start_col, start_row, end_col, end_row)?;
        self.push_merge(range)
    }

    /// Accepted merges in insertion order.
    #[must_use]
    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    fn push_merge(&mut self, range: MergeRange) -> Result<()> {
        check_no_overlap(&self.merges, &range)?;
        self.merges.push(range);
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::error::XlsxError;

    #[test]
    fn test_rows_numbered_from_one() {
        let mut sheet = Sheet::new("S".into());
        assert_eq!(sheet.add_row().number(), 1);
        assert_eq!(sheet.add_row().number(), 2);
        let row = sheet.add_row();
        assert_eq!(row.number(), 3);
        assert_eq!(row.add_cell().coordinate(), "A3");
        assert_eq!(row.add_cell().coordinate(), "B3");
        assert_eq!(sheet.row(3).unwrap().cells().len(), 2);
        assert!(sheet.row(0).is_none());
    }

    #[test]
    fn test_column_width_override_and_reset() {
        let mut sheet = Sheet::new("S".into());
        sheet.set_column_width(3, 20.0);
        sheet.set_column_width(1, 10.5);
        sheet.set_column_width(0, 99.0);
        let cols: Vec<_> = sheet.columns().iter().map(|(k, v)| (*k, v.width)).collect();
        assert_eq!(cols, vec![(1, 10.5), (3, 20.0)]);

        sheet.set_column_width(3, 0.0);
        sheet.set_column_width(1, -1.0);
        assert!(sheet.columns().is_empty());
    }

    #[test]
    fn test_non_finite_column_width_resets() {
        let mut sheet = Sheet::new("S".into());
        for width in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            sheet.set_column_width(2, 8.0);
            sheet.set_column_width(2, width);
            assert!(sheet.columns().is_empty(), "{width}");
        }
    }

    #[test]
    fn test_merge_text_and_coordinates_normalize_alike() {
        let mut sheet = Sheet::new("S".into());
        sheet.merge("B2:A1").unwrap();
        sheet.merge_range(4, 2, 3, 1).unwrap();
        let refs: Vec<String> = sheet.merges().iter().map(ToString::to_string).collect();
        assert_eq!(refs, vec!["A1:B2", "C1:D2"]);
    }

    #[test]
    fn test_overlap_leaves_sheet_unchanged() {
        let mut sheet = Sheet::new("S".into());
        sheet.merge("A1:B2").unwrap();
        let err = sheet.merge("B2:C3").unwrap_err();
        assert!(matches!(err, XlsxError::MergeOverlap(_)));
        assert_eq!(sheet.merges().len(), 1);

        assert!(matches!(
            sheet.merge_range(1, 1, 1, 1),
            Err(XlsxError::DegenerateMerge(_))
        ));
        assert!(matches!(sheet.merge("A1"), Err(XlsxError::CellRef(_))));
        assert_eq!(sheet.merges().len(), 1);
    }
}
