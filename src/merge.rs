//! Merged cell ranges and the rules for accepting new ones.

use std::fmt;

use crate::cell_ref::{coordinate_unchecked, parse_cell_range};
use crate::error::{Result, XlsxError};

/// A normalized rectangular range of merged cells (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first_col: u32,
    pub first_row: u32,
    pub last_col: u32,
    pub last_row: u32,
}

impl MergeRange {
    /// Build a range from two corners given in any order.
    ///
    /// Corners are normalized so that first <= last on both axes. A range
    /// collapsing to a single cell is rejected.
    pub fn from_corners(col_a: u32, row_a: u32, col_b: u32, row_b: u32) -> Result<Self> {
        if col_a == 0 || row_a == 0 || col_b == 0 || row_b == 0 {
            return Err(XlsxError::CellRef(
                "merge coordinates are 1-based".to_string(),
            ));
        }
        let range = Self {
            first_col: col_a.min(col_b),
            first_row: row_a.min(row_b),
            last_col: col_a.max(col_b),
            last_row: row_a.max(row_b),
        };
        if range.is_single_cell() {
            return Err(XlsxError::DegenerateMerge(range.to_string()));
        }
        Ok(range)
    }

    /// Parse an "A1:B2" reference into a normalized range.
    pub fn parse(reference: &str) -> Result<Self> {
        let ((col_a, row_a), (col_b, row_b)) = parse_cell_range(reference)?;
        Self::from_corners(col_a, row_a, col_b, row_b)
    }

    /// Whether the two closed rectangles share at least one cell.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let disjoint = self.last_col < other.first_col
            || self.first_col > other.last_col
            || self.last_row < other.first_row
            || self.first_row > other.last_row;
        !disjoint
    }

    #[must_use]
    pub fn is_single_cell(&self) -> bool {
        self.first_col == self.last_col && self.first_row == self.last_row
    }

    /// Number of cells covered by the range.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.last_col - self.first_col + 1) * u64::from(self.last_row - self.first_row + 1)
    }
}

impl fmt::Display for MergeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            coordinate_unchecked(self.first_col, self.first_row),
            coordinate_unchecked(self.last_col, self.last_row)
        )
    }
}

/// Check `candidate` against every accepted range.
///
/// Accepted ranges are stored already parsed, so nothing is re-read from text
/// during the scan.
pub(crate) fn check_no_overlap(existing: &[MergeRange], candidate: &MergeRange) -> Result<()> {
    if existing.iter().any(|m| m.overlaps(candidate)) {
        return Err(XlsxError::MergeOverlap(candidate.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_corners() {
        let r = MergeRange::parse("C3:A1").unwrap();
        assert_eq!(r.to_string(), "A1:C3");
        let r = MergeRange::from_corners(2, 1, 1, 4).unwrap();
        assert_eq!(r.to_string(), "A1:B4");
        assert_eq!(r.cell_count(), 8);
    }

    #[test]
    fn test_single_cell_rejected() {
        assert!(matches!(
            MergeRange::parse("B2:B2"),
            Err(XlsxError::DegenerateMerge(_))
        ));
        assert!(matches!(
            MergeRange::from_corners(3, 3, 3, 3),
            Err(XlsxError::DegenerateMerge(_))
        ));
    }

    #[test]
    fn test_zero_coordinates_rejected() {
        assert!(matches!(
            MergeRange::from_corners(0, 1, 2, 2),
            Err(XlsxError::CellRef(_))
        ));
    }

    #[test]
    fn test_overlap_shared_corner() {
        let a = MergeRange::parse("A1:B2").unwrap();
        let b = MergeRange::parse("B2:C3").unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_adjacent_ranges_do_not_overlap() {
        let a = MergeRange::parse("A1:B2").unwrap();
        for other in ["C1:D2", "A3:B4", "C3:D4"] {
            let b = MergeRange::parse(other).unwrap();
            assert!(!a.overlaps(&b), "{other}");
        }
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = MergeRange::parse("A1:E5").unwrap();
        let inner = MergeRange::parse("B2:C3").unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
        assert!(check_no_overlap(&[outer], &inner).is_err());
    }
}
