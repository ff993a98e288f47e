//! Utilities for Excel-style cell references.
//!
//! All coordinates here are 1-based: column 1 is `A`, row 1 is the first row.
//! Column letters use bijective base-26 (`A`=1 .. `Z`=26, `AA`=27).

use crate::error::{Result, XlsxError};

/// Convert a 1-based column number to its letters, e.g. 1 -> "A", 27 -> "AA".
///
/// Returns `None` for column 0, which has no letter form.
#[must_use]
pub fn column_to_letters(col: u32) -> Option<String> {
    if col == 0 {
        return None;
    }
    let mut out = String::with_capacity(3);
    push_column_letters(&mut out, col);
    Some(out)
}

/// Convert column letters (case-insensitive) back to a 1-based column number.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(XlsxError::CellRef("missing column letters".to_string()));
    }
    let mut col: u32 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(XlsxError::CellRef(format!("invalid column letters '{letters}'")));
        }
        let digit = u32::from(b.to_ascii_uppercase() - b'A') + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(|| XlsxError::CellRef(format!("column '{letters}' out of range")))?;
    }
    Ok(col)
}

/// Format a 1-based (column, row) pair as an "A1" reference.
///
/// Returns `None` when either coordinate is 0.
#[must_use]
pub fn cell_coordinate(col: u32, row: u32) -> Option<String> {
    if col == 0 || row == 0 {
        return None;
    }
    Some(coordinate_unchecked(col, row))
}

/// Parse an "A1" reference into 1-based (column, row).
///
/// The reference must be a non-empty run of letters followed by a non-empty
/// run of digits naming a positive row.
pub fn parse_cell_ref(cell_ref: &str) -> Result<(u32, u32)> {
    let split = cell_ref
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(cell_ref.len());
    let (letters, digits) = cell_ref.split_at(split);

    if letters.is_empty() || digits.is_empty() {
        return Err(XlsxError::CellRef(format!(
            "invalid cell reference format '{cell_ref}'"
        )));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(XlsxError::CellRef(format!(
            "invalid row number in '{cell_ref}'"
        )));
    }

    let col = letters_to_column(letters)?;
    let row: u32 = digits
        .parse()
        .map_err(|_| XlsxError::CellRef(format!("invalid row number in '{cell_ref}'")))?;
    if row == 0 {
        return Err(XlsxError::CellRef(format!(
            "invalid row number in '{cell_ref}'"
        )));
    }
    Ok((col, row))
}

/// Parse a range like "A1:B10" into its two corners, each as (column, row).
///
/// Corners are returned as written; no normalization happens here.
pub fn parse_cell_range(range: &str) -> Result<((u32, u32), (u32, u32))> {
    let Some((start, end)) = range.split_once(':') else {
        return Err(XlsxError::CellRef(format!(
            "invalid range '{range}', expected 'A1:B2'"
        )));
    };
    if end.contains(':') {
        return Err(XlsxError::CellRef(format!(
            "invalid range '{range}', expected 'A1:B2'"
        )));
    }
    Ok((parse_cell_ref(start)?, parse_cell_ref(end)?))
}

/// Format a coordinate whose components are already known to be >= 1.
pub(crate) fn coordinate_unchecked(col: u32, row: u32) -> String {
    let mut out = String::with_capacity(8);
    push_column_letters(&mut out, col);
    out.push_str(&row.to_string());
    out
}

fn push_column_letters(out: &mut String, col: u32) {
    let mut letters = [0u8; 7];
    let mut len = 0;
    let mut n = col;
    while n > 0 && len < letters.len() {
        let rem = (n - 1) % 26;
        // rem < 26, so the narrowing is exact
        let digit = u8::try_from(rem).unwrap_or(0);
        if let Some(slot) = letters.get_mut(len) {
            *slot = b'A' + digit;
        }
        len += 1;
        n = (n - 1) / 26;
    }
    for &b in letters.iter().take(len).rev() {
        out.push(char::from(b));
    }
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
    fn test_column_letters() {
        assert_eq!(column_to_letters(1).as_deref(), Some("A"));
        assert_eq!(column_to_letters(26).as_deref(), Some("Z"));
        assert_eq!(column_to_letters(27).as_deref(), Some("AA"));
        assert_eq!(column_to_letters(702).as_deref(), Some("ZZ"));
        assert_eq!(column_to_letters(703).as_deref(), Some("AAA"));
        assert_eq!(column_to_letters(16384).as_deref(), Some("XFD"));
        assert_eq!(column_to_letters(0), None);
    }

    #[test]
    fn test_column_round_trip() {
        for n in 1..=20_000 {
            let letters = column_to_letters(n).unwrap();
            assert_eq!(letters_to_column(&letters).unwrap(), n, "column {n}");
        }
        let max = column_to_letters(u32::MAX).unwrap();
        assert_eq!(letters_to_column(&max).unwrap(), u32::MAX);
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1").unwrap(), (1, 1));
        assert_eq!(parse_cell_ref("c5").unwrap(), (3, 5));
        assert_eq!(parse_cell_ref("AA10").unwrap(), (27, 10));
    }

    #[test]
    fn test_parse_cell_ref_rejects_malformed() {
        for bad in ["", "A", "1", "A0", "1A", "A1B", "A-1", "$A$1", "A 1"] {
            assert!(parse_cell_ref(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_column_overflow_is_an_error() {
        assert!(letters_to_column("ZZZZZZZZ").is_err());
    }

    #[test]
    fn test_parse_cell_range() {
        assert_eq!(parse_cell_range("A1:B2").unwrap(), ((1, 1), (2, 2)));
        assert_eq!(parse_cell_range("C3:A1").unwrap(), ((3, 3), (1, 1)));
        assert!(parse_cell_range("A1").is_err());
        assert!(parse_cell_range("A1:B2:C3").is_err());
        assert!(parse_cell_range("A1:").is_err());
    }

    #[test]
    fn test_cell_coordinate() {
        assert_eq!(cell_coordinate(1, 1).as_deref(), Some("A1"));
        assert_eq!(cell_coordinate(3, 5).as_deref(), Some("C5"));
        assert_eq!(cell_coordinate(27, 10).as_deref(), Some("AA10"));
        assert_eq!(cell_coordinate(0, 1), None);
        assert_eq!(cell_coordinate(1, 0), None);
    }
}
