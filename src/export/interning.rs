//! Deduplication tables for shared strings, cell formats and fonts.
//!
//! Indices handed out here are stable for the rest of the assembly: the
//! tables only ever grow.

use std::collections::HashMap;

use crate::types::{Font, Style};

/// Records whose all-default value is the implicit entry 0 of their table.
pub trait FormatRecord: PartialEq + Clone {
    fn is_default(&self) -> bool;
}

impl FormatRecord for Style {
    fn is_default(&self) -> bool {
        Style::is_default(self)
    }
}

impl FormatRecord for Font {
    fn is_default(&self) -> bool {
        Font::is_default(self)
    }
}

/// Interning table with index 0 reserved for the default record.
///
/// The default record is never stored. Explicit records occupy indices
/// 1.. in first-seen order, so `records()[i]` is written at index `i + 1`.
/// Lookup is a linear scan with structural equality.
#[derive(Debug, Clone)]
pub struct FormatTable<T> {
    records: Vec<T>,
}

impl<T> Default for FormatTable<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: FormatRecord> FormatTable<T> {
    /// Return the emitted index of `value`, adding it if unseen.
    pub fn intern(&mut self, value: &T) -> usize {
        if value.is_default() {
            return 0;
        }
        if let Some(idx) = self.position(value) {
            return idx + 1;
        }
        self.records.push(value.clone());
        self.records.len()
    }

    /// Emitted index of an already interned value; 0 for the default record.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        if value.is_default() {
            return Some(0);
        }
        self.position(value).map(|idx| idx + 1)
    }

    /// Explicit records in index order (index 1 first).
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, value: &T) -> Option<usize> {
        self.records.iter().position(|r| r == value)
    }
}

/// Shared string table keyed by exact text.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
    index: HashMap<String, usize>,
}

impl SharedStrings {
    /// Return the 0-based index of `s`, appending it if unseen.
    pub fn intern(&mut self, s: &str) -> usize {
        if let Some(&idx) = self.index.get(s) {
            return idx;
        }
        let idx = self.strings.len();
        self.strings.push(s.to_string());
        self.index.insert(s.to_string(), idx);
        idx
    }

    #[must_use]
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
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
    use crate::types::{Alignment, HAlign, Underline};

    #[test]
    fn test_shared_strings() {
        let mut ss = SharedStrings::default();
        let idx1 = ss.intern("Hello");
        let idx2 = ss.intern("World");
        let idx3 = ss.intern("Hello"); // Duplicate

        assert_eq!(idx1, 0);
        assert_eq!(idx2, 1);
        assert_eq!(idx3, 0);
        assert_eq!(ss.len(), 2);
        assert_eq!(ss.strings(), ["Hello", "World"]);
    }

    #[test]
    fn test_shared_strings_exact_match_only() {
        let mut ss = SharedStrings::default();
        assert_ne!(ss.intern("a"), ss.intern("A"));
        assert_ne!(ss.intern("a"), ss.intern("a "));
        assert_eq!(ss.len(), 3);
    }

    #[test]
    fn test_default_style_is_never_stored() {
        let mut table = FormatTable::<Style>::default();
        assert_eq!(table.intern(&Style::default()), 0);
        assert!(table.is_empty());
        assert_eq!(table.index_of(&Style::default()), Some(0));
    }

    #[test]
    fn test_equal_styles_share_an_index() {
        let mut table = FormatTable::<Style>::default();
        let bold_centered = Style {
            alignment: Alignment {
                horizontal: Some(HAlign::Center),
                vertical: None,
            },
            font: Font::bold(),
        };
        let italic = Style::with_font(Font {
            italic: true,
            ..Font::default()
        });

        assert_eq!(table.intern(&bold_centered), 1);
        assert_eq!(table.intern(&italic), 2);
        assert_eq!(table.intern(&bold_centered.clone()), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0], bold_centered);
    }

    #[test]
    fn test_fonts_differ_by_any_field() {
        let mut table = FormatTable::<Font>::default();
        let base = Font {
            size: 12.0,
            ..Font::default()
        };
        let underlined = Font {
            underline: Underline::Double,
            ..base.clone()
        };
        assert_eq!(table.intern(&base), 1);
        assert_eq!(table.intern(&underlined), 2);
        assert_eq!(table.index_of(&underlined), Some(2));
        assert_eq!(table.index_of(&Font::bold()), None);
    }
}
