use std::collections::HashMap;

use super::Sheet;
use crate::error::{Result, XlsxError};

/// Longest sheet name Excel accepts, in characters.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Characters that may not appear anywhere in a sheet name.
pub const FORBIDDEN_SHEET_NAME_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// A complete workbook: an ordered list of uniquely named sheets.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// Application name recorded in `docProps/app.xml` (omitted when empty)
    pub app_name: String,
    sheets: Vec<Sheet>,
    /// Keyed by lower-cased name
    sheet_index: HashMap<String, usize>,
}

impl Workbook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet with the given name and return it.
    ///
    /// Names are compared case-insensitively, as Excel does, so `"Data"` and
    /// `"data"` cannot both exist. Fails if the name is already taken or
    /// breaks the naming rules; the workbook is unchanged in that case.
    #[allow(clippy::indexing_slicing)] // index of the element just pushed
    pub fn add_sheet(&mut self, name: &str) -> Result<&mut Sheet> {
        let key = name.to_lowercase();
        if self.sheet_index.contains_key(&key) {
            return Err(XlsxError::DuplicateSheet(name.to_string()));
        }
        validate_sheet_name(name)?;

        let idx = self.sheets.len();
        self.sheets.push(Sheet::new(name.to_string()));
        self.sheet_index.insert(key, idx);
        Ok(&mut self.sheets[idx])
    }

    #[must_use]
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Sheet by name, ignoring case.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheet_index
            .get(&name.to_lowercase())
            .and_then(|&i| self.sheets.get(i))
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        let idx = *self.sheet_index.get(&name.to_lowercase())?;
        self.sheets.get_mut(idx)
    }
}

/// Check a sheet name against Excel's rules: 1-31 characters, no leading or
/// trailing single quote, none of `: \ / ? * [ ]`.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 {
        return Err(XlsxError::SheetName(
            "empty sheet name is not allowed".to_string(),
        ));
    }
    if len > MAX_SHEET_NAME_CHARS {
        return Err(XlsxError::SheetName(format!(
            "'{name}' is longer than {MAX_SHEET_NAME_CHARS} characters"
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(XlsxError::SheetName(format!(
            "'{name}' starts or ends with a single quote"
        )));
    }
    if name.contains(FORBIDDEN_SHEET_NAME_CHARS) {
        return Err(XlsxError::SheetName(format!(
            "'{name}' contains one of the characters :\\/?*[]"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sheet_once_per_name() {
        let mut wb = Workbook::new();
        wb.add_sheet("Data").unwrap();
        wb.add_sheet("Totals").unwrap();
        assert!(matches!(
            wb.add_sheet("Data"),
            Err(XlsxError::DuplicateSheet(_))
        ));
        assert!(matches!(
            wb.add_sheet("dATA"),
            Err(XlsxError::DuplicateSheet(_))
        ));
        assert_eq!(wb.sheets().len(), 2);
        assert_eq!(wb.sheet("data").unwrap().name(), "Data");
        assert!(wb.sheet("missing").is_none());
    }

    #[test]
    fn test_invalid_name_leaves_workbook_unchanged() {
        let mut wb = Workbook::new();
        assert!(wb.add_sheet("bad/name").is_err());
        assert!(wb.sheets().is_empty());
        // The rejected name was not reserved
        assert!(wb.add_sheet("ok").is_ok());
    }

    #[test]
    fn test_sheet_name_length_counts_chars() {
        assert!(validate_sheet_name(&"é".repeat(31)).is_ok());
        assert!(validate_sheet_name(&"é".repeat(32)).is_err());
    }

    #[test]
    fn test_sheet_mut_by_name() {
        let mut wb = Workbook::new();
        wb.add_sheet("A").unwrap();
        wb.sheet_mut("A").unwrap().add_row();
        assert_eq!(wb.sheet("A").unwrap().rows().len(), 1);
    }
}
