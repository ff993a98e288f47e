//! JSON description of a workbook.
//!
//! ```json
//! {
//!   "appName": "xlpack",
//!   "options": { "created": "2024-01-01T00:00:00Z" },
//!   "sheets": [{
//!     "name": "Sheet1",
//!     "columns": [{ "column": 1, "width": 24 }],
//!     "rows": [{
//!       "height": 20,
//!       "cells": [
//!         { "value": "Name", "style": { "font": { "bold": true } } },
//!         { "value": 42 },
//!         { "error": "#N/A" },
//!         { "picture": { "extension": "png", "data": "iVBORw0..." } }
//!       ]
//!     }],
//!     "merges": ["A2:B3"]
//!   }]
//! }
//! ```
//!
//! A cell sets at most one of `value`, `error` and `picture`; none means an
//! empty cell. Picture data is standard base64.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{Result, XlsxError};
use crate::options::AssemblyOptions;
use crate::types::{Cell, ErrorValue, Picture, Style, Workbook};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkbookDocument {
    pub app_name: String,
    pub options: AssemblyOptions,
    pub sheets: Vec<SheetDocument>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetDocument {
    pub name: String,
    pub columns: Vec<ColumnDocument>,
    pub rows: Vec<RowDocument>,
    /// `A1:B2` references
    pub merges: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDocument {
    /// 1-based column number
    pub column: u32,
    pub width: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowDocument {
    pub height: f32,
    pub cells: Vec<CellDocument>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<PictureDocument>,
    pub style: Style,
}

/// JSON scalar cell value. Integral numbers stay integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PictureDocument {
    pub extension: String,
    /// Base64 payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl WorkbookDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Build the document model, running the same validation as the
    /// model's own API.
    pub fn to_workbook(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        workbook.app_name.clone_from(&self.app_name);

        for sheet_doc in &self.sheets {
            let sheet = workbook.add_sheet(&sheet_doc.name)?;
            for col in &sheet_doc.columns {
                if col.column == 0 {
                    return Err(XlsxError::Document(format!(
                        "sheet '{}': column numbers start at 1",
                        sheet_doc.name
                    )));
                }
                sheet.set_column_width(col.column, col.width);
            }
            for row_doc in &sheet_doc.rows {
                let row = sheet.add_row();
                row.set_height(row_doc.height);
                for cell_doc in &row_doc.cells {
                    cell_doc.apply(row.add_cell())?;
                }
            }
            for merge in &sheet_doc.merges {
                sheet.merge(merge)?;
            }
        }
        Ok(workbook)
    }
}

impl CellDocument {
    fn apply(&self, cell: &mut Cell) -> Result<()> {
        let set = [
            self.value.is_some(),
            self.error.is_some(),
            self.picture.is_some(),
        ];
        if set.iter().filter(|&&s| s).count() > 1 {
            return Err(XlsxError::Document(format!(
                "cell {}: value, error and picture are mutually exclusive",
                cell.coordinate()
            )));
        }

        cell.set_style(self.style.clone());
        match (&self.value, self.error, &self.picture) {
            (Some(ScalarValue::Bool(b)), _, _) => {
                cell.set_bool(*b);
            }
            (Some(ScalarValue::Int(n)), _, _) => {
                cell.set_int(*n);
            }
            (Some(ScalarValue::Float(f)), _, _) => {
                cell.set_float(*f);
            }
            (Some(ScalarValue::Str(s)), _, _) => {
                cell.set_str(s.as_str());
            }
            (None, Some(e), _) => {
                cell.set_error(e);
            }
            (None, None, Some(pic)) => {
                let data = pic
                    .data
                    .as_deref()
                    .ok_or_else(|| XlsxError::MissingPicture(cell.coordinate().to_string()))?;
                let bytes = BASE64.decode(data)?;
                cell.set_picture(Picture::new(pic.extension.as_str(), bytes));
            }
            (None, None, None) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    #[test]
    fn test_scalar_values() {
        let doc = WorkbookDocument::from_json(
            r##"{"sheets":[{"name":"S","rows":[{"cells":[
                {"value":true},{"value":3},{"value":2.5},{"value":"x"},{"error":"#N/A"},{}
            ]}]}]}"##,
        )
        .unwrap();
        let wb = doc.to_workbook().unwrap();
        let cells = wb.sheet("S").unwrap().rows()[0].cells();
        assert_eq!(cells[0].value(), &CellValue::Bool(true));
        assert_eq!(cells[1].value(), &CellValue::Int(3));
        assert_eq!(cells[2].value(), &CellValue::Float(2.5));
        assert_eq!(cells[3].value(), &CellValue::Str("x".to_string()));
        assert_eq!(cells[4].value(), &CellValue::Error(ErrorValue::NA));
        assert_eq!(cells[5].value(), &CellValue::Empty);
    }

    #[test]
    fn test_layout_and_style() {
        let doc = WorkbookDocument::from_json(
            r#"{"appName":"demo","sheets":[{"name":"S",
                "columns":[{"column":2,"width":30}],
                "rows":[{"height":18,"cells":[{"value":"h","style":{"font":{"bold":true},"alignment":{"horizontal":"center"}}}]},{}],
                "merges":["A2:B2"]}]}"#,
        )
        .unwrap();
        let wb = doc.to_workbook().unwrap();
        assert_eq!(wb.app_name, "demo");
        let sheet = wb.sheet("S").unwrap();
        assert_eq!(sheet.columns().get(&2).unwrap().width, 30.0);
        assert_eq!(sheet.rows()[0].height, 18.0);
        assert_eq!(sheet.rows().len(), 2);
        let style = &sheet.rows()[0].cells()[0].style;
        assert!(style.font.bold);
        assert_eq!(sheet.merges().len(), 1);
    }

    #[test]
    fn test_picture_payload() {
        let doc = WorkbookDocument::from_json(
            r#"{"sheets":[{"name":"S","rows":[{"cells":[{"picture":{"extension":"png","data":"AQID"}}]}]}]}"#,
        )
        .unwrap();
        let wb = doc.to_workbook().unwrap();
        match wb.sheet("S").unwrap().rows()[0].cells()[0].value() {
            CellValue::Picture(p) => assert_eq!(p.data, vec![1, 2, 3]),
            other => panic!("expected picture, got {other:?}"),
        }
    }

    #[test]
    fn test_picture_without_data() {
        let doc = WorkbookDocument::from_json(
            r#"{"sheets":[{"name":"S","rows":[{"cells":[{},{"picture":{"extension":"png"}}]}]}]}"#,
        )
        .unwrap();
        let err = doc.to_workbook().unwrap_err();
        assert!(matches!(err, XlsxError::MissingPicture(ref c) if c == "B1"));
    }

    #[test]
    fn test_conflicting_cell_fields() {
        let doc = WorkbookDocument::from_json(
            r##"{"sheets":[{"name":"S","rows":[{"cells":[{"value":1,"error":"#REF!"}]}]}]}"##,
        )
        .unwrap();
        assert!(matches!(doc.to_workbook(), Err(XlsxError::Document(_))));
    }

    #[test]
    fn test_validation_errors_surface() {
        let dup = WorkbookDocument::from_json(r#"{"sheets":[{"name":"S"},{"name":"S"}]}"#).unwrap();
        assert!(matches!(dup.to_workbook(), Err(XlsxError::DuplicateSheet(_))));

        let overlap = WorkbookDocument::from_json(
            r#"{"sheets":[{"name":"S","merges":["A1:B2","B2:C3"]}]}"#,
        )
        .unwrap();
        assert!(matches!(overlap.to_workbook(), Err(XlsxError::MergeOverlap(_))));
    }
}
