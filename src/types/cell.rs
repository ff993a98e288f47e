use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Style;

/// A single cell: position, value and style.
///
/// The coordinate string is derived from the position when the cell is
/// created and cannot be changed afterwards.
#[derive(Debug, Clone)]
pub struct Cell {
    column: u32,
    row: u32,
    coordinate: String,
    value: CellValue,
    /// Formatting applied to the cell (default style means "no `s` attribute")
    pub style: Style,
}

/// The value held by a cell. Exactly one variant is active.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Text, written through the shared string table
    Str(String),
    Error(ErrorValue),
    /// Embedded image, written through the rich value parts
    Picture(Arc<Picture>),
}

/// Cell type as written in the `t` attribute of `<c>`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    #[serde(rename = "s")]
    String,
    #[serde(rename = "n")]
    Number,
    #[serde(rename = "b")]
    Boolean,
    #[serde(rename = "e")]
    Error,
}

impl CellType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "s",
            Self::Number => "n",
            Self::Boolean => "b",
            Self::Error => "e",
        }
    }
}

/// Spreadsheet error literals.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ErrorValue {
    #[serde(rename = "#NULL!")]
    Null,
    #[serde(rename = "#DIV/0!")]
    Div0,
    #[serde(rename = "#VALUE!")]
    Value,
    #[serde(rename = "#REF!")]
    Ref,
    #[serde(rename = "#NAME?")]
    Name,
    #[serde(rename = "#NUM!")]
    Num,
    #[serde(rename = "#N/A")]
    NA,
}

impl ErrorValue {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "#NULL!",
            Self::Div0 => "#DIV/0!",
            Self::Value => "#VALUE!",
            Self::Ref => "#REF!",
            Self::Name => "#NAME?",
            Self::Num => "#NUM!",
            Self::NA => "#N/A",
        }
    }
}

/// Image payload for a picture cell.
///
/// `extension` is a file-extension hint such as `"png"`, `".jpg"` or `"JPEG"`;
/// it is validated when the workbook is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub extension: String,
    pub data: Vec<u8>,
}

impl Picture {
    pub fn new(extension: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            extension: extension.into(),
            data,
        }
    }
}

impl CellValue {
    /// The `t` attribute this value is written with, `None` for empty cells.
    #[must_use]
    pub fn cell_type(&self) -> Option<CellType> {
        match self {
            Self::Empty => None,
            Self::Bool(_) => Some(CellType::Boolean),
            Self::Int(_) | Self::Float(_) => Some(CellType::Number),
            Self::Str(_) => Some(CellType::String),
            Self::Error(_) | Self::Picture(_) => Some(CellType::Error),
        }
    }
}

impl Cell {
    pub(crate) fn new(column: u32, row: u32) -> Self {
        Self {
            column,
            row,
            coordinate: crate::cell_ref::coordinate_unchecked(column, row),
            value: CellValue::Empty,
            style: Style::default(),
        }
    }

    /// 1-based column number
    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// 1-based row number
    #[must_use]
    pub fn row(&self) -> u32 {
        self.row
    }

    /// "A1"-style coordinate
    #[must_use]
    pub fn coordinate(&self) -> &str {
        &self.coordinate
    }

    #[must_use]
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    pub fn set_value(&mut self, value: CellValue) -> &mut Self {
        self.value = value;
        self
    }

    /// Store a boolean, written as `1`/`0` with `t="b"`.
    pub fn set_bool(&mut self, v: bool) -> &mut Self {
        self.set_value(CellValue::Bool(v))
    }

    pub fn set_int(&mut self, v: i64) -> &mut Self {
        self.set_value(CellValue::Int(v))
    }

    /// Store a float.
    ///
    /// NaN and infinities have no numeric form in SpreadsheetML and are
    /// stored as the `#NUM!` error instead.
    pub fn set_float(&mut self, v: f64) -> &mut Self {
        if v.is_finite() {
            self.set_value(CellValue::Float(v))
        } else {
            self.set_value(CellValue::Error(ErrorValue::Num))
        }
    }

    pub fn set_str(&mut self, v: impl Into<String>) -> &mut Self {
        self.set_value(CellValue::Str(v.into()))
    }

    pub fn set_error(&mut self, v: ErrorValue) -> &mut Self {
        self.set_value(CellValue::Error(v))
    }

    /// Attach an image. Pass a shared `Arc` to reuse one payload in many cells.
    pub fn set_picture(&mut self, picture: impl Into<Arc<Picture>>) -> &mut Self {
        self.set_value(CellValue::Picture(picture.into()))
    }

    pub fn clear(&mut self) -> &mut Self {
        self.set_value(CellValue::Empty)
    }

    pub fn set_style(&mut self, style: Style) -> &mut Self {
        self.style = style;
        self
    }
}
