//! In-memory document model: workbook, sheets, rows, cells and styles.

mod cell;
mod row;
mod sheet;
mod style;
mod workbook;

pub use cell::*;
pub use row::*;
pub use sheet::*;
pub use style::*;
pub use workbook::*;
