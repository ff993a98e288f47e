//! xlpack - XLSX package assembly
//!
//! Builds OpenXML SpreadsheetML packages from an in-memory workbook:
//! - Shared strings, cell formats and fonts deduplicated across sheets
//! - Merged ranges validated as they are added
//! - Pictures embedded in cells through the rich value parts
//! - Zip, directory or in-memory output
//!
//! # Usage
//!
//! ```no_run
//! use xlpack::{to_xlsx_bytes, AssemblyOptions, Font, Style, Workbook};
//!
//! let mut wb = Workbook::new();
//! let sheet = wb.add_sheet("Sheet1")?;
//! let row = sheet.add_row();
//! row.add_cell().set_str("Total").set_style(Style::with_font(Font::bold()));
//! row.add_cell().set_float(42.5);
//! sheet.merge("A2:B2")?;
//!
//! let bytes = to_xlsx_bytes(&wb, AssemblyOptions::default())?;
//! std::fs::write("out.xlsx", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cell_ref;
pub mod document;
pub mod error;
pub mod export;
pub mod merge;
pub mod namespaces;
pub mod options;
pub mod storage;
pub mod types;

use std::io::{Cursor, Seek, Write};

pub use error::{Result, XlsxError};
pub use export::PackageWriter;
pub use merge::MergeRange;
pub use options::{AssemblyOptions, Compression};
pub use storage::{BlobStorage, DirStorage, MemoryStorage, ZipStorage};
pub use types::*;

/// Assemble `workbook` as a zip archive into `writer` and return it.
///
/// Nothing is flushed: a buffered `writer` must be flushed by the caller.
///
/// # Errors
/// Returns the first resource or sink error; the writer's content is then
/// incomplete and must be discarded.
pub fn write_xlsx<W: Write + Seek>(
    workbook: &Workbook,
    writer: W,
    options: AssemblyOptions,
) -> Result<W> {
    let storage = PackageWriter::with_options(ZipStorage::new(writer), options).write(workbook)?;
    storage.finish()
}

/// Assemble `workbook` into an in-memory `.xlsx` file.
///
/// # Errors
/// See [`write_xlsx`].
pub fn to_xlsx_bytes(workbook: &Workbook, options: AssemblyOptions) -> Result<Vec<u8>> {
    Ok(write_xlsx(workbook, Cursor::new(Vec::new()), options)?.into_inner())
}

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
