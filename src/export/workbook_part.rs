//! `xl/workbook.xml`: the sheet list.

use super::relationships::RelId;
use super::xml_writer::XmlPart;
use crate::error::Result;
use crate::namespaces::{NS_DOC_RELATIONSHIPS, NS_SPREADSHEET};

/// A sheet as listed in the workbook part.
pub(crate) struct SheetEntry<'a> {
    pub name: &'a str,
    /// Workbook-namespace id; its number doubles as `sheetId`
    pub id: RelId,
}

pub(crate) fn write_workbook_xml(sheets: &[SheetEntry<'_>]) -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    x.open(
        "workbook",
        &[("xmlns", NS_SPREADSHEET), ("xmlns:r", NS_DOC_RELATIONSHIPS)],
    )?;
    x.open("sheets", &[])?;
    for sheet in sheets {
        let sheet_id = sheet.id.number.to_string();
        x.empty(
            "sheet",
            &[
                ("name", sheet.name),
                ("sheetId", sheet_id.as_str()),
                ("r:id", sheet.id.token.as_str()),
            ],
        )?;
    }
    x.close("sheets")?;
    x.close("workbook")?;
    Ok(x.finish())
}
