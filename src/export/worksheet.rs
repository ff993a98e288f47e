//! Generates worksheet XML from a `Sheet`.
//!
//! This is the content walk: every string, non-default style and picture
//! met here is interned into the assembly context, and the indices it hands
//! back are what the cells reference.

use super::context::{AssemblyContext, Walking};
use super::relationships::IdSequence;
use super::xml_writer::XmlPart;
use crate::error::Result;
use crate::namespaces::{NS_DOC_RELATIONSHIPS, NS_SPREADSHEET};
use crate::types::{Cell, CellValue, ErrorValue, Row, Sheet};

/// Write a complete worksheet part for `sheet`.
pub(crate) fn write_worksheet_xml(
    sheet: &Sheet,
    ctx: &mut AssemblyContext<Walking>,
    rich_data_ids: &mut IdSequence,
) -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    x.open(
        "worksheet",
        &[("xmlns", NS_SPREADSHEET), ("xmlns:r", NS_DOC_RELATIONSHIPS)],
    )?;

    // <cols>, ascending column order
    if !sheet.columns().is_empty() {
        x.open("cols", &[])?;
        for (&n, col) in sheet.columns() {
            let n = n.to_string();
            let width = col.width.to_string();
            x.empty(
                "col",
                &[
                    ("min", n.as_str()),
                    ("max", n.as_str()),
                    ("width", width.as_str()),
                    ("customWidth", "1"),
                ],
            )?;
        }
        x.close("cols")?;
    }

    if sheet.rows().is_empty() {
        x.empty("sheetData", &[])?;
    } else {
        x.open("sheetData", &[])?;
        for row in sheet.rows() {
            write_row(&mut x, row, ctx, rich_data_ids)?;
        }
        x.close("sheetData")?;
    }

    if !sheet.merges().is_empty() {
        let count = sheet.merges().len().to_string();
        x.open("mergeCells", &[("count", count.as_str())])?;
        for merge in sheet.merges() {
            let reference = merge.to_string();
            x.empty("mergeCell", &[("ref", reference.as_str())])?;
        }
        x.close("mergeCells")?;
    }

    x.close("worksheet")?;
    Ok(x.finish())
}

fn write_row(
    x: &mut XmlPart,
    row: &Row,
    ctx: &mut AssemblyContext<Walking>,
    rich_data_ids: &mut IdSequence,
) -> Result<()> {
    let number = row.number().to_string();
    let height = row.height.to_string();
    let mut attrs: Vec<(&str, &str)> = vec![("r", number.as_str())];
    if row.height.is_finite() && row.height > 0.0 {
        attrs.push(("ht", height.as_str()));
        attrs.push(("customHeight", "1"));
    }

    if row.cells().is_empty() {
        return x.empty("row", &attrs);
    }
    x.open("row", &attrs)?;
    for cell in row.cells() {
        write_cell(x, cell, ctx, rich_data_ids)?;
    }
    x.close("row")
}

/// Write a single `<c>` element. Attribute order is `r`, `s`, `t`, `vm`.
fn write_cell(
    x: &mut XmlPart,
    cell: &Cell,
    ctx: &mut AssemblyContext<Walking>,
    rich_data_ids: &mut IdSequence,
) -> Result<()> {
    let style_idx = ctx.intern_style(&cell.style);
    let style = style_idx.to_string();
    let mut value_metadata = None;
    let mut attrs: Vec<(&str, &str)> = vec![("r", cell.coordinate())];
    if style_idx != 0 {
        attrs.push(("s", style.as_str()));
    }

    let text = match cell.value() {
        CellValue::Empty => return x.empty("c", &attrs),
        CellValue::Bool(b) => u8::from(*b).to_string(),
        CellValue::Int(n) => n.to_string(),
        CellValue::Float(f) => format_number(*f),
        CellValue::Str(s) => ctx.intern_string(s).to_string(),
        CellValue::Error(e) => e.as_str().to_string(),
        CellValue::Picture(picture) => {
            let internal_id = ctx.register_media(picture, cell.coordinate(), rich_data_ids)?;
            value_metadata = Some((internal_id + 1).to_string());
            ErrorValue::Value.as_str().to_string()
        }
    };

    if let Some(t) = cell.value().cell_type() {
        attrs.push(("t", t.as_str()));
    }
    if let Some(vm) = &value_metadata {
        attrs.push(("vm", vm.as_str()));
    }

    x.open("c", &attrs)?;
    x.leaf("v", &[], &text)?;
    x.close("c")
}

/// Shortest round-trip text for a finite float, switching to exponent
/// notation outside `[1e-5, 1e15)`.
pub(crate) fn format_number(v: f64) -> String {
    let magnitude = v.abs();
    if v == 0.0 || (1e-5..1e15).contains(&magnitude) {
        v.to_string()
    } else {
        format!("{v:e}")
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
    use crate::types::{Font, Style, Workbook};

    fn render(sheet: &Sheet) -> (String, AssemblyContext<Walking>, IdSequence) {
        let mut ctx = AssemblyContext::new();
        let mut ids = IdSequence::default();
        let xml = write_worksheet_xml(sheet, &mut ctx, &mut ids).unwrap();
        (String::from_utf8(xml).unwrap(), ctx, ids)
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.75), "2.75");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(1e20), "1e20");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_cell_types_and_values() {
        let mut wb = Workbook::new();
        let sheet = wb.add_sheet("Data").unwrap();
        let row = sheet.add_row();
        row.add_cell().set_str("hello");
        row.add_cell().set_float(2.5);
        row.add_cell().set_int(-7);
        row.add_cell().set_bool(true);
        row.add_cell().set_error(ErrorValue::Div0);
        row.add_cell();

        let (xml, ctx, _) = render(wb.sheet("Data").unwrap());
        assert!(xml.contains(r#"<c r="A1" t="s">"#));
        assert!(xml.contains("<v>0</v>"));
        assert!(xml.contains(r#"<c r="B1" t="n">"#));
        assert!(xml.contains("<v>2.5</v>"));
        assert!(xml.contains("<v>-7</v>"));
        assert!(xml.contains(r#"<c r="D1" t="b">"#));
        assert!(xml.contains(r#"<c r="E1" t="e">"#));
        assert!(xml.contains("<v>#DIV/0!</v>"));
        assert!(xml.contains(r#"<c r="F1"/>"#));
        assert_eq!(ctx.finish().shared_strings().len(), 1);
    }

    #[test]
    fn test_style_index_is_offset_by_one() {
        let mut wb = Workbook::new();
        let sheet = wb.add_sheet("S").unwrap();
        let row = sheet.add_row();
        row.add_cell().set_int(1).set_style(Style::with_font(Font::bold()));
        row.add_cell().set_int(2);

        let (xml, _, _) = render(wb.sheet("S").unwrap());
        assert!(xml.contains(r#"<c r="A1" s="1" t="n">"#));
        assert!(xml.contains(r#"<c r="B1" t="n">"#));
    }

    #[test]
    fn test_cols_rows_and_merges() {
        let mut wb = Workbook::new();
        let sheet = wb.add_sheet("S").unwrap();
        sheet.set_column_width(3, 12.5);
        sheet.set_column_width(1, 20.0);
        sheet.add_row().set_height(30.0);
        sheet.add_row();
        sheet.merge("A1:B2").unwrap();

        let (xml, _, _) = render(wb.sheet("S").unwrap());
        let a = xml
            .find(r#"<col min="1" max="1" width="20" customWidth="1"/>"#)
            .unwrap();
        let c = xml
            .find(r#"<col min="3" max="3" width="12.5" customWidth="1"/>"#)
            .unwrap();
        assert!(a < c);
        assert!(xml.contains(r#"<row r="1" ht="30" customHeight="1"/>"#));
        assert!(xml.contains(r#"<row r="2"/>"#));
        assert!(xml.contains(r#"<mergeCells count="1">"#));
        assert!(xml.contains(r#"<mergeCell ref="A1:B2"/>"#));
    }

    #[test]
    fn test_non_finite_row_height_uses_default() {
        let mut wb = Workbook::new();
        let sheet = wb.add_sheet("S").unwrap();
        sheet.add_row().set_height(f32::INFINITY);
        sheet.add_row().set_height(f32::NAN);
        sheet.add_row().set_height(-4.0);
        sheet.set_column_width(1, f32::INFINITY);

        let (xml, _, _) = render(wb.sheet("S").unwrap());
        assert!(xml.contains(r#"<row r="1"/>"#));
        assert!(xml.contains(r#"<row r="2"/>"#));
        assert!(xml.contains(r#"<row r="3"/>"#));
        assert!(!xml.contains("inf"));
        assert!(!xml.contains("NaN"));
        assert!(!xml.contains("<cols>"));
    }

    #[test]
    fn test_picture_cell_uses_value_metadata() {
        let mut wb = Workbook::new();
        let sheet = wb.add_sheet("S").unwrap();
        let row = sheet.add_row();
        let pic = std::sync::Arc::new(crate::types::Picture::new("png", vec![1, 2, 3]));
        row.add_cell().set_picture(pic.clone());
        row.add_cell().set_picture(pic);

        let (xml, ctx, ids) = render(wb.sheet("S").unwrap());
        assert!(xml.contains(r#"<c r="A1" t="e" vm="1">"#));
        assert!(xml.contains(r#"<c r="B1" t="e" vm="1">"#));
        assert!(xml.contains("<v>#VALUE!</v>"));
        assert_eq!(ids.issued(), 1);
        assert_eq!(ctx.finish().media().len(), 1);
    }

    #[test]
    fn test_text_is_escaped_in_shared_strings_not_cells() {
        let mut wb = Workbook::new();
        let sheet = wb.add_sheet("S").unwrap();
        sheet.add_row().add_cell().set_str("a < b");
        let (xml, ctx, _) = render(wb.sheet("S").unwrap());
        assert!(!xml.contains("a < b"));
        assert_eq!(ctx.finish().shared_strings().strings(), ["a < b"]);
    }
}
