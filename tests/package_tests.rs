//! End-to-end tests for package assembly.
//!
//! Each test builds a workbook through the public API, assembles it into a
//! zip archive and reads the parts back.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use common::{assert_in_order, build, count, fixed_options, Package};
use xlpack::namespaces::{REL_SHARED_STRINGS, REL_STYLES, REL_WORKSHEET};
use xlpack::{
    Alignment, BlobStorage, ErrorValue, Font, HAlign, MemoryStorage, PackageWriter, Style,
    Workbook, XlsxError,
};

fn header_style() -> Style {
    Style {
        alignment: Alignment {
            horizontal: Some(HAlign::Center),
            vertical: None,
        },
        font: Font::bold(),
    }
}

/// One header row (bold, centered strings) and one data row.
fn report_workbook() -> Workbook {
    let mut wb = Workbook::new();
    wb.app_name = "xlpack".to_string();
    let sheet = wb.add_sheet("Report").unwrap();

    let header = sheet.add_row();
    for title in ["Name", "Score", "Count", "Active"] {
        header.add_cell().set_str(title).set_style(header_style());
    }

    let data = sheet.add_row();
    data.add_cell().set_str("Alice");
    data.add_cell().set_float(97.5);
    data.add_cell().set_int(3);
    data.add_cell().set_bool(true);
    wb
}

// ============================================================================
// END-TO-END
// ============================================================================

#[test]
fn test_report_worksheet_cells() {
    let mut pkg = Package::from_workbook(&report_workbook());
    let sheet = pkg.text("xl/worksheets/Report.xml");

    assert_eq!(count(&sheet, r#" s="1" t="s">"#), 4);
    assert_in_order(
        &sheet,
        &[
            r#"<c r="A2" t="s">"#,
            "<v>4</v>",
            r#"<c r="B2" t="n">"#,
            "<v>97.5</v>",
            r#"<c r="C2" t="n">"#,
            "<v>3</v>",
            r#"<c r="D2" t="b">"#,
            "<v>1</v>",
        ],
    );
}

#[test]
fn test_report_styles_and_strings() {
    let mut pkg = Package::from_workbook(&report_workbook());

    let styles = pkg.text("xl/styles.xml");
    assert!(styles.contains(r#"<fonts count="2">"#));
    assert_eq!(count(&styles, "<b/>"), 1);
    assert!(styles.contains(r#"<cellXfs count="2">"#));
    assert!(styles.contains(r#"<alignment horizontal="center"/>"#));

    let sst = pkg.text("xl/sharedStrings.xml");
    assert!(sst.contains(r#"count="5" uniqueCount="5""#));
    assert_in_order(
        &sst,
        &[
            "<t>Name</t>",
            "<t>Score</t>",
            "<t>Count</t>",
            "<t>Active</t>",
            "<t>Alice</t>",
        ],
    );

    let app = pkg.text("docProps/app.xml");
    assert!(app.contains("<Application>xlpack</Application>"));
    let core = pkg.text("docProps/core.xml");
    assert!(core.contains(">2024-06-01T12:00:00Z</dcterms:created>"));
}

#[test]
fn test_repeated_strings_share_an_entry() {
    let mut wb = Workbook::new();
    let sheet = wb.add_sheet("S").unwrap();
    for _ in 0..3 {
        sheet.add_row().add_cell().set_str("same");
    }
    wb.add_sheet("T").unwrap().add_row().add_cell().set_str("same");

    let mut pkg = Package::from_workbook(&wb);
    let sst = pkg.text("xl/sharedStrings.xml");
    assert!(sst.contains(r#"count="1" uniqueCount="1""#));
    assert_eq!(count(&pkg.text("xl/worksheets/S.xml"), "<v>0</v>"), 3);
    assert_eq!(count(&pkg.text("xl/worksheets/T.xml"), "<v>0</v>"), 1);
}

#[test]
fn test_error_cells() {
    let mut wb = Workbook::new();
    let row = wb.add_sheet("S").unwrap().add_row();
    row.add_cell().set_error(ErrorValue::NA);
    row.add_cell().set_float(f64::NAN);

    let mut pkg = Package::from_workbook(&wb);
    let sheet = pkg.text("xl/worksheets/S.xml");
    assert_in_order(
        &sheet,
        &[
            r#"<c r="A1" t="e">"#,
            "<v>#N/A</v>",
            r#"<c r="B1" t="e">"#,
            "<v>#NUM!</v>",
        ],
    );
}

#[test]
fn test_nan_font_size_styles_share_an_entry() {
    let nan_bold = Style::with_font(Font {
        size: f64::NAN,
        ..Font::bold()
    });
    let mut wb = Workbook::new();
    let row = wb.add_sheet("S").unwrap().add_row();
    row.add_cell().set_int(1).set_style(nan_bold.clone());
    row.add_cell().set_int(2).set_style(nan_bold);

    let mut pkg = Package::from_workbook(&wb);
    let sheet = pkg.text("xl/worksheets/S.xml");
    assert!(sheet.contains(r#"<c r="A1" s="1" t="n">"#));
    assert!(sheet.contains(r#"<c r="B1" s="1" t="n">"#));

    let styles = pkg.text("xl/styles.xml");
    assert!(styles.contains(r#"<fonts count="2">"#));
    assert!(styles.contains(r#"<cellXfs count="2">"#));
    assert!(styles.contains(
        r#"<xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>"#
    ));
    assert!(!styles.contains("NaN"));
}

// ============================================================================
// PART LAYOUT
// ============================================================================

#[test]
fn test_optional_parts_are_omitted() {
    let mut wb = Workbook::new();
    wb.add_sheet("Numbers").unwrap().add_row().add_cell().set_int(1);

    let mut pkg = Package::from_workbook(&wb);
    assert!(!pkg.has("xl/sharedStrings.xml"));
    assert!(!pkg.has("xl/styles.xml"));
    assert!(!pkg.has("xl/metadata.xml"));
    assert!(pkg.media_names().is_empty());

    let ct = pkg.text("[Content_Types].xml");
    assert!(!ct.contains("sharedStrings"));
    assert!(!ct.contains("styles"));
}

#[test]
fn test_part_write_order() {
    let mut pkg = Package::from_workbook(&report_workbook());
    assert_eq!(
        pkg.names(),
        [
            "xl/worksheets/Report.xml",
            "xl/workbook.xml",
            "docProps/core.xml",
            "docProps/app.xml",
            "xl/sharedStrings.xml",
            "xl/styles.xml",
            "xl/_rels/workbook.xml.rels",
            "_rels/.rels",
            "[Content_Types].xml",
        ]
    );
}

#[test]
fn test_sheet_ids_and_relationships() {
    let mut wb = Workbook::new();
    for name in ["One", "Two", "Three"] {
        wb.add_sheet(name).unwrap().add_row().add_cell().set_str(name);
    }

    let mut pkg = Package::from_workbook(&wb);
    let workbook = pkg.text("xl/workbook.xml");
    assert_in_order(
        &workbook,
        &[
            r#"<sheet name="One" sheetId="1" r:id="rId1"/>"#,
            r#"<sheet name="Two" sheetId="2" r:id="rId2"/>"#,
            r#"<sheet name="Three" sheetId="3" r:id="rId3"/>"#,
        ],
    );

    let rels = pkg.text("xl/_rels/workbook.xml.rels");
    assert!(rels.contains(&format!(
        r#"Id="rId3" Type="{REL_WORKSHEET}" Target="worksheets/Three.xml""#
    )));
    assert!(rels.contains(&format!(
        r#"Id="rId4" Type="{REL_SHARED_STRINGS}" Target="sharedStrings.xml""#
    )));
    assert!(!rels.contains(REL_STYLES));
}

#[test]
fn test_rels_are_sorted_lexicographically() {
    let mut wb = Workbook::new();
    for i in 1..=10 {
        wb.add_sheet(&format!("S{i}")).unwrap();
    }

    let mut pkg = Package::from_workbook(&wb);
    let rels = pkg.text("xl/_rels/workbook.xml.rels");
    assert_in_order(
        &rels,
        &[r#"Id="rId1""#, r#"Id="rId10""#, r#"Id="rId2""#, r#"Id="rId9""#],
    );
}

#[test]
fn test_content_types_sorted() {
    let mut pkg = Package::from_workbook(&report_workbook());
    let ct = pkg.text("[Content_Types].xml");
    assert_in_order(
        &ct,
        &[
            r#"<Default Extension="rels""#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"PartName="/docProps/app.xml""#,
            r#"PartName="/docProps/core.xml""#,
            r#"PartName="/xl/sharedStrings.xml""#,
            r#"PartName="/xl/styles.xml""#,
            r#"PartName="/xl/workbook.xml""#,
            r#"PartName="/xl/worksheets/Report.xml""#,
        ],
    );
}

// ============================================================================
// DETERMINISM
// ============================================================================

#[test]
fn test_identical_input_gives_identical_bytes() {
    let wb = report_workbook();
    assert_eq!(build(&wb), build(&wb));
}

#[test]
fn test_identical_parts_in_memory() {
    let wb = report_workbook();
    let first = PackageWriter::with_options(MemoryStorage::new(), fixed_options())
        .write(&wb)
        .unwrap()
        .into_blobs();
    let second = PackageWriter::with_options(MemoryStorage::new(), fixed_options())
        .write(&wb)
        .unwrap()
        .into_blobs();
    assert_eq!(first, second);
}

// ============================================================================
// SINK FAILURES
// ============================================================================

/// Accepts `limit` blobs, then fails.
struct FailingStorage {
    limit: usize,
    written: usize,
}

impl BlobStorage for FailingStorage {
    fn write_blob(&mut self, _path: &str, _data: &[u8]) -> xlpack::Result<()> {
        if self.written == self.limit {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into());
        }
        self.written += 1;
        Ok(())
    }
}

#[test]
fn test_sink_error_aborts_assembly() {
    let sink = FailingStorage {
        limit: 2,
        written: 0,
    };
    let err = PackageWriter::new(sink)
        .write(&report_workbook())
        .err()
        .unwrap();
    match err {
        XlsxError::Io(e) => assert_eq!(e.to_string(), "disk full"),
        other => panic!("expected I/O error, got {other:?}"),
    }
}
