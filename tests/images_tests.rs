//! Tests for pictures embedded in cells.
//!
//! A picture cell is written as an error value with a `vm` attribute:
//! ```xml
//! <c r="A1" t="e" vm="1"><v>#VALUE!</v></c>
//! ```
//! and resolved through `xl/metadata.xml` and the `xl/richData/` parts.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use std::sync::Arc;

use common::{assert_in_order, count, fixed_options, Package};
use xlpack::{to_xlsx_bytes, Picture, Workbook, XlsxError};

const PNG_A: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1];
const PNG_B: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 2];
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00];
const EMPTY: &[u8] = &[];

fn picture_workbook(pictures: &[(&str, &[u8])]) -> Workbook {
    let mut wb = Workbook::new();
    let row = wb.add_sheet("Pics").unwrap().add_row();
    for (ext, data) in pictures {
        row.add_cell().set_picture(Picture::new(*ext, data.to_vec()));
    }
    wb
}

#[test]
fn test_identical_images_are_stored_once() {
    let wb = picture_workbook(&[("png", PNG_A), ("png", PNG_A)]);
    let mut pkg = Package::from_workbook(&wb);

    assert_eq!(pkg.media_names().len(), 1);
    let sheet = pkg.text("xl/worksheets/Pics.xml");
    assert!(sheet.contains(r#"<c r="A1" t="e" vm="1">"#));
    assert!(sheet.contains(r#"<c r="B1" t="e" vm="1">"#));
    assert_eq!(count(&sheet, "<v>#VALUE!</v>"), 2);

    let metadata = pkg.text("xl/metadata.xml");
    assert!(metadata.contains(r#"<valueMetadata count="1">"#));
    assert!(metadata.contains(r#"<futureMetadata name="XLRICHVALUE" count="1">"#));
}

#[test]
fn test_shared_picture_instance() {
    let mut wb = Workbook::new();
    let pic = Arc::new(Picture::new("png", PNG_A.to_vec()));
    let sheet = wb.add_sheet("Pics").unwrap();
    sheet.add_row().add_cell().set_picture(Arc::clone(&pic));
    sheet.add_row().add_cell().set_picture(pic);

    let mut pkg = Package::from_workbook(&wb);
    assert_eq!(pkg.media_names().len(), 1);
}

#[test]
fn test_distinct_images_follow_first_appearance() {
    let wb = picture_workbook(&[("png", PNG_B), ("png", PNG_A), ("png", PNG_B)]);
    let mut pkg = Package::from_workbook(&wb);

    let sheet = pkg.text("xl/worksheets/Pics.xml");
    assert_in_order(
        &sheet,
        &[
            r#"<c r="A1" t="e" vm="1">"#,
            r#"<c r="B1" t="e" vm="2">"#,
            r#"<c r="C1" t="e" vm="1">"#,
        ],
    );

    let media = pkg.media_names();
    assert_eq!(media.len(), 2);

    let rels = pkg.text("xl/richData/_rels/richValueRel.xml.rels");
    for name in &media {
        let file = name.trim_start_matches("xl/media/");
        assert!(rels.contains(&format!(r#"Target="../media/{file}""#)));
    }

    let rv = pkg.text("xl/richData/rdrichvalue.xml");
    assert!(rv.contains(r#"<rvData xmlns="http://schemas.microsoft.com/office/spreadsheetml/2017/richdata" count="2">"#));
    assert_in_order(&rv, &["<v>0</v>", "<v>5</v>", "<v>1</v>", "<v>5</v>"]);

    let rel_list = pkg.text("xl/richData/richValueRel.xml");
    assert_in_order(&rel_list, &[r#"r:id="rId1""#, r#"r:id="rId2""#]);
}

#[test]
fn test_media_names_are_content_addressed() {
    let first = {
        let mut pkg = Package::from_workbook(&picture_workbook(&[("png", PNG_A)]));
        pkg.media_names()
    };
    let second = {
        let mut pkg = Package::from_workbook(&picture_workbook(&[("png", PNG_B), ("png", PNG_A)]));
        pkg.media_names()
    };
    assert_eq!(first.len(), 1);
    assert!(second.contains(&first[0]));

    let file = first[0].trim_start_matches("xl/media/");
    let (hash, ext) = file.split_once('.').unwrap();
    assert_eq!(hash.len(), 32);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(ext, "png");
}

#[test]
fn test_media_bytes_are_written_verbatim() {
    let mut pkg = Package::from_workbook(&picture_workbook(&[(".JPG", JPEG)]));
    let media = pkg.media_names();
    assert_eq!(media.len(), 1);
    assert!(media[0].ends_with(".jpeg"));
    assert_eq!(pkg.bytes(&media[0]), JPEG);

    let ct = pkg.text("[Content_Types].xml");
    assert!(ct.contains(r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#));
}

#[test]
fn test_rich_data_workbook_relationships() {
    let wb = picture_workbook(&[("png", PNG_A)]);
    let mut pkg = Package::from_workbook(&wb);
    let rels = pkg.text("xl/_rels/workbook.xml.rels");
    assert!(rels.contains(r#"Id="rId2" Type="http://schemas.microsoft.com/office/2022/10/relationships/richValueRel" Target="richData/richValueRel.xml""#));
    assert!(rels.contains(r#"Id="rId3" Type="http://schemas.microsoft.com/office/2017/06/relationships/rdRichValueStructure""#));
    assert!(rels.contains(r#"Id="rId4" Type="http://schemas.microsoft.com/office/2017/06/relationships/rdRichValue""#));
    assert!(rels.contains(r#"Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sheetMetadata" Target="metadata.xml""#));

    let ct = pkg.text("[Content_Types].xml");
    assert!(ct.contains(r#"<Override PartName="/xl/metadata.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheetMetadata+xml"/>"#));
    assert!(ct.contains(r#"PartName="/xl/richData/rdrichvaluestructure.xml""#));
}

#[test]
fn test_unsupported_extension_fails() {
    let wb = picture_workbook(&[("gif", PNG_A)]);
    let err = to_xlsx_bytes(&wb, fixed_options()).unwrap_err();
    assert!(matches!(err, XlsxError::UnsupportedImage(ref ext) if ext == "gif"));
}

#[test]
fn test_empty_payload_fails() {
    let wb = picture_workbook(&[("png", PNG_A), ("png", EMPTY)]);
    let err = to_xlsx_bytes(&wb, fixed_options()).unwrap_err();
    assert!(matches!(err, XlsxError::EmptyPicture(ref cell) if cell == "B1"));
}
