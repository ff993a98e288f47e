//! Tests for building packages from JSON workbook descriptions.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use common::{assert_in_order, Package};
use xlpack::document::WorkbookDocument;
use xlpack::{to_xlsx_bytes, XlsxError};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 7];

fn assemble(json: &str) -> Package {
    let doc = WorkbookDocument::from_json(json).unwrap();
    let wb = doc.to_workbook().unwrap();
    Package::open(to_xlsx_bytes(&wb, doc.options.clone()).unwrap())
}

#[test]
fn test_full_document() {
    let json = format!(
        r##"{{
            "appName": "reports",
            "options": {{ "created": "2023-03-04T05:06:07Z" }},
            "sheets": [{{
                "name": "Summary",
                "columns": [{{ "column": 2, "width": 18.5 }}],
                "rows": [
                    {{ "height": 24, "cells": [
                        {{ "value": "Total", "style": {{ "font": {{ "bold": true }} }} }},
                        {{ "value": 1250 }}
                    ]}},
                    {{ "cells": [
                        {{ "error": "#DIV/0!" }},
                        {{ "picture": {{ "extension": "png", "data": "{data}" }} }}
                    ]}}
                ],
                "merges": ["C1:D2"]
            }}]
        }}"##,
        data = BASE64.encode(PNG)
    );
    let mut pkg = assemble(&json);

    let sheet = pkg.text("xl/worksheets/Summary.xml");
    assert_in_order(
        &sheet,
        &[
            r#"<col min="2" max="2" width="18.5" customWidth="1"/>"#,
            r#"<row r="1" ht="24" customHeight="1">"#,
            r#"<c r="A1" s="1" t="s">"#,
            r#"<c r="B1" t="n">"#,
            "<v>1250</v>",
            r#"<c r="A2" t="e">"#,
            "<v>#DIV/0!</v>",
            r#"<c r="B2" t="e" vm="1">"#,
            r#"<mergeCell ref="C1:D2"/>"#,
        ],
    );

    let media = pkg.media_names();
    assert_eq!(media.len(), 1);
    assert_eq!(pkg.bytes(&media[0]), PNG);
    assert!(pkg
        .text("docProps/core.xml")
        .contains(">2023-03-04T05:06:07Z</dcterms:created>"));
    assert!(pkg
        .text("docProps/app.xml")
        .contains("<Application>reports</Application>"));
}

#[test]
fn test_empty_cells_keep_their_position() {
    let mut pkg = assemble(
        r#"{"sheets":[{"name":"S","rows":[{"cells":[{},{"value":"x"}]},{}]}]}"#,
    );
    let sheet = pkg.text("xl/worksheets/S.xml");
    assert_in_order(
        &sheet,
        &[r#"<c r="A1"/>"#, r#"<c r="B1" t="s">"#, r#"<row r="2"/>"#],
    );
}

#[test]
fn test_picture_without_data() {
    let doc = WorkbookDocument::from_json(
        r#"{"sheets":[{"name":"S","rows":[{"cells":[{"value":1},{"picture":{"extension":"png"}}]}]}]}"#,
    )
    .unwrap();
    let err = doc.to_workbook().unwrap_err();
    assert!(matches!(err, XlsxError::MissingPicture(ref c) if c == "B1"));
}

#[test]
fn test_conflicting_cell_content() {
    let doc = WorkbookDocument::from_json(
        r##"{"sheets":[{"name":"S","rows":[{"cells":[{"value":1,"error":"#N/A"}]}]}]}"##,
    )
    .unwrap();
    assert!(matches!(doc.to_workbook(), Err(XlsxError::Document(_))));
}

#[test]
fn test_invalid_documents() {
    let cases = [
        (r#"{"sheets":[{"name":"a/b"}]}"#, "sheet name"),
        (r#"{"sheets":[{"name":"S"},{"name":"S"}]}"#, "duplicate"),
        (r#"{"sheets":[{"name":"S","merges":["A1:B2","B1:C1"]}]}"#, "overlap"),
        (r#"{"sheets":[{"name":"S","columns":[{"column":0,"width":3}]}]}"#, "column"),
    ];
    for (json, label) in cases {
        let doc = WorkbookDocument::from_json(json).unwrap();
        let err = doc.to_workbook().unwrap_err();
        let ok = match label {
            "sheet name" => matches!(err, XlsxError::SheetName(_)),
            "duplicate" => matches!(err, XlsxError::DuplicateSheet(_)),
            "overlap" => matches!(err, XlsxError::MergeOverlap(_)),
            _ => matches!(err, XlsxError::Document(_)),
        };
        assert!(ok, "{label}: {err:?}");
    }
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        WorkbookDocument::from_json("{\"sheets\": ["),
        Err(XlsxError::Json(_))
    ));
    assert!(matches!(
        WorkbookDocument::from_slice(br#"{"sheets":[{"name":"S","rows":[{"cells":[{"picture":{"extension":"png","data":"***"}}]}]}]}"#)
            .unwrap()
            .to_workbook(),
        Err(XlsxError::Base64(_))
    ));
}
