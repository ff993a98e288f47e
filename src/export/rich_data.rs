//! The four parts that bind picture cells to their images.
//!
//! A picture cell carries `vm="k"`. Entry `k` (1-based) of `valueMetadata`
//! points at rich value `k - 1`, which names relationship `k - 1` of
//! `richValueRel.xml`, whose id resolves to the media file. All four lists
//! are in internal-id order and have one entry per media item.

use super::media::MediaStore;
use super::xml_writer::XmlPart;
use crate::error::Result;
use crate::namespaces::{
    NS_DOC_RELATIONSHIPS, NS_RICH_DATA, NS_RICH_VALUE_REL, NS_SPREADSHEET,
    RICH_VALUE_BLOCK_EXT_URI, XLRICHVALUE,
};

/// `CalcOrigin` recorded for every local image value.
const CALC_ORIGIN: &str = "5";

/// Flags set on the `XLRICHVALUE` metadata type.
const METADATA_TYPE_FLAGS: [&str; 10] = [
    "copy",
    "pasteAll",
    "pasteValues",
    "merge",
    "splitFirst",
    "rowColShift",
    "clearFormats",
    "clearComments",
    "assign",
    "coerce",
];

/// `xl/richData/richValueRel.xml`: one `<rel>` per image.
pub(crate) fn write_rich_value_rel_xml(media: &MediaStore) -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    x.open(
        "richValueRels",
        &[("xmlns", NS_RICH_VALUE_REL), ("xmlns:r", NS_DOC_RELATIONSHIPS)],
    )?;
    for item in media.items() {
        x.empty("rel", &[("r:id", item.rel_id.token.as_str())])?;
    }
    x.close("richValueRels")?;
    Ok(x.finish())
}

/// `xl/richData/rdrichvaluestructure.xml`: the single `_localImage` schema.
pub(crate) fn write_rich_value_structure_xml() -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    x.open("rvStructures", &[("xmlns", NS_RICH_DATA), ("count", "1")])?;
    x.open("s", &[("t", "_localImage")])?;
    x.empty("k", &[("n", "_rvRel:LocalImageIdentifier"), ("t", "i")])?;
    x.empty("k", &[("n", "CalcOrigin"), ("t", "i")])?;
    x.close("s")?;
    x.close("rvStructures")?;
    Ok(x.finish())
}

/// `xl/richData/rdrichvalue.xml`: one value per image, structure 0.
pub(crate) fn write_rich_value_data_xml(media: &MediaStore) -> Result<Vec<u8>> {
    let count = media.len().to_string();
    let mut x = XmlPart::new()?;
    x.open(
        "rvData",
        &[("xmlns", NS_RICH_DATA), ("count", count.as_str())],
    )?;
    for item in media.items() {
        let rel_index = item.internal_id.to_string();
        x.open("rv", &[("s", "0")])?;
        x.leaf("v", &[], &rel_index)?;
        x.leaf("v", &[], CALC_ORIGIN)?;
        x.close("rv")?;
    }
    x.close("rvData")?;
    Ok(x.finish())
}

/// `xl/metadata.xml`: the `futureMetadata` and `valueMetadata` tables.
pub(crate) fn write_metadata_xml(media: &MediaStore) -> Result<Vec<u8>> {
    let count = media.len().to_string();
    let mut x = XmlPart::new()?;
    x.open(
        "metadata",
        &[("xmlns", NS_SPREADSHEET), ("xmlns:xlrd", NS_RICH_DATA)],
    )?;

    x.open("metadataTypes", &[("count", "1")])?;
    let mut type_attrs = vec![("name", XLRICHVALUE), ("minSupportedVersion", "120000")];
    type_attrs.extend(METADATA_TYPE_FLAGS.iter().map(|&flag| (flag, "1")));
    x.empty("metadataType", &type_attrs)?;
    x.close("metadataTypes")?;

    x.open(
        "futureMetadata",
        &[("name", XLRICHVALUE), ("count", count.as_str())],
    )?;
    for item in media.items() {
        let id = item.internal_id.to_string();
        x.open("bk", &[])?;
        x.open("extLst", &[])?;
        x.open("ext", &[("uri", RICH_VALUE_BLOCK_EXT_URI)])?;
        x.empty("xlrd:rvb", &[("i", id.as_str())])?;
        x.close("ext")?;
        x.close("extLst")?;
        x.close("bk")?;
    }
    x.close("futureMetadata")?;

    x.open("valueMetadata", &[("count", count.as_str())])?;
    for item in media.items() {
        let id = item.internal_id.to_string();
        x.open("bk", &[])?;
        x.empty("rc", &[("t", "1"), ("v", id.as_str())])?;
        x.close("bk")?;
    }
    x.close("valueMetadata")?;

    x.close("metadata")?;
    Ok(x.finish())
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
    use crate::export::relationships::IdSequence;
    use crate::types::Picture;
    use std::sync::Arc;

    fn store_with(payloads: &[&[u8]]) -> MediaStore {
        let mut store = MediaStore::default();
        let mut ids = IdSequence::default();
        for (i, data) in payloads.iter().enumerate() {
            let pic = Arc::new(Picture::new("png", data.to_vec()));
            store.register(&pic, &format!("A{}", i + 1), &mut ids).unwrap();
        }
        store
    }

    #[test]
    fn test_tables_follow_internal_ids() {
        let store = store_with(&[b"a", b"b", b"a"]);
        let xml = String::from_utf8(write_metadata_xml(&store).unwrap()).unwrap();
        assert!(xml.contains(r#"<futureMetadata name="XLRICHVALUE" count="2">"#));
        assert!(xml.contains(r#"<xlrd:rvb i="0"/>"#));
        assert!(xml.contains(r#"<xlrd:rvb i="1"/>"#));
        assert!(xml.contains(r#"<valueMetadata count="2">"#));
        assert!(xml.contains(r#"<rc t="1" v="1"/>"#));
        assert!(xml.contains(r#"minSupportedVersion="120000" copy="1""#));
        assert!(xml.contains(r#"coerce="1"/>"#));

        let data = String::from_utf8(write_rich_value_data_xml(&store).unwrap()).unwrap();
        assert!(data.contains(r#"count="2""#));
        assert_eq!(data.matches(r#"<rv s="0">"#).count(), 2);
        assert_eq!(data.matches("<v>5</v>").count(), 2);

        let rels = String::from_utf8(write_rich_value_rel_xml(&store).unwrap()).unwrap();
        let first = rels.find(r#"<rel r:id="rId1"/>"#).unwrap();
        let second = rels.find(r#"<rel r:id="rId2"/>"#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_structure_is_fixed() {
        let xml = String::from_utf8(write_rich_value_structure_xml().unwrap()).unwrap();
        assert!(xml.contains(r#"<s t="_localImage">"#));
        assert!(xml.contains(r#"<k n="_rvRel:LocalImageIdentifier" t="i"/>"#));
        assert!(xml.contains(r#"<k n="CalcOrigin" t="i"/>"#));
    }
}
