//! `xl/sharedStrings.xml`.

use super::interning::SharedStrings;
use super::xml_writer::XmlPart;
use crate::error::Result;
use crate::namespaces::NS_SPREADSHEET;

pub(crate) fn write_shared_strings_xml(strings: &SharedStrings) -> Result<Vec<u8>> {
    let count = strings.len().to_string();
    let mut x = XmlPart::new()?;
    x.open(
        "sst",
        &[
            ("xmlns", NS_SPREADSHEET),
            ("count", count.as_str()),
            ("uniqueCount", count.as_str()),
        ],
    )?;
    for s in strings.strings() {
        x.open("si", &[])?;
        if needs_preserve(s) {
            x.leaf("t", &[("xml:space", "preserve")], s)?;
        } else {
            x.leaf("t", &[], s)?;
        }
        x.close("si")?;
    }
    x.close("sst")?;
    Ok(x.finish())
}

/// Leading or trailing whitespace is dropped by readers unless preserved.
fn needs_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_sst() {
        let mut strings = SharedStrings::default();
        strings.intern("Name");
        strings.intern(" padded ");
        strings.intern("Tom & Jerry");
        let xml = String::from_utf8(write_shared_strings_xml(&strings).unwrap()).unwrap();
        assert!(xml.contains(r#"count="3" uniqueCount="3""#));
        assert!(xml.contains("<t>Name</t>"));
        assert!(xml.contains(r#"<t xml:space="preserve"> padded </t>"#));
        assert!(xml.contains("<t>Tom &amp; Jerry</t>"));
    }
}
