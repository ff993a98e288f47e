//! Thin tag writer over `quick_xml::Writer` used by every part emitter.
//!
//! Output is indented by two spaces and starts with a standalone XML
//! declaration. Attribute values and text are escaped by quick-xml.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;

pub(crate) struct XmlPart {
    writer: Writer<Vec<u8>>,
}

impl XmlPart {
    pub(crate) fn new() -> Result<Self> {
        let mut writer = Writer::new_with_indent(Vec::with_capacity(1024), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    /// `<name attrs...>`
    pub(crate) fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.writer.write_event(Event::Start(element(name, attrs)))?;
        Ok(())
    }

    /// `<name attrs.../>`
    pub(crate) fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.writer.write_event(Event::Empty(element(name, attrs)))?;
        Ok(())
    }

    /// `</name>`
    pub(crate) fn close(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// `<name attrs...>text</name>` on a single line.
    pub(crate) fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.open(name, attrs)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn element<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut e = BytesStart::new(name);
    for &(key, value) in attrs {
        e.push_attribute((key, value));
    }
    e
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_and_indents() {
        let mut x = XmlPart::new().unwrap();
        x.open("root", &[("a", "1 & 2")]).unwrap();
        x.leaf("t", &[], "<x>").unwrap();
        x.empty("e", &[]).unwrap();
        x.close("root").unwrap();
        let s = String::from_utf8(x.finish()).unwrap();
        assert!(s.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(s.contains(r#"<root a="1 &amp; 2">"#));
        assert!(s.contains("\n  <t>&lt;x&gt;</t>"));
        assert!(s.contains("\n  <e/>"));
        assert!(s.ends_with("\n</root>"));
    }
}
