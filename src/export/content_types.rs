//! The `[Content_Types].xml` index.

use std::collections::BTreeMap;

use super::xml_writer::XmlPart;
use crate::error::Result;
use crate::namespaces::{CT_RELATIONSHIPS, CT_XML, NS_CONTENT_TYPES};

/// Default (by extension) and override (by part name) content types.
///
/// Both maps iterate in sorted key order.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    defaults: BTreeMap<String, &'static str>,
    overrides: BTreeMap<String, &'static str>,
}

impl Default for ContentTypes {
    fn default() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("xml".to_string(), CT_XML);
        defaults.insert("rels".to_string(), CT_RELATIONSHIPS);
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }
}

impl ContentTypes {
    pub fn add_default(&mut self, extension: &str, content_type: &'static str) {
        self.defaults.insert(extension.to_string(), content_type);
    }

    /// Register a part by its absolute part name, e.g. `/xl/workbook.xml`.
    pub fn add_override(&mut self, part_name: &str, content_type: &'static str) {
        self.overrides.insert(part_name.to_string(), content_type);
    }

    #[must_use]
    pub fn default_for(&self, extension: &str) -> Option<&'static str> {
        self.defaults.get(extension).copied()
    }

    #[must_use]
    pub fn override_for(&self, part_name: &str) -> Option<&'static str> {
        self.overrides.get(part_name).copied()
    }

    pub(crate) fn to_xml(&self) -> Result<Vec<u8>> {
        let mut x = XmlPart::new()?;
        x.open("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
        for (ext, &ct) in &self.defaults {
            x.empty("Default", &[("Extension", ext.as_str()), ("ContentType", ct)])?;
        }
        for (part, &ct) in &self.overrides {
            x.empty("Override", &[("PartName", part.as_str()), ("ContentType", ct)])?;
        }
        x.close("Types")?;
        Ok(x.finish())
    }
}
