//! Relationship id allocation and `.rels` parts.
//!
//! There are three independent id namespaces. Each hands out `rId1`,
//! `rId2`, ... and never reuses a number within one assembly.

use std::collections::BTreeMap;

use super::xml_writer::XmlPart;
use crate::error::Result;
use crate::namespaces::NS_RELATIONSHIPS;

/// Which `.rels` part a relationship belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelScope {
    /// `/_rels/.rels`: document properties and the workbook part
    Package,
    /// `/xl/_rels/workbook.xml.rels`: sheets, styles, strings, rich data parts
    Workbook,
    /// `/xl/richData/_rels/richValueRel.xml.rels`: images
    RichData,
}

/// An allocated relationship id: its number and its `rIdN` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelId {
    pub number: usize,
    pub token: String,
}

/// Monotonic counter for one namespace.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: usize,
}

impl IdSequence {
    pub fn next_id(&mut self) -> RelId {
        self.last += 1;
        RelId {
            number: self.last,
            token: format!("rId{}", self.last),
        }
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.last
    }
}

/// The three id namespaces of one assembly.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    package: IdSequence,
    workbook: IdSequence,
    rich_data: IdSequence,
}

impl IdAllocator {
    pub fn next_id(&mut self, scope: RelScope) -> RelId {
        self.sequence_mut(scope).next_id()
    }

    pub fn sequence_mut(&mut self, scope: RelScope) -> &mut IdSequence {
        match scope {
            RelScope::Package => &mut self.package,
            RelScope::Workbook => &mut self.workbook,
            RelScope::RichData => &mut self.rich_data,
        }
    }
}

/// One relationship record: type URI plus target relative to the `.rels`
/// part's source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub rel_type: &'static str,
    pub target: String,
}

/// Relationships of one `.rels` part keyed by id token.
///
/// Iteration is in lexicographic token order so output is reproducible.
#[derive(Debug, Clone, Default)]
pub struct RelationshipMap {
    entries: BTreeMap<String, Relationship>,
}

impl RelationshipMap {
    pub fn insert(&mut self, id: &RelId, rel_type: &'static str, target: impl Into<String>) {
        self.entries.insert(
            id.token.clone(),
            Relationship {
                rel_type,
                target: target.into(),
            },
        );
    }

    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Relationship> {
        self.entries.get(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Relationship)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as a `<Relationships>` part.
    pub(crate) fn to_xml(&self) -> Result<Vec<u8>> {
        let mut x = XmlPart::new()?;
        x.open("Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
        for (id, rel) in self.iter() {
            x.empty(
                "Relationship",
                &[("Id", id), ("Type", rel.rel_type), ("Target", rel.target.as_str())],
            )?;
        }
        x.close("Relationships")?;
        Ok(x.finish())
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
    use crate::namespaces::{REL_STYLES, REL_WORKSHEET};

    #[test]
    fn test_namespaces_count_independently() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.next_id(RelScope::Package).token, "rId1");
        assert_eq!(ids.next_id(RelScope::Workbook).token, "rId1");
        assert_eq!(ids.next_id(RelScope::Workbook).token, "rId2");
        assert_eq!(ids.next_id(RelScope::Package).number, 2);
        assert_eq!(ids.next_id(RelScope::RichData).number, 1);
        assert_eq!(ids.sequence_mut(RelScope::Workbook).issued(), 2);
    }

    #[test]
    fn test_rels_sorted_by_token() {
        let mut seq = IdSequence::default();
        let mut map = RelationshipMap::default();
        let ids: Vec<RelId> = (0..10).map(|_| seq.next_id()).collect();
        for id in ids.iter().rev() {
            map.insert(id, REL_WORKSHEET, format!("worksheets/s{}.xml", id.number));
        }
        let order: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(order[0], "rId1");
        assert_eq!(order[1], "rId10");
        assert_eq!(order[2], "rId2");
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn test_rels_xml() {
        let mut seq = IdSequence::default();
        let mut map = RelationshipMap::default();
        map.insert(&seq.next_id(), REL_STYLES, "styles.xml");
        let xml = String::from_utf8(map.to_xml().unwrap()).unwrap();
        assert!(xml.contains(&format!(
            r#"<Relationship Id="rId1" Type="{REL_STYLES}" Target="styles.xml"/>"#
        )));
        assert_eq!(map.get("rId1").unwrap().target, "styles.xml");
    }
}
