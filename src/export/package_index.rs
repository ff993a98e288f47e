//! Relationship maps and content types accumulated over one assembly.

use super::content_types::ContentTypes;
use super::relationships::{IdAllocator, IdSequence, RelId, RelScope, RelationshipMap};

/// Everything the final index parts (`.rels` files and
/// `[Content_Types].xml`) are built from.
#[derive(Debug, Default)]
pub struct PackageIndex {
    ids: IdAllocator,
    package_rels: RelationshipMap,
    workbook_rels: RelationshipMap,
    rich_data_rels: RelationshipMap,
    content_types: ContentTypes,
}

impl PackageIndex {
    pub fn allocate(&mut self, scope: RelScope) -> RelId {
        self.ids.next_id(scope)
    }

    /// Id sequence of one namespace, lent out to the worksheet walk for
    /// rich-data ids.
    pub fn sequence_mut(&mut self, scope: RelScope) -> &mut IdSequence {
        self.ids.sequence_mut(scope)
    }

    /// Record a relationship in the `.rels` map of `scope`.
    pub fn relate(
        &mut self,
        scope: RelScope,
        id: &RelId,
        rel_type: &'static str,
        target: impl Into<String>,
    ) {
        self.rels_mut(scope).insert(id, rel_type, target);
    }

    /// Allocate an id in `scope`, relate `target` under it and declare the
    /// part's content type.
    pub fn register_part(
        &mut self,
        scope: RelScope,
        rel_type: &'static str,
        target: &str,
        part_name: &str,
        content_type: &'static str,
    ) -> RelId {
        let id = self.allocate(scope);
        self.relate(scope, &id, rel_type, target);
        self.content_types.add_override(part_name, content_type);
        id
    }

    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    #[must_use]
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    #[must_use]
    pub fn rels(&self, scope: RelScope) -> &RelationshipMap {
        match scope {
            RelScope::Package => &self.package_rels,
            RelScope::Workbook => &self.workbook_rels,
            RelScope::RichData => &self.rich_data_rels,
        }
    }

    fn rels_mut(&mut self, scope: RelScope) -> &mut RelationshipMap {
        match scope {
            RelScope::Package => &mut self.package_rels,
            RelScope::Workbook => &mut self.workbook_rels,
            RelScope::RichData => &mut self.rich_data_rels,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::namespaces::{CT_STYLES, REL_IMAGE, REL_STYLES};

    #[test]
    fn test_register_part_fills_both_indexes() {
        let mut index = PackageIndex::default();
        let id = index.register_part(
            RelScope::Workbook,
            REL_STYLES,
            "styles.xml",
            "/xl/styles.xml",
            CT_STYLES,
        );
        assert_eq!(id.token, "rId1");
        assert_eq!(
            index.rels(RelScope::Workbook).get("rId1").unwrap().target,
            "styles.xml"
        );
        assert!(index.rels(RelScope::Package).is_empty());
        assert_eq!(index.content_types().override_for("/xl/styles.xml"), Some(CT_STYLES));
    }

    #[test]
    fn test_relate_without_content_type() {
        let mut index = PackageIndex::default();
        let id = index.sequence_mut(RelScope::RichData).next_id();
        index.relate(RelScope::RichData, &id, REL_IMAGE, "../media/x.png");
        assert_eq!(index.rels(RelScope::RichData).len(), 1);
        assert_eq!(index.content_types().override_for("/xl/media/x.png"), None);
    }
}
