//! XLSX assembly pipeline.
//!
//! Parts are emitted in a fixed order:
//!
//! 1. worksheets (the content walk), then `xl/workbook.xml`
//! 2. media and the rich value parts, only if a picture was seen
//! 3. `docProps/core.xml`, `docProps/app.xml`
//! 4. `xl/sharedStrings.xml` and `xl/styles.xml`, each only if non-empty
//! 5. the workbook and package `.rels` parts, then `[Content_Types].xml`
//!
//! Index parts come last because every earlier step may add relationships
//! or content types to them.

pub mod content_types;
pub mod context;
pub(crate) mod doc_props;
pub mod interning;
pub mod media;
pub mod package_index;
pub mod relationships;
pub(crate) mod rich_data;
pub(crate) mod shared_strings;
pub(crate) mod styles;
pub(crate) mod workbook_part;
pub(crate) mod worksheet;
pub(crate) mod xml_writer;

use crate::error::Result;
use crate::namespaces::{
    CT_CORE_PROPERTIES, CT_EXTENDED_PROPERTIES, CT_RICH_VALUE, CT_RICH_VALUE_REL,
    CT_RICH_VALUE_STRUCTURE, CT_SHARED_STRINGS, CT_SHEET_METADATA, CT_STYLES, CT_WORKBOOK,
    CT_WORKSHEET, REL_CORE_PROPERTIES, REL_EXTENDED_PROPERTIES, REL_IMAGE, REL_RICH_VALUE,
    REL_RICH_VALUE_REL, REL_RICH_VALUE_STRUCTURE, REL_SHARED_STRINGS, REL_SHEET_METADATA,
    REL_STYLES, REL_WORKBOOK, REL_WORKSHEET,
};
use crate::options::AssemblyOptions;
use crate::storage::BlobStorage;
use crate::types::Workbook;

use context::{AssemblyContext, Indexing};
use package_index::PackageIndex;
use relationships::RelScope;
use workbook_part::SheetEntry;

/// Assembles one workbook into a storage sink.
///
/// A writer is consumed by [`PackageWriter::write`]; on error the sink is
/// dropped along with whatever was written to it.
pub struct PackageWriter<S: BlobStorage> {
    storage: S,
    options: AssemblyOptions,
    index: PackageIndex,
}

impl<S: BlobStorage> PackageWriter<S> {
    pub fn new(storage: S) -> Self {
        Self::with_options(storage, AssemblyOptions::default())
    }

    pub fn with_options(storage: S, options: AssemblyOptions) -> Self {
        Self {
            storage,
            options,
            index: PackageIndex::default(),
        }
    }

    /// Emit every part of `workbook` and hand the sink back.
    pub fn write(mut self, workbook: &Workbook) -> Result<S> {
        let ctx = self.write_workbook(workbook)?;

        if !ctx.media().is_empty() {
            self.write_rich_data(&ctx)?;
        }

        self.write_doc_props(&workbook.app_name)?;

        if !ctx.shared_strings().is_empty() {
            let xml = shared_strings::write_shared_strings_xml(ctx.shared_strings())?;
            self.put_part(
                RelScope::Workbook,
                REL_SHARED_STRINGS,
                "sharedStrings.xml",
                "/xl/sharedStrings.xml",
                CT_SHARED_STRINGS,
                &xml,
            )?;
        }

        if !ctx.styles().is_empty() {
            let xml = styles::write_styles_xml(&ctx)?;
            self.put_part(
                RelScope::Workbook,
                REL_STYLES,
                "styles.xml",
                "/xl/styles.xml",
                CT_STYLES,
                &xml,
            )?;
        }

        let workbook_rels = self.index.rels(RelScope::Workbook).to_xml()?;
        self.put("/xl/_rels/workbook.xml.rels", &workbook_rels)?;
        let package_rels = self.index.rels(RelScope::Package).to_xml()?;
        self.put("/_rels/.rels", &package_rels)?;
        let content_types = self.index.content_types().to_xml()?;
        self.put("[Content_Types].xml", &content_types)?;

        log::info!(
            "assembled {} sheet(s): {} string(s), {} style(s), {} font(s), {} image(s)",
            workbook.sheets().len(),
            ctx.shared_strings().len(),
            ctx.styles().len(),
            ctx.fonts().len(),
            ctx.media().len()
        );
        Ok(self.storage)
    }

    /// Workbook and worksheet parts. The workbook part takes its package id
    /// before any sheet; its XML is written after all sheets.
    fn write_workbook(&mut self, workbook: &Workbook) -> Result<AssemblyContext<Indexing>> {
        self.index.register_part(
            RelScope::Package,
            REL_WORKBOOK,
            "xl/workbook.xml",
            "/xl/workbook.xml",
            CT_WORKBOOK,
        );

        let mut ctx = AssemblyContext::new();
        let mut entries = Vec::with_capacity(workbook.sheets().len());
        for sheet in workbook.sheets() {
            let target = format!("worksheets/{}.xml", sheet.name());
            let part_name = format!("/xl/{target}");
            let id = self.index.register_part(
                RelScope::Workbook,
                REL_WORKSHEET,
                &target,
                &part_name,
                CT_WORKSHEET,
            );
            let xml = worksheet::write_worksheet_xml(
                sheet,
                &mut ctx,
                self.index.sequence_mut(RelScope::RichData),
            )?;
            self.put(&part_name, &xml)?;
            entries.push(SheetEntry {
                name: sheet.name(),
                id,
            });
        }

        let xml = workbook_part::write_workbook_xml(&entries)?;
        self.put("/xl/workbook.xml", &xml)?;
        Ok(ctx.finish())
    }

    fn write_rich_data(&mut self, ctx: &AssemblyContext<Indexing>) -> Result<()> {
        let media = ctx.media();
        for item in media.items() {
            self.put(&item.part_name(), &item.picture.data)?;
            self.index
                .relate(RelScope::RichData, &item.rel_id, REL_IMAGE, item.rel_target());
        }
        for format in media.formats() {
            self.index
                .content_types_mut()
                .add_default(format.extension(), format.content_type());
        }

        let xml = rich_data::write_rich_value_rel_xml(media)?;
        self.put_part(
            RelScope::Workbook,
            REL_RICH_VALUE_REL,
            "richData/richValueRel.xml",
            "/xl/richData/richValueRel.xml",
            CT_RICH_VALUE_REL,
            &xml,
        )?;
        let rels = self.index.rels(RelScope::RichData).to_xml()?;
        self.put("/xl/richData/_rels/richValueRel.xml.rels", &rels)?;

        let xml = rich_data::write_rich_value_structure_xml()?;
        self.put_part(
            RelScope::Workbook,
            REL_RICH_VALUE_STRUCTURE,
            "richData/rdrichvaluestructure.xml",
            "/xl/richData/rdrichvaluestructure.xml",
            CT_RICH_VALUE_STRUCTURE,
            &xml,
        )?;

        let xml = rich_data::write_rich_value_data_xml(media)?;
        self.put_part(
            RelScope::Workbook,
            REL_RICH_VALUE,
            "richData/rdrichvalue.xml",
            "/xl/richData/rdrichvalue.xml",
            CT_RICH_VALUE,
            &xml,
        )?;

        let xml = rich_data::write_metadata_xml(media)?;
        self.put_part(
            RelScope::Workbook,
            REL_SHEET_METADATA,
            "metadata.xml",
            "/xl/metadata.xml",
            CT_SHEET_METADATA,
            &xml,
        )
    }

    fn write_doc_props(&mut self, app_name: &str) -> Result<()> {
        let xml = doc_props::write_core_xml(&self.options.created_timestamp())?;
        self.put_part(
            RelScope::Package,
            REL_CORE_PROPERTIES,
            "docProps/core.xml",
            "/docProps/core.xml",
            CT_CORE_PROPERTIES,
            &xml,
        )?;

        let xml = doc_props::write_app_xml(app_name)?;
        self.put_part(
            RelScope::Package,
            REL_EXTENDED_PROPERTIES,
            "docProps/app.xml",
            "/docProps/app.xml",
            CT_EXTENDED_PROPERTIES,
            &xml,
        )
    }

    /// Register a part in `scope` and write it.
    fn put_part(
        &mut self,
        scope: RelScope,
        rel_type: &'static str,
        target: &str,
        part_name: &str,
        content_type: &'static str,
        data: &[u8],
    ) -> Result<()> {
        self.index
            .register_part(scope, rel_type, target, part_name, content_type);
        self.put(part_name, data)
    }

    fn put(&mut self, path: &str, data: &[u8]) -> Result<()> {
        log::debug!("writing {path} ({} bytes)", data.len());
        self.storage.write_blob(path, data)
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
    use crate::storage::MemoryStorage;
    use crate::types::{Font, Picture, Style};
    use chrono::{TimeZone, Utc};

    fn options() -> AssemblyOptions {
        AssemblyOptions::with_created(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    fn text(mem: &MemoryStorage, path: &str) -> String {
        String::from_utf8(mem.get(path).unwrap().to_vec()).unwrap()
    }

    #[test]
    fn test_minimal_workbook_part_order() {
        let mut wb = Workbook::new();
        wb.add_sheet("Sheet1").unwrap();
        let mem = PackageWriter::with_options(MemoryStorage::new(), options())
            .write(&wb)
            .unwrap();

        let paths: Vec<&str> = mem.paths().collect();
        assert_eq!(
            paths,
            [
                "xl/worksheets/Sheet1.xml",
                "xl/workbook.xml",
                "docProps/core.xml",
                "docProps/app.xml",
                "xl/_rels/workbook.xml.rels",
                "_rels/.rels",
                "[Content_Types].xml",
            ]
        );

        let root = text(&mem, "_rels/.rels");
        assert!(root.contains(r#"Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml""#));
        assert!(root.contains(r#"Id="rId2""#) && root.contains("docProps/core.xml"));
        assert!(root.contains(r#"Id="rId3""#) && root.contains("docProps/app.xml"));

        let workbook = text(&mem, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Sheet1" sheetId="1" r:id="rId1"/>"#));
    }

    #[test]
    fn test_index_parts_get_later_workbook_ids() {
        let mut wb = Workbook::new();
        let row = wb.add_sheet("A").unwrap().add_row();
        row.add_cell().set_str("x").set_style(Style::with_font(Font::bold()));
        wb.add_sheet("B").unwrap();

        let mem = PackageWriter::with_options(MemoryStorage::new(), options())
            .write(&wb)
            .unwrap();
        let rels = text(&mem, "xl/_rels/workbook.xml.rels");
        assert!(rels.contains(r#"Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml""#));
        assert!(rels.contains(r#"Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml""#));

        let ct = text(&mem, "[Content_Types].xml");
        assert!(ct.contains(r#"PartName="/xl/sharedStrings.xml""#));
        assert!(ct.contains(r#"PartName="/xl/worksheets/B.xml""#));
    }

    #[test]
    fn test_rich_data_parts() {
        let mut wb = Workbook::new();
        let row = wb.add_sheet("Pics").unwrap().add_row();
        row.add_cell()
            .set_picture(Picture::new(".jpg", vec![0xFF, 0xD8, 0xFF, 0x00]));

        let mem = PackageWriter::with_options(MemoryStorage::new(), options())
            .write(&wb)
            .unwrap();
        let paths: Vec<&str> = mem.paths().collect();
        let media = paths[2];
        assert!(media.starts_with("xl/media/") && media.ends_with(".jpeg"));
        assert_eq!(
            &paths[3..8],
            [
                "xl/richData/richValueRel.xml",
                "xl/richData/_rels/richValueRel.xml.rels",
                "xl/richData/rdrichvaluestructure.xml",
                "xl/richData/rdrichvalue.xml",
                "xl/metadata.xml",
            ]
        );

        let rd_rels = text(&mem, "xl/richData/_rels/richValueRel.xml.rels");
        assert!(rd_rels.contains(&format!(
            r#"Target="../media/{}""#,
            media.trim_start_matches("xl/media/")
        )));
        let ct = text(&mem, "[Content_Types].xml");
        assert!(ct.contains(r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#));
        assert!(!ct.contains(r#"Extension="png""#));
    }

    #[test]
    fn test_error_aborts_before_index_parts() {
        let mut wb = Workbook::new();
        let row = wb.add_sheet("S").unwrap().add_row();
        row.add_cell().set_picture(Picture::new("bmp", vec![1]));

        let mut mem = MemoryStorage::new();
        let err = PackageWriter::new(&mut mem).write(&wb).unwrap_err();
        assert!(matches!(err, crate::error::XlsxError::UnsupportedImage(_)));
        assert!(mem.get("[Content_Types].xml").is_none());
    }
}
