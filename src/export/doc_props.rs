//! `docProps/core.xml` and `docProps/app.xml`.

use super::xml_writer::XmlPart;
use crate::error::Result;
use crate::namespaces::{
    NS_CORE_PROPERTIES, NS_DC, NS_DCMITYPE, NS_DCTERMS, NS_DOC_PROPS_VTYPES,
    NS_EXTENDED_PROPERTIES, NS_XSI,
};

/// Core properties carrying only the creation time (W3CDTF, UTC).
pub(crate) fn write_core_xml(created: &str) -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    x.open(
        "cp:coreProperties",
        &[
            ("xmlns:cp", NS_CORE_PROPERTIES),
            ("xmlns:dc", NS_DC),
            ("xmlns:dcterms", NS_DCTERMS),
            ("xmlns:dcmitype", NS_DCMITYPE),
            ("xmlns:xsi", NS_XSI),
        ],
    )?;
    x.leaf("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], created)?;
    x.close("cp:coreProperties")?;
    Ok(x.finish())
}

/// Extended properties; `<Application>` is omitted for an empty name.
pub(crate) fn write_app_xml(app_name: &str) -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    let attrs = [
        ("xmlns", NS_EXTENDED_PROPERTIES),
        ("xmlns:vt", NS_DOC_PROPS_VTYPES),
    ];
    if app_name.is_empty() {
        x.empty("Properties", &attrs)?;
    } else {
        x.open("Properties", &attrs)?;
        x.leaf("Application", &[], app_name)?;
        x.close("Properties")?;
    }
    Ok(x.finish())
}
