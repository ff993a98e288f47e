//! `xl/styles.xml`.
//!
//! Only fonts and alignment vary. Fill, border and the named cell style are
//! fixed single entries; every cell format references entry 0 of each.

use super::context::{AssemblyContext, Indexing};
use super::xml_writer::XmlPart;
use crate::error::Result;
use crate::namespaces::NS_SPREADSHEET;
use crate::types::{Font, Style, Underline};

const DEFAULT_FONT_NAME: &str = "Calibri";
const DEFAULT_FONT_SIZE: f64 = 11.0;
const DEFAULT_FONT_FAMILY: &str = "2";

const BASE_XF: [(&str, &str); 4] = [
    ("numFmtId", "0"),
    ("fontId", "0"),
    ("fillId", "0"),
    ("borderId", "0"),
];

pub(crate) fn write_styles_xml(ctx: &AssemblyContext<Indexing>) -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    x.open("styleSheet", &[("xmlns", NS_SPREADSHEET)])?;

    // Font 0 is the implicit default
    let font_count = (ctx.fonts().len() + 1).to_string();
    x.open("fonts", &[("count", font_count.as_str())])?;
    write_font(&mut x, &Font::default())?;
    for font in ctx.fonts().records() {
        write_font(&mut x, font)?;
    }
    x.close("fonts")?;

    x.open("fills", &[("count", "1")])?;
    x.open("fill", &[])?;
    x.empty("patternFill", &[("patternType", "none")])?;
    x.close("fill")?;
    x.close("fills")?;

    x.open("borders", &[("count", "1")])?;
    x.open("border", &[])?;
    for side in ["left", "right", "top", "bottom", "diagonal"] {
        x.empty(side, &[])?;
    }
    x.close("border")?;
    x.close("borders")?;

    x.open("cellStyleXfs", &[("count", "1")])?;
    x.empty("xf", &BASE_XF)?;
    x.close("cellStyleXfs")?;

    let xf_count = (ctx.styles().len() + 1).to_string();
    x.open("cellXfs", &[("count", xf_count.as_str())])?;
    let mut default_xf = BASE_XF.to_vec();
    default_xf.push(("xfId", "0"));
    x.empty("xf", &default_xf)?;
    for style in ctx.styles().records() {
        write_xf(&mut x, style, ctx.font_id(&style.font))?;
    }
    x.close("cellXfs")?;

    x.close("styleSheet")?;
    Ok(x.finish())
}

/// Child order: `b`, `i`, `strike`, `u`, `sz`, `name`, `family`.
fn write_font(x: &mut XmlPart, font: &Font) -> Result<()> {
    x.open("font", &[])?;
    if font.bold {
        x.empty("b", &[])?;
    }
    if font.italic {
        x.empty("i", &[])?;
    }
    if font.strikethrough {
        x.empty("strike", &[])?;
    }
    match font.underline {
        Underline::None => {}
        Underline::Single => x.empty("u", &[])?,
        other => {
            if let Some(val) = other.as_str() {
                x.empty("u", &[("val", val)])?;
            }
        }
    }
    let size = if font.size > 0.0 {
        font.size
    } else {
        DEFAULT_FONT_SIZE
    };
    let size = size.to_string();
    x.empty("sz", &[("val", size.as_str())])?;
    x.empty("name", &[("val", DEFAULT_FONT_NAME)])?;
    x.empty("family", &[("val", DEFAULT_FONT_FAMILY)])?;
    x.close("font")
}

fn write_xf(x: &mut XmlPart, style: &Style, font_id: usize) -> Result<()> {
    let font_id = font_id.to_string();
    let mut attrs = vec![
        ("numFmtId", "0"),
        ("fontId", font_id.as_str()),
        ("fillId", "0"),
        ("borderId", "0"),
        ("xfId", "0"),
    ];
    if !style.font.is_default() {
        attrs.push(("applyFont", "1"));
    }

    let alignment = &style.alignment;
    if alignment.is_default() {
        return x.empty("xf", &attrs);
    }
    attrs.push(("applyAlignment", "1"));
    x.open("xf", &attrs)?;
    let mut align_attrs = Vec::with_capacity(2);
    if let Some(h) = alignment.horizontal {
        align_attrs.push(("horizontal", h.as_str()));
    }
    if let Some(v) = alignment.vertical {
        align_attrs.push(("vertical", v.as_str()));
    }
    x.empty("alignment", &align_attrs)?;
    x.close("xf")
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
    use crate::types::{Alignment, HAlign, VAlign};

    fn render(styles: &[Style]) -> String {
        let mut ctx = AssemblyContext::new();
        for s in styles {
            ctx.intern_style(s);
        }
        String::from_utf8(write_styles_xml(&ctx.finish()).unwrap()).unwrap()
    }

    #[test]
    fn test_default_sections() {
        let xml = render(&[Style::with_font(Font::bold())]);
        assert!(xml.contains(r#"<fonts count="2">"#));
        assert!(xml.contains(r#"<patternFill patternType="none"/>"#));
        assert!(xml.contains("<diagonal/>"));
        assert!(xml.contains(
            r#"<cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>"#
        ));
        assert!(xml.contains(r#"<cellXfs count="2">"#));
        assert!(xml.contains(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#));
        assert!(xml.contains(
            r#"<xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>"#
        ));
    }

    #[test]
    fn test_font_element_order() {
        let font = Font {
            size: 14.0,
            bold: true,
            italic: true,
            underline: Underline::Double,
            strikethrough: true,
        };
        let xml = render(&[Style::with_font(font)]);
        let b = xml.find("<b/>").unwrap();
        let i = xml.find("<i/>").unwrap();
        let strike = xml.find("<strike/>").unwrap();
        let u = xml.find(r#"<u val="double"/>"#).unwrap();
        let sz = xml.find(r#"<sz val="14"/>"#).unwrap();
        let name = xml.rfind(r#"<name val="Calibri"/>"#).unwrap();
        assert!(b < i && i < strike && strike < u && u < sz && sz < name);
    }

    #[test]
    fn test_single_underline_and_default_size() {
        let font = Font {
            underline: Underline::Single,
            ..Font::default()
        };
        let xml = render(&[Style::with_font(font)]);
        assert!(xml.contains("<u/>"));
        assert_eq!(xml.matches(r#"<sz val="11"/>"#).count(), 2);
    }

    #[test]
    fn test_alignment_only_style() {
        let style = Style {
            alignment: Alignment {
                horizontal: Some(HAlign::Center),
                vertical: Some(VAlign::Center),
            },
            font: Font::default(),
        };
        let xml = render(&[style]);
        assert!(xml.contains(r#"<fonts count="1">"#));
        assert!(xml.contains(r#"fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1">"#));
        assert!(xml.contains(r#"<alignment horizontal="center" vertical="center"/>"#));
    }

    #[test]
    fn test_styles_sharing_a_font() {
        let left = Style {
            alignment: Alignment {
                horizontal: Some(HAlign::Left),
                vertical: None,
            },
            font: Font::bold(),
        };
        let xml = render(&[Style::with_font(Font::bold()), left]);
        assert!(xml.contains(r#"<fonts count="2">"#));
        assert!(xml.contains(r#"<cellXfs count="3">"#));
        assert_eq!(xml.matches(r#"fontId="1""#).count(), 2);
    }
}
