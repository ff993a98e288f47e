use serde::{Deserialize, Serialize};

/// Cell formatting: alignment plus font.
///
/// Two styles are the same cell format iff every field matches. The
/// all-default style is never written to the style table; it is the implicit
/// format at index 0.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    pub alignment: Alignment,
    pub font: Font,
}

impl Style {
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.alignment.is_default() && self.font.is_default()
    }

    /// Shorthand for a style that only sets the font.
    #[must_use]
    pub fn with_font(font: Font) -> Self {
        Self {
            font,
            ..Self::default()
        }
    }
}

/// Horizontal and vertical alignment; `None` leaves the axis at its default.
#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Alignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VAlign>,
}

impl Alignment {
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

/// Font attributes. A size of 0 means "default size" (11pt).
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: Underline,
    pub strikethrough: bool,
}

impl Font {
    /// True when every field is at its zero value.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.size == 0.0
            && !self.bold
            && !self.italic
            && self.underline == Underline::None
            && !self.strikethrough
    }

    #[must_use]
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }
}

/// Horizontal alignment (ECMA-376 `ST_HorizontalAlignment`)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterContinuous,
    Distributed,
}

impl HAlign {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Fill => "fill",
            Self::Justify => "justify",
            Self::CenterContinuous => "centerContinuous",
            Self::Distributed => "distributed",
        }
    }
}

/// Vertical alignment (ECMA-376 `ST_VerticalAlignment`)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    Top,
    Center, // Note: Excel uses "center" not "middle"
    Bottom,
    Justify,
    Distributed,
}

impl VAlign {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
            Self::Justify => "justify",
            Self::Distributed => "distributed",
        }
    }
}

/// Underline style for font formatting (ECMA-376 `ST_UnderlineValues`)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
    SingleAccounting,
    DoubleAccounting,
}

impl Underline {
    /// Value of the `val` attribute on `<u>`; `None` for no underline.
    #[must_use]
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Single => Some("single"),
            Self::Double => Some("double"),
            Self::SingleAccounting => Some("singleAccounting"),
            Self::DoubleAccounting => Some("doubleAccounting"),
        }
    }
}
