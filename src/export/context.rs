//! Phase-typed assembly context.
//!
//! While worksheets are being written the context is `Walking` and the only
//! way to change it is through the four `intern_*`/`register_*` mutators.
//! `finish` turns it into an `Indexing` context, which is read-only and is
//! the only kind the index-part emitters accept.

use std::marker::PhantomData;
use std::sync::Arc;

use super::interning::{FormatTable, SharedStrings};
use super::media::MediaStore;
use super::relationships::IdSequence;
use crate::error::Result;
use crate::types::{Font, Picture, Style};

/// Content walk in progress; tables may grow.
#[derive(Debug)]
pub struct Walking;

/// Walk complete; tables are frozen.
#[derive(Debug)]
pub struct Indexing;

#[derive(Debug)]
pub struct AssemblyContext<Phase> {
    strings: SharedStrings,
    styles: FormatTable<Style>,
    fonts: FormatTable<Font>,
    media: MediaStore,
    _phase: PhantomData<Phase>,
}

impl Default for AssemblyContext<Walking> {
    fn default() -> Self {
        Self::new()
    }
}

impl AssemblyContext<Walking> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strings: SharedStrings::default(),
            styles: FormatTable::default(),
            fonts: FormatTable::default(),
            media: MediaStore::default(),
            _phase: PhantomData,
        }
    }

    /// 0-based shared string index.
    pub fn intern_string(&mut self, s: &str) -> usize {
        let idx = self.strings.intern(s);
        log::trace!("shared string {idx}: {s:?}");
        idx
    }

    /// Cell format index as written in `s` (0 = default). The style's font
    /// is interned with it so that `styles.xml` can resolve every `fontId`.
    pub fn intern_style(&mut self, style: &Style) -> usize {
        if !style.font.size.is_finite() {
            let mut finite = style.clone();
            finite.font.size = 0.0;
            return self.intern_style(&finite);
        }
        let idx = self.styles.intern(style);
        if idx != 0 {
            self.intern_font(&style.font);
        }
        idx
    }

    /// A non-finite size is interned as the default size, 0.
    pub fn intern_font(&mut self, font: &Font) -> usize {
        if !font.size.is_finite() {
            let finite = Font {
                size: 0.0,
                ..font.clone()
            };
            return self.fonts.intern(&finite);
        }
        self.fonts.intern(font)
    }

    /// Internal media id of the picture; see [`MediaStore::register`].
    pub fn register_media(
        &mut self,
        picture: &Arc<Picture>,
        coordinate: &str,
        rich_data_ids: &mut IdSequence,
    ) -> Result<usize> {
        self.media.register(picture, coordinate, rich_data_ids)
    }

    /// End the content walk.
    #[must_use]
    pub fn finish(self) -> AssemblyContext<Indexing> {
        AssemblyContext {
            strings: self.strings,
            styles: self.styles,
            fonts: self.fonts,
            media: self.media,
            _phase: PhantomData,
        }
    }
}

impl AssemblyContext<Indexing> {
    #[must_use]
    pub fn shared_strings(&self) -> &SharedStrings {
        &self.strings
    }

    #[must_use]
    pub fn styles(&self) -> &FormatTable<Style> {
        &self.styles
    }

    #[must_use]
    pub fn fonts(&self) -> &FormatTable<Font> {
        &self.fonts
    }

    #[must_use]
    pub fn media(&self) -> &MediaStore {
        &self.media
    }

    /// `fontId` for a cell format's font; fonts never interned map to 0.
    #[must_use]
    pub fn font_id(&self, font: &Font) -> usize {
        self.fonts.index_of(font).unwrap_or(0)
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
    use crate::types::{Alignment, VAlign};

    #[test]
    fn test_style_interning_registers_font() {
        let mut ctx = AssemblyContext::new();
        let aligned = Style {
            alignment: Alignment {
                horizontal: None,
                vertical: Some(VAlign::Top),
            },
            font: Font::default(),
        };
        let bold = Style::with_font(Font::bold());

        assert_eq!(ctx.intern_style(&Style::default()), 0);
        assert_eq!(ctx.intern_style(&aligned), 1);
        assert_eq!(ctx.intern_style(&bold), 2);
        assert_eq!(ctx.intern_style(&bold), 2);

        let ctx = ctx.finish();
        assert_eq!(ctx.styles().len(), 2);
        // the default font of `aligned` takes no slot
        assert_eq!(ctx.fonts().len(), 1);
        assert_eq!(ctx.font_id(&Font::default()), 0);
        assert_eq!(ctx.font_id(&Font::bold()), 1);
    }

    #[test]
    fn test_non_finite_font_size_interned_as_default_size() {
        let mut ctx = AssemblyContext::new();
        let nan_bold = Style::with_font(Font {
            size: f64::NAN,
            ..Font::bold()
        });
        let inf_bold = Style::with_font(Font {
            size: f64::INFINITY,
            ..Font::bold()
        });

        assert_eq!(ctx.intern_style(&nan_bold), 1);
        assert_eq!(ctx.intern_style(&nan_bold), 1);
        assert_eq!(ctx.intern_style(&inf_bold), 1);
        assert_eq!(ctx.intern_style(&Style::with_font(Font::bold())), 1);
        assert_eq!(
            ctx.intern_font(&Font {
                size: f64::NAN,
                ..Font::default()
            }),
            0
        );

        let ctx = ctx.finish();
        assert_eq!(ctx.styles().len(), 1);
        assert_eq!(ctx.fonts().len(), 1);
        assert_eq!(ctx.font_id(&ctx.styles().records()[0].font), 1);
    }

    #[test]
    fn test_strings_survive_finish() {
        let mut ctx = AssemblyContext::new();
        ctx.intern_string("a");
        ctx.intern_string("b");
        ctx.intern_string("a");
        let ctx = ctx.finish();
        assert_eq!(ctx.shared_strings().strings(), ["a", "b"]);
        assert!(ctx.media().is_empty());
    }
}
