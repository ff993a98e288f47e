//! Content-addressed store for embedded images.
//!
//! Every distinct payload is written once as `/xl/media/<hash>.<ext>`. The
//! internal id (0-based, first-appearance order) is what the rich value
//! parts and the cells' `vm` attributes refer to.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use super::relationships::{IdSequence, RelId};
use crate::error::{Result, XlsxError};
use crate::namespaces::{CT_JPEG, CT_PNG};
use crate::types::Picture;

/// Image formats that can be embedded in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Detect the format from an extension hint. A leading dot and letter
    /// case are ignored; `jpg` is normalized to `jpeg`.
    pub fn from_extension(ext: &str) -> Result<Self> {
        let normalized = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        match normalized.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(XlsxError::UnsupportedImage(ext.to_string())),
        }
    }

    /// Normalized file extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => CT_PNG,
            Self::Jpeg => CT_JPEG,
        }
    }
}

/// Lower-case hex of the first 128 bits of the SHA-256 of `data`.
#[must_use]
pub fn content_hash(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut out = String::with_capacity(32);
    for byte in digest.iter().take(16) {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// One stored image.
#[derive(Debug, Clone)]
pub struct MediaItem {
    /// `<hash>.<ext>`, the file name under `/xl/media/`
    pub name: String,
    pub format: ImageFormat,
    pub picture: Arc<Picture>,
    /// 0-based position in first-appearance order
    pub internal_id: usize,
    /// Id in the rich-data relationship namespace
    pub rel_id: RelId,
}

impl MediaItem {
    #[must_use]
    pub fn part_name(&self) -> String {
        format!("/xl/media/{}", self.name)
    }

    /// Target as seen from `/xl/richData/`.
    #[must_use]
    pub fn rel_target(&self) -> String {
        format!("../media/{}", self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MediaStore {
    items: Vec<MediaItem>,
    by_name: HashMap<String, usize>,
}

impl MediaStore {
    /// Register the picture of the cell at `coordinate` and return its
    /// internal id. Identical payloads resolve to the same id; a new payload
    /// takes the next id from `rich_data_ids`.
    pub fn register(
        &mut self,
        picture: &Arc<Picture>,
        coordinate: &str,
        rich_data_ids: &mut IdSequence,
    ) -> Result<usize> {
        let format = ImageFormat::from_extension(&picture.extension)?;
        if picture.data.is_empty() {
            return Err(XlsxError::EmptyPicture(coordinate.to_string()));
        }

        let name = format!("{}.{}", content_hash(&picture.data), format.extension());
        if let Some(&id) = self.by_name.get(&name) {
            log::trace!("{coordinate}: reusing media {name}");
            return Ok(id);
        }

        let internal_id = self.items.len();
        log::trace!("{coordinate}: new media {name} (id {internal_id})");
        self.by_name.insert(name.clone(), internal_id);
        self.items.push(MediaItem {
            name,
            format,
            picture: Arc::clone(picture),
            internal_id,
            rel_id: rich_data_ids.next_id(),
        });
        Ok(internal_id)
    }

    /// Items in internal-id order.
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Formats present in the store, each once, in first-seen order.
    #[must_use]
    pub fn formats(&self) -> Vec<ImageFormat> {
        let mut seen = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.format) {
                seen.push(item.format);
            }
        }
        seen
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

    fn png(data: &[u8]) -> Arc<Picture> {
        Arc::new(Picture::new("png", data.to_vec()))
    }

    #[test]
    fn test_extension_normalization() {
        assert_eq!(ImageFormat::from_extension(".JPG").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("jpeg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("Png").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::Jpeg.extension(), "jpeg");
        assert!(matches!(
            ImageFormat::from_extension(".gif"),
            Err(XlsxError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn test_content_hash_is_stable() {
        let a = content_hash(b"abc");
        assert_eq!(a.len(), 32);
        assert_eq!(a, content_hash(b"abc"));
        assert_ne!(a, content_hash(b"abd"));
        // SHA-256("abc") = ba7816bf8f01cfea414140de5dae2223...
        assert_eq!(a, "ba7816bf8f01cfea414140de5dae2223");
    }

    #[test]
    fn test_identical_payloads_share_an_id() {
        let mut store = MediaStore::default();
        let mut ids = IdSequence::default();

        assert_eq!(store.register(&png(b"one"), "A1", &mut ids).unwrap(), 0);
        assert_eq!(store.register(&png(b"two"), "A2", &mut ids).unwrap(), 1);
        assert_eq!(store.register(&png(b"one"), "A3", &mut ids).unwrap(), 0);

        assert_eq!(store.len(), 2);
        assert_eq!(ids.issued(), 2);
        assert_eq!(store.items()[1].rel_id.token, "rId2");
        assert!(store.items()[0].name.ends_with(".png"));
        assert_eq!(
            store.items()[0].rel_target(),
            format!("../media/{}", store.items()[0].name)
        );
    }

    #[test]
    fn test_same_bytes_different_extension_are_distinct() {
        let mut store = MediaStore::default();
        let mut ids = IdSequence::default();
        let jpg = Arc::new(Picture::new(".jpg", b"x".to_vec()));
        store.register(&png(b"x"), "A1", &mut ids).unwrap();
        store.register(&jpg, "A2", &mut ids).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.formats(), vec![ImageFormat::Png, ImageFormat::Jpeg]);
    }

    #[test]
    fn test_empty_payload_rejected() {
        let mut store = MediaStore::default();
        let mut ids = IdSequence::default();
        let err = store.register(&png(b""), "C7", &mut ids).unwrap_err();
        assert!(matches!(err, XlsxError::EmptyPicture(ref c) if c == "C7"));
        assert!(store.is_empty());
        assert_eq!(ids.issued(), 0);
    }
}
