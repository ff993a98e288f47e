//! Structured error types for xlpack.
//!
//! Three families show up here: validation errors raised synchronously by the
//! document model, resource errors raised while a package is assembled, and
//! sink errors passed through verbatim from the output storage.

/// All errors that can occur while building or assembling a workbook.
#[derive(Debug, thiserror::Error)]
pub enum XlsxError {
    /// XML serialization error from quick-xml.
    #[error("XML writing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid cell or range reference.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// Sheet name violates the naming rules.
    #[error("Invalid sheet name: {0}")]
    SheetName(String),

    /// A sheet with this name already exists.
    #[error("duplicate sheet name '{0}'")]
    DuplicateSheet(String),

    /// Merge range intersects a range that is already merged.
    #[error("merge range {0} overlaps with existing merged cells")]
    MergeOverlap(String),

    /// Merge range collapses to a single cell.
    #[error("merge range {0} must span at least 2 cells")]
    DegenerateMerge(String),

    /// Picture extension that has no image media type.
    #[error("unsupported image extension '{0}'")]
    UnsupportedImage(String),

    /// Picture with zero bytes of payload.
    #[error("empty picture data in cell {0}")]
    EmptyPicture(String),

    /// Picture-typed cell without a payload.
    #[error("missing picture data in cell {0}")]
    MissingPicture(String),

    /// Malformed workbook description.
    #[error("Document error: {0}")]
    Document(String),

    /// JSON decoding error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 payload decoding error.
    #[error("base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlsxError>;
