//! Output sinks for assembled packages.
//!
//! Part paths are absolute package names such as `/xl/workbook.xml` or
//! `[Content_Types].xml`. Sinks strip the leading `/`.

use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::options::Compression;

/// Receives every part of a package exactly once, in emission order.
pub trait BlobStorage {
    fn write_blob(&mut self, path: &str, data: &[u8]) -> Result<()>;
}

impl<T: BlobStorage + ?Sized> BlobStorage for &mut T {
    fn write_blob(&mut self, path: &str, data: &[u8]) -> Result<()> {
        (**self).write_blob(path, data)
    }
}

fn entry_name(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Writes parts as entries of a zip archive.
pub struct ZipStorage<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: FileOptions,
}

impl<W: Write + Seek> ZipStorage<W> {
    pub fn new(writer: W) -> Self {
        Self::with_compression(writer, Compression::default())
    }

    /// Entry timestamps are pinned to the DOS epoch so equal input gives
    /// equal archive bytes.
    pub fn with_compression(writer: W, compression: Compression) -> Self {
        let options = FileOptions::default()
            .compression_method(compression.method())
            .last_modified_time(zip::DateTime::default());
        Self {
            zip: ZipWriter::new(writer),
            options,
        }
    }

    /// Write the central directory and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        Ok(self.zip.finish()?)
    }
}

impl<W: Write + Seek> BlobStorage for ZipStorage<W> {
    fn write_blob(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.zip.start_file(entry_name(path), self.options)?;
        self.zip.write_all(data)?;
        Ok(())
    }
}

/// Writes parts as files below a root directory.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl BlobStorage for DirStorage {
    fn write_blob(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let target = self.root.join(entry_name(path));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, data)?;
        Ok(())
    }
}

/// Keeps parts in memory in write order. Useful for inspection and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: Vec<(String, Vec<u8>)>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of the part at `path` (with or without the leading `/`).
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        let name = entry_name(path);
        self.blobs
            .iter()
            .find(|(p, _)| p == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Entry names in write order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.blobs.iter().map(|(p, _)| p.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    #[must_use]
    pub fn into_blobs(self) -> Vec<(String, Vec<u8>)> {
        self.blobs
    }
}

impl BlobStorage for MemoryStorage {
    fn write_blob(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.blobs.push((entry_name(path).to_string(), data.to_vec()));
        Ok(())
    }
}
