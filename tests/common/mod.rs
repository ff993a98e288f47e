//! Common test utilities for reading assembled packages back.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::io::{Cursor, Read};

use chrono::{TimeZone, Utc};
use xlpack::{to_xlsx_bytes, AssemblyOptions, Workbook};

/// Options with a fixed creation time so output is reproducible.
#[must_use]
pub fn fixed_options() -> AssemblyOptions {
    AssemblyOptions::with_created(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
}

/// Assemble `wb` with [`fixed_options`], panicking on failure.
#[must_use]
pub fn build(wb: &Workbook) -> Vec<u8> {
    to_xlsx_bytes(wb, fixed_options()).expect("Failed to assemble workbook")
}

/// An assembled package opened for inspection.
pub struct Package {
    archive: zip::ZipArchive<Cursor<Vec<u8>>>,
}

impl Package {
    #[must_use]
    pub fn open(bytes: Vec<u8>) -> Self {
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("Failed to open ZIP archive");
        Self { archive }
    }

    #[must_use]
    pub fn from_workbook(wb: &Workbook) -> Self {
        Self::open(build(wb))
    }

    /// Entry names in archive (write) order.
    #[must_use]
    pub fn names(&mut self) -> Vec<String> {
        (0..self.archive.len())
            .map(|i| self.archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[must_use]
    pub fn has(&mut self, name: &str) -> bool {
        self.archive.by_name(name).is_ok()
    }

    #[must_use]
    pub fn bytes(&mut self, name: &str) -> Vec<u8> {
        let mut entry = self
            .archive
            .by_name(name)
            .unwrap_or_else(|_| panic!("missing part {name}"));
        let mut out = Vec::new();
        entry.read_to_end(&mut out).unwrap();
        out
    }

    #[must_use]
    pub fn text(&mut self, name: &str) -> String {
        String::from_utf8(self.bytes(name)).unwrap()
    }

    /// Names of all entries under `xl/media/`, in write order.
    #[must_use]
    pub fn media_names(&mut self) -> Vec<String> {
        self.names()
            .into_iter()
            .filter(|n| n.starts_with("xl/media/"))
            .collect()
    }
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
#[must_use]
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Assert that `needles` appear in `haystack` in the given order.
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match haystack[from..].find(needle) {
            Some(pos) => from += pos + needle.len(),
            None => panic!("expected {needle:?} after byte {from} in:\n{haystack}"),
        }
    }
}
