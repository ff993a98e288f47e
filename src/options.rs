//! Assembly configuration.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Settings for one assembly pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssemblyOptions {
    /// Creation time written to `docProps/core.xml`; `None` means "now".
    /// Fixing it makes the output reproducible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl AssemblyOptions {
    #[must_use]
    pub fn with_created(created: DateTime<Utc>) -> Self {
        Self {
            created: Some(created),
        }
    }

    /// Creation time as W3CDTF text, second precision, `Z` suffix.
    #[must_use]
    pub fn created_timestamp(&self) -> String {
        self.created
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Compression used for zip entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

impl Compression {
    pub(crate) fn method(self) -> zip::CompressionMethod {
        match self {
            Self::Deflated => zip::CompressionMethod::Deflated,
            Self::Stored => zip::CompressionMethod::Stored,
        }
    }
}
