//! # datavail-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free settings types for the enrichment and format layers.
//! These types mirror CLI arguments without Clap dependencies,
//! making them suitable for library consumers.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Classification, reference and output settings
//! * Default values
//!
//! ## What does NOT belong here
//! * Clap parsing (use datavail-config)
//! * I/O operations
//! * Business logic

use serde::{Deserialize, Serialize};

pub use datavail_types::{NULL_VALUE_SENTINEL, OutputFormat, PRIMARY_PAYLOAD};

/// Data dictionary version used when a report does not name one.
pub const DEFAULT_DD_VERSION: &str = "1.7";

/// How items are classified during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSettings {
    /// Reference payload marking a field as primary usage.
    #[serde(default = "default_primary_payload")]
    pub primary_payload: String,

    /// Lookup value meaning "no value set"; such entries are dropped.
    #[serde(default = "default_null_sentinel")]
    pub null_sentinel: String,
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            primary_payload: default_primary_payload(),
            null_sentinel: default_null_sentinel(),
        }
    }
}

fn default_primary_payload() -> String {
    PRIMARY_PAYLOAD.to_string()
}

fn default_null_sentinel() -> String {
    NULL_VALUE_SENTINEL.to_string()
}

/// Where reference metadata comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSettings {
    /// Directory holding `dd-<version>.json` files.
    #[serde(default)]
    pub dir: Option<String>,

    /// Version used when the report carries none.
    #[serde(default = "default_version")]
    pub default_version: String,
}

impl Default for ReferenceSettings {
    fn default() -> Self {
        Self {
            dir: None,
            default_version: default_version(),
        }
    }
}

fn default_version() -> String {
    DEFAULT_DD_VERSION.to_string()
}

impl ReferenceSettings {
    /// Version to load for a report, preferring the report's own.
    pub fn version_for<'a>(&'a self, report_version: Option<&'a str>) -> &'a str {
        report_version
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(&self.default_version)
    }
}

/// How enriched reports are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[serde(default)]
    pub pretty: bool,
}

/// Settings for one enrichment run (`datavail enrich`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichSettings {
    #[serde(default)]
    pub classification: ClassificationSettings,

    #[serde(default)]
    pub reference: ReferenceSettings,

    #[serde(default)]
    pub output: OutputSettings,
}
