//! # datavail-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the data structures and contracts for `datavail`.
//! It contains only data types and their Serde definitions.
//!
//! ## Stability Policy
//!
//! **JSON-first stability**: the primary contract is the report wire format
//! (camelCase keys such as `resourceName`, `lookupValues`, `resourcesBinary`).
//! Unknown properties on reports, resources, fields and lookup values are
//! preserved verbatim so that enrichment never loses caller data.
//!
//! ## What belongs here
//! * Pure data structs (measurements, reference definitions, aggregates)
//! * Serialization/Deserialization logic
//!
//! ## What does NOT belong here
//! * File I/O
//! * CLI argument parsing
//! * Classification or aggregation logic

pub mod reference;
pub mod summary;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use reference::{ReferenceData, ReferenceFieldDefinition, ReferenceLookupDefinition};
pub use summary::{
    AvailabilitySummary, Category, CategoryMap, Classification, DistributionBins, ResourceAverages,
    ResourceBins, ResourceStats, ScopeStats,
};

/// Lookup value reported by samplers for "no value set". Never aggregated.
pub const NULL_VALUE_SENTINEL: &str = "NULL_VALUE";

/// Reference payload marker for the primary usage profile.
pub const PRIMARY_PAYLOAD: &str = "IDX";

/// Property name attached to enriched fields, lookup values and the report itself.
pub const AVAILABILITY_KEY: &str = "availability";

/// Pass-through properties the engine does not interpret.
pub type Extra = BTreeMap<String, Value>;

/// Returns `None` for absent or empty parent names.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Record counts for a sub-collection fetched under a parent resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionMeasurement {
    pub resource_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_records_fetched: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One sampled resource and the expansions fetched beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMeasurement {
    pub resource_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_records_fetched: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansions: Option<Vec<ExpansionMeasurement>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ResourceMeasurement {
    /// Expansion measurements, empty when none were reported.
    pub fn expansions(&self) -> &[ExpansionMeasurement] {
        self.expansions.as_deref().unwrap_or_default()
    }
}

/// How many sampled records populated a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeasurement {
    pub resource_name: String,
    pub field_name: String,
    #[serde(default)]
    pub frequency: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_resource_name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl FieldMeasurement {
    /// Parent resource when this field was observed inside an expansion.
    pub fn parent(&self) -> Option<&str> {
        non_empty(&self.parent_resource_name)
    }
}

/// How many sampled records carried one value of an enumerated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupValueMeasurement {
    pub resource_name: String,
    pub field_name: String,
    pub lookup_value: String,
    #[serde(default)]
    pub frequency: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_resource_name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl LookupValueMeasurement {
    /// Parent resource when this value was observed inside an expansion.
    pub fn parent(&self) -> Option<&str> {
        non_empty(&self.parent_resource_name)
    }
}

/// Raw availability report as produced by a sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_on: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    pub resources: Vec<ResourceMeasurement>,
    pub fields: Vec<FieldMeasurement>,
    #[serde(default)]
    pub lookups: Vec<Value>,
    pub lookup_values: Vec<LookupValueMeasurement>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A field measurement with its computed availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAvailability {
    #[serde(flatten)]
    pub measurement: FieldMeasurement,
    pub availability: f64,
}

/// A lookup value measurement with its computed availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupValueAvailability {
    #[serde(flatten)]
    pub measurement: LookupValueMeasurement,
    pub availability: f64,
}

/// Availability report after enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_on: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    pub resources: Vec<ResourceMeasurement>,
    pub fields: Vec<FieldAvailability>,
    #[serde(default)]
    pub lookups: Vec<Value>,
    pub lookup_values: Vec<LookupValueAvailability>,
    pub availability: AvailabilitySummary,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Enriched report as JSON.
    #[default]
    Json,
    /// Markdown summary tables.
    Md,
    /// Per-resource averages as CSV.
    Csv,
}
