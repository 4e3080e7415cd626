//! # datavail-core
//!
//! This crate is the **primary library interface** for `datavail`.
//! It coordinates report parsing, reference loading, indexing and aggregation
//! to produce enriched availability reports.
//!
//! If you are embedding `datavail` into another Rust application, depend on this
//! crate and `datavail-types`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use datavail_core::{enrich_json, reference_source};
//! use datavail_core::settings::EnrichSettings;
//!
//! let settings = EnrichSettings::default();
//! let source = reference_source(&settings.reference);
//! let raw = std::fs::read_to_string("report.json").expect("read report");
//!
//! let enriched = enrich_json(&raw, &source, &settings, None).expect("enrich");
//! println!("{} fields", enriched.fields.len());
//! ```

pub mod error;

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

pub use datavail_settings as settings;
pub use datavail_types as types;

use datavail_engine::aggregate;
use datavail_index::ClassificationIndex;
use datavail_reference::{
    CachedReference, DirectoryReference, InMemoryReference, ReferenceError, ReferenceSource,
    ReferenceStats, summarize,
};
use datavail_settings::{EnrichSettings, ReferenceSettings};
use datavail_types::{AvailabilityReport, EnrichedReport, ReferenceData};

pub use error::{DatavailError, ErrorCode};

/// Collections every report must carry, by wire name.
pub const REQUIRED_COLLECTIONS: [&str; 3] = ["resources", "fields", "lookupValues"];

/// Check that `value` is an object holding the report collections.
pub fn validate_envelope(value: &Value) -> Result<(), DatavailError> {
    let Some(object) = value.as_object() else {
        return Err(DatavailError::invalid_report("report must be a JSON object"));
    };
    for key in REQUIRED_COLLECTIONS {
        if !object.get(key).is_some_and(Value::is_array) {
            return Err(DatavailError::missing_collection(key));
        }
    }
    Ok(())
}

/// Parse and validate a raw report.
pub fn parse_report(json: &str) -> Result<AvailabilityReport, DatavailError> {
    let value: Value = serde_json::from_str(json)?;
    report_from_value(value)
}

/// Validate and convert an already parsed report.
pub fn report_from_value(value: Value) -> Result<AvailabilityReport, DatavailError> {
    validate_envelope(&value)?;
    serde_json::from_value(value).map_err(DatavailError::invalid_report)
}

/// The reference source described by `settings`.
///
/// Without a directory every version is unknown, so everything classifies as local.
pub fn reference_source(settings: &ReferenceSettings) -> Arc<dyn ReferenceSource> {
    match settings.dir.as_deref() {
        Some(dir) => Arc::new(CachedReference::new(DirectoryReference::new(dir))),
        None => Arc::new(InMemoryReference::new()),
    }
}

/// Load reference metadata, treating an unrecognized version as an empty dataset.
///
/// Versions that are unknown to the source or that cannot name a reference
/// file both classify every item as local.
pub fn load_reference(
    source: &dyn ReferenceSource,
    version: &str,
) -> Result<Arc<ReferenceData>, DatavailError> {
    match source.load(version) {
        Ok(data) => Ok(data),
        Err(ReferenceError::UnknownVersion(v)) => {
            warn!(version = %v, "no reference metadata for version; all items classify as local");
            Ok(Arc::new(ReferenceData::default()))
        }
        Err(ReferenceError::InvalidVersion(v)) => {
            warn!(version = %v, "unrecognized reference version; all items classify as local");
            Ok(Arc::new(ReferenceData::default()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Version to classify against: explicit override, then the report's, then the default.
pub fn select_version<'a>(
    settings: &'a ReferenceSettings,
    report: &'a AvailabilityReport,
    version_override: Option<&'a str>,
) -> &'a str {
    version_override
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| settings.version_for(report.version.as_deref()))
}

/// Enrich a parsed report.
pub fn enrich_report(
    report: AvailabilityReport,
    source: &dyn ReferenceSource,
    settings: &EnrichSettings,
    version_override: Option<&str>,
) -> Result<EnrichedReport, DatavailError> {
    let version = select_version(&settings.reference, &report, version_override).to_string();
    let reference = load_reference(source, &version)?;
    info!(
        version = %version,
        reference_fields = reference.fields.len(),
        reference_lookups = reference.lookups.len(),
        "classifying against reference metadata"
    );

    let index = ClassificationIndex::build(&reference)
        .with_primary_payload(settings.classification.primary_payload.as_str());
    Ok(aggregate(report, &index, &settings.classification))
}

/// Parse, validate and enrich a raw JSON report.
pub fn enrich_json(
    json: &str,
    source: &dyn ReferenceSource,
    settings: &EnrichSettings,
    version_override: Option<&str>,
) -> Result<EnrichedReport, DatavailError> {
    let report = parse_report(json)?;
    enrich_report(report, source, settings, version_override)
}

/// Read and enrich a report file.
pub fn enrich_file(
    path: &Path,
    source: &dyn ReferenceSource,
    settings: &EnrichSettings,
    version_override: Option<&str>,
) -> Result<EnrichedReport, DatavailError> {
    let raw = std::fs::read_to_string(path)?;
    enrich_json(&raw, source, settings, version_override)
}

/// Size summary of one reference version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceSummary {
    pub version: String,
    #[serde(flatten)]
    pub stats: ReferenceStats,
}

/// Summarize the reference metadata for `version`.
///
/// Unlike enrichment, an unknown version is an error here.
pub fn reference_summary(
    source: &dyn ReferenceSource,
    version: &str,
    primary_payload: &str,
) -> Result<ReferenceSummary, DatavailError> {
    let data = source.load(version)?;
    Ok(ReferenceSummary {
        version: version.to_string(),
        stats: summarize(&data, primary_payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_requires_all_collections() {
        let err = validate_envelope(&json!({"resources": [], "fields": []})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidReport);
        assert_eq!(err.details.as_deref(), Some("`lookupValues` must be an array"));

        let err = validate_envelope(&json!({"resources": {}, "fields": [], "lookupValues": []}))
            .unwrap_err();
        assert_eq!(err.details.as_deref(), Some("`resources` must be an array"));

        assert!(validate_envelope(&json!([])).is_err());
        assert!(validate_envelope(&json!({"resources": [], "fields": [], "lookupValues": []})).is_ok());
    }

    #[test]
    fn malformed_json_is_invalid_json() {
        let err = parse_report("{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidJson);
    }

    #[test]
    fn mistyped_items_are_invalid_report() {
        let err = parse_report(
            r#"{"resources": [], "fields": [{"resourceName": 1}], "lookupValues": []}"#,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidReport);
    }

    #[test]
    fn unknown_version_falls_back_to_empty_reference() {
        let source = InMemoryReference::new();
        let data = load_reference(&source, "9.9").unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn invalid_version_falls_back_to_empty_reference() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectoryReference::new(dir.path());
        let data = load_reference(&source, "1.7 draft").unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn version_override_wins_over_report() {
        let settings = ReferenceSettings::default();
        let report = parse_report(
            r#"{"version": "2.0", "resources": [], "fields": [], "lookupValues": []}"#,
        )
        .unwrap();
        assert_eq!(select_version(&settings, &report, Some("1.7")), "1.7");
        assert_eq!(select_version(&settings, &report, Some(" ")), "2.0");
        assert_eq!(select_version(&settings, &report, None), "2.0");
    }

    #[test]
    fn missing_reference_dir_yields_in_memory_source() {
        let source = reference_source(&ReferenceSettings::default());
        assert!(matches!(
            source.load("1.7"),
            Err(ReferenceError::UnknownVersion(_))
        ));
    }
}
