//! # datavail-reference
//!
//! **Tier 1 (Reference Metadata)**
//!
//! Read-only access to reference field and lookup definitions, keyed by
//! data dictionary version.
//!
//! ## What belongs here
//! * The [`ReferenceSource`] seam and its in-memory and directory-backed sources
//! * Per-version memoization ([`CachedReference`])
//! * Dataset summaries for diagnostics
//!
//! ## What does NOT belong here
//! * Classification lookups (use datavail-index)
//! * Report parsing or aggregation

mod cache;
mod directory;

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use datavail_types::ReferenceData;
use datavail_types::reference::short_lookup_name;

pub use cache::CachedReference;
pub use directory::{DirectoryReference, reference_file_name};

/// Errors from loading reference metadata.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Unknown reference version: {0}")]
    UnknownVersion(String),

    #[error("Invalid reference version '{0}'")]
    InvalidVersion(String),

    #[error("Failed to read reference file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse reference file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Supplies reference metadata for a data dictionary version.
pub trait ReferenceSource: Send + Sync {
    fn load(&self, version: &str) -> Result<Arc<ReferenceData>, ReferenceError>;
}

impl<S: ReferenceSource + ?Sized> ReferenceSource for Arc<S> {
    fn load(&self, version: &str) -> Result<Arc<ReferenceData>, ReferenceError> {
        (**self).load(version)
    }
}

impl<S: ReferenceSource + ?Sized> ReferenceSource for &S {
    fn load(&self, version: &str) -> Result<Arc<ReferenceData>, ReferenceError> {
        (**self).load(version)
    }
}

/// Reference datasets registered in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReference {
    versions: BTreeMap<String, Arc<ReferenceData>>,
}

impl InMemoryReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `data` under `version`, replacing any previous dataset.
    pub fn with_version(mut self, version: impl Into<String>, data: ReferenceData) -> Self {
        self.versions.insert(version.into(), Arc::new(data));
        self
    }

    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }
}

impl ReferenceSource for InMemoryReference {
    fn load(&self, version: &str) -> Result<Arc<ReferenceData>, ReferenceError> {
        self.versions
            .get(version)
            .cloned()
            .ok_or_else(|| ReferenceError::UnknownVersion(version.to_string()))
    }
}

/// Size summary of a reference dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceStats {
    pub resources: usize,
    pub fields: usize,
    pub primary_fields: usize,
    pub lookup_fields: usize,
    pub lookup_names: usize,
    pub lookup_values: usize,
}

/// Count resources, fields and lookups in `data`.
pub fn summarize(data: &ReferenceData, primary_payload: &str) -> ReferenceStats {
    let resources: BTreeSet<&str> = data
        .fields
        .iter()
        .map(|f| f.resource_name.as_str())
        .filter(|r| !r.is_empty())
        .collect();
    let lookup_names: BTreeSet<&str> = data
        .lookups
        .iter()
        .map(|l| short_lookup_name(&l.lookup_name))
        .collect();

    ReferenceStats {
        resources: resources.len(),
        fields: data.fields.len(),
        primary_fields: data
            .fields
            .iter()
            .filter(|f| f.has_payload(primary_payload))
            .count(),
        lookup_fields: data
            .fields
            .iter()
            .filter(|f| f.lookup_name().is_some())
            .count(),
        lookup_names: lookup_names.len(),
        lookup_values: data.lookups.len(),
    }
}
