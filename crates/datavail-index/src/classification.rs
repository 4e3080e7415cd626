//! Reference-side index answering "is this standard, and is it primary?".

use std::collections::{HashMap, HashSet};

use tracing::debug;

use datavail_types::reference::short_lookup_name;
use datavail_types::{Classification, PRIMARY_PAYLOAD, ReferenceData, ReferenceFieldDefinition};

/// Standard values and display names of one enumeration.
#[derive(Debug, Default)]
struct LookupEntries<'r> {
    values: HashSet<&'r str>,
    display_names: HashSet<&'r str>,
}

impl LookupEntries<'_> {
    fn contains(&self, value: &str) -> bool {
        self.values.contains(value) || self.display_names.contains(value)
    }
}

/// Constant-time classification over one reference dataset.
#[derive(Debug)]
pub struct ClassificationIndex<'r> {
    fields: HashMap<&'r str, HashMap<&'r str, &'r ReferenceFieldDefinition>>,
    lookups: HashMap<&'r str, LookupEntries<'r>>,
    primary_payload: String,
}

impl<'r> ClassificationIndex<'r> {
    /// Index `reference`, marking fields carrying `IDX` as primary.
    ///
    /// The `*_as` classifiers take the marker per call instead.
    ///
    /// Fields without both a resource and a field name are skipped. When a
    /// resource lists the same field twice, the later definition wins.
    pub fn build(reference: &'r ReferenceData) -> Self {
        let mut fields: HashMap<&str, HashMap<&str, &ReferenceFieldDefinition>> = HashMap::new();
        for def in &reference.fields {
            if def.resource_name.is_empty() || def.field_name.is_empty() {
                continue;
            }
            fields
                .entry(def.resource_name.as_str())
                .or_default()
                .insert(def.field_name.as_str(), def);
        }

        let mut lookups: HashMap<&str, LookupEntries> = HashMap::new();
        for def in &reference.lookups {
            let entries = lookups
                .entry(short_lookup_name(&def.lookup_name))
                .or_default();
            entries.values.insert(def.lookup_value.as_str());
            if let Some(display) = def.display_name.as_deref() {
                entries.display_names.insert(display);
            }
        }

        debug!(
            resources = fields.len(),
            lookup_names = lookups.len(),
            "built classification index"
        );

        Self {
            fields,
            lookups,
            primary_payload: PRIMARY_PAYLOAD.to_string(),
        }
    }

    /// Use a different payload marker for primary fields.
    pub fn with_primary_payload(mut self, marker: impl Into<String>) -> Self {
        self.primary_payload = marker.into();
        self
    }

    pub fn primary_payload(&self) -> &str {
        &self.primary_payload
    }

    /// The reference definition of `resource.field`, if standard.
    pub fn field(&self, resource: &str, field: &str) -> Option<&'r ReferenceFieldDefinition> {
        self.fields.get(resource)?.get(field).copied()
    }

    pub fn is_standard_field(&self, resource: &str, field: &str) -> bool {
        self.field(resource, field).is_some()
    }

    /// Whether `value` is a standard value or display name of `lookup_name`.
    ///
    /// Qualified names are matched on their last segment.
    pub fn is_standard_value(&self, lookup_name: &str, value: &str) -> bool {
        self.lookups
            .get(short_lookup_name(lookup_name))
            .is_some_and(|entries| entries.contains(value))
    }

    /// Classify a field by its resource and name.
    pub fn classify_field(&self, resource: &str, field: &str) -> Classification {
        self.classify_field_as(resource, field, &self.primary_payload)
    }

    /// Classify a field, treating `primary_payload` as the primary marker.
    pub fn classify_field_as(
        &self,
        resource: &str,
        field: &str,
        primary_payload: &str,
    ) -> Classification {
        match self.field(resource, field) {
            Some(def) => Classification::Standard {
                primary: def.has_payload(primary_payload),
            },
            None => Classification::Local,
        }
    }

    /// Classify one value of `resource.field`.
    ///
    /// The value is standard only when its field is standard, the field is an
    /// enumeration, and the value (or its display name) belongs to that
    /// enumeration. Primary status follows the field.
    pub fn classify_lookup_value(&self, resource: &str, field: &str, value: &str) -> Classification {
        self.classify_lookup_value_as(resource, field, value, &self.primary_payload)
    }

    /// Classify one value, treating `primary_payload` as the primary marker.
    pub fn classify_lookup_value_as(
        &self,
        resource: &str,
        field: &str,
        value: &str,
        primary_payload: &str,
    ) -> Classification {
        let Some(def) = self.field(resource, field) else {
            return Classification::Local;
        };
        match def.lookup_name() {
            Some(lookup_name) if self.is_standard_value(lookup_name, value) => {
                Classification::Standard {
                    primary: def.has_payload(primary_payload),
                }
            }
            _ => Classification::Local,
        }
    }

    /// Number of resources with at least one standard field.
    pub fn resource_count(&self) -> usize {
        self.fields.len()
    }
}
