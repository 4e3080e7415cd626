//! Report-side index over lookup-value measurements.

use std::collections::HashMap;

use tracing::debug;

use datavail_types::LookupValueMeasurement;

use crate::{FieldKey, ScopeKey};

/// Positions of a report's lookup values, grouped by the field they belong to.
///
/// Sentinel entries are left out; positions within a group keep input order.
#[derive(Debug, Default)]
pub struct LookupValueIndex<'a> {
    by_field: HashMap<FieldKey<'a>, Vec<usize>>,
    indexed: usize,
    sentinels: usize,
}

impl<'a> LookupValueIndex<'a> {
    pub fn build(values: &'a [LookupValueMeasurement], null_sentinel: &str) -> Self {
        let mut by_field: HashMap<FieldKey<'a>, Vec<usize>> = HashMap::new();
        let mut sentinels = 0;
        for (position, value) in values.iter().enumerate() {
            if value.lookup_value == null_sentinel {
                sentinels += 1;
                continue;
            }
            by_field.entry(key_of(value)).or_default().push(position);
        }
        let indexed = values.len() - sentinels;
        debug!(indexed, sentinels, fields = by_field.len(), "built lookup value index");
        Self {
            by_field,
            indexed,
            sentinels,
        }
    }

    /// Positions of the values recorded for `key`, in input order.
    pub fn for_field(&self, key: &FieldKey<'a>) -> &[usize] {
        self.by_field.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Non-sentinel values indexed.
    pub fn indexed(&self) -> usize {
        self.indexed
    }

    /// Sentinel values left out.
    pub fn sentinels(&self) -> usize {
        self.sentinels
    }

    /// Distinct fields with at least one indexed value.
    pub fn field_count(&self) -> usize {
        self.by_field.len()
    }
}

/// Index key of a lookup-value measurement.
pub fn key_of(value: &LookupValueMeasurement) -> FieldKey<'_> {
    FieldKey::new(
        ScopeKey::new(value.parent(), &value.resource_name),
        &value.field_name,
    )
}
