//! Denominator lookup for aggregate units.

use std::collections::HashMap;

use datavail_types::ResourceMeasurement;

use crate::ScopeKey;

/// Records fetched per top-level resource and per expansion.
///
/// A resource listed twice keeps its last entry.
#[derive(Debug, Default)]
pub struct RecordCounts<'a> {
    counts: HashMap<ScopeKey<'a>, Option<u64>>,
}

impl<'a> RecordCounts<'a> {
    pub fn build(resources: &'a [ResourceMeasurement]) -> Self {
        let mut counts = HashMap::with_capacity(resources.len());
        for resource in resources {
            let name = resource.resource_name.as_str();
            counts.insert(ScopeKey::top_level(name), resource.num_records_fetched);
            for expansion in resource.expansions() {
                counts.insert(
                    ScopeKey::expansion(name, &expansion.resource_name),
                    expansion.num_records_fetched,
                );
            }
        }
        Self { counts }
    }

    /// Whether the unit appears in the report's resource list.
    pub fn contains(&self, scope: &ScopeKey<'_>) -> bool {
        self.counts.contains_key(scope)
    }

    /// Records fetched for the unit; `None` when the unit is unknown or
    /// reported no count.
    pub fn records(&self, scope: &ScopeKey<'_>) -> Option<u64> {
        self.counts.get(scope).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
