//! Running aggregates and the finalizer that turns them into averages.

use std::collections::BTreeMap;

use datavail_index::ScopeKey;
use datavail_math::guarded_mean;
use datavail_types::{
    AvailabilitySummary, CategoryMap, Classification, DistributionBins, ResourceAverages,
    ResourceBins, ResourceStats, ScopeStats,
};

/// Sum and count of the ratios seen for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMean {
    pub sum: f64,
    pub count: u64,
}

impl RunningMean {
    pub fn push(&mut self, ratio: f64) {
        self.sum += ratio;
        self.count += 1;
    }

    /// `sum / max(count, 1)`.
    pub fn mean(&self) -> f64 {
        guarded_mean(self.sum, self.count)
    }
}

/// Running sums per resource and expansion.
pub type ResourceSums = ResourceStats<RunningMean>;

/// Whether an observation belongs to a field or to a lookup value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Field,
    LookupValue,
}

/// Everything folded during one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub fields: CategoryMap<DistributionBins>,
    pub lookups: CategoryMap<DistributionBins>,
    pub resources: BTreeMap<String, ResourceSums>,
    pub resources_binary: BTreeMap<String, ResourceBins>,
}

impl Aggregates {
    /// Fold one ratio into the global bins and the unit addressed by `scope`,
    /// once per category the classification contributes to.
    pub fn record(&mut self, kind: ItemKind, scope: ScopeKey<'_>, class: Classification, ratio: f64) {
        let child = scope.child();
        let sums = self
            .resources
            .entry(scope.owner().to_string())
            .or_default()
            .scope_mut(child);
        let bins = self
            .resources_binary
            .entry(scope.owner().to_string())
            .or_default()
            .scope_mut(child);

        let (global, sums, bins) = match kind {
            ItemKind::Field => (&mut self.fields, &mut sums.fields, &mut bins.fields),
            ItemKind::LookupValue => (&mut self.lookups, &mut sums.lookups, &mut bins.lookups),
        };

        for &category in class.categories() {
            global.get_mut(category).add_observation(ratio);
            sums.get_mut(category).push(ratio);
            bins.get_mut(category).add_observation(ratio);
        }
    }

    /// Finalize into the serialized `availability` block.
    pub fn into_summary(self) -> AvailabilitySummary {
        AvailabilitySummary {
            fields: self.fields,
            lookups: self.lookups,
            resources: finalize(&self.resources),
            resources_binary: self.resources_binary,
        }
    }
}

/// Turn running sums into per-category averages, per resource and expansion.
pub fn finalize(sums: &BTreeMap<String, ResourceSums>) -> BTreeMap<String, ResourceAverages> {
    sums.iter()
        .map(|(name, stats)| {
            let averages = ResourceAverages {
                own: average_scope(&stats.own),
                expansions: stats
                    .expansions
                    .iter()
                    .map(|(child, scope)| (child.clone(), average_scope(scope)))
                    .collect(),
            };
            (name.clone(), averages)
        })
        .collect()
}

fn average_scope(scope: &ScopeStats<RunningMean>) -> ScopeStats<f64> {
    ScopeStats {
        fields: scope.fields.map(RunningMean::mean),
        lookups: scope.lookups.map(RunningMean::mean),
    }
}
