//! Aggregate shapes attached to an enriched report under `availability`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Accounting category for a field or lookup value.
///
/// `Primary` items are always counted as `Standard` and `Total` too;
/// `Standard` and `Local` partition `Total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Total,
    Standard,
    Primary,
    Local,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Total,
        Category::Standard,
        Category::Primary,
        Category::Local,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Total => "total",
            Category::Standard => "standard",
            Category::Primary => "primary",
            Category::Local => "local",
        }
    }
}

/// Outcome of classifying one item against reference metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Standard { primary: bool },
    Local,
}

impl Classification {
    /// Every category the item contributes to, `Total` first.
    pub fn categories(self) -> &'static [Category] {
        match self {
            Classification::Standard { primary: true } => {
                &[Category::Total, Category::Standard, Category::Primary]
            }
            Classification::Standard { primary: false } => &[Category::Total, Category::Standard],
            Classification::Local => &[Category::Total, Category::Local],
        }
    }

    pub fn is_standard(self) -> bool {
        matches!(self, Classification::Standard { .. })
    }

    pub fn is_primary(self) -> bool {
        matches!(self, Classification::Standard { primary: true })
    }
}

/// One value per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryMap<T> {
    pub total: T,
    pub standard: T,
    pub primary: T,
    pub local: T,
}

impl<T> CategoryMap<T> {
    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Total => &self.total,
            Category::Standard => &self.standard,
            Category::Primary => &self.primary,
            Category::Local => &self.local,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Total => &mut self.total,
            Category::Standard => &mut self.standard,
            Category::Primary => &mut self.primary,
            Category::Local => &mut self.local,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> CategoryMap<U> {
        CategoryMap {
            total: f(&self.total),
            standard: f(&self.standard),
            primary: f(&self.primary),
            local: f(&self.local),
        }
    }
}

/// Cumulative-threshold histogram over availability ratios.
///
/// Bins overlap: a ratio of `1.0` lands in every bin except `eq_zero`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBins {
    pub eq_zero: u64,
    pub gt_zero: u64,
    pub gte25: u64,
    pub gte50: u64,
    pub gte75: u64,
    pub eq100: u64,
}

impl DistributionBins {
    /// Record one ratio in every bin whose threshold it satisfies.
    pub fn add_observation(&mut self, ratio: f64) {
        if ratio == 0.0 {
            self.eq_zero += 1;
        }
        if ratio > 0.0 {
            self.gt_zero += 1;
        }
        if ratio >= 0.25 {
            self.gte25 += 1;
        }
        if ratio >= 0.5 {
            self.gte50 += 1;
        }
        if ratio >= 0.75 {
            self.gte75 += 1;
        }
        if ratio == 1.0 {
            self.eq100 += 1;
        }
    }

    /// Number of ratios recorded so far.
    pub fn observations(&self) -> u64 {
        self.eq_zero + self.gt_zero
    }
}

/// Field and lookup figures for one aggregate unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeStats<T> {
    pub fields: CategoryMap<T>,
    pub lookups: CategoryMap<T>,
}

/// Figures for a top-level resource plus the expansions fetched under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceStats<T> {
    #[serde(flatten)]
    pub own: ScopeStats<T>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expansions: BTreeMap<String, ScopeStats<T>>,
}

impl<T: Default> ResourceStats<T> {
    /// The unit for `child` under this resource, or the resource itself.
    pub fn scope_mut(&mut self, child: Option<&str>) -> &mut ScopeStats<T> {
        match child {
            Some(name) => self.expansions.entry(name.to_string()).or_default(),
            None => &mut self.own,
        }
    }
}

impl<T> ResourceStats<T> {
    pub fn scope(&self, child: Option<&str>) -> Option<&ScopeStats<T>> {
        match child {
            Some(name) => self.expansions.get(name),
            None => Some(&self.own),
        }
    }
}

/// Average availability per category, per resource and expansion.
pub type ResourceAverages = ResourceStats<f64>;

/// Distribution bins per category, per resource and expansion.
pub type ResourceBins = ResourceStats<DistributionBins>;

/// The `availability` block of an enriched report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySummary {
    pub fields: CategoryMap<DistributionBins>,
    pub lookups: CategoryMap<DistributionBins>,
    pub resources: BTreeMap<String, ResourceAverages>,
    pub resources_binary: BTreeMap<String, ResourceBins>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_availability_hits_every_bin_but_zero() {
        let mut bins = DistributionBins::default();
        bins.add_observation(1.0);
        assert_eq!(
            bins,
            DistributionBins {
                eq_zero: 0,
                gt_zero: 1,
                gte25: 1,
                gte50: 1,
                gte75: 1,
                eq100: 1,
            }
        );
    }

    #[test]
    fn zero_availability_only_hits_eq_zero() {
        let mut bins = DistributionBins::default();
        bins.add_observation(0.0);
        assert_eq!(bins.eq_zero, 1);
        assert_eq!(bins.gt_zero, 0);
        assert_eq!(bins.observations(), 1);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let mut bins = DistributionBins::default();
        for ratio in [0.25, 0.5, 0.75] {
            bins.add_observation(ratio);
        }
        assert_eq!(bins.gte25, 3);
        assert_eq!(bins.gte50, 2);
        assert_eq!(bins.gte75, 1);
        assert_eq!(bins.eq100, 0);
    }

    #[test]
    fn classification_categories_nest() {
        assert_eq!(
            Classification::Standard { primary: true }.categories(),
            &[Category::Total, Category::Standard, Category::Primary]
        );
        assert_eq!(
            Classification::Local.categories(),
            &[Category::Total, Category::Local]
        );
        assert!(!Classification::Local.is_standard());
        assert!(!Classification::Standard { primary: false }.is_primary());
    }

    #[test]
    fn bins_serialize_with_report_keys() {
        let json = serde_json::to_value(DistributionBins::default()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["eq100", "eqZero", "gtZero", "gte25", "gte50", "gte75"]);
    }

    #[test]
    fn resource_stats_skip_empty_expansions() {
        let stats = ResourceAverages::default();
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("expansions").is_none());
        assert!(json.get("fields").is_some());
        assert!(json.get("lookups").is_some());
    }

    #[test]
    fn scope_mut_creates_expansion_units() {
        let mut stats = ResourceBins::default();
        stats.scope_mut(Some("Media")).fields.total.add_observation(1.0);
        assert_eq!(stats.own.fields.total.observations(), 0);
        assert_eq!(
            stats.scope(Some("Media")).unwrap().fields.total.eq100,
            1
        );
    }
}
