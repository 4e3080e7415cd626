//! # datavail-index
//!
//! **Tier 2 (Indexes)**
//!
//! In-memory indexes built once per aggregation run:
//!
//! * [`ClassificationIndex`] over reference metadata (resource -> field -> definition,
//!   lookup name -> value / display name), answering "standard, primary or local?"
//! * [`LookupValueIndex`] over a report's lookup-value measurements, keyed by
//!   optional parent resource, resource and field
//! * [`RecordCounts`] over a report's resources and expansions, giving the
//!   denominator for each aggregate unit
//!
//! All indexes borrow from their inputs and allocate no per-lookup keys.

mod classification;
mod counts;
mod input;

pub use classification::ClassificationIndex;
pub use counts::RecordCounts;
pub use input::{LookupValueIndex, key_of};

/// Addresses one aggregate unit: a top-level resource, or an expansion of
/// `resource` fetched under `parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeKey<'a> {
    pub parent: Option<&'a str>,
    pub resource: &'a str,
}

impl<'a> ScopeKey<'a> {
    pub fn top_level(resource: &'a str) -> Self {
        Self {
            parent: None,
            resource,
        }
    }

    pub fn expansion(parent: &'a str, resource: &'a str) -> Self {
        Self {
            parent: Some(parent),
            resource,
        }
    }

    pub fn new(parent: Option<&'a str>, resource: &'a str) -> Self {
        Self { parent, resource }
    }

    /// The resource whose aggregate entry holds this unit.
    pub fn owner(&self) -> &'a str {
        self.parent.unwrap_or(self.resource)
    }

    /// The expansion name inside the owner's entry, if any.
    pub fn child(&self) -> Option<&'a str> {
        self.parent.map(|_| self.resource)
    }
}

/// A field within an aggregate unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey<'a> {
    pub scope: ScopeKey<'a>,
    pub field: &'a str,
}

impl<'a> FieldKey<'a> {
    pub fn new(scope: ScopeKey<'a>, field: &'a str) -> Self {
        Self { scope, field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_scope_is_its_own_owner() {
        let key = ScopeKey::top_level("Property");
        assert_eq!(key.owner(), "Property");
        assert_eq!(key.child(), None);
    }

    #[test]
    fn expansion_scope_is_owned_by_parent() {
        let key = ScopeKey::expansion("Property", "Media");
        assert_eq!(key.owner(), "Property");
        assert_eq!(key.child(), Some("Media"));
        assert_ne!(key, ScopeKey::top_level("Media"));
    }
}
