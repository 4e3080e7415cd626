//! Reference metadata for one data dictionary version.
//!
//! Lookup definitions accept two shapes: the condensed form with a
//! `lookupDisplayName`, and the metadata-report form where the display name
//! lives in an `annotations` list under the standard-name term.

use serde::{Deserialize, Serialize};

/// Annotation term carrying a lookup's display name in metadata reports.
pub const STANDARD_NAME_ANNOTATION_TERM: &str = "RESO.OData.Metadata.StandardName";

/// Simple data type marker for enumerated fields.
const STRING_LIST_MARKER: &str = "String List";

/// Segment after the last `.` of a qualified lookup name.
///
/// `org.reso.metadata.enums.AreaSource` becomes `AreaSource`; unqualified
/// names are returned unchanged.
pub fn short_lookup_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, tail)| tail)
}

/// A standard field of the reference schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceFieldDefinition {
    #[serde(default)]
    pub resource_name: String,
    #[serde(default)]
    pub field_name: String,
    #[serde(rename = "type", default)]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_data_type: Option<String>,
    #[serde(default)]
    pub payloads: Vec<String>,
    #[serde(
        rename = "wikiPageURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub wiki_page_url: Option<String>,
}

impl ReferenceFieldDefinition {
    pub fn has_payload(&self, marker: &str) -> bool {
        self.payloads.iter().any(|p| p == marker)
    }

    /// Embedded lookup name for string-list fields.
    ///
    /// Only fields whose simple type is a string list and whose type is a
    /// qualified enumeration name (`org.reso.metadata.enums.StandardStatus`)
    /// carry one.
    pub fn lookup_name(&self) -> Option<&str> {
        let is_string_list = self
            .simple_data_type
            .as_deref()
            .is_some_and(|t| t.contains(STRING_LIST_MARKER));
        if is_string_list && self.data_type.contains('.') {
            Some(short_lookup_name(&self.data_type))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Annotation {
    term: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLookupDefinition {
    lookup_name: String,
    lookup_value: String,
    #[serde(default)]
    lookup_display_name: Option<String>,
    #[serde(default)]
    annotations: Vec<Annotation>,
}

/// A standard value of a reference enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawLookupDefinition")]
pub struct ReferenceLookupDefinition {
    pub lookup_name: String,
    pub lookup_value: String,
    #[serde(
        rename = "lookupDisplayName",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
}

impl From<RawLookupDefinition> for ReferenceLookupDefinition {
    fn from(raw: RawLookupDefinition) -> Self {
        let display_name = raw.lookup_display_name.or_else(|| {
            raw.annotations
                .into_iter()
                .find(|a| a.term == STANDARD_NAME_ANNOTATION_TERM)
                .and_then(|a| a.value)
        });
        Self {
            lookup_name: raw.lookup_name,
            lookup_value: raw.lookup_value,
            display_name,
        }
    }
}

/// Reference fields and lookups for one version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub fields: Vec<ReferenceFieldDefinition>,
    #[serde(default)]
    pub lookups: Vec<ReferenceLookupDefinition>,
}

impl ReferenceData {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.lookups.is_empty()
    }
}
