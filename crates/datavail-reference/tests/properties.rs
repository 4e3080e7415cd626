//! Property tests for version handling and summaries.

use std::fs;

use datavail_reference::{
    DirectoryReference, InMemoryReference, ReferenceError, ReferenceSource, reference_file_name,
    summarize,
};
use datavail_types::{ReferenceData, ReferenceFieldDefinition};
use proptest::prelude::*;

fn field() -> impl Strategy<Value = ReferenceFieldDefinition> {
    (
        prop::sample::select(vec!["Property", "Office", "Member", ""]),
        "[A-Z][a-zA-Z]{0,10}",
        prop::sample::select(vec![
            ("Edm.String", "String"),
            ("org.reso.metadata.enums.StandardStatus", "String List, Single"),
            ("org.reso.metadata.enums.Appliances", "String List, Multi"),
            ("Edm.Decimal", "Number"),
        ]),
        prop::collection::vec(prop::sample::select(vec!["IDX", "BBO"]), 0..3),
    )
        .prop_map(|(resource, name, (data_type, simple), payloads)| ReferenceFieldDefinition {
            resource_name: resource.to_string(),
            field_name: name,
            data_type: data_type.to_string(),
            simple_data_type: Some(simple.to_string()),
            payloads: payloads.into_iter().map(String::from).collect(),
            wiki_page_url: None,
        })
}

proptest! {
    #[test]
    fn path_like_versions_are_rejected(prefix in "[0-9.]{0,4}", suffix in "[0-9.]{0,4}") {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectoryReference::new(dir.path());
        for version in [format!("{prefix}/{suffix}"), format!("{prefix}..{suffix}")] {
            let err = source.load(&version).unwrap_err();
            prop_assert!(matches!(err, ReferenceError::InvalidVersion(_)), "{version}: {err}");
        }
    }

    #[test]
    fn missing_files_are_unknown_versions(version in "[0-9]{1,2}\\.[0-9]{1,2}") {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectoryReference::new(dir.path());
        let err = source.load(&version).unwrap_err();
        prop_assert!(matches!(err, ReferenceError::UnknownVersion(v) if v == version));
    }

    #[test]
    fn written_versions_are_listed(versions in prop::collection::btree_set("[0-9]\\.[0-9]", 0..5)) {
        let dir = tempfile::tempdir().unwrap();
        for version in &versions {
            fs::write(dir.path().join(reference_file_name(version)), "{}").unwrap();
        }
        fs::write(dir.path().join("notes.json"), "{}").unwrap();
        let listed = DirectoryReference::new(dir.path()).available_versions().unwrap();
        prop_assert_eq!(listed, versions.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn summary_counts_are_bounded(fields in prop::collection::vec(field(), 0..20)) {
        let data = ReferenceData { fields, lookups: vec![] };
        let stats = summarize(&data, "IDX");
        prop_assert_eq!(stats.fields, data.fields.len());
        prop_assert!(stats.primary_fields <= stats.fields);
        prop_assert!(stats.lookup_fields <= stats.fields);
        prop_assert!(stats.resources <= 3);

        let source = InMemoryReference::new().with_version("1.7", data.clone());
        let loaded = source.load("1.7").unwrap();
        prop_assert_eq!(loaded.as_ref(), &data);
    }
}
