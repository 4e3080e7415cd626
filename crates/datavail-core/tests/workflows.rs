//! End-to-end enrichment through the facade with a directory-backed reference.

use std::path::Path;

use datavail_core::settings::{EnrichSettings, ReferenceSettings};
use datavail_core::{ErrorCode, enrich_file, enrich_json, reference_source, reference_summary};
use serde_json::json;

fn write_reference(dir: &Path) {
    let reference = json!({
        "description": "RESO Data Dictionary Metadata Report",
        "version": "1.7",
        "fields": [
            {
                "resourceName": "Office",
                "fieldName": "OfficeStateOrProvince",
                "type": "org.reso.metadata.enums.StateOrProvince",
                "simpleDataType": "String List, Single",
                "payloads": ["IDX"]
            },
            {
                "resourceName": "Office",
                "fieldName": "OfficeName",
                "type": "Edm.String",
                "simpleDataType": "String",
                "payloads": []
            }
        ],
        "lookups": [
            {
                "lookupName": "org.reso.metadata.enums.StateOrProvince",
                "lookupValue": "CA",
                "type": "Edm.Int32",
                "annotations": [{"term": "RESO.OData.Metadata.StandardName", "value": "California"}]
            }
        ]
    });
    std::fs::write(dir.join("dd-1.7.json"), reference.to_string()).unwrap();
}

fn report() -> String {
    json!({
        "description": "RESO Data Availability Report",
        "version": "1.7",
        "resources": [{"resourceName": "Office", "numRecordsFetched": 100}],
        "fields": [
            {"resourceName": "Office", "fieldName": "OfficeStateOrProvince", "frequency": 100},
            {"resourceName": "Office", "fieldName": "OfficeName", "frequency": 50}
        ],
        "lookups": [],
        "lookupValues": [
            {"resourceName": "Office", "fieldName": "OfficeStateOrProvince", "lookupValue": "California", "frequency": 75},
            {"resourceName": "Office", "fieldName": "OfficeStateOrProvince", "lookupValue": "NULL_VALUE", "frequency": 25}
        ]
    })
    .to_string()
}

fn settings_for(dir: &Path) -> EnrichSettings {
    EnrichSettings {
        reference: ReferenceSettings {
            dir: Some(dir.display().to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn enriches_against_directory_reference() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    let settings = settings_for(dir.path());
    let source = reference_source(&settings.reference);

    let out = enrich_json(&report(), &source, &settings, None).unwrap();

    assert_eq!(out.fields[0].availability, 1.0);
    assert_eq!(out.fields[1].availability, 0.5);
    assert_eq!(out.lookup_values.len(), 1);
    assert_eq!(out.lookup_values[0].availability, 0.75);
    let summary = &out.availability;
    assert_eq!(summary.fields.primary.eq100, 1);
    assert_eq!(summary.fields.standard.observations(), 2);
    assert_eq!(summary.lookups.primary.gte75, 1);
    assert_eq!(summary.resources["Office"].own.fields.standard, 0.75);
}

#[test]
fn unknown_reference_version_classifies_everything_local() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    let settings = settings_for(dir.path());
    let source = reference_source(&settings.reference);

    let out = enrich_json(&report(), &source, &settings, Some("2.0")).unwrap();

    let summary = &out.availability;
    assert_eq!(summary.fields.local.observations(), 2);
    assert_eq!(summary.fields.standard.observations(), 0);
    assert_eq!(summary.lookups.local.observations(), 1);
}

#[test]
fn report_version_outside_file_naming_classifies_everything_local() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    let settings = settings_for(dir.path());
    let source = reference_source(&settings.reference);
    let raw = report().replace(r#""version":"1.7""#, r#""version":"1.7 draft""#);
    assert!(raw.contains("1.7 draft"));

    let out = enrich_json(&raw, &source, &settings, None).unwrap();

    assert_eq!(out.version.as_deref(), Some("1.7 draft"));
    let summary = &out.availability;
    assert_eq!(summary.fields.local.observations(), 2);
    assert_eq!(summary.fields.standard.observations(), 0);
    assert_eq!(summary.lookups.local.observations(), 1);
    assert_eq!(out.fields[0].availability, 1.0);
}

#[test]
fn path_like_version_override_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    let settings = settings_for(dir.path());
    let source = reference_source(&settings.reference);

    let out = enrich_json(&report(), &source, &settings, Some("../1.7")).unwrap();

    assert_eq!(out.availability.fields.primary.observations(), 0);
    assert_eq!(out.availability.fields.total.observations(), 2);
}

#[test]
fn corrupt_reference_file_is_a_reference_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dd-1.7.json"), "{").unwrap();
    let settings = settings_for(dir.path());
    let source = reference_source(&settings.reference);

    let err = enrich_json(&report(), &source, &settings, None).unwrap_err();
    assert_eq!(err.code, ErrorCode::ReferenceError);
    assert!(err.message.contains("dd-1.7.json"));
}

#[test]
fn report_without_lookup_values_is_rejected() {
    let settings = EnrichSettings::default();
    let source = reference_source(&settings.reference);
    let err = enrich_json(r#"{"resources": [], "fields": []}"#, &source, &settings, None)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidReport);
}

#[test]
fn missing_report_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = EnrichSettings::default();
    let source = reference_source(&settings.reference);
    let err = enrich_file(&dir.path().join("absent.json"), &source, &settings, None).unwrap_err();
    assert_eq!(err.code, ErrorCode::IoError);
}

#[test]
fn reference_summary_counts_directory_dataset() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    let settings = settings_for(dir.path());
    let source = reference_source(&settings.reference);

    let summary = reference_summary(&source, "1.7", "IDX").unwrap();
    assert_eq!(summary.version, "1.7");
    assert_eq!(summary.stats.fields, 2);
    assert_eq!(summary.stats.primary_fields, 1);
    assert_eq!(summary.stats.lookup_values, 1);

    let err = reference_summary(&source, "9.9", "IDX").unwrap_err();
    assert_eq!(err.code, ErrorCode::ReferenceError);
}
