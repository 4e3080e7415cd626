//! Rendering tests over a hand-built enriched report.

use datavail_format::{render, render_md, write_report};
use datavail_settings::{OutputFormat, OutputSettings};
use datavail_types::{AvailabilitySummary, EnrichedReport, ResourceAverages, ResourceBins};

fn sample() -> EnrichedReport {
    let mut summary = AvailabilitySummary::default();
    for ratio in [1.0, 0.5] {
        summary.fields.total.add_observation(ratio);
        summary.fields.standard.add_observation(ratio);
    }
    summary.lookups.total.add_observation(0.0);
    summary.lookups.local.add_observation(0.0);

    let mut office = ResourceAverages::default();
    office.own.fields.total = 0.75;
    office.own.fields.standard = 0.75;
    summary.resources.insert("Office".into(), office);

    let mut office_bins = ResourceBins::default();
    for ratio in [1.0, 0.5] {
        office_bins.own.fields.total.add_observation(ratio);
        office_bins.own.fields.standard.add_observation(ratio);
    }
    summary.resources_binary.insert("Office".into(), office_bins);

    // Property was only measured through its Media expansion.
    let mut property = ResourceAverages::default();
    property.scope_mut(Some("Media")).lookups.local = 0.25;
    summary.resources.insert("Property".into(), property);

    let mut property_bins = ResourceBins::default();
    let media = property_bins.scope_mut(Some("Media"));
    media.lookups.total.add_observation(0.25);
    media.lookups.local.add_observation(0.25);
    summary.resources_binary.insert("Property".into(), property_bins);

    EnrichedReport {
        description: Some("RESO Data Availability Report".into()),
        version: Some("1.7".into()),
        generated_on: Some("2022-03-15T10:12:32.319Z".into()),
        report_type: None,
        resources: vec![],
        fields: vec![],
        lookups: vec![],
        lookup_values: vec![],
        availability: summary,
        extra: Default::default(),
    }
}

#[test]
fn snapshot_markdown_summary() {
    insta::assert_snapshot!("markdown_summary", render_md(&sample()));
}

#[test]
fn csv_rows_follow_resource_order() {
    let settings = OutputSettings {
        format: OutputFormat::Csv,
        pretty: false,
    };
    let csv = render(&sample(), &settings).unwrap();
    let resources: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap_or_default())
        .collect();
    assert_eq!(resources, ["Office", "Property"]);
    assert!(csv.contains("\nProperty,Media,"));
    assert!(!csv.contains("\nProperty,,"));
}

#[test]
fn write_report_creates_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enriched.json");
    write_report(&sample(), &OutputSettings::default(), Some(path.as_path())).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["version"], "1.7");
    assert_eq!(value["availability"]["resources"]["Office"]["fields"]["total"], 0.75);
    assert!(value["availability"]["resources"]["Property"]["expansions"]["Media"].is_object());
}
