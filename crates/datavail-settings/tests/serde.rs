use datavail_settings::{ClassificationSettings, EnrichSettings, OutputFormat};

#[test]
fn partial_toml_fills_remaining_defaults() {
    let settings: EnrichSettings = toml::from_str(
        r#"
        [classification]
        primary_payload = "BBO"

        [output]
        format = "md"
        "#,
    )
    .unwrap();
    assert_eq!(settings.classification.primary_payload, "BBO");
    assert_eq!(settings.classification.null_sentinel, "NULL_VALUE");
    assert_eq!(settings.output.format, OutputFormat::Md);
    assert_eq!(settings.reference.default_version, "1.7");
}

#[test]
fn settings_roundtrip_through_json() {
    let settings = EnrichSettings {
        classification: ClassificationSettings {
            primary_payload: "IDX".into(),
            null_sentinel: "<null>".into(),
        },
        ..Default::default()
    };
    let json = serde_json::to_string(&settings).unwrap();
    let back: EnrichSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(back, settings);
}
