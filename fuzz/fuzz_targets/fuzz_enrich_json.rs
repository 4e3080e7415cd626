#![no_main]

use datavail_core::settings::EnrichSettings;
use datavail_core::{enrich_json, reference_source};
use libfuzzer_sys::fuzz_target;

const MAX_INPUT_SIZE: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let settings = EnrichSettings::default();
    let source = reference_source(&settings.reference);
    let Ok(enriched) = enrich_json(text, source.as_ref(), &settings, None) else {
        return;
    };

    for field in &enriched.fields {
        assert!((0.0..=1.0).contains(&field.availability));
    }
    for value in &enriched.lookup_values {
        assert!((0.0..=1.0).contains(&value.availability));
        assert_ne!(value.measurement.lookup_value, settings.classification.null_sentinel);
    }
    let summary = &enriched.availability;
    assert_eq!(summary.fields.total.observations(), enriched.fields.len() as u64);
    assert_eq!(
        summary.lookups.total.observations(),
        enriched.lookup_values.len() as u64
    );
    assert!(serde_json::to_string(&enriched).is_ok());
});
