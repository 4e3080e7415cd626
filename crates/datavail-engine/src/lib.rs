//! # datavail-engine
//!
//! **Tier 2 (Aggregation)**
//!
//! Classifies every field and lookup value of an availability report,
//! computes its availability against the right record count, and folds the
//! results into global histograms, per-resource averages and per-resource
//! histograms.
//!
//! ## What belongs here
//! * The aggregation pass ([`aggregate`])
//! * Running accumulators and the finalizer ([`finalize`])
//!
//! ## What does NOT belong here
//! * Reading reports or reference files
//! * Rendering output
//!
//! The pass is synchronous and keeps no state between calls.

mod accumulator;

use tracing::{debug, info, instrument, warn};

use datavail_index::{
    ClassificationIndex, FieldKey, LookupValueIndex, RecordCounts, ScopeKey, key_of,
};
use datavail_math::{availability_ratio, clamp_unit};
use datavail_settings::ClassificationSettings;
use datavail_types::{
    AVAILABILITY_KEY, AvailabilityReport, EnrichedReport, FieldAvailability, FieldMeasurement,
    LookupValueAvailability, LookupValueMeasurement,
};

pub use accumulator::{Aggregates, ItemKind, ResourceSums, RunningMean, finalize};

/// Enrich `report` with per-item availability and the aggregate summary.
///
/// Fields keep their input order. Lookup values keep their input order with
/// sentinel entries removed. Primary items are those whose field carries
/// `settings.primary_payload`, whatever marker `index` was built with.
/// A previous run's `availability` properties are replaced, so enriching an
/// enriched report gives the same result.
#[instrument(
    skip_all,
    fields(
        resources = report.resources.len(),
        fields = report.fields.len(),
        lookup_values = report.lookup_values.len()
    )
)]
pub fn aggregate(
    mut report: AvailabilityReport,
    index: &ClassificationIndex<'_>,
    settings: &ClassificationSettings,
) -> EnrichedReport {
    strip_previous_availability(&mut report);

    let (field_ratios, folded) = {
        let pass = Pass::new(&report, index, settings);
        let mut folded = Folded::new(report.lookup_values.len());
        let field_ratios: Vec<f64> = report
            .fields
            .iter()
            .map(|f| pass.field(&mut folded, f))
            .collect();
        pass.orphans(&mut folded);
        (field_ratios, folded)
    };
    let Folded {
        value_ratios,
        aggregates,
    } = folded;

    let fields: Vec<FieldAvailability> = report
        .fields
        .into_iter()
        .zip(field_ratios)
        .map(|(measurement, availability)| FieldAvailability {
            measurement,
            availability,
        })
        .collect();

    // Only sentinel entries are left without a ratio.
    let lookup_values: Vec<LookupValueAvailability> = report
        .lookup_values
        .into_iter()
        .zip(value_ratios)
        .filter_map(|(measurement, ratio)| {
            ratio.map(|availability| LookupValueAvailability {
                measurement,
                availability,
            })
        })
        .collect();

    info!(
        fields = fields.len(),
        lookup_values = lookup_values.len(),
        resources = aggregates.resources.len(),
        "aggregated availability report"
    );

    EnrichedReport {
        description: report.description,
        version: report.version,
        generated_on: report.generated_on,
        report_type: report.report_type,
        resources: report.resources,
        fields,
        lookups: report.lookups,
        lookup_values,
        availability: aggregates.into_summary(),
        extra: report.extra,
    }
}

fn strip_previous_availability(report: &mut AvailabilityReport) {
    report.extra.remove(AVAILABILITY_KEY);
    for field in &mut report.fields {
        field.extra.remove(AVAILABILITY_KEY);
    }
    for value in &mut report.lookup_values {
        value.extra.remove(AVAILABILITY_KEY);
    }
}

/// Read-only context of one aggregation pass over a borrowed report.
struct Pass<'a, 'r> {
    report: &'a AvailabilityReport,
    index: &'a ClassificationIndex<'r>,
    primary_payload: &'a str,
    null_sentinel: &'a str,
    counts: RecordCounts<'a>,
    values: LookupValueIndex<'a>,
}

/// What the pass accumulates.
struct Folded {
    /// `Some` once a lookup value has been aggregated.
    value_ratios: Vec<Option<f64>>,
    aggregates: Aggregates,
}

impl Folded {
    fn new(lookup_values: usize) -> Self {
        Self {
            value_ratios: vec![None; lookup_values],
            aggregates: Aggregates::default(),
        }
    }
}

impl<'a, 'r> Pass<'a, 'r> {
    fn new(
        report: &'a AvailabilityReport,
        index: &'a ClassificationIndex<'r>,
        settings: &'a ClassificationSettings,
    ) -> Self {
        Self {
            report,
            index,
            primary_payload: &settings.primary_payload,
            null_sentinel: &settings.null_sentinel,
            counts: RecordCounts::build(&report.resources),
            values: LookupValueIndex::build(&report.lookup_values, &settings.null_sentinel),
        }
    }

    /// Aggregate one field and the lookup values recorded for it.
    fn field(&self, out: &mut Folded, field: &'a FieldMeasurement) -> f64 {
        let scope = ScopeKey::new(field.parent(), &field.resource_name);
        let ratio = self.ratio(field.frequency, scope, &field.field_name);
        let class = self.index.classify_field_as(
            &field.resource_name,
            &field.field_name,
            self.primary_payload,
        );
        out.aggregates.record(ItemKind::Field, scope, class, ratio);

        let key = FieldKey::new(scope, &field.field_name);
        for &position in self.values.for_field(&key) {
            if out.value_ratios[position].is_none() {
                let value = &self.report.lookup_values[position];
                let ratio = self.lookup_value(out, scope, value);
                out.value_ratios[position] = Some(ratio);
            }
        }
        ratio
    }

    /// Aggregate lookup values whose field was never measured.
    fn orphans(&self, out: &mut Folded) {
        let mut orphans = 0usize;
        for (position, value) in self.report.lookup_values.iter().enumerate() {
            if value.lookup_value == self.null_sentinel || out.value_ratios[position].is_some() {
                continue;
            }
            let ratio = self.lookup_value(out, key_of(value).scope, value);
            out.value_ratios[position] = Some(ratio);
            orphans += 1;
        }
        if orphans > 0 {
            debug!(orphans, "aggregated lookup values without a field measurement");
        }
    }

    fn lookup_value(&self, out: &mut Folded, scope: ScopeKey<'_>, value: &LookupValueMeasurement) -> f64 {
        let ratio = self.ratio(value.frequency, scope, &value.field_name);
        let class = self.index.classify_lookup_value_as(
            &value.resource_name,
            &value.field_name,
            &value.lookup_value,
            self.primary_payload,
        );
        out.aggregates
            .record(ItemKind::LookupValue, scope, class, ratio);
        ratio
    }

    /// Availability of `frequency` against the unit's record count, within `[0, 1]`.
    fn ratio(&self, frequency: u64, scope: ScopeKey<'_>, field: &str) -> f64 {
        let denominator = self.counts.records(&scope);
        if denominator.is_none() {
            debug!(
                resource = scope.resource,
                parent = scope.parent,
                field,
                "no record count for resource; availability is 0"
            );
        }
        let raw = availability_ratio(frequency, denominator);
        if raw > 1.0 {
            warn!(
                resource = scope.resource,
                parent = scope.parent,
                field,
                frequency,
                records = denominator,
                "frequency exceeds records fetched; clamping availability to 1"
            );
        }
        clamp_unit(raw)
    }
}
