//! # datavail-format
//!
//! **Tier 3 (Formatting)**
//!
//! This crate renders enriched availability reports as JSON, Markdown or CSV.
//!
//! ## What belongs here
//! * Serialization logic (JSON/CSV)
//! * Markdown table rendering
//! * Output file writing
//!
//! ## What does NOT belong here
//! * Business logic (calculating availability)
//! * CLI arg parsing

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Result;

use datavail_math::{percent, round_f64};
use datavail_settings::{OutputFormat, OutputSettings};
use datavail_types::{CategoryMap, DistributionBins, EnrichedReport, ScopeStats};

/// Render `report` in the configured format.
pub fn render(report: &EnrichedReport, settings: &OutputSettings) -> Result<String> {
    let mut buf = Vec::new();
    write_report_to(&mut buf, report, settings)?;
    Ok(String::from_utf8(buf)?)
}

/// Write `report` to `path`, or to stdout when no path is given.
pub fn write_report(
    report: &EnrichedReport,
    settings: &OutputSettings,
    path: Option<&Path>,
) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut out = BufWriter::new(file);
            write_report_to(&mut out, report, settings)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_report_to(&mut out, report, settings)?;
            out.flush()?;
        }
    }
    Ok(())
}

pub fn write_report_to<W: Write>(
    out: &mut W,
    report: &EnrichedReport,
    settings: &OutputSettings,
) -> Result<()> {
    match settings.format {
        OutputFormat::Json => write_json(out, report, settings.pretty),
        OutputFormat::Md => {
            out.write_all(render_md(report).as_bytes())?;
            Ok(())
        }
        OutputFormat::Csv => write_csv(out, report),
    }
}

fn write_json<W: Write>(out: &mut W, report: &EnrichedReport, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, report)?;
    } else {
        serde_json::to_writer(&mut *out, report)?;
    }
    writeln!(out)?;
    Ok(())
}

// --------
// Markdown
// --------

/// Markdown summary: global histograms and per-resource averages.
pub fn render_md(report: &EnrichedReport) -> String {
    let mut s = String::new();
    let summary = &report.availability;

    s.push_str("# Data Availability\n\n");
    s.push_str("|Version|Generated|Resources|Fields|Lookup Values|\n");
    s.push_str("|---|---|---:|---:|---:|\n");
    s.push_str(&format!(
        "|{}|{}|{}|{}|{}|\n\n",
        report.version.as_deref().unwrap_or("-"),
        report.generated_on.as_deref().unwrap_or("-"),
        report.resources.len(),
        report.fields.len(),
        report.lookup_values.len()
    ));

    s.push_str("## Fields\n\n");
    push_bins_table(&mut s, &summary.fields);
    s.push_str("\n## Lookups\n\n");
    push_bins_table(&mut s, &summary.lookups);

    s.push_str("\n## Resources\n\n");
    s.push_str("Average availability (%).\n\n");
    s.push_str(
        "|Resource|Fields|Standard|Primary|Local|Lookups|Standard|Primary|Local|\n",
    );
    s.push_str("|---|---:|---:|---:|---:|---:|---:|---:|---:|\n");
    for (label, scope) in resource_rows(report) {
        s.push_str(&format!("|{label}"));
        for (_, avg) in scope.fields.iter().chain(scope.lookups.iter()) {
            s.push_str(&format!("|{:.2}", percent(*avg, 2)));
        }
        s.push_str("|\n");
    }

    s
}

fn push_bins_table(s: &mut String, bins: &CategoryMap<DistributionBins>) {
    s.push_str("|Category|Count|=0|>0|>=25%|>=50%|>=75%|=100%|\n");
    s.push_str("|---|---:|---:|---:|---:|---:|---:|---:|\n");
    for (category, b) in bins.iter() {
        s.push_str(&format!(
            "|{}|{}|{}|{}|{}|{}|{}|{}|\n",
            category.as_str(),
            b.observations(),
            b.eq_zero,
            b.gt_zero,
            b.gte25,
            b.gte50,
            b.gte75,
            b.eq100
        ));
    }
}

/// Per-resource rows in name order, each followed by its expansions
/// labelled `Parent > Child`.
fn resource_rows(report: &EnrichedReport) -> Vec<(String, &ScopeStats<f64>)> {
    let mut rows = Vec::new();
    for (name, stats) in &report.availability.resources {
        if has_own_items(report, name) {
            rows.push((name.clone(), &stats.own));
        }
        for (child, scope) in &stats.expansions {
            rows.push((format!("{name} > {child}"), scope));
        }
    }
    rows
}

/// Whether `name` had fields or lookup values of its own rather than only
/// inside its expansions. Resources without histograms are assumed to.
fn has_own_items(report: &EnrichedReport, name: &str) -> bool {
    report
        .availability
        .resources_binary
        .get(name)
        .is_none_or(|bins| {
            bins.own.fields.total.observations() + bins.own.lookups.total.observations() > 0
        })
}

// ---
// CSV
// ---

const CSV_HEADER: [&str; 10] = [
    "resource",
    "expansion",
    "fields_total",
    "fields_standard",
    "fields_primary",
    "fields_local",
    "lookups_total",
    "lookups_standard",
    "lookups_primary",
    "lookups_local",
];

/// One row per resource and expansion with the eight averages.
pub fn write_csv<W: Write>(out: &mut W, report: &EnrichedReport) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(out);
    wtr.write_record(CSV_HEADER)?;

    for (name, stats) in &report.availability.resources {
        let own = has_own_items(report, name).then_some((None, &stats.own));
        let scopes = own
            .into_iter()
            .chain(stats.expansions.iter().map(|(c, s)| (Some(c.as_str()), s)));
        for (child, scope) in scopes {
            let mut record = vec![name.clone(), child.unwrap_or_default().to_string()];
            record.extend(
                scope
                    .fields
                    .iter()
                    .chain(scope.lookups.iter())
                    .map(|(_, avg)| round_f64(*avg, 4).to_string()),
            );
            wtr.write_record(&record)?;
        }
    }

    wtr.flush()?;
    Ok(())
}
