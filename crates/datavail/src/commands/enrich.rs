use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use datavail_config::{CliEnrichArgs, TomlConfig, resolve_enrich};
use datavail_core::{enrich_json, reference_source};

pub(crate) fn handle(args: CliEnrichArgs, config: &TomlConfig) -> Result<()> {
    let settings = resolve_enrich(&args, config);
    let source = reference_source(&settings.reference);

    let raw = read_report(&args.report)?;
    let enriched = enrich_json(
        &raw,
        source.as_ref(),
        &settings,
        args.reference.dd_version.as_deref(),
    )
    .with_context(|| format!("Failed to enrich {}", args.report.display()))?;

    datavail_format::write_report(&enriched, &settings.output, args.output.as_deref())
        .context("Failed to write output")?;

    if let Some(path) = &args.output {
        info!(path = %path.display(), "wrote enriched report");
    }
    Ok(())
}

/// Read the report from `path`, or stdin for `-`.
fn read_report(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read report from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))
}
