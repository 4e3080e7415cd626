use anyhow::{Context, Result, bail};

use datavail_config::{CliReferenceArgs, TomlConfig, apply_reference_args};
use datavail_core::{reference_source, reference_summary};
use datavail_reference::DirectoryReference;

pub(crate) fn handle(args: CliReferenceArgs, config: &TomlConfig) -> Result<()> {
    let mut settings = config.settings();
    apply_reference_args(&mut settings.reference, &args.reference);

    let Some(dir) = settings.reference.dir.as_deref() else {
        bail!("No reference directory configured");
    };
    let version = args
        .reference
        .dd_version
        .as_deref()
        .unwrap_or(&settings.reference.default_version);

    let source = reference_source(&settings.reference);
    let summary = reference_summary(
        source.as_ref(),
        version,
        &settings.classification.primary_payload,
    )
    .with_context(|| {
        let available = DirectoryReference::new(dir)
            .available_versions()
            .map(|v| v.join(", "))
            .unwrap_or_default();
        format!("Reference version {version} (available: {available})")
    })?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
