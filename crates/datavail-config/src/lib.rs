//! # datavail-config
//!
//! **Tier 4 (Configuration)**
//!
//! This crate defines the CLI arguments and configuration file structures.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * `datavail.toml` struct definitions (Serde)
//! * Merging CLI flags, file values and defaults into settings
//!
//! ## What does NOT belong here
//! * Business logic
//! * I/O operations (except config file parsing)
//! * Higher-tier crate dependencies

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use datavail_settings::{
    ClassificationSettings, EnrichSettings, OutputSettings, ReferenceSettings,
};
pub use datavail_types::OutputFormat;

/// File name looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "datavail.toml";

/// `datavail` enriches data availability reports with classified availability statistics.
#[derive(Parser, Debug)]
#[command(name = "datavail", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (default: ./datavail.toml when present).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Enrich a raw availability report.
    Enrich(CliEnrichArgs),

    /// Summarize the reference metadata for a data dictionary version.
    Reference(CliReferenceArgs),
}

/// Where reference metadata is read from.
#[derive(Args, Debug, Clone, Default)]
pub struct ReferenceArgs {
    /// Directory containing `dd-<version>.json` files.
    #[arg(long, value_name = "DIR")]
    pub reference_dir: Option<PathBuf>,

    /// Data dictionary version (default: the report's version, then 1.7).
    #[arg(long, value_name = "VERSION")]
    pub dd_version: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CliEnrichArgs {
    /// Raw report to enrich (`-` for stdin).
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Write output to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CliReferenceArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,
}

// =============================================================================
// TOML Configuration File Structures
// =============================================================================

/// Root TOML configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub reference: ReferenceConfig,
    pub classification: ClassificationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceConfig {
    /// Directory containing `dd-<version>.json` files.
    pub dir: Option<String>,

    /// Version used when the report carries none.
    pub default_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationConfig {
    /// Reference payload marking primary fields.
    pub primary_payload: Option<String>,

    /// Lookup value meaning "no value set".
    pub null_sentinel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub pretty: Option<bool>,
}

impl TomlConfig {
    /// Load configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load configuration from a file path.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Settings from the file alone, defaults filling the gaps.
    pub fn settings(&self) -> EnrichSettings {
        let defaults = EnrichSettings::default();
        EnrichSettings {
            classification: ClassificationSettings {
                primary_payload: self
                    .classification
                    .primary_payload
                    .clone()
                    .unwrap_or(defaults.classification.primary_payload),
                null_sentinel: self
                    .classification
                    .null_sentinel
                    .clone()
                    .unwrap_or(defaults.classification.null_sentinel),
            },
            reference: ReferenceSettings {
                dir: self.reference.dir.clone(),
                default_version: self
                    .reference
                    .default_version
                    .clone()
                    .unwrap_or(defaults.reference.default_version),
            },
            output: OutputSettings {
                format: self.output.format.unwrap_or(defaults.output.format),
                pretty: self.output.pretty.unwrap_or(defaults.output.pretty),
            },
        }
    }
}

// ============================================================
// CLI > config file > default
// ============================================================

/// Apply reference flags over `settings`.
pub fn apply_reference_args(settings: &mut ReferenceSettings, args: &ReferenceArgs) {
    if let Some(dir) = &args.reference_dir {
        settings.dir = Some(dir.display().to_string());
    }
}

/// Settings for `datavail enrich`, flags taking precedence over the file.
pub fn resolve_enrich(args: &CliEnrichArgs, config: &TomlConfig) -> EnrichSettings {
    let mut settings = config.settings();
    apply_reference_args(&mut settings.reference, &args.reference);
    if let Some(format) = args.format {
        settings.output.format = format;
    }
    if args.pretty {
        settings.output.pretty = true;
    }
    settings
}
