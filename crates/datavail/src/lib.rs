//! # datavail
//!
//! **CLI Binary**
//!
//! This is the entry point for the `datavail` command-line application.
//! It orchestrates the other crates to perform the requested actions.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Initialize logging
//! * Load configuration
//! * Dispatch commands to appropriate handlers
//! * Handle errors and exit codes
//!
//! This crate should contain minimal business logic.

mod commands;
mod config;
mod error_hints;
mod logging;

use anyhow::Result;
use clap::Parser;

use datavail_config::Cli;

/// Entry point used by the `datavail` binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.global)?;
    let config = config::load(cli.global.config.as_deref())?;
    commands::dispatch(cli, &config)
}

/// Render an error with its cause chain and troubleshooting hints.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}
