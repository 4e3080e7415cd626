pub(crate) mod enrich;
pub(crate) mod reference;

use anyhow::Result;
use datavail_config::{Cli, Commands, TomlConfig};

pub(crate) fn dispatch(cli: Cli, config: &TomlConfig) -> Result<()> {
    match cli.command {
        Commands::Enrich(args) => enrich::handle(args, config),
        Commands::Reference(args) => reference::handle(args, config),
    }
}
