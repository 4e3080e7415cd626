use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use datavail_config::{CONFIG_FILE_NAME, TomlConfig};

/// Load `explicit`, else `./datavail.toml` when present, else defaults.
///
/// An explicit path that does not exist is an error; a missing default file is not.
pub(crate) fn load(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let default = Path::new(CONFIG_FILE_NAME);
            if !default.is_file() {
                return Ok(TomlConfig::default());
            }
            default
        }
    };
    debug!(path = %path.display(), "loading configuration");
    TomlConfig::from_file(path)
        .with_context(|| format!("Failed to load config file {}", path.display()))
}
