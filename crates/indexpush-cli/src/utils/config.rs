//! Site configuration resolution for CLI commands.

use anyhow::{Result, anyhow};
use indexpush_core::SiteConfig;
use std::path::Path;
use tracing::debug;

use crate::error::CliError;

/// Load the site configuration.
///
/// Reads `--config`/`INDEXPUSH_CONFIG`, or the platform default path. When no
/// file exists the configuration must come entirely from `INDEXPUSH_BASE_URL`
/// and `INDEXPUSH_KEY`. Environment overrides are applied last.
pub fn load_site_config(explicit: Option<&Path>) -> Result<SiteConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => SiteConfig::default_path().ok().filter(|p| p.exists()),
    };

    let mut config = match &path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path).map_err(|e| {
                CliError::usage(anyhow!("Failed to read config {}: {e}", path.display()))
            })?;
            toml::from_str::<SiteConfig>(&content)
                .map_err(|e| CliError::usage(anyhow!("Failed to parse config: {e}")))?
        },
        None => {
            debug!("No config file found, using environment only");
            SiteConfig::new("", "")
        },
    };

    config.apply_env();
    config.validate().map_err(CliError::usage)?;
    Ok(config)
}
