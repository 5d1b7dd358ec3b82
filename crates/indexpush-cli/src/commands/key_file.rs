//! Key-verification file

use anyhow::{Context, Result};
use colored::Colorize;
use indexpush_core::SiteConfig;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `{key}.txt` containing the key into `dir`, creating it if needed.
pub fn execute(config: &SiteConfig, dir: &Path) -> Result<()> {
    let path = write(config, dir)?;
    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}

fn write(config: &SiteConfig, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(config.key_file_name());
    std::fs::write(&path, &config.key)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Key file served at {}", config.key_location());
    Ok(path)
}
