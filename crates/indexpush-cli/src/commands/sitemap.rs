//! Sitemap generation from a catalog export

use anyhow::{Context, Result};
use indexpush_core::sitemap::{catalog_entries, render_sitemap};
use indexpush_core::{JsonCatalog, SiteConfig};
use std::path::Path;
use tracing::info;

use crate::error::CliError;

/// Render `sitemap.xml` for every catalog page to `output` or stdout.
pub async fn execute(config: &SiteConfig, catalog: &Path, output: Option<&Path>) -> Result<()> {
    let catalog = JsonCatalog::load(catalog).map_err(CliError::usage)?;
    let entries = catalog_entries(&catalog, config).await?;
    let xml = render_sitemap(&entries)?;

    match output {
        Some(path) => {
            std::fs::write(path, &xml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} entries to {}", entries.len(), path.display());
        },
        None => print!("{xml}"),
    }
    Ok(())
}
