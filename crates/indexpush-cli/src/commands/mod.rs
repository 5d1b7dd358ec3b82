//! Command implementations for the indexpush CLI

mod key_file;
mod notify;
mod sitemap;
mod status;

use anyhow::Result;
use indexpush_core::{Dispatcher, SiteConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::utils::config::load_site_config;

pub use key_file::execute as write_key_file;
pub use notify::{
    NotifyRequest, execute as notify, execute_bulk as notify_bulk,
    execute_catalog as resubmit_catalog,
};
pub use sitemap::execute as write_sitemap;
pub use status::execute as show_status;

/// Run the parsed command.
pub async fn execute(cli: Cli) -> Result<()> {
    let config = load_site_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Notify { urls, key, format } => {
            let dispatcher = build_dispatcher(config)?;
            let key = key.key.unwrap_or_else(|| dispatcher.config().key.clone());
            notify(&dispatcher, NotifyRequest::Urls(urls), &key, format.resolve()).await
        },
        Commands::Document { slug, key, format } => {
            let dispatcher = build_dispatcher(config)?;
            let key = key.key.unwrap_or_else(|| dispatcher.config().key.clone());
            notify(&dispatcher, NotifyRequest::Document(slug), &key, format.resolve()).await
        },
        Commands::Institution { id, key, format } => {
            let dispatcher = build_dispatcher(config)?;
            let key = key.key.unwrap_or_else(|| dispatcher.config().key.clone());
            notify(&dispatcher, NotifyRequest::Institution(id), &key, format.resolve()).await
        },
        Commands::Bulk { file, key, format } => {
            let dispatcher = build_dispatcher(config)?;
            let key = key.key.unwrap_or_else(|| dispatcher.config().key.clone());
            notify_bulk(&dispatcher, file.as_deref(), &key, format.resolve()).await
        },
        Commands::Resubmit {
            catalog,
            key,
            format,
        } => {
            let dispatcher = build_dispatcher(config)?;
            let key = key.key.unwrap_or_else(|| dispatcher.config().key.clone());
            resubmit_catalog(&dispatcher, &catalog, &key, format.resolve()).await
        },
        Commands::Status { format } => {
            let dispatcher = build_dispatcher(config)?;
            show_status(&dispatcher, format.resolve())
        },
        Commands::Sitemap { catalog, output } => {
            write_sitemap(&config, &catalog, output.as_deref()).await
        },
        Commands::KeyFile { dir } => write_key_file(&config, &dir),
    }
}

fn build_dispatcher(config: SiteConfig) -> Result<Dispatcher> {
    Dispatcher::new(config).map_err(|e| CliError::usage(e).into())
}
