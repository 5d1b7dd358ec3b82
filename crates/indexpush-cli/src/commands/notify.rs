//! Notification commands: explicit URLs, publish hooks, bulk lists and
//! catalog resubmission

use anyhow::{Context, Result, anyhow};
use indexpush_core::{Dispatcher, JsonCatalog, NotificationReport};
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::error::{CliError, ErrorCategory};
use crate::output::{OutputFormat, print_report};

/// What a single notification call is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyRequest {
    /// Raw URLs as given on the command line
    Urls(Vec<String>),
    /// A newly published document
    Document(String),
    /// An updated institution page
    Institution(String),
}

/// Submit one notification and print its report.
pub async fn execute(
    dispatcher: &Dispatcher,
    request: NotifyRequest,
    key: &str,
    format: OutputFormat,
) -> Result<()> {
    let report = match request {
        NotifyRequest::Urls(urls) => dispatcher.notify(&urls, key).await,
        NotifyRequest::Document(slug) => dispatcher.notify_document(&slug, key).await,
        NotifyRequest::Institution(id) => dispatcher.notify_institution(&id, key).await,
    };
    finish(&report, format)
}

/// Submit a URL list read from `file`, or stdin when no file is given.
pub async fn execute_bulk(
    dispatcher: &Dispatcher,
    file: Option<&Path>,
    key: &str,
    format: OutputFormat,
) -> Result<()> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
            .map_err(CliError::usage)?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read URLs from stdin")?;
            buf
        },
    };

    let urls = read_url_list(&content);
    info!("Read {} URLs", urls.len());
    let report = dispatcher.notify_bulk(&urls, key).await;
    finish(&report, format)
}

/// Resubmit every page listed in a catalog export.
pub async fn execute_catalog(
    dispatcher: &Dispatcher,
    catalog: &Path,
    key: &str,
    format: OutputFormat,
) -> Result<()> {
    let catalog = JsonCatalog::load(catalog).map_err(CliError::usage)?;
    let report = dispatcher.notify_catalog(&catalog, key).await;
    finish(&report, format)
}

/// Parse a newline-separated URL list. Blank lines and `#` comments are skipped.
pub fn read_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

fn finish(report: &NotificationReport, format: OutputFormat) -> Result<()> {
    print_report(report, format)?;
    match ErrorCategory::from_report(report) {
        Some(category) => Err(CliError::new(category, anyhow!(report.message.clone())).into()),
        None => Ok(()),
    }
}
