//! # Output Formatting
//!
//! - **Text**: human-readable summary with one line per endpoint result
//! - **JSON**: the report as pretty-printed JSON, for scripts and CI
//!
//! ```bash
//! indexpush document 123 --format json | jq '.results[] | select(.succeeded)'
//! ```

mod text;

use anyhow::Result;
use clap::ValueEnum;
use indexpush_core::{NotificationReport, StatusReport};
use serde::Serialize;

/// Output formats supported by the CLI
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Print a notification report to stdout.
pub fn print_report(report: &NotificationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text::render_report(report)),
        OutputFormat::Json => print_json(report)?,
    }
    Ok(())
}

/// Print the administrative probe to stdout.
pub fn print_status(status: &StatusReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text::render_status(status)),
        OutputFormat::Json => print_json(status)?,
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
