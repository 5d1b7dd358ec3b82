//! # CLI Structure and Argument Parsing
//!
//! ```bash
//! # Notify about explicit URLs
//! indexpush notify https://example.org/mevzuat/123 https://example.org
//!
//! # Publish hooks
//! indexpush document 123
//! indexpush institution adalet-bakanligi
//!
//! # Bulk resubmission
//! indexpush bulk --file urls.txt
//! indexpush resubmit --catalog catalog.json
//!
//! # Packaging and diagnostics
//! indexpush sitemap --catalog catalog.json -o public/sitemap.xml
//! indexpush key-file public/
//! indexpush status --format json
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::cli_args::FormatArg;

/// Main CLI structure for the `indexpush` command
#[derive(Parser, Clone, Debug)]
#[command(name = "indexpush")]
#[command(version)]
#[command(about = "indexpush - notify search engines about published pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to the site configuration file. Also via `INDEXPUSH_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "INDEXPUSH_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Key supplied with a notification. Defaults to the configured key.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyArg {
    /// Notification key to authenticate with
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Notify engines about one or more URLs
    Notify {
        /// URLs to submit; only this site's document and institution pages qualify
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
        #[command(flatten)]
        key: KeyArg,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Notify engines about a newly published document
    Document {
        /// Document slug
        slug: String,
        #[command(flatten)]
        key: KeyArg,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Notify engines about an updated institution page
    Institution {
        /// Institution identifier
        id: String,
        #[command(flatten)]
        key: KeyArg,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Submit a URL list of any length, one URL per line
    Bulk {
        /// File to read URLs from (stdin when omitted)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        #[command(flatten)]
        key: KeyArg,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Resubmit every page listed in a catalog export
    Resubmit {
        /// Catalog export (JSON)
        #[arg(long, value_name = "PATH")]
        catalog: PathBuf,
        #[command(flatten)]
        key: KeyArg,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Show key, key location, inbound endpoint and targets
    Status {
        #[command(flatten)]
        format: FormatArg,
    },

    /// Render sitemap.xml from a catalog export
    Sitemap {
        /// Catalog export (JSON)
        #[arg(long, value_name = "PATH")]
        catalog: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write the key-verification file into a directory
    KeyFile {
        /// Directory served at the site root
        dir: PathBuf,
    },
}

impl Commands {
    /// Output format flag of the command, if it has one.
    pub const fn format(&self) -> Option<&FormatArg> {
        match self {
            Self::Notify { format, .. }
            | Self::Document { format, .. }
            | Self::Institution { format, .. }
            | Self::Bulk { format, .. }
            | Self::Resubmit { format, .. }
            | Self::Status { format } => Some(format),
            Self::Sitemap { .. } | Self::KeyFile { .. } => None,
        }
    }
}
