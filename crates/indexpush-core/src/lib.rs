//! # indexpush-core
//!
//! Push-on-publish indexing for a public document site: qualify canonical
//! URLs, batch them, and notify IndexNow-style discovery endpoints, folding
//! every endpoint's answer into one [`NotificationReport`].
//!
//! ## Architecture
//!
//! - **Qualifier**: filters raw URLs to the site's document and institution
//!   pages and normalizes trailing slashes
//! - **Dispatcher**: checks the caller's key, batches qualified URLs and fans
//!   each batch out to every configured target concurrently
//! - **Transport**: the HTTP channel, swappable for tests
//! - **Catalog / Sitemap**: candidate URLs and sitemap XML from the content catalog
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use indexpush_core::{Dispatcher, SiteConfig};
//!
//! # async fn example() -> indexpush_core::Result<()> {
//! let config = SiteConfig::new("https://example.org", "0123456789abcdef");
//! let dispatcher = Dispatcher::new(config)?;
//!
//! let report = dispatcher.notify_document("123", "0123456789abcdef").await;
//! if report.succeeded {
//!     println!("{}", report.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! `notify*` calls always return a report. Authentication and validation
//! failures, endpoint errors and caught faults are all described inside it.
//! [`Error`] is only returned by setup operations such as loading
//! configuration or building the HTTP client.

/// Content catalog queries and candidate URLs
pub mod catalog;
/// Site configuration
pub mod config;
/// Notification dispatcher
pub mod dispatcher;
/// Error types and result aliases
pub mod error;
/// URL qualification
pub mod qualifier;
/// Report types returned to callers
pub mod report;
/// Key comparison and redaction
pub mod security;
/// Sitemap XML generation
pub mod sitemap;
/// Discovery endpoint descriptors and wire payload
pub mod target;
/// HTTP transport to discovery endpoints
pub mod transport;

pub use catalog::{Catalog, DocumentRecord, JsonCatalog, MemoryCatalog, candidate_urls};
pub use config::{MAX_BATCH_SIZE, PathsConfig, SiteConfig};
pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
pub use qualifier::{QualifiedUrl, UrlQualifier, qualify};
pub use report::{
    BatchResult, Failure, FailureKind, NotificationReport, Outcome, StatusReport,
};
pub use target::{EndpointTarget, PayloadShape, SubmissionPayload, default_targets};
pub use transport::{HttpTransport, Transport};
