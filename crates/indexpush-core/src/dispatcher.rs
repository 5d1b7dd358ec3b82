//! Notification dispatcher: key check, qualification, batching and fan-out.
//!
//! Every `notify*` call walks the same states:
//!
//! ```text
//! Start -> Authenticating -> Qualifying -> (empty? -> Failed : Batching)
//!       -> Dispatching(batch i of n) -> ... -> Reported
//! ```
//!
//! Both terminal states produce a [`NotificationReport`]; nothing escapes the
//! call as an error or a panic. Within a batch all targets are called
//! concurrently and the batch completes only when every call has settled.
//! Batches run one after another.
//!
//! ```rust,no_run
//! use indexpush_core::{Dispatcher, SiteConfig};
//!
//! # async fn example() -> indexpush_core::Result<()> {
//! let config = SiteConfig::new("https://example.org", "0123456789abcdef");
//! let dispatcher = Dispatcher::new(config)?;
//!
//! let report = dispatcher
//!     .notify(&["https://example.org/mevzuat/123/"], "0123456789abcdef")
//!     .await;
//! println!("{}", report.message);
//! # Ok(())
//! # }
//! ```

use crate::catalog::{Catalog, candidate_urls};
use crate::config::{MAX_BATCH_SIZE, SiteConfig};
use crate::qualifier::{QualifiedUrl, UrlQualifier};
use crate::report::{BatchResult, FailureKind, NotificationReport, StatusReport};
use crate::security::{keys_match, mask_key};
use crate::target::{EndpointTarget, PayloadShape, SubmissionPayload};
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use futures::FutureExt;
use futures::future::join_all;
use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

const INVALID_KEY: &str = "invalid key";
const NO_VALID_URLS: &str = "no valid URLs to submit";

/// Pushes qualified URLs to every configured discovery endpoint.
///
/// Cheap to clone; clones share configuration and transport.
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<SiteConfig>,
    qualifier: UrlQualifier,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.config.base_url())
            .field("key", &mask_key(&self.config.key))
            .field("targets", &self.target_names())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Validate `config` and build a dispatcher over [`HttpTransport`].
    pub fn new(config: SiteConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_timeout(config.request_timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build a dispatcher over any transport.
    ///
    /// The configuration is not validated here; problems such as a base URL
    /// without a host surface as [`FailureKind::Fault`] reports.
    pub fn with_transport(config: SiteConfig, transport: Arc<dyn Transport>) -> Self {
        let qualifier = UrlQualifier::from_config(&config);
        Self {
            config: Arc::new(config),
            qualifier,
            transport,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Notify every target about `raw_urls`.
    ///
    /// Rejects with [`FailureKind::Authentication`] when `key` does not match,
    /// and with [`FailureKind::Validation`] when no URL qualifies. Neither
    /// case touches the network.
    #[instrument(skip_all, fields(urls = raw_urls.len()))]
    pub async fn notify<S>(&self, raw_urls: &[S], key: &str) -> NotificationReport
    where
        S: AsRef<str> + Sync,
    {
        self.run(raw_urls, key, false).await
    }

    /// Notify about a newly published document.
    pub async fn notify_document(&self, slug: &str, key: &str) -> NotificationReport {
        let url = self.config.document_url(slug);
        self.notify(&[url], key).await
    }

    /// Notify about an updated institution page.
    pub async fn notify_institution(&self, id: &str, key: &str) -> NotificationReport {
        let url = self.config.institution_url(id);
        self.notify(&[url], key).await
    }

    /// Notify about an arbitrarily long URL list.
    ///
    /// Duplicates are dropped after qualification, so `/mevzuat/1` and
    /// `/mevzuat/1/` count as one URL. The first occurrence wins.
    #[instrument(skip_all, fields(urls = raw_urls.len()))]
    pub async fn notify_bulk<S>(&self, raw_urls: &[S], key: &str) -> NotificationReport
    where
        S: AsRef<str> + Sync,
    {
        info!("Bulk submission of {} URLs", raw_urls.len());
        self.run(raw_urls, key, true).await
    }

    /// Resubmit every candidate URL the catalog knows about.
    pub async fn notify_catalog(&self, catalog: &dyn Catalog, key: &str) -> NotificationReport {
        if !keys_match(key, &self.config.key) {
            warn!(key = %mask_key(key), "Rejected catalog resubmission with invalid key");
            return NotificationReport::failed(FailureKind::Authentication, INVALID_KEY);
        }
        match candidate_urls(catalog, &self.config).await {
            Ok(urls) => self.notify_bulk(&urls, key).await,
            Err(e) => {
                error!("Catalog query failed: {e}");
                NotificationReport::failed(FailureKind::Fault, e.to_string())
            },
        }
    }

    /// Administrative probe: key, key location, inbound endpoint and targets.
    pub fn status(&self) -> StatusReport {
        StatusReport {
            key: self.config.key.clone(),
            key_location: self.config.key_location(),
            endpoint: self.config.endpoint_url(),
            targets: self.target_names(),
        }
    }

    async fn run<S>(&self, raw_urls: &[S], key: &str, dedupe: bool) -> NotificationReport
    where
        S: AsRef<str> + Sync,
    {
        if !keys_match(key, &self.config.key) {
            warn!(key = %mask_key(key), "Rejected notification with invalid key");
            return NotificationReport::failed(FailureKind::Authentication, INVALID_KEY);
        }

        let mut qualified = self.qualifier.qualify(raw_urls);
        if dedupe {
            qualified = drop_duplicates(qualified);
        }
        if qualified.is_empty() {
            warn!("None of the {} URLs qualified for submission", raw_urls.len());
            return NotificationReport::failed(FailureKind::Validation, NO_VALID_URLS);
        }
        debug!("{} of {} URLs qualified", qualified.len(), raw_urls.len());

        match AssertUnwindSafe(self.dispatch(qualified)).catch_unwind().await {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => {
                error!(category = e.category(), "Notification aborted: {e}");
                NotificationReport::failed(FailureKind::Fault, e.to_string())
            },
            Err(panic) => {
                let detail = panic_message(panic.as_ref());
                error!("Notification aborted by panic: {detail}");
                NotificationReport::failed(FailureKind::Fault, detail)
            },
        }
    }

    fn target_names(&self) -> Vec<String> {
        self.config.targets.iter().map(|t| t.name.clone()).collect()
    }

    async fn dispatch(&self, qualified: Vec<QualifiedUrl>) -> Result<NotificationReport> {
        let host = self.config.host()?;
        let key_location = self.config.key_location();
        let batch_size = self.config.batch_size.clamp(1, MAX_BATCH_SIZE);
        let batch_count = qualified.len().div_ceil(batch_size);
        let target_count = self.config.targets.len();

        let mut results = Vec::with_capacity(batch_count * target_count);
        let mut every_batch_reached = true;
        let mut last_batch_ok = 0;

        for (idx, batch) in qualified.chunks(batch_size).enumerate() {
            debug!(
                "Dispatching batch {}/{} ({} URLs)",
                idx + 1,
                batch_count,
                batch.len()
            );
            let payload = SubmissionPayload {
                host: host.clone(),
                key: self.config.key.clone(),
                key_location: key_location.clone(),
                url_list: batch.iter().map(|u| u.as_str().to_string()).collect(),
            };
            let batch_results = self.dispatch_batch(&payload).await;

            last_batch_ok = batch_results.iter().filter(|r| r.succeeded).count();
            if last_batch_ok == 0 {
                every_batch_reached = false;
                warn!("Batch {}/{} reached no endpoint", idx + 1, batch_count);
            }
            results.extend(batch_results);
        }

        let message = if batch_count == 1 {
            format!("notified {last_batch_ok}/{target_count} engines")
        } else {
            format!("processed {batch_count} batches")
        };
        info!(succeeded = every_batch_reached, "{message}");

        Ok(NotificationReport {
            succeeded: every_batch_reached,
            message,
            submitted_urls: qualified,
            results,
            batches: batch_count,
            failure: None,
        })
    }

    async fn dispatch_batch(&self, payload: &SubmissionPayload) -> Vec<BatchResult> {
        let calls = self
            .config
            .targets
            .iter()
            .map(|target| self.submit(target, payload));
        join_all(calls).await
    }

    async fn submit(&self, target: &EndpointTarget, payload: &SubmissionPayload) -> BatchResult {
        let sent = match target.payload {
            PayloadShape::IndexNow => self.transport.post_json(&target.url, payload).await,
        };
        match sent {
            Ok(status) => {
                let result = BatchResult::fulfilled(&target.name, status);
                if result.succeeded {
                    debug!(endpoint = %target.name, status, "Endpoint accepted submission");
                } else {
                    warn!(endpoint = %target.name, status, "Endpoint returned non-success status");
                }
                result
            },
            Err(e) => {
                warn!(endpoint = %target.name, "Endpoint request failed: {e}");
                BatchResult::rejected(&target.name, e.to_string())
            },
        }
    }
}

fn drop_duplicates(urls: Vec<QualifiedUrl>) -> Vec<QualifiedUrl> {
    let before = urls.len();
    let mut seen = HashSet::with_capacity(before);
    let unique: Vec<QualifiedUrl> = urls
        .into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect();
    if unique.len() < before {
        debug!("Dropped {} duplicate URLs", before - unique.len());
    }
    unique
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "transport panicked".to_string())
}
