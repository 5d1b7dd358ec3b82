//! HTTP channel to discovery endpoints.
//!
//! The dispatcher only needs "POST this JSON, tell me the status code". The
//! [`Transport`] trait captures that so tests can swap in fakes; [`HttpTransport`]
//! is the reqwest-backed implementation used in production.

use crate::target::SubmissionPayload;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// A request/response channel to discovery endpoints.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `payload` as JSON to `url` and return the response status code.
    ///
    /// Any status is a completed exchange and returns `Ok`; `Err` is reserved
    /// for requests that never produced a response (DNS, connect, timeout).
    async fn post_json(&self, url: &str, payload: &SubmissionPayload) -> Result<u16>;
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the default 30 second request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Creates a transport with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("indexpush/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, payload: &SubmissionPayload) -> Result<u16> {
        let body = serde_json::to_vec(payload)?;
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .header(ACCEPT, "*/*")
            .body(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        debug!("POST {} -> {}", url, status);
        Ok(status)
    }
}
