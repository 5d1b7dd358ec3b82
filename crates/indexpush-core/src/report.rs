//! Result types returned by the dispatcher.

use crate::qualifier::QualifiedUrl;
use serde::Serialize;
use std::fmt;

/// How a single endpoint call settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The endpoint answered with some status code.
    Fulfilled,
    /// The request never produced a response.
    Rejected,
}

/// Result of submitting one batch to one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    /// Name of the endpoint target.
    pub target: String,
    /// Whether the call returned or failed in transport.
    pub outcome: Outcome,
    /// True only for fulfilled calls with a 2xx status.
    pub succeeded: bool,
    /// Response status for fulfilled calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Transport diagnostic for rejected calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchResult {
    /// A call that returned `status`.
    pub fn fulfilled(target: impl Into<String>, status: u16) -> Self {
        Self {
            target: target.into(),
            outcome: Outcome::Fulfilled,
            succeeded: (200..=299).contains(&status),
            status: Some(status),
            error: None,
        }
    }

    /// A call that failed before any response.
    pub fn rejected(target: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            outcome: Outcome::Rejected,
            succeeded: false,
            status: None,
            error: Some(error.into()),
        }
    }
}

/// Why a notification call stopped before dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The supplied key did not match the configured key.
    Authentication,
    /// No input URL qualified.
    Validation,
    /// An unexpected fault was caught while orchestrating the call.
    Fault,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Authentication => "authentication",
            Self::Validation => "validation",
            Self::Fault => "fault",
        })
    }
}

/// Terminal failure of a notification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Failure category.
    pub kind: FailureKind,
    /// Human-readable diagnostic.
    pub detail: String,
}

/// Outcome of one `notify` call.
///
/// Built fresh for every call. `failure` is set exactly when the call ended
/// before dispatching (or a fault was caught); in that case `succeeded` is
/// false and nothing was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReport {
    /// True if every batch reached at least one endpoint successfully.
    pub succeeded: bool,
    /// Summary such as `notified 1/2 engines`.
    pub message: String,
    /// Qualified URLs that were submitted, in input order.
    pub submitted_urls: Vec<QualifiedUrl>,
    /// One entry per (batch, target), batches in order.
    pub results: Vec<BatchResult>,
    /// Number of batches dispatched.
    pub batches: usize,
    /// Set when the call ended in the failed state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl NotificationReport {
    /// A report for a call that ended in the failed state.
    pub fn failed(kind: FailureKind, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            succeeded: false,
            message: format!("{kind} failed: {detail}"),
            submitted_urls: Vec::new(),
            results: Vec::new(),
            batches: 0,
            failure: Some(Failure { kind, detail }),
        }
    }

    /// Whether the call ended in the failed state.
    pub const fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Failure category, if any.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(|f| f.kind)
    }

    /// Number of successful target results across all batches.
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded).count()
    }
}

/// Read-only diagnostics returned by the administrative probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// Configured key.
    pub key: String,
    /// URL where endpoints verify the key.
    pub key_location: String,
    /// Inbound notification endpoint.
    pub endpoint: String,
    /// Names of the configured targets, in dispatch order.
    pub targets: Vec<String>,
}
