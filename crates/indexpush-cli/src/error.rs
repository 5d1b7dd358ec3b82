//! CLI error handling with semantic exit codes.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Notification reported success |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments or configuration |
//! | 3 | `Auth` | Key did not match the configured key |
//! | 4 | `Validation` | No URL qualified for submission |
//! | 5 | `Network` | No endpoint accepted a batch |
//!
//! ```bash
//! indexpush notify https://example.org/mevzuat/1
//! case $? in
//!     0) echo "indexed" ;;
//!     5) echo "engines unreachable, retry later" ;;
//! esac
//! ```

use indexpush_core::{FailureKind, NotificationReport};
use std::fmt;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,
    /// Invalid arguments or configuration (exit code 2).
    Usage = 2,
    /// Key mismatch (exit code 3).
    Auth = 3,
    /// Nothing qualified (exit code 4).
    Validation = 4,
    /// Endpoints unreachable or refusing (exit code 5).
    Network = 5,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::Auth => "authentication error",
            Self::Validation => "validation error",
            Self::Network => "network error",
        }
    }

    /// Category for a notification report, or `None` when it succeeded.
    #[must_use]
    pub const fn from_report(report: &NotificationReport) -> Option<Self> {
        match &report.failure {
            Some(failure) => Some(match failure.kind {
                FailureKind::Authentication => Self::Auth,
                FailureKind::Validation => Self::Validation,
                FailureKind::Fault => Self::Internal,
            }),
            None if report.succeeded => None,
            None => Some(Self::Network),
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// Errors that are not a [`CliError`] map to `Internal`.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>()
        .map_or(ErrorCategory::Internal.exit_code(), CliError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_exit_codes_are_stable() {
        assert_eq!(ErrorCategory::Internal.exit_code(), 1);
        assert_eq!(ErrorCategory::Usage.exit_code(), 2);
        assert_eq!(ErrorCategory::Auth.exit_code(), 3);
        assert_eq!(ErrorCategory::Validation.exit_code(), 4);
        assert_eq!(ErrorCategory::Network.exit_code(), 5);
    }

    #[test]
    fn test_category_from_report() {
        let auth = NotificationReport::failed(FailureKind::Authentication, "invalid key");
        let empty = NotificationReport::failed(FailureKind::Validation, "none");
        let fault = NotificationReport::failed(FailureKind::Fault, "boom");

        assert_eq!(ErrorCategory::from_report(&auth), Some(ErrorCategory::Auth));
        assert_eq!(ErrorCategory::from_report(&empty), Some(ErrorCategory::Validation));
        assert_eq!(ErrorCategory::from_report(&fault), Some(ErrorCategory::Internal));

        let mut reported = NotificationReport::failed(FailureKind::Fault, "x");
        reported.failure = None;
        assert_eq!(ErrorCategory::from_report(&reported), Some(ErrorCategory::Network));
        reported.succeeded = true;
        assert_eq!(ErrorCategory::from_report(&reported), None);
    }

    #[test]
    fn test_exit_code_from_error() {
        let usage: anyhow::Error = CliError::usage(anyhow!("bad flag")).into();
        assert_eq!(exit_code_from_error(&usage), 2);
        assert_eq!(exit_code_from_error(&anyhow!("other")), 1);
    }
}
