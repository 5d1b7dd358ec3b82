//! Error types for indexpush-core operations.
//!
//! Notification calls never return these errors: authentication, validation
//! and per-target transport failures are modelled inside
//! [`NotificationReport`](crate::NotificationReport). This type covers the
//! fallible setup paths instead: loading configuration, building the HTTP
//! transport, reading a catalog and rendering a sitemap.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading config or catalog files, writing key files
//! - **Network Errors**: HTTP client construction and requests
//! - **Configuration Errors**: invalid base URL, key, batch size or targets
//! - **Serialization Errors**: TOML/JSON/XML conversion
//! - **Catalog Errors**: the content catalog could not answer a query
//!
//! ```rust
//! use indexpush_core::Error;
//!
//! let err = Error::Config("batch_size must be between 1 and 10000".into());
//! assert_eq!(err.category(), "config");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

/// The main error type for indexpush-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading configuration and catalog files and writing the
    /// key-verification artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Raised by the HTTP transport. Connection and timeout errors are
    /// considered recoverable.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL is malformed or not usable for this site.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The content catalog could not answer a query.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for timeouts, connection failures and interrupted I/O.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Config(_) => "config",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Serialization(_) => "serialization",
            Self::Catalog(_) => "catalog",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        // Given: Message-carrying variants
        let cases = vec![
            (Error::Config("missing key".to_string()), "Configuration error"),
            (Error::InvalidUrl("not a url".to_string()), "Invalid URL"),
            (Error::Serialization("bad toml".to_string()), "Serialization error"),
            (Error::Catalog("unreadable".to_string()), "Catalog error"),
        ];

        for (error, prefix) in cases {
            // When: Converting to string
            let rendered = error.to_string();

            // Then: Should carry both the prefix and the message
            assert!(rendered.starts_with(prefix), "{rendered}");
        }

        assert_eq!(Error::Other("plain".to_string()).to_string(), "plain");
    }

    #[test]
    fn test_error_categories() {
        let cases = vec![
            (Error::Io(io::Error::other("x")), "io"),
            (Error::Config("x".to_string()), "config"),
            (Error::InvalidUrl("x".to_string()), "invalid_url"),
            (Error::Serialization("x".to_string()), "serialization"),
            (Error::Catalog("x".to_string()), "catalog"),
            (Error::Other("x".to_string()), "other"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.category(), expected);
        }
    }

    #[test]
    fn test_error_recoverability() {
        assert!(Error::Io(io::Error::new(io::ErrorKind::TimedOut, "t")).is_recoverable());
        assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "i")).is_recoverable());
        assert!(!Error::Io(io::Error::new(io::ErrorKind::NotFound, "n")).is_recoverable());
        assert!(!Error::Config("bad".to_string()).is_recoverable());
        assert!(!Error::Catalog("bad".to_string()).is_recoverable());
    }

    #[test]
    fn test_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(Error::from(json_err), Error::Serialization(_)));

        let url_err = url::Url::parse("::nope").unwrap_err();
        assert!(matches!(Error::from(url_err), Error::InvalidUrl(_)));

        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        assert!(matches!(Error::from(toml_err), Error::Serialization(_)));
    }
}
