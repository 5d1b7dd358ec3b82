//! Site configuration for the notification dispatcher.
//!
//! Configuration is an explicit value handed to the
//! [`Dispatcher`](crate::Dispatcher) at construction time. It is stored as
//! TOML and may be overridden from the environment once, at startup, through
//! [`SiteConfig::apply_env`].
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://example.org"
//! key = "0123456789abcdef"
//! batch_size = 10000
//!
//! [paths]
//! document = "/mevzuat/"
//! institution = "/kurum/"
//!
//! [[targets]]
//! name = "indexnow"
//! url = "https://api.indexnow.org/indexnow"
//! ```
//!
//! ## Environment Overrides
//!
//! - `INDEXPUSH_BASE_URL` replaces `base_url`
//! - `INDEXPUSH_KEY` replaces `key`
//!
//! ```rust
//! use indexpush_core::SiteConfig;
//!
//! let config = SiteConfig::from_toml(
//!     "base_url = \"https://example.org\"\nkey = \"0123456789abcdef\"",
//! )?;
//! assert_eq!(config.key_location(), "https://example.org/0123456789abcdef.txt");
//! assert_eq!(config.targets.len(), 2);
//! # Ok::<(), indexpush_core::Error>(())
//! ```

use crate::target::{EndpointTarget, default_targets};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Maximum number of URLs an IndexNow endpoint accepts in one submission.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Environment variable overriding [`SiteConfig::base_url`].
pub const ENV_BASE_URL: &str = "INDEXPUSH_BASE_URL";

/// Environment variable overriding [`SiteConfig::key`].
pub const ENV_KEY: &str = "INDEXPUSH_KEY";

const DEFAULT_INBOUND_PATH: &str = "/api/indexnow";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const KEY_MIN_LEN: usize = 8;
const KEY_MAX_LEN: usize = 128;

/// Configuration for one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Canonical base URL of the site (e.g. `https://example.org`).
    pub base_url: String,

    /// Secret key shared with discovery endpoints.
    ///
    /// Must also be served verbatim at [`key_location`](Self::key_location).
    pub key: String,

    /// Explicit key-verification URL.
    ///
    /// When unset, `{base_url}/{key}.txt` is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_location: Option<String>,

    /// Path of the inbound notification endpoint, reported by the status probe.
    #[serde(default = "default_inbound_path")]
    pub inbound_path: String,

    /// Maximum URLs per submission.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Per-request timeout applied by the HTTP transport.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Allowed path markers.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Discovery endpoints notified for every batch.
    #[serde(default = "default_targets")]
    pub targets: Vec<EndpointTarget>,
}

/// Path markers that make a URL eligible for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Segment identifying document pages.
    pub document: String,
    /// Segment identifying institution pages.
    pub institution: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            document: "/mevzuat/".to_string(),
            institution: "/kurum/".to_string(),
        }
    }
}

fn default_inbound_path() -> String {
    DEFAULT_INBOUND_PATH.to_string()
}

const fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl SiteConfig {
    /// Create a configuration with defaults for everything but the base URL and key.
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            key: key.into(),
            key_location: None,
            inbound_path: default_inbound_path(),
            batch_size: MAX_BATCH_SIZE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            paths: PathsConfig::default(),
            targets: default_targets(),
        }
    }

    /// Parse a TOML document and validate it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    ///
    /// Environment overrides are not applied here; call
    /// [`apply_env`](Self::apply_env) explicitly.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Save the configuration as pretty TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }

    /// Platform config location.
    ///
    /// - Linux: `~/.config/indexpush/config.toml`
    /// - macOS: `~/Library/Application Support/dev.indexpush.indexpush/config.toml`
    /// - Windows: `%APPDATA%\indexpush\indexpush\config\config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("dev", "indexpush", "indexpush")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply `INDEXPUSH_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides using an arbitrary lookup; empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = base.trim().to_string();
        }
        if let Some(key) = lookup(ENV_KEY).filter(|v| !v.trim().is_empty()) {
            self.key = key.trim().to_string();
        }
    }

    /// Check every field the dispatcher relies on.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(self.base_url())
            .map_err(|e| Error::Config(format!("base_url '{}' is invalid: {e}", self.base_url)))?;
        if !matches!(base.scheme(), "http" | "https") || base.host_str().is_none() {
            return Err(Error::Config(format!(
                "base_url '{}' must be an http(s) URL with a host",
                self.base_url
            )));
        }

        validate_key(&self.key)?;

        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(Error::Config(format!(
                "batch_size must be between 1 and {MAX_BATCH_SIZE}, got {}",
                self.batch_size
            )));
        }

        if self.paths.document.is_empty() || self.paths.institution.is_empty() {
            return Err(Error::Config("path markers must not be empty".into()));
        }

        if self.targets.is_empty() {
            return Err(Error::Config("at least one target is required".into()));
        }
        for (idx, target) in self.targets.iter().enumerate() {
            if self.targets[..idx].iter().any(|t| t.name == target.name) {
                return Err(Error::Config(format!(
                    "duplicate target name '{}'",
                    target.name
                )));
            }
            Url::parse(&target.url).map_err(|e| {
                Error::Config(format!("target '{}' has invalid url: {e}", target.name))
            })?;
        }

        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.strip_suffix('/').unwrap_or(&self.base_url)
    }

    /// Host name submitted in every payload.
    pub fn host(&self) -> Result<String> {
        let parsed = Url::parse(self.base_url())?;
        parsed
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidUrl(format!("base_url '{}' has no host", self.base_url)))
    }

    /// Absolute URL of the key-verification file.
    pub fn key_location(&self) -> String {
        self.key_location
            .clone()
            .unwrap_or_else(|| format!("{}/{}.txt", self.base_url(), self.key))
    }

    /// File name of the key-verification artifact.
    pub fn key_file_name(&self) -> String {
        format!("{}.txt", self.key)
    }

    /// Absolute URL of the inbound notification endpoint.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url(), self.inbound_path)
    }

    /// Canonical URL of a document page.
    pub fn document_url(&self, slug: &str) -> String {
        join_marker(self.base_url(), &self.paths.document, slug)
    }

    /// Canonical URL of an institution page.
    pub fn institution_url(&self, id: &str) -> String {
        join_marker(self.base_url(), &self.paths.institution, id)
    }

    /// Request timeout for the HTTP transport.
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn join_marker(base: &str, marker: &str, tail: &str) -> String {
    let marker = marker.trim_end_matches('/');
    let tail = tail.trim_matches('/');
    format!("{base}{marker}/{tail}")
}

fn validate_key(key: &str) -> Result<()> {
    let len = key.len();
    if !(KEY_MIN_LEN..=KEY_MAX_LEN).contains(&len) {
        return Err(Error::Config(format!(
            "key must be {KEY_MIN_LEN}-{KEY_MAX_LEN} characters, got {len}"
        )));
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(Error::Config(
            "key may only contain ASCII letters, digits and '-'".into(),
        ));
    }
    Ok(())
}
