//! URL qualification against the site's allowed-path policy.
//!
//! A raw URL qualifies when it starts with the configured base URL and either
//! contains the document marker, contains the institution marker, or is the
//! bare base URL itself. Qualified URLs lose exactly one trailing slash.
//!
//! ```rust
//! use indexpush_core::qualifier::qualify;
//!
//! let raw = [
//!     "https://example.org/mevzuat/123/",
//!     "https://evil.com/x",
//!     "https://example.org",
//! ];
//! let qualified: Vec<String> = qualify(&raw, "https://example.org")
//!     .into_iter()
//!     .map(String::from)
//!     .collect();
//!
//! assert_eq!(qualified, ["https://example.org/mevzuat/123", "https://example.org"]);
//! ```

use crate::config::{PathsConfig, SiteConfig};
use serde::Serialize;
use std::fmt;

/// A URL that passed qualification.
///
/// Only [`UrlQualifier`] constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QualifiedUrl(String);

impl QualifiedUrl {
    /// Borrow the URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifiedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QualifiedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<QualifiedUrl> for String {
    fn from(url: QualifiedUrl) -> Self {
        url.0
    }
}

/// Filters and normalizes URLs for one site.
#[derive(Debug, Clone)]
pub struct UrlQualifier {
    base_url: String,
    configured_base: String,
    document_marker: String,
    institution_marker: String,
}

impl UrlQualifier {
    /// Qualifier for `base_url` with the given path markers.
    pub fn new(base_url: &str, paths: &PathsConfig) -> Self {
        Self {
            base_url: base_url.strip_suffix('/').unwrap_or(base_url).to_string(),
            configured_base: base_url.to_string(),
            document_marker: paths.document.clone(),
            institution_marker: paths.institution.clone(),
        }
    }

    /// Qualifier matching a site configuration.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.base_url, &config.paths)
    }

    /// Whether a single raw URL satisfies the policy.
    pub fn accepts(&self, raw: &str) -> bool {
        if raw == self.configured_base {
            return true;
        }
        let Some(rest) = raw.strip_prefix(&self.base_url) else {
            return false;
        };
        // The prefix must end at a host/path boundary, so
        // `https://example.org.evil.com` is not under `https://example.org`.
        if !(rest.is_empty() || rest.starts_with(['/', '?', '#'])) {
            return false;
        }
        rest.is_empty()
            || rest.contains(&self.document_marker)
            || rest.contains(&self.institution_marker)
    }

    /// Qualify a single URL.
    pub fn qualify_one(&self, raw: &str) -> Option<QualifiedUrl> {
        if !self.accepts(raw) {
            return None;
        }
        let normalized = raw.strip_suffix('/').unwrap_or(raw);
        Some(QualifiedUrl(normalized.to_string()))
    }

    /// Qualify a sequence of raw URLs, preserving order and duplicates.
    pub fn qualify<S: AsRef<str>>(&self, raw_urls: &[S]) -> Vec<QualifiedUrl> {
        raw_urls
            .iter()
            .filter_map(|raw| self.qualify_one(raw.as_ref()))
            .collect()
    }
}

/// Qualify `raw_urls` against `base_url` using the default path markers.
pub fn qualify<S: AsRef<str>>(raw_urls: &[S], base_url: &str) -> Vec<QualifiedUrl> {
    UrlQualifier::new(base_url, &PathsConfig::default()).qualify(raw_urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: &str = "https://example.org";

    fn strings(urls: Vec<QualifiedUrl>) -> Vec<String> {
        urls.into_iter().map(String::from).collect()
    }

    #[test]
    fn test_end_to_end_example() {
        let raw = [
            "https://example.org/mevzuat/123/",
            "https://evil.com/x",
            "https://example.org",
        ];

        assert_eq!(
            strings(qualify(&raw, BASE)),
            vec!["https://example.org/mevzuat/123", "https://example.org"]
        );
    }

    #[test]
    fn test_institution_paths_qualify() {
        let raw = ["https://example.org/kurum/adalet-bakanligi"];
        assert_eq!(strings(qualify(&raw, BASE)), raw.to_vec());
    }

    #[test]
    fn test_rejects_unlisted_paths_and_foreign_hosts() {
        let raw = [
            "https://example.org/hakkimizda",
            "https://example.org/",
            "http://example.org/mevzuat/1",
            "https://evil.com/mevzuat/1",
            "mevzuat",
            "",
        ];
        // "https://example.org/" is the bare base URL plus a slash, which is not
        // an exact match and carries no marker.
        assert!(qualify(&raw, BASE).is_empty());
    }

    #[test]
    fn test_rejects_lookalike_hosts() {
        let raw = [
            "https://example.org.evil.com/mevzuat/1",
            "https://example.organic/kurum/2",
        ];
        assert!(qualify(&raw, BASE).is_empty());
    }

    #[test]
    fn test_strips_exactly_one_trailing_slash() {
        let raw = ["https://example.org/mevzuat/5//"];
        assert_eq!(
            strings(qualify(&raw, BASE)),
            vec!["https://example.org/mevzuat/5/"]
        );
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        let raw = [
            "https://example.org/mevzuat/2",
            "https://example.org/mevzuat/1",
            "https://example.org/mevzuat/2/",
        ];
        assert_eq!(
            strings(qualify(&raw, BASE)),
            vec![
                "https://example.org/mevzuat/2",
                "https://example.org/mevzuat/1",
                "https://example.org/mevzuat/2",
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let raw: [&str; 0] = [];
        assert!(qualify(&raw, BASE).is_empty());
    }

    #[test]
    fn test_custom_markers() {
        let paths = PathsConfig {
            document: "/laws/".to_string(),
            institution: "/agencies/".to_string(),
        };
        let qualifier = UrlQualifier::new("https://example.org/", &paths);

        assert!(qualifier.accepts("https://example.org/laws/1"));
        assert!(qualifier.accepts("https://example.org/agencies/x"));
        assert!(qualifier.accepts("https://example.org"));
        assert!(!qualifier.accepts("https://example.org/mevzuat/1"));
    }

    #[test]
    fn test_base_configured_with_trailing_slash() {
        let qualifier = UrlQualifier::new("https://example.org/", &PathsConfig::default());

        assert_eq!(
            strings(qualifier.qualify(&["https://example.org/", "https://example.org"])),
            vec!["https://example.org", "https://example.org"]
        );
        assert!(!qualifier.accepts("https://example.org/hakkimizda"));
    }

    proptest! {
        #[test]
        fn prop_foreign_hosts_never_qualify(host in "[a-z]{3,12}\\.com", path in "[a-z/]{0,20}") {
            let url = format!("https://{host}/mevzuat/{path}");
            prop_assert!(qualify(&[url], BASE).is_empty());
        }

        #[test]
        fn prop_document_urls_lose_one_trailing_slash(slug in "[a-z0-9-]{1,24}") {
            let with_slash = format!("{BASE}/mevzuat/{slug}/");
            let qualified = strings(qualify(&[with_slash], BASE));
            prop_assert_eq!(qualified, vec![format!("{BASE}/mevzuat/{slug}")]);
        }

        #[test]
        fn prop_output_is_ordered_subset(slugs in prop::collection::vec("[a-z0-9]{1,8}", 0..20)) {
            let raw: Vec<String> = slugs
                .iter()
                .enumerate()
                .map(|(i, s)| if i % 2 == 0 {
                    format!("{BASE}/mevzuat/{s}")
                } else {
                    format!("https://other.net/{s}")
                })
                .collect();
            let qualified = strings(qualify(&raw, BASE));
            let expected: Vec<String> = raw.iter().step_by(2).cloned().collect();
            prop_assert_eq!(qualified, expected);
        }
    }
}
