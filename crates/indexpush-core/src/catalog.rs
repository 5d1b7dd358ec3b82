//! Content catalog access.
//!
//! The catalog is an external data source answering two queries: published
//! documents with their last-modified timestamps, and institution
//! identifiers. [`candidate_urls`] turns those answers into the URL list used
//! for bulk resubmission; the [`sitemap`](crate::sitemap) module renders the
//! same records as XML.

use crate::config::SiteConfig;
use crate::sitemap::catalog_entries;
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A published document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Path segment identifying the document.
    pub slug: String,
    /// When the document last changed.
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl DocumentRecord {
    /// A record without a modification timestamp.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            last_modified: None,
        }
    }
}

/// Read-only queries against the content catalog. Records come back in catalog order.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All published documents.
    async fn documents(&self) -> Result<Vec<DocumentRecord>>;

    /// All institution identifiers.
    async fn institutions(&self) -> Result<Vec<String>>;
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCatalog {
    /// Published documents.
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
    /// Institution identifiers.
    #[serde(default)]
    pub institutions: Vec<String>,
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn documents(&self) -> Result<Vec<DocumentRecord>> {
        Ok(self.documents.clone())
    }

    async fn institutions(&self) -> Result<Vec<String>> {
        Ok(self.institutions.clone())
    }
}

/// Catalog exported as a JSON file.
///
/// ```json
/// {
///   "documents": [{ "slug": "123", "lastModified": "2024-05-01T00:00:00Z" }],
///   "institutions": ["adalet-bakanligi"]
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    inner: MemoryCatalog,
}

impl JsonCatalog {
    /// Read and parse a catalog export.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Catalog(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Parse a catalog export from a string.
    pub fn from_json(content: &str) -> Result<Self> {
        let inner: MemoryCatalog = serde_json::from_str(content)
            .map_err(|e| Error::Catalog(format!("Failed to parse catalog: {e}")))?;
        debug!(
            "Loaded catalog with {} documents and {} institutions",
            inner.documents.len(),
            inner.institutions.len()
        );
        Ok(Self { inner })
    }
}

#[async_trait]
impl Catalog for JsonCatalog {
    async fn documents(&self) -> Result<Vec<DocumentRecord>> {
        self.inner.documents().await
    }

    async fn institutions(&self) -> Result<Vec<String>> {
        self.inner.institutions().await
    }
}

/// Every URL worth submitting: the base URL, then documents, then institutions.
///
/// Same pages, same order as the sitemap.
pub async fn candidate_urls(catalog: &dyn Catalog, config: &SiteConfig) -> Result<Vec<String>> {
    let entries = catalog_entries(catalog, config).await?;
    Ok(entries.into_iter().map(|entry| entry.loc).collect())
}
