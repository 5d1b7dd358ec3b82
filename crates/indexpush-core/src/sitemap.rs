//! Sitemap XML generation from catalog records.
//!
//! ```rust
//! use indexpush_core::sitemap::{SitemapEntry, render_sitemap};
//!
//! let xml = render_sitemap(&[SitemapEntry::new("https://example.org/mevzuat/1")])?;
//! assert!(xml.contains("<loc>https://example.org/mevzuat/1</loc>"));
//! # Ok::<(), indexpush_core::Error>(())
//! ```

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Serialize;
use std::io::Cursor;
use tracing::instrument;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    /// Page URL.
    pub loc: String,
    /// Last modification time, if known.
    pub lastmod: Option<DateTime<Utc>>,
}

impl SitemapEntry {
    /// An entry without a modification time.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
        }
    }
}

/// Build entries for every catalog page: base URL, documents, institutions.
pub async fn catalog_entries(
    catalog: &dyn Catalog,
    config: &SiteConfig,
) -> Result<Vec<SitemapEntry>> {
    let documents = catalog.documents().await?;
    let institutions = catalog.institutions().await?;

    let mut entries = Vec::with_capacity(1 + documents.len() + institutions.len());
    entries.push(SitemapEntry::new(config.base_url()));
    entries.extend(documents.into_iter().map(|doc| SitemapEntry {
        loc: config.document_url(&doc.slug),
        lastmod: doc.last_modified,
    }));
    entries.extend(
        institutions
            .iter()
            .map(|id| SitemapEntry::new(config.institution_url(id))),
    );
    Ok(entries)
}

/// Render a sitemaps.org `<urlset>` document.
#[instrument(skip(entries), fields(entries = entries.len()))]
pub fn render_sitemap(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    write(&mut writer, Event::Start(urlset))?;

    for entry in entries {
        write(&mut writer, Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.loc)?;
        if let Some(lastmod) = entry.lastmod {
            let stamp = lastmod.to_rfc3339_opts(SecondsFormat::Secs, true);
            write_text_element(&mut writer, "lastmod", &stamp)?;
        }
        write(&mut writer, Event::End(BytesEnd::new("url")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("urlset")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| Error::Serialization(e.to_string()))
}

fn write_text_element(writer: &mut Writer<Cursor<Vec<u8>>>, name: &str, text: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Serialization(format!("Failed to write sitemap: {e}")))
}
