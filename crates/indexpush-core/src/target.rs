//! Discovery endpoint descriptors and the wire payload they accept.

use serde::{Deserialize, Serialize};

/// Public IndexNow aggregator, shares submissions with every participating engine.
pub const INDEXNOW_ENDPOINT: &str = "https://api.indexnow.org/indexnow";

/// Bing's own IndexNow endpoint.
pub const BING_ENDPOINT: &str = "https://www.bing.com/indexnow";

/// Body shape a discovery endpoint expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `{host, key, keyLocation, urlList}` JSON posted to the endpoint.
    #[default]
    IndexNow,
}

/// A configured discovery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointTarget {
    /// Short identifier used in reports and logs (e.g. `bing`).
    pub name: String,
    /// Absolute URL the payload is POSTed to.
    pub url: String,
    /// Body shape this endpoint requires.
    #[serde(default)]
    pub payload: PayloadShape,
}

impl EndpointTarget {
    /// Create an IndexNow-shaped target.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            payload: PayloadShape::IndexNow,
        }
    }
}

/// The targets used when configuration does not list any: the IndexNow
/// aggregator first, then Bing.
pub fn default_targets() -> Vec<EndpointTarget> {
    vec![
        EndpointTarget::new("indexnow", INDEXNOW_ENDPOINT),
        EndpointTarget::new("bing", BING_ENDPOINT),
    ]
}

/// JSON body sent to every target for one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Host name of the site, without scheme.
    pub host: String,
    /// The site's verification key.
    pub key: String,
    /// Absolute URL of the key-verification file.
    pub key_location: String,
    /// URLs in this batch.
    pub url_list: Vec<String>,
}
