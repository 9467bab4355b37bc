//! URL metrics returned by the service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Metrics for one URL.
///
/// Every field is optional on the wire. A field that is missing from the
/// response, sent as `null`, or not requested in the column mask keeps its
/// zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlMetrics {
    /// The title of the page, if available
    #[serde(
        rename = "ut",
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub title: String,

    /// The canonical form of the URL
    #[serde(
        rename = "uu",
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub canonical_url: String,

    /// The number of external equity links to the URL
    #[serde(rename = "ueid", deserialize_with = "null_as_default")]
    pub external_equity_links: u64,

    /// The number of links (equity or nonequity, internal or external) to the URL
    #[serde(rename = "uid", deserialize_with = "null_as_default")]
    pub links: u64,

    /// MozRank of the URL as a normalized 10-point score
    #[serde(rename = "umrp", deserialize_with = "null_as_default")]
    pub mozrank_url_normalized: f64,

    /// MozRank of the URL as a raw score
    #[serde(rename = "umrr", deserialize_with = "null_as_default")]
    pub mozrank_url_raw: f64,

    /// MozRank of the URL's subdomain as a normalized 10-point score
    #[serde(rename = "fmrp", deserialize_with = "null_as_default")]
    pub mozrank_subdomain_normalized: f64,

    /// MozRank of the URL's subdomain as a raw score
    #[serde(rename = "fmrr", deserialize_with = "null_as_default")]
    pub mozrank_subdomain_raw: f64,

    /// The HTTP status code recorded by the crawler for this URL, if available
    #[serde(rename = "us", deserialize_with = "null_as_default")]
    pub http_status_code: u16,

    /// Normalized 100-point score of how likely the page is to rank well
    #[serde(rename = "upa", deserialize_with = "null_as_default")]
    pub page_authority: f64,

    /// Normalized 100-point score of how likely the domain is to rank well
    #[serde(rename = "pda", deserialize_with = "null_as_default")]
    pub domain_authority: f64,

    /// When the crawler last visited the URL, as a Unix timestamp
    #[serde(rename = "ulc", deserialize_with = "null_as_default")]
    pub time_last_crawled: i64,
}

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UrlMetrics {
    /// Last crawl time as a UTC date, or `None` when the service did not report one.
    pub fn last_crawled(&self) -> Option<DateTime<Utc>> {
        if self.time_last_crawled == 0 {
            return None;
        }
        DateTime::from_timestamp(self.time_last_crawled, 0)
    }
}

impl fmt::Display for UrlMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "URL: {}, PA: {}, DA: {}, MRU: {}, MRS: {}",
            self.canonical_url,
            self.page_authority,
            self.domain_authority,
            self.mozrank_url_normalized,
            self.mozrank_subdomain_normalized
        )
    }
}
