//! Source feed: one GET returning `{"listarProductos": [...]}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SyncError;

/// Top-level field holding the product list in the feed body.
pub const FEED_LIST_KEY: &str = "listarProductos";

/// One untyped product record as the feed sends it.
///
/// Every field is optional. Values may arrive as JSON strings or numbers and
/// are kept as text; sanitizing them is the normalizer's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawFeedRecord {
    #[serde(rename = "codigos", default, deserialize_with = "lenient_text")]
    pub sku: Option<String>,
    #[serde(rename = "descripProd", default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(rename = "marca", default, deserialize_with = "lenient_text")]
    pub brand: Option<String>,
    #[serde(rename = "categoria", default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(rename = "seccion", default, deserialize_with = "lenient_text")]
    pub section: Option<String>,
    #[serde(rename = "unidad", default, deserialize_with = "lenient_text")]
    pub unit: Option<String>,
    #[serde(rename = "precio", default, deserialize_with = "lenient_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub stock: Option<String>,
    #[serde(rename = "foto", default, deserialize_with = "lenient_text")]
    pub photo: Option<String>,
}

/// Accepts a string or a number as text; anything else reads as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Where a run gets its raw records from.
#[async_trait]
pub trait SourceFeed: Send + Sync {
    /// Fetches the complete record list.
    ///
    /// # Errors
    ///
    /// Any transport, status or shape failure. All of them are fatal to the
    /// run.
    async fn fetch_records(&self) -> Result<Vec<RawFeedRecord>, SyncError>;
}

/// [`SourceFeed`] backed by a single HTTP GET.
pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    /// # Errors
    ///
    /// Returns [`SyncError::FeedRequest`] if the HTTP client cannot be built.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

#[async_trait]
impl SourceFeed for HttpFeed {
    async fn fetch_records(&self) -> Result<Vec<RawFeedRecord>, SyncError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::FeedStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        let body = response.text().await?;
        let records = parse_feed_body(&body)?;
        tracing::debug!(records = records.len(), url = %self.url, "fetched source feed");
        Ok(records)
    }
}

/// Extracts the record list from a feed body.
///
/// Non-object entries in the list are skipped.
///
/// # Errors
///
/// [`SyncError::FeedDeserialize`] for invalid JSON, [`SyncError::FeedShape`]
/// when the body is not an object with an array under [`FEED_LIST_KEY`].
pub fn parse_feed_body(body: &str) -> Result<Vec<RawFeedRecord>, SyncError> {
    let value: Value = serde_json::from_str(body).map_err(SyncError::FeedDeserialize)?;
    let Value::Object(mut root) = value else {
        return Err(SyncError::FeedShape(
            "top-level value is not an object".to_owned(),
        ));
    };
    let Some(Value::Array(entries)) = root.remove(FEED_LIST_KEY) else {
        return Err(SyncError::FeedShape(format!(
            "expected an array under `{FEED_LIST_KEY}`"
        )));
    };

    let mut records = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            tracing::debug!(position, "skipping non-object feed entry");
            continue;
        }
        match serde_json::from_value::<RawFeedRecord>(entry) {
            Ok(record) => records.push(record),
            Err(e) => tracing::debug!(position, error = %e, "skipping unreadable feed entry"),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_under_list_key() {
        let body = r#"{"listarProductos": [
            {"codigos": "A-1", "descripProd": "Martillo", "precio": "1500", "stock": "3"},
            {"codigos": 42, "precio": 990, "stock": 7, "foto": null}
        ]}"#;
        let records = parse_feed_body(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sku.as_deref(), Some("A-1"));
        assert_eq!(records[0].description.as_deref(), Some("Martillo"));
        assert_eq!(records[1].sku.as_deref(), Some("42"));
        assert_eq!(records[1].price.as_deref(), Some("990"));
        assert_eq!(records[1].stock.as_deref(), Some("7"));
        assert!(records[1].photo.is_none());
    }

    #[test]
    fn missing_fields_read_as_none() {
        let records = parse_feed_body(r#"{"listarProductos": [{}]}"#).unwrap();
        assert_eq!(records, vec![RawFeedRecord::default()]);
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let body = r#"{"listarProductos": [1, "x", null, {"codigos": "B"}]}"#;
        let records = parse_feed_body(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sku.as_deref(), Some("B"));
    }

    #[test]
    fn missing_list_key_is_a_shape_error() {
        let err = parse_feed_body(r#"{"productos": []}"#).unwrap_err();
        assert!(matches!(err, SyncError::FeedShape(_)), "got: {err:?}");
    }

    #[test]
    fn non_array_list_is_a_shape_error() {
        let err = parse_feed_body(r#"{"listarProductos": {"codigos": "A"}}"#).unwrap_err();
        assert!(matches!(err, SyncError::FeedShape(_)), "got: {err:?}");
    }

    #[test]
    fn top_level_array_is_a_shape_error() {
        let err = parse_feed_body("[]").unwrap_err();
        assert!(matches!(err, SyncError::FeedShape(_)), "got: {err:?}");
    }

    #[test]
    fn invalid_json_is_a_deserialize_error() {
        let err = parse_feed_body("<html>").unwrap_err();
        assert!(matches!(err, SyncError::FeedDeserialize(_)), "got: {err:?}");
    }
}
