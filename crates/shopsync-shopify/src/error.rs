use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by Shopify (HTTP 429) at {url}")]
    RateLimited {
        url: String,
        /// Value of the `Retry-After` header, when Shopify sent one.
        /// Informational only: it is logged, but backoff follows the
        /// caller's own schedule.
        retry_after_secs: Option<f64>,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("pagination stalled: page after since_id={since_id} did not advance")]
    PaginationStalled { since_id: i64 },

    #[error("invalid Admin API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ShopifyError {
    /// `true` for the throttling signal (HTTP 429) that callers back off on.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ShopifyError::RateLimited { .. })
    }

    /// The `Retry-After` hint carried by a 429, if any.
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<f64> {
        match self {
            ShopifyError::RateLimited {
                retry_after_secs, ..
            } => *retry_after_secs,
            _ => None,
        }
    }
}
