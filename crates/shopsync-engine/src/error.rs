use shopsync_shopify::ShopifyError;
use thiserror::Error;

/// Failures that abort a whole run.
///
/// Per-product mutation failures never surface here; they become discards.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("source feed request failed: {0}")]
    FeedRequest(#[from] reqwest::Error),

    #[error("source feed returned HTTP {status} from {url}")]
    FeedStatus { status: u16, url: String },

    #[error("unexpected source feed format: {0}")]
    FeedShape(String),

    #[error("source feed body is not valid JSON: {0}")]
    FeedDeserialize(#[source] serde_json::Error),

    #[error("failed to fetch destination catalog: {0}")]
    Index(#[source] ShopifyError),

    #[error("failed to delete destination product {id} (sku {sku}): {source}")]
    Sweep {
        id: i64,
        sku: String,
        #[source]
        source: ShopifyError,
    },

    #[error("failed to build destination client: {0}")]
    Client(#[source] ShopifyError),

    #[error("audit log I/O error at {path}: {source}")]
    Audit {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize audit artifact: {0}")]
    AuditSerialize(#[source] serde_json::Error),

    #[error("a sync run is already in progress")]
    AlreadyRunning,
}
