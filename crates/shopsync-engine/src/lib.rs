//! Catalog reconciliation engine.
//!
//! Pulls the source feed, normalizes it into [`shopsync_core::CanonicalProduct`]s,
//! diffs them against the destination index, pushes creates and updates under
//! a bounded pool with throttling-aware retries, then sweeps destination
//! products that left the feed.

pub mod audit;
pub mod destination;
pub mod diff;
pub mod error;
pub mod feed;
pub mod normalize;
pub mod retry;
pub mod run;
pub mod service;
pub mod settings;

mod aggregate;
mod schedule;
mod sweep;

pub use audit::AuditLog;
pub use destination::{CatalogDestination, ShopifyDestination};
pub use diff::{classify, Diff, INVALID_PRICE_REASON};
pub use error::SyncError;
pub use feed::{parse_feed_body, HttpFeed, RawFeedRecord, SourceFeed, FEED_LIST_KEY};
pub use normalize::{normalize_records, parse_price, parse_stock};
pub use retry::{call_with_retry, RetryPolicy};
pub use run::{plan_sync, run_sync};
pub use service::SyncService;
pub use settings::SyncSettings;
