pub mod client;
pub mod error;
pub mod pagination;
pub mod snapshot;
pub mod types;

pub use client::ShopifyAdminClient;
pub use error::ShopifyError;
pub use snapshot::build_destination_index;
pub use types::{AdminProduct, AdminVariant, ProductEnvelope};
