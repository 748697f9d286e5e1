//! The destination catalog as seen by the engine.

use async_trait::async_trait;
use shopsync_core::{CanonicalProduct, DestinationIndex};
use shopsync_shopify::{ShopifyAdminClient, ShopifyError};

/// Read and mutation primitives of the destination store.
///
/// Mutations may fail with [`ShopifyError::RateLimited`], which the retry
/// executor backs off on. Returned records are not inspected by the engine.
#[async_trait]
pub trait CatalogDestination: Send + Sync {
    async fn fetch_index(&self) -> Result<DestinationIndex, ShopifyError>;

    async fn create_product(&self, product: &CanonicalProduct) -> Result<(), ShopifyError>;

    async fn update_product(&self, id: i64, product: &CanonicalProduct)
        -> Result<(), ShopifyError>;

    async fn delete_product(&self, id: i64) -> Result<(), ShopifyError>;
}

/// [`CatalogDestination`] over the Shopify Admin REST API.
pub struct ShopifyDestination {
    client: ShopifyAdminClient,
    page_size: u32,
}

impl ShopifyDestination {
    #[must_use]
    pub fn new(client: ShopifyAdminClient, page_size: u32) -> Self {
        Self { client, page_size }
    }
}

#[async_trait]
impl CatalogDestination for ShopifyDestination {
    async fn fetch_index(&self) -> Result<DestinationIndex, ShopifyError> {
        self.client.fetch_destination_index(self.page_size).await
    }

    async fn create_product(&self, product: &CanonicalProduct) -> Result<(), ShopifyError> {
        let created = self.client.create_product(product).await?;
        tracing::debug!(sku = %product.sku, id = created.id, "product created");
        Ok(())
    }

    async fn update_product(
        &self,
        id: i64,
        product: &CanonicalProduct,
    ) -> Result<(), ShopifyError> {
        self.client.update_product(id, product).await?;
        Ok(())
    }

    async fn delete_product(&self, id: i64) -> Result<(), ShopifyError> {
        self.client.delete_product(id).await
    }
}
