//! Create, update and delete calls for `ShopifyAdminClient`.

use shopsync_core::CanonicalProduct;

use crate::error::ShopifyError;
use crate::types::{AdminProduct, AdminProductResponse, ProductEnvelope};

use super::ShopifyAdminClient;

impl ShopifyAdminClient {
    /// `POST /products.json`.
    ///
    /// # Errors
    ///
    /// [`ShopifyError::RateLimited`] on 429; any other status or transport error.
    pub async fn create_product(
        &self,
        product: &CanonicalProduct,
    ) -> Result<AdminProduct, ShopifyError> {
        let url = self.collection_url();
        let body = ProductEnvelope::from_canonical(product, None);
        tracing::debug!(sku = %product.sku, "creating product");
        let response = self
            .send(self.client.post(&url).json(&body), &url)
            .await
            .inspect_err(|e| tracing::debug!(sku = %product.sku, error = %e, "create failed"))?;
        let parsed: AdminProductResponse =
            Self::read_json(response, &format!("created product {}", product.sku)).await?;
        Ok(parsed.product)
    }

    /// `PUT /products/{id}.json` with the full canonical payload.
    ///
    /// # Errors
    ///
    /// [`ShopifyError::RateLimited`] on 429; [`ShopifyError::NotFound`] if the
    /// product vanished; any other status or transport error.
    pub async fn update_product(
        &self,
        id: i64,
        product: &CanonicalProduct,
    ) -> Result<AdminProduct, ShopifyError> {
        let url = self.product_url(id);
        let body = ProductEnvelope::from_canonical(product, Some(id));
        tracing::debug!(sku = %product.sku, id, "updating product");
        let response = self
            .send(self.client.put(&url).json(&body), &url)
            .await
            .inspect_err(|e| tracing::debug!(sku = %product.sku, id, error = %e, "update failed"))?;
        let parsed: AdminProductResponse =
            Self::read_json(response, &format!("updated product {id}")).await?;
        Ok(parsed.product)
    }

    /// `DELETE /products/{id}.json`.
    ///
    /// # Errors
    ///
    /// Any status or transport error, including 429.
    pub async fn delete_product(&self, id: i64) -> Result<(), ShopifyError> {
        let url = self.product_url(id);
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }
}
