//! Full-catalog listing for `ShopifyAdminClient`.

use shopsync_core::DestinationIndex;

use crate::error::ShopifyError;
use crate::pagination::next_since_id;
use crate::snapshot::build_destination_index;
use crate::types::{AdminProduct, AdminProductsResponse};

use super::ShopifyAdminClient;
use super::MAX_PAGES;

impl ShopifyAdminClient {
    /// Fetches one listing page of up to `limit` products with id > `since_id`.
    ///
    /// # Errors
    ///
    /// Any status or transport error from the request, or
    /// [`ShopifyError::Deserialize`] for a malformed body.
    pub async fn fetch_products_page(
        &self,
        limit: u32,
        since_id: i64,
    ) -> Result<Vec<AdminProduct>, ShopifyError> {
        let url = self.products_url(limit, since_id)?;
        let response = self.send(self.client.get(&url), &url).await?;
        let parsed: AdminProductsResponse =
            Self::read_json(response, &format!("products page since_id={since_id}")).await?;
        Ok(parsed.products)
    }

    /// Fetches every product in the store, following `since_id` until an
    /// empty page.
    ///
    /// All-or-nothing: a failure on any page discards the pages already
    /// fetched. A partial listing would make the sweep delete live products.
    ///
    /// # Errors
    ///
    /// Propagates page errors; returns [`ShopifyError::PaginationLimit`] past
    /// [`MAX_PAGES`] pages.
    pub async fn fetch_all_products(&self, limit: u32) -> Result<Vec<AdminProduct>, ShopifyError> {
        let mut all_products: Vec<AdminProduct> = Vec::new();
        let mut since_id = 0i64;

        for page_number in 1..=MAX_PAGES {
            let page = self.fetch_products_page(limit, since_id).await?;
            let Some(next) = next_since_id(since_id, &page)? else {
                tracing::debug!(pages = page_number, total = all_products.len(), "catalog listing complete");
                return Ok(all_products);
            };
            all_products.extend(page);
            since_id = next;
        }

        Err(ShopifyError::PaginationLimit {
            max_pages: MAX_PAGES,
        })
    }

    /// Lists the whole catalog and indexes it by first-variant SKU.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_all_products`].
    pub async fn fetch_destination_index(
        &self,
        limit: u32,
    ) -> Result<DestinationIndex, ShopifyError> {
        let products = self.fetch_all_products(limit).await?;
        Ok(build_destination_index(&products))
    }
}
