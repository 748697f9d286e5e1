//! HTTP client for the Shopify Admin REST `products` resource.

mod catalog;
mod mutations;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ShopifyError;

/// Maximum number of listing pages before giving up.
/// At 250 products per page this covers 100k products.
pub(super) const MAX_PAGES: usize = 400;

/// Upper bound on the error body carried in [`ShopifyError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 500;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for one store's Admin API.
///
/// Maps 429 to [`ShopifyError::RateLimited`], 404 to [`ShopifyError::NotFound`]
/// and any other non-2xx to [`ShopifyError::UnexpectedStatus`]. It never
/// retries on its own; throttling is handled by the caller.
pub struct ShopifyAdminClient {
    pub(super) client: Client,
    /// e.g. `https://store.myshopify.com/admin/api/2024-01`, no trailing slash.
    pub(super) base_url: String,
    pub(super) access_token: String,
}

impl ShopifyAdminClient {
    /// Creates a client with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ShopifyError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        reqwest::Url::parse(&base_url).map_err(|e| ShopifyError::InvalidBaseUrl {
            base_url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            access_token: access_token.to_owned(),
        })
    }

    /// `GET /products.json` URL for one listing page.
    fn products_url(&self, limit: u32, since_id: i64) -> Result<String, ShopifyError> {
        let mut url = reqwest::Url::parse(&format!("{}/products.json", self.base_url)).map_err(
            |e| ShopifyError::InvalidBaseUrl {
                base_url: self.base_url.clone(),
                reason: e.to_string(),
            },
        )?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("since_id", &since_id.to_string());
        Ok(url.to_string())
    }

    fn collection_url(&self) -> String {
        format!("{}/products.json", self.base_url)
    }

    fn product_url(&self, id: i64) -> String {
        format!("{}/products/{id}.json", self.base_url)
    }

    /// Sends an authenticated request and maps non-2xx statuses to errors.
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, ShopifyError> {
        let response = request
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<f64>().ok());
            return Err(ShopifyError::RateLimited {
                url: url.to_owned(),
                retry_after_secs,
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ShopifyError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            // Shopify explains 4xx rejections in the body (`{"errors": ...}`).
            let body = response.text().await.unwrap_or_default();
            return Err(ShopifyError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        Ok(response)
    }

    /// Reads and deserializes a JSON body, tagging failures with `context`.
    async fn read_json<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<T, ShopifyError> {
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| ShopifyError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
