//! Shopify Admin REST API shapes for the `products` resource.
//!
//! ## Observed response shape
//!
//! ### Tags
//! The Admin API returns tags as a single comma-separated string
//! (`"FERRETERIA, STANLEY"`), unlike the storefront `products.json` which
//! returns an array. Requests must send the same string form.
//!
//! ### Options
//! Options are objects (`{"name": "Title", "values": [...]}`). Sending a bare
//! string array is rejected with `options: expected Array to be a Hash`, so
//! requests only carry options when a product has more than one.
//!
//! ### `inventory_quantity`
//! Present on variants when inventory is tracked; may be negative for
//! oversold variants. Modeled as `Option<i64>`, defaulting to `0`.

use serde::{Deserialize, Serialize};

use shopsync_core::CanonicalProduct;

/// Response of `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct AdminProductsResponse {
    pub products: Vec<AdminProduct>,
}

/// Response of `POST /products.json` and `PUT /products/{id}.json`.
#[derive(Debug, Deserialize)]
pub struct AdminProductResponse {
    pub product: AdminProduct,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminProduct {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    /// Comma-separated tag string; empty when the product has no tags.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub variants: Vec<AdminVariant>,
    #[serde(default)]
    pub images: Vec<AdminImage>,
    #[serde(default)]
    pub options: Vec<AdminOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminVariant {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub option1: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminImage {
    pub src: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminOption {
    pub name: String,
}

/// Request body wrapper: Shopify expects `{"product": {...}}`.
#[derive(Debug, Serialize)]
pub struct ProductEnvelope<'a> {
    pub product: ProductPayload<'a>,
}

#[derive(Debug, Serialize)]
pub struct ProductPayload<'a> {
    /// Set on updates only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: &'a str,
    pub body_html: &'a str,
    pub vendor: &'a str,
    pub tags: String,
    pub variants: Vec<VariantPayload<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImagePayload<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionPayload<'a>>>,
}

#[derive(Debug, Serialize)]
pub struct VariantPayload<'a> {
    pub option1: &'a str,
    pub sku: &'a str,
    pub price: &'a str,
    pub inventory_quantity: i64,
    pub inventory_management: &'a str,
    pub inventory_policy: &'static str,
    pub fulfillment_service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ImagePayload<'a> {
    pub src: &'a str,
}

#[derive(Debug, Serialize)]
pub struct OptionPayload<'a> {
    pub name: &'a str,
}

impl<'a> ProductEnvelope<'a> {
    /// Builds the create/update body for `product`. `id` is `Some` for updates.
    #[must_use]
    pub fn from_canonical(product: &'a CanonicalProduct, id: Option<i64>) -> Self {
        let variant = &product.variant;
        let images = product
            .image
            .as_deref()
            .map(|src| vec![ImagePayload { src }]);
        let options = (product.options.len() > 1).then(|| {
            product
                .options
                .iter()
                .map(|name| OptionPayload { name })
                .collect::<Vec<_>>()
        });

        Self {
            product: ProductPayload {
                id,
                title: &product.title,
                body_html: &product.body_html,
                vendor: &product.vendor,
                tags: product.tags_joined(),
                variants: vec![VariantPayload {
                    option1: &variant.option1,
                    sku: &variant.sku,
                    price: &variant.price,
                    inventory_quantity: variant.inventory_quantity,
                    inventory_management: &variant.inventory_management,
                    inventory_policy: "deny",
                    fulfillment_service: "manual",
                }],
                images,
                options,
            },
        }
    }
}
