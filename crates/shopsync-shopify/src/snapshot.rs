//! Projection of Admin API products onto the destination index.

use shopsync_core::{DestinationIndex, DestinationRecord, ProductSnapshot, VariantSnapshot};

use crate::types::AdminProduct;

/// Splits Shopify's comma-separated tag string, trimming each tag.
fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

impl AdminProduct {
    /// SKU of the first variant, when present and non-empty.
    #[must_use]
    pub fn primary_sku(&self) -> Option<&str> {
        self.variants
            .first()
            .and_then(|v| v.sku.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            title: self.title.clone(),
            body_html: self.body_html.clone().unwrap_or_default(),
            vendor: self.vendor.clone().unwrap_or_default(),
            tags: split_tags(&self.tags),
            variants: self
                .variants
                .iter()
                .map(|v| VariantSnapshot {
                    sku: v.sku.clone().unwrap_or_default(),
                    price: v.price.clone(),
                    inventory_quantity: v.inventory_quantity.unwrap_or(0),
                    option1: v.option1.clone(),
                })
                .collect(),
            images: self.images.iter().map(|i| i.src.clone()).collect(),
            options: self.options.iter().map(|o| o.name.clone()).collect(),
        }
    }
}

/// Builds the SKU-keyed index from a full listing.
///
/// Products without a first-variant SKU are not indexed, so they are never
/// updated or swept. When two products share a SKU the later one in listing
/// order wins.
#[must_use]
pub fn build_destination_index(products: &[AdminProduct]) -> DestinationIndex {
    let mut index = DestinationIndex::new();
    for product in products {
        let Some(sku) = product.primary_sku() else {
            tracing::debug!(product_id = product.id, "destination product has no SKU; not indexed");
            continue;
        };
        if let Some(previous) = index.get(sku) {
            tracing::warn!(
                sku,
                previous_id = previous.id,
                product_id = product.id,
                "duplicate SKU in destination catalog; keeping the later product"
            );
        }
        index.insert(
            sku,
            DestinationRecord {
                id: product.id,
                snapshot: product.snapshot(),
            },
        );
    }
    index
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shopsync_core::{CanonicalProduct, CanonicalVariant};

    use super::*;

    fn admin_product(id: i64, sku: Option<&str>) -> AdminProduct {
        serde_json::from_value(json!({
            "id": id,
            "title": "Martillo",
            "body_html": "<p>Martillo</p>",
            "vendor": "Stanley",
            "tags": "HERRAMIENTAS, STANLEY",
            "variants": [{
                "id": id * 10,
                "sku": sku,
                "price": "1500.00",
                "inventory_quantity": 3,
                "option1": "Default Title"
            }],
            "images": [{"src": "https://cdn.shopify.com/a.jpg"}],
            "options": [{"name": "Title", "values": ["Default Title"]}]
        }))
        .unwrap()
    }

    #[test]
    fn split_tags_trims_and_drops_empty() {
        assert_eq!(split_tags(" A ,B,, "), vec!["A", "B"]);
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn snapshot_projects_comparable_fields() {
        let snapshot = admin_product(1, Some("A-100")).snapshot();
        assert_eq!(snapshot.tags, vec!["HERRAMIENTAS", "STANLEY"]);
        assert_eq!(snapshot.variants[0].sku, "A-100");
        assert_eq!(snapshot.variants[0].inventory_quantity, 3);
        assert_eq!(snapshot.images, vec!["https://cdn.shopify.com/a.jpg"]);
        assert_eq!(snapshot.options, vec!["Title"]);
    }

    #[test]
    fn index_skips_products_without_sku() {
        let products = vec![
            admin_product(1, Some("A-100")),
            admin_product(2, None),
            admin_product(3, Some("   ")),
        ];
        let index = build_destination_index(&products);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("A-100").map(|r| r.id), Some(1));
    }

    #[test]
    fn index_keeps_later_duplicate() {
        let products = vec![admin_product(1, Some("A-100")), admin_product(2, Some("A-100"))];
        let index = build_destination_index(&products);
        assert_eq!(index.get("A-100").map(|r| r.id), Some(2));
    }

    fn canonical(tags: &[&str]) -> CanonicalProduct {
        CanonicalProduct {
            sku: "A-100".to_owned(),
            title: "Martillo".to_owned(),
            body_html: "<p>Martillo</p>".to_owned(),
            vendor: "Stanley".to_owned(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            image: Some("https://cdn.shopify.com/a.jpg".to_owned()),
            variant: CanonicalVariant {
                option1: "Default Title".to_owned(),
                sku: "A-100".to_owned(),
                price: "1500.00".to_owned(),
                inventory_quantity: 3,
                inventory_management: "shopify".to_owned(),
            },
            options: vec!["Title".to_owned()],
        }
    }

    fn stored_with_tags(tags: &str) -> AdminProduct {
        let mut product = admin_product(1, Some("A-100"));
        product.tags = tags.to_owned();
        product
    }

    #[test]
    fn tags_stored_as_sent_compare_equal() {
        let product = canonical(&["HERRAMIENTAS", "STANLEY", "STANLEY"]);
        let stored = stored_with_tags(&product.tags_joined());
        assert_eq!(stored.snapshot(), product.snapshot());
    }

    #[test]
    fn reordered_or_deduplicated_tags_compare_changed() {
        let product = canonical(&["STANLEY", "HERRAMIENTAS", "STANLEY"]);
        assert_ne!(
            stored_with_tags("HERRAMIENTAS, STANLEY, STANLEY").snapshot(),
            product.snapshot()
        );
        assert_ne!(
            stored_with_tags("STANLEY, HERRAMIENTAS").snapshot(),
            product.snapshot()
        );
    }
}
