use serde::{Deserialize, Serialize};

/// Price assigned to products whose feed price is missing or unusable.
/// Products carrying it are never sent to the destination.
pub const ABSENT_PRICE: &str = "0.00";

/// A feed record normalized into the shape pushed to the destination store.
///
/// One canonical product exists per SKU per run; the first feed record seen
/// for a SKU wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalProduct {
    pub sku: String,
    pub title: String,
    /// Description markup, always `<p>{title}</p>`.
    pub body_html: String,
    pub vendor: String,
    /// Uppercased category, section, brand and unit. Duplicates are kept.
    pub tags: Vec<String>,
    /// URI-encoded photo URL, if the feed had one.
    pub image: Option<String>,
    pub variant: CanonicalVariant,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalVariant {
    pub option1: String,
    pub sku: String,
    /// Two-decimal price string, or [`ABSENT_PRICE`].
    pub price: String,
    pub inventory_quantity: i64,
    pub inventory_management: String,
}

impl CanonicalProduct {
    /// Tags as the destination stores them: one comma-separated string.
    #[must_use]
    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }

    #[must_use]
    pub fn has_price(&self) -> bool {
        self.variant.price != ABSENT_PRICE
    }

    /// Projects this product onto the fields compared against the destination.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            title: self.title.clone(),
            body_html: self.body_html.clone(),
            vendor: self.vendor.clone(),
            tags: self.tags.clone(),
            variants: vec![VariantSnapshot {
                sku: self.variant.sku.clone(),
                price: self.variant.price.clone(),
                inventory_quantity: self.variant.inventory_quantity,
                option1: Some(self.variant.option1.clone()),
            }],
            images: self.image.iter().cloned().collect(),
            options: self.options.clone(),
        }
    }
}

/// Comparable view of a product, produced both from a [`CanonicalProduct`]
/// and from a destination listing. Two products are "unchanged" exactly when
/// their snapshots are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub title: String,
    pub body_html: String,
    pub vendor: String,
    /// Tags in stored order, duplicates included. Comparison is order
    /// sensitive: a destination that sorts or deduplicates tags on write
    /// makes affected products compare changed on every run.
    pub tags: Vec<String>,
    pub variants: Vec<VariantSnapshot>,
    /// Image source URLs in listing order.
    pub images: Vec<String>,
    /// Option names, e.g. `["Title"]`.
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSnapshot {
    pub sku: String,
    pub price: String,
    pub inventory_quantity: i64,
    pub option1: Option<String>,
}
