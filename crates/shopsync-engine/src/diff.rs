//! Classifying a canonical product against the destination index.

use shopsync_core::{Action, CanonicalProduct, DestinationIndex};

/// Discard reason for products carrying the absent-price sentinel.
pub const INVALID_PRICE_REASON: &str = "invalid price for creation";

/// What to do with one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diff {
    /// Never sent to the destination.
    Discard(&'static str),
    Create,
    /// Replace destination product `id` with the canonical payload.
    Update { id: i64 },
    Unchanged,
}

impl Diff {
    #[must_use]
    pub fn action(&self) -> Action {
        match self {
            Diff::Discard(_) => Action::Discard,
            Diff::Create => Action::Create,
            Diff::Update { .. } => Action::Update,
            Diff::Unchanged => Action::NoChange,
        }
    }
}

/// Decides the action for `product`.
///
/// A product without a usable price is discarded even when the destination
/// holds an identical copy. Otherwise a SKU present in `index` is compared
/// snapshot to snapshot; any difference is an update.
#[must_use]
pub fn classify(product: &CanonicalProduct, index: &DestinationIndex) -> Diff {
    if !product.has_price() {
        return Diff::Discard(INVALID_PRICE_REASON);
    }
    match index.get(&product.sku) {
        Some(existing) if existing.snapshot == product.snapshot() => Diff::Unchanged,
        Some(existing) => Diff::Update { id: existing.id },
        None => Diff::Create,
    }
}
