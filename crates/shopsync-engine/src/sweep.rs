//! Deletion of destination products that left the feed.

use std::collections::HashSet;

use shopsync_core::{CanonicalProduct, DestinationIndex, DestinationRecord};

use crate::aggregate::Aggregator;
use crate::destination::CatalogDestination;
use crate::error::SyncError;

/// Destination entries whose SKU is not among `products`, in index order.
pub(crate) fn deletion_candidates<'i>(
    products: &[CanonicalProduct],
    index: &'i DestinationIndex,
) -> Vec<(&'i str, &'i DestinationRecord)> {
    let source: HashSet<&str> = products.iter().map(|p| p.sku.as_str()).collect();
    index.missing_from(&source)
}

/// Deletes every candidate one at a time, without retries.
///
/// The first failure stops the sweep; deletions already made stand.
pub(crate) async fn sweep_missing<D>(
    products: &[CanonicalProduct],
    index: &DestinationIndex,
    destination: &D,
    aggregator: &mut Aggregator,
) -> Result<usize, SyncError>
where
    D: CatalogDestination + ?Sized,
{
    let candidates = deletion_candidates(products, index);
    tracing::info!(candidates = candidates.len(), "sweeping products absent from feed");

    for &(sku, record) in &candidates {
        destination
            .delete_product(record.id)
            .await
            .map_err(|source| SyncError::Sweep {
                id: record.id,
                sku: sku.to_owned(),
                source,
            })?;
        tracing::info!(sku, id = record.id, "deleted product absent from feed");
        aggregator.record_deletion(sku, record.id);
    }

    Ok(candidates.len())
}
