//! Bounded-concurrency reconciliation of every canonical product.

use futures::stream::{self, StreamExt};
use shopsync_core::{Action, CanonicalProduct, DestinationIndex};

use crate::aggregate::{Aggregator, ProductOutcome};
use crate::destination::CatalogDestination;
use crate::diff::{classify, Diff};
use crate::retry::{call_with_retry, RetryPolicy};
use crate::settings::SyncSettings;

/// Diffs one product and pushes the resulting mutation, if any.
///
/// Mutation failures, exhausted retries included, become a discard carrying
/// the error message.
async fn reconcile_one<'a, D>(
    product: &'a CanonicalProduct,
    index: &DestinationIndex,
    destination: &D,
    policy: &RetryPolicy,
) -> ProductOutcome<'a>
where
    D: CatalogDestination + ?Sized,
{
    let sku = product.sku.as_str();
    let result = match classify(product, index) {
        Diff::Discard(reason) => return ProductOutcome::discarded(product, reason.to_owned()),
        Diff::Unchanged => return ProductOutcome::applied(product, Action::NoChange, None),
        Diff::Create => call_with_retry(policy, sku, || destination.create_product(product))
            .await
            .map(|()| (Action::Create, None)),
        Diff::Update { id } => {
            call_with_retry(policy, sku, || destination.update_product(id, product))
                .await
                .map(|()| (Action::Update, Some(id)))
        }
    };

    match result {
        Ok((action, id)) => ProductOutcome::applied(product, action, id),
        Err(e) => {
            tracing::warn!(sku, error = %e, "mutation failed; discarding product");
            ProductOutcome::discarded(product, e.to_string())
        }
    }
}

async fn reconcile_indexed<'a, D>(
    position: usize,
    product: &'a CanonicalProduct,
    index: &DestinationIndex,
    destination: &D,
    policy: &RetryPolicy,
) -> (usize, ProductOutcome<'a>)
where
    D: CatalogDestination + ?Sized,
{
    (
        position,
        reconcile_one(product, index, destination, policy).await,
    )
}

/// Reconciles `products` with at most `settings.concurrency` in flight and
/// folds every outcome into `aggregator`.
///
/// Returns only after every product has an outcome.
pub(crate) async fn reconcile_all<D>(
    products: &[CanonicalProduct],
    index: &DestinationIndex,
    destination: &D,
    settings: &SyncSettings,
    aggregator: &mut Aggregator,
) where
    D: CatalogDestination + ?Sized,
{
    let total = products.len();
    let policy = &settings.retry;

    // Futures are built up front; a lazily mapped stream borrowing `products`
    // makes the enclosing future lose `Send`.
    let tasks: Vec<_> = products
        .iter()
        .enumerate()
        .map(|(position, product)| {
            reconcile_indexed(position + 1, product, index, destination, policy)
        })
        .collect();
    let mut outcomes = stream::iter(tasks).buffer_unordered(settings.concurrency.max(1));

    while let Some((submitted, outcome)) = outcomes.next().await {
        aggregator.record(outcome);
        if settings.progress_every > 0 && submitted % settings.progress_every == 0 {
            tracing::info!(submitted, total, "reconciliation progress");
        }
    }

    let counts = aggregator.counts();
    tracing::debug!(
        created = counts.created,
        updated = counts.updated,
        unchanged = counts.unchanged,
        discarded = counts.discarded,
        "reconciliation finished"
    );
}
