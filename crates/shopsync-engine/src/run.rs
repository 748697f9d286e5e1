//! Run entry points: the full sync and its dry-run counterpart.

use chrono::Utc;
use shopsync_core::{DestinationIndex, RunResult, SyncPlan};
use uuid::Uuid;

use crate::aggregate::Aggregator;
use crate::destination::CatalogDestination;
use crate::diff::{classify, Diff};
use crate::error::SyncError;
use crate::feed::{RawFeedRecord, SourceFeed};
use crate::normalize::normalize_records;
use crate::schedule::reconcile_all;
use crate::settings::SyncSettings;
use crate::sweep::{deletion_candidates, sweep_missing};

/// Fetches the feed and the destination index concurrently. Either failure
/// is fatal.
async fn fetch_inputs<F, D>(
    feed: &F,
    destination: &D,
) -> Result<(Vec<RawFeedRecord>, DestinationIndex), SyncError>
where
    F: SourceFeed + ?Sized,
    D: CatalogDestination + ?Sized,
{
    tokio::try_join!(feed.fetch_records(), async {
        destination.fetch_index().await.map_err(SyncError::Index)
    })
}

/// Runs one full sync: reconcile every feed product, then sweep destination
/// products that left the feed.
///
/// Per-product failures end up in [`RunResult::discards`]. Audit artifacts
/// are written when `settings.audit` is set; a failure there is logged and
/// does not fail the run.
///
/// # Errors
///
/// Feed failures, [`SyncError::Index`] and [`SyncError::Sweep`]. No partial
/// result is returned.
pub async fn run_sync<F, D>(
    feed: &F,
    destination: &D,
    settings: &SyncSettings,
) -> Result<RunResult, SyncError>
where
    F: SourceFeed + ?Sized,
    D: CatalogDestination + ?Sized,
{
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();

    let (records, index) = fetch_inputs(feed, destination).await?;
    let products = normalize_records(&records);
    tracing::info!(
        %run_id,
        products = products.len(),
        destination_skus = index.len(),
        concurrency = settings.concurrency,
        "sync run started"
    );

    let mut aggregator = Aggregator::default();
    reconcile_all(&products, &index, destination, settings, &mut aggregator).await;
    let deleted = sweep_missing(&products, &index, destination, &mut aggregator).await?;

    let result = aggregator.finish(started_at, deleted);
    tracing::info!(
        %run_id,
        created = result.counts.created,
        updated = result.counts.updated,
        unchanged = result.counts.unchanged,
        discarded = result.counts.discarded,
        deleted,
        "sync run complete"
    );

    if let Some(audit) = &settings.audit {
        if let Err(e) = audit.write_run_artifacts(run_id, &result).await {
            tracing::error!(
                %run_id,
                dir = %audit.dir().display(),
                error = %e,
                "failed to persist audit artifacts"
            );
        }
    }

    Ok(result)
}

/// Computes what [`run_sync`] would do without mutating the destination.
///
/// # Errors
///
/// Feed failures and [`SyncError::Index`].
pub async fn plan_sync<F, D>(feed: &F, destination: &D) -> Result<SyncPlan, SyncError>
where
    F: SourceFeed + ?Sized,
    D: CatalogDestination + ?Sized,
{
    let (records, index) = fetch_inputs(feed, destination).await?;
    let products = normalize_records(&records);

    let mut plan = SyncPlan::default();
    for product in &products {
        let diff = classify(product, &index);
        plan.counts.record(diff.action());
        match diff {
            Diff::Create => plan.to_create.push(product.sku.clone()),
            Diff::Update { .. } => plan.to_update.push(product.sku.clone()),
            Diff::Discard(reason) => plan
                .to_discard
                .push((product.sku.clone(), reason.to_owned())),
            Diff::Unchanged => {}
        }
    }
    plan.to_delete = deletion_candidates(&products, &index)
        .into_iter()
        .map(|(sku, _)| sku.to_owned())
        .collect();

    tracing::info!(
        create = plan.to_create.len(),
        update = plan.to_update.len(),
        unchanged = plan.counts.unchanged,
        discard = plan.to_discard.len(),
        delete = plan.to_delete.len(),
        "sync plan computed"
    );
    Ok(plan)
}
