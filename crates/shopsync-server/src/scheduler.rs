//! Background job scheduler.
//!
//! Registers the recurring sync job when `SHOPSYNC_SYNC_CRON` is set.

use std::sync::Arc;

use shopsync_engine::{SyncError, SyncService};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the scheduler with one sync job on `cron`.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down the job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if `cron` does not parse or the scheduler
/// cannot be started.
pub async fn build_scheduler(
    service: Arc<SyncService>,
    cron: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let service = Arc::clone(&service);
        Box::pin(async move {
            tracing::info!("scheduler: starting sync run");
            run_scheduled_sync(&service).await;
        })
    })?;
    scheduler.add(job).await?;

    scheduler.start().await?;
    tracing::info!(cron, "scheduler: sync job registered");
    Ok(scheduler)
}

async fn run_scheduled_sync(service: &SyncService) {
    match service.try_run().await {
        Ok(result) => tracing::info!(
            created = result.counts.created,
            updated = result.counts.updated,
            unchanged = result.counts.unchanged,
            discarded = result.counts.discarded,
            deleted = result.deleted,
            "scheduler: sync run complete"
        ),
        Err(SyncError::AlreadyRunning) => {
            tracing::warn!("scheduler: previous sync still running; skipping this tick");
        }
        Err(e) => tracing::error!(error = %e, "scheduler: sync run failed"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use shopsync_core::{CanonicalProduct, DestinationIndex};
    use shopsync_engine::{CatalogDestination, RawFeedRecord, SourceFeed, SyncSettings};
    use shopsync_shopify::ShopifyError;

    use super::*;

    struct EmptyFeed;

    #[async_trait]
    impl SourceFeed for EmptyFeed {
        async fn fetch_records(&self) -> Result<Vec<RawFeedRecord>, SyncError> {
            Ok(Vec::new())
        }
    }

    /// Empty catalog that counts listings.
    #[derive(Default)]
    struct CountingDestination {
        index_delay: Duration,
        index_fetches: AtomicUsize,
    }

    #[async_trait]
    impl CatalogDestination for CountingDestination {
        async fn fetch_index(&self) -> Result<DestinationIndex, ShopifyError> {
            self.index_fetches.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.index_delay).await;
            Ok(DestinationIndex::new())
        }
        async fn create_product(&self, _: &CanonicalProduct) -> Result<(), ShopifyError> {
            Ok(())
        }
        async fn update_product(&self, _: i64, _: &CanonicalProduct) -> Result<(), ShopifyError> {
            Ok(())
        }
        async fn delete_product(&self, _: i64) -> Result<(), ShopifyError> {
            Ok(())
        }
    }

    fn service_with(destination: Arc<CountingDestination>) -> Arc<SyncService> {
        Arc::new(SyncService::new(
            Arc::new(EmptyFeed),
            destination,
            SyncSettings::default(),
        ))
    }

    fn service() -> Arc<SyncService> {
        service_with(Arc::new(CountingDestination::default()))
    }

    #[tokio::test]
    async fn invalid_cron_is_rejected() {
        assert!(build_scheduler(service(), "every day at noon").await.is_err());
    }

    #[tokio::test]
    async fn valid_cron_starts_scheduler() {
        let mut scheduler = build_scheduler(service(), "0 0 3 * * *")
            .await
            .expect("scheduler should start");
        scheduler.shutdown().await.expect("shutdown");
    }

    #[tokio::test]
    async fn scheduled_run_lists_catalog_and_releases_lock() {
        let destination = Arc::new(CountingDestination::default());
        let service = service_with(Arc::clone(&destination));

        run_scheduled_sync(&service).await;

        assert_eq!(destination.index_fetches.load(Ordering::SeqCst), 1);
        assert!(!service.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn tick_during_a_run_is_skipped() {
        let destination = Arc::new(CountingDestination {
            index_delay: Duration::from_secs(10),
            ..CountingDestination::default()
        });
        let service = service_with(Arc::clone(&destination));

        let background = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { run_scheduled_sync(&service).await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(service.is_running());

        run_scheduled_sync(&service).await;
        assert_eq!(destination.index_fetches.load(Ordering::SeqCst), 1);

        background.await.expect("background run");
        assert!(!service.is_running());
    }
}
