//! Long-lived handle used by the CLI and the server.

use std::sync::Arc;

use shopsync_core::{AppConfig, RunResult, SyncPlan};
use shopsync_shopify::ShopifyAdminClient;
use tokio::sync::Mutex;

use crate::destination::{CatalogDestination, ShopifyDestination};
use crate::error::SyncError;
use crate::feed::{HttpFeed, SourceFeed};
use crate::run::{plan_sync, run_sync};
use crate::settings::SyncSettings;

/// Feed, destination and settings bundled behind a run lock, so at most one
/// sync runs per process.
pub struct SyncService {
    feed: Arc<dyn SourceFeed>,
    destination: Arc<dyn CatalogDestination>,
    settings: SyncSettings,
    run_lock: Mutex<()>,
}

impl SyncService {
    #[must_use]
    pub fn new(
        feed: Arc<dyn SourceFeed>,
        destination: Arc<dyn CatalogDestination>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            feed,
            destination,
            settings,
            run_lock: Mutex::new(()),
        }
    }

    /// Wires the HTTP feed and the Shopify destination from configuration.
    ///
    /// # Errors
    ///
    /// [`SyncError::FeedRequest`] or [`SyncError::Client`] if an HTTP client
    /// cannot be built.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SyncError> {
        let feed = HttpFeed::new(
            &config.feed_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        let client = ShopifyAdminClient::new(
            &config.shopify_admin_base_url(),
            &config.shopify_access_token,
            config.request_timeout_secs,
            &config.user_agent,
        )
        .map_err(SyncError::Client)?;
        let destination = ShopifyDestination::new(client, config.page_size);

        Ok(Self::new(
            Arc::new(feed),
            Arc::new(destination),
            SyncSettings::from_app_config(config),
        ))
    }

    #[must_use]
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// `true` while a run holds the lock.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }

    /// Runs a sync, waiting for any run already in progress to finish first.
    ///
    /// # Errors
    ///
    /// See [`run_sync`].
    pub async fn run(&self) -> Result<RunResult, SyncError> {
        let _guard = self.run_lock.lock().await;
        run_sync(self.feed.as_ref(), self.destination.as_ref(), &self.settings).await
    }

    /// Runs a sync unless one is already in progress.
    ///
    /// # Errors
    ///
    /// [`SyncError::AlreadyRunning`] if another run holds the lock, otherwise
    /// see [`run_sync`].
    pub async fn try_run(&self) -> Result<RunResult, SyncError> {
        let Ok(_guard) = self.run_lock.try_lock() else {
            return Err(SyncError::AlreadyRunning);
        };
        run_sync(self.feed.as_ref(), self.destination.as_ref(), &self.settings).await
    }

    /// Dry run; does not take the run lock.
    ///
    /// # Errors
    ///
    /// See [`plan_sync`].
    pub async fn plan(&self) -> Result<SyncPlan, SyncError> {
        plan_sync(self.feed.as_ref(), self.destination.as_ref()).await
    }
}
