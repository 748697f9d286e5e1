use std::time::Duration;

use shopsync_core::AppConfig;

use crate::audit::AuditLog;
use crate::retry::RetryPolicy;

/// Knobs for a single run.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Products reconciled at the same time.
    pub concurrency: usize,
    pub retry: RetryPolicy,
    /// Log a progress line every this many products; 0 disables it.
    pub progress_every: usize,
    /// Where run artifacts go; `None` skips persistence.
    pub audit: Option<AuditLog>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            concurrency: 2,
            retry: RetryPolicy::default(),
            progress_every: 10,
            audit: None,
        }
    }
}

impl SyncSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            concurrency: config.sync_concurrency,
            retry: RetryPolicy {
                pre_call_delay: Duration::from_millis(config.pre_call_delay_ms),
                max_retries: config.max_retries,
                backoff_base: Duration::from_millis(config.retry_backoff_base_ms),
                backoff_padding: Duration::from_millis(config.retry_backoff_padding_ms),
            },
            progress_every: 10,
            audit: Some(AuditLog::new(
                config.audit_dir.clone(),
                config.audit_retention,
            )),
        }
    }
}
