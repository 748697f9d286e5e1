use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Source feed endpoint returning `{"listarProductos": [...]}`.
    pub feed_url: String,
    /// Bare store domain, e.g. `my-store.myshopify.com`.
    pub shopify_store_domain: String,
    pub shopify_api_version: String,
    pub shopify_access_token: String,
    /// Directory receiving the rotating `sync_log` / `discarded` audit files.
    pub audit_dir: PathBuf,
    pub audit_retention: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub sync_concurrency: usize,
    pub pre_call_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub retry_backoff_padding_ms: u64,
    pub page_size: u32,
    /// Six-field cron expression for the server's scheduled run; `None`
    /// disables the job.
    pub sync_cron: Option<String>,
}

impl AppConfig {
    /// Base URL of the Shopify Admin REST API for the configured store.
    #[must_use]
    pub fn shopify_admin_base_url(&self) -> String {
        format!(
            "https://{}/admin/api/{}",
            self.shopify_store_domain.trim_end_matches('/'),
            self.shopify_api_version
        )
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("feed_url", &self.feed_url)
            .field("shopify_store_domain", &self.shopify_store_domain)
            .field("shopify_api_version", &self.shopify_api_version)
            .field("shopify_access_token", &"[redacted]")
            .field("audit_dir", &self.audit_dir)
            .field("audit_retention", &self.audit_retention)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("sync_concurrency", &self.sync_concurrency)
            .field("pre_call_delay_ms", &self.pre_call_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("retry_backoff_padding_ms", &self.retry_backoff_padding_ms)
            .field("page_size", &self.page_size)
            .field("sync_cron", &self.sync_cron)
            .finish()
    }
}
