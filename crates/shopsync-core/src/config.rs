use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so tests can
/// drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;
    use std::str::FromStr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    }

    let at_least_one = |var: &str, value: usize| -> Result<usize, ConfigError> {
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let feed_url = require("SHOPSYNC_FEED_URL")?;
    let shopify_store_domain = require("SHOPIFY_STORE_DOMAIN")?;
    let shopify_api_version = require("SHOPIFY_API_VERSION")?;
    let shopify_access_token = require("SHOPIFY_API_PASSWORD")?;

    let env = parse_environment(&or_default("SHOPSYNC_ENV", "development"))?;

    let bind_addr: SocketAddr = parse_as(
        "SHOPSYNC_BIND_ADDR",
        &or_default("SHOPSYNC_BIND_ADDR", "0.0.0.0:3000"),
    )?;
    let log_level = or_default("SHOPSYNC_LOG_LEVEL", "info");
    let audit_dir = PathBuf::from(or_default("SHOPSYNC_LOG_DIR", "./logs"));
    let audit_retention = at_least_one(
        "SHOPSYNC_LOG_RETENTION",
        parse_as(
            "SHOPSYNC_LOG_RETENTION",
            &or_default("SHOPSYNC_LOG_RETENTION", "5"),
        )?,
    )?;

    let request_timeout_secs: u64 = parse_as(
        "SHOPSYNC_REQUEST_TIMEOUT_SECS",
        &or_default("SHOPSYNC_REQUEST_TIMEOUT_SECS", "30"),
    )?;
    let user_agent = or_default("SHOPSYNC_USER_AGENT", "shopsync/0.1 (catalog-sync)");

    let sync_concurrency = at_least_one(
        "SHOPSYNC_CONCURRENCY",
        parse_as(
            "SHOPSYNC_CONCURRENCY",
            &or_default("SHOPSYNC_CONCURRENCY", "2"),
        )?,
    )?;
    let pre_call_delay_ms: u64 = parse_as(
        "SHOPSYNC_PRE_CALL_DELAY_MS",
        &or_default("SHOPSYNC_PRE_CALL_DELAY_MS", "500"),
    )?;
    let max_retries: u32 = parse_as(
        "SHOPSYNC_MAX_RETRIES",
        &or_default("SHOPSYNC_MAX_RETRIES", "5"),
    )?;
    let retry_backoff_base_ms: u64 = parse_as(
        "SHOPSYNC_RETRY_BACKOFF_BASE_MS",
        &or_default("SHOPSYNC_RETRY_BACKOFF_BASE_MS", "2000"),
    )?;
    let retry_backoff_padding_ms: u64 = parse_as(
        "SHOPSYNC_RETRY_BACKOFF_PADDING_MS",
        &or_default("SHOPSYNC_RETRY_BACKOFF_PADDING_MS", "700"),
    )?;

    let page_size: u32 = parse_as(
        "SHOPSYNC_PAGE_SIZE",
        &or_default("SHOPSYNC_PAGE_SIZE", "250"),
    )?;
    // Shopify rejects `limit` above 250.
    if !(1..=250).contains(&page_size) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPSYNC_PAGE_SIZE".to_string(),
            reason: format!("{page_size} is outside 1..=250"),
        });
    }

    let sync_cron = lookup("SHOPSYNC_SYNC_CRON")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        feed_url,
        shopify_store_domain,
        shopify_api_version,
        shopify_access_token,
        audit_dir,
        audit_retention,
        request_timeout_secs,
        user_agent,
        sync_concurrency,
        pre_call_delay_ms,
        max_retries,
        retry_backoff_base_ms,
        retry_backoff_padding_ms,
        page_size,
        sync_cron,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPSYNC_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
