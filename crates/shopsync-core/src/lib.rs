pub mod app_config;
pub mod catalog;
pub mod config;
pub mod products;
pub mod run;

pub use app_config::{AppConfig, Environment};
pub use catalog::{DestinationIndex, DestinationRecord};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    CanonicalProduct, CanonicalVariant, ProductSnapshot, VariantSnapshot, ABSENT_PRICE,
};
pub use run::{
    Action, ActionCounts, DiscardedProduct, OutcomeEntry, RunResult, RunSummary, SyncPlan,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
