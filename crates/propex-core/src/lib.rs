mod app_config;
mod config;
mod domain;
mod reconcile;
mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use domain::resolve_domain;
pub use reconcile::{combine_results, merge_field_map};
pub use types::{FieldMap, FieldSource, PageKind, ScrapeOutcome, ScrapedField};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("URL has no host: {0}")]
    MissingHost(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
