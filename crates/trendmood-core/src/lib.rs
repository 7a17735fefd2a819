//! Shared domain types and configuration for trendmood.

pub mod app_config;
pub mod config;
pub mod model;

pub use app_config::{AppConfig, ClassifierErrorPolicy, ClassifierKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use model::{
    BatchVerdict, ModelError, ScoredResult, SentimentLabel, SentimentResult, Verdict, VideoRecord,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
