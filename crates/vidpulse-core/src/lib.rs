//! Shared configuration and retry primitives for VidPulse.

use thiserror::Error;

mod app_config;
mod config;
pub mod retry;


pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use retry::RetryPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
