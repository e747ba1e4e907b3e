use crate::app_config::AppConfig;
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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
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
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let youtube_api_key = require("YOUTUBE_API_KEY")?;

    let bind_addr = parse_addr("VIDPULSE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("VIDPULSE_LOG_LEVEL", "info");

    let sentiment_url = lookup("VIDPULSE_SENTIMENT_URL").ok();
    let cohere_api_key = lookup("COHERE_API_KEY").ok();
    let cohere_base_url = or_default("VIDPULSE_COHERE_URL", "https://api.cohere.com");
    let generation_model = or_default("VIDPULSE_GENERATION_MODEL", "command-r");

    let max_comments = parse_usize("VIDPULSE_MAX_COMMENTS", "100")?;
    let max_comment_length = parse_usize("VIDPULSE_MAX_COMMENT_LENGTH", "512")?;
    let request_timeout_secs = parse_u64("VIDPULSE_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("VIDPULSE_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("VIDPULSE_RETRY_BACKOFF_BASE_MS", "1000")?;
    let export_dir = PathBuf::from(or_default("VIDPULSE_EXPORT_DIR", "./reports"));

    Ok(AppConfig {
        bind_addr,
        log_level,
        youtube_api_key,
        sentiment_url,
        cohere_api_key,
        cohere_base_url,
        generation_model,
        max_comments,
        max_comment_length,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        export_dir,
    })
}
