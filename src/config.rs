//! Remote store configuration: endpoint, credential, and target table.
//! Read from the environment with project defaults as fallback.
use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://wqclspynbdghfsosqygg.supabase.co";
pub const DEFAULT_API_KEY: &str = "sb_publishable_TnW2BTNaZvow6Gm8DbxU-w_5YyQN3Av";
pub const DEFAULT_TABLE: &str = "tw_swipefile";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub api_key: String,
    pub table: String,
}

/// Build configuration from `SWIPEFILE_URL`, `SWIPEFILE_KEY` and
/// `SWIPEFILE_TABLE`, falling back to the project defaults.
pub fn from_env() -> Result<Config, ConfigError> {
    build(
        std::env::var("SWIPEFILE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        std::env::var("SWIPEFILE_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string()),
        std::env::var("SWIPEFILE_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string()),
    )
}

fn build(base_url: String, api_key: String, table: String) -> Result<Config, ConfigError> {
    if base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("store URL must be non-empty"));
    }
    let base_url = Url::parse(&base_url)
        .map_err(|_| ConfigError::Invalid("store URL must be a valid absolute URL"))?;
    if api_key.trim().is_empty() {
        return Err(ConfigError::Invalid("store API key must be non-empty"));
    }
    if table.trim().is_empty() {
        return Err(ConfigError::Invalid("store table must be non-empty"));
    }
    Ok(Config {
        base_url,
        api_key,
        table,
    })
}
