use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::draft::images::DEFAULT_MAX_IMAGE_BYTES;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONFIG_DIR: &str = "config";

/// Backend endpoint configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the storefront backend, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Application configuration, layered from `config/default`, an
/// environment-specific file, and `APP_`-prefixed environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Application environment ("development", "production", ...).
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level filter.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging).
    #[serde(default)]
    pub log_json: bool,

    pub api: ApiConfig,

    /// Size ceiling for image attachments, in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());

        let settings = Config::builder()
            .set_default("environment", environment.clone())?
            .add_source(File::with_name(&format!("{CONFIG_DIR}/default")).required(false))
            .add_source(File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.environment == DEFAULT_ENV
    }
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_image_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}
