use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{BaseHttpClientConfig, FetchConfig, HttpRetryConfig, RhaiConfig, ServerConfig};

/// Application configuration for the widget host.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Limits applied to widget scripts.
    #[serde(default)]
    pub script: RhaiConfig,

    /// Settings for the `fetch` capability.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Configuration for the base HTTP client.
    #[serde(default)]
    pub http_base_config: BaseHttpClientConfig,

    /// Retry policy for outbound widget requests.
    #[serde(default)]
    pub http_retry_config: HttpRetryConfig,
}

impl AppConfig {
    /// Creates a new `AppConfig` from `<config_dir>/app.yaml`, overridden by
    /// `WIDGET_HOST__*` environment variables.
    ///
    /// A missing file is not an error; every setting has a default.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir = config_dir.unwrap_or("configs");
        Config::builder()
            .add_source(File::with_name(&format!("{config_dir}/app.yaml")).required(false))
            .add_source(Environment::with_prefix("WIDGET_HOST").separator("__"))
            .build()?
            .try_deserialize()
    }
}
