//! Configuration module for the widget host.

mod app_config;
mod fetch;
mod helpers;
mod http_base;
mod http_retry;
mod rhai;
mod server;

pub use app_config::AppConfig;
pub use fetch::FetchConfig;
pub use helpers::{
    deserialize_duration_from_ms, deserialize_duration_from_seconds, serialize_duration_to_ms,
    serialize_duration_to_seconds,
};
pub use http_base::BaseHttpClientConfig;
pub use http_retry::{HttpRetryConfig, JitterSetting};
pub use rhai::RhaiConfig;
pub use server::ServerConfig;
