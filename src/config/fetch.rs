use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{deserialize_duration_from_seconds, serialize_duration_to_seconds};

fn default_request_timeout() -> Duration {
    Duration::from_secs(15)
}

/// Settings for the `fetch` capability exposed to widget scripts.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FetchConfig {
    /// Timeout applied when a request does not carry its own `timeout`.
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "deserialize_duration_from_seconds",
        serialize_with = "serialize_duration_to_seconds"
    )]
    pub default_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { default_timeout: default_request_timeout() }
    }
}
