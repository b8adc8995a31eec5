use std::time::Duration;

use serde::Deserialize;

use super::deserialize_duration_from_ms;

/// Resource limits applied to every widget script engine.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RhaiConfig {
    /// Maximum number of operations a script can perform. Zero means unlimited.
    #[serde(default = "default_max_operations")]
    pub max_operations: u64,

    /// Maximum function call nesting depth
    #[serde(default = "default_max_call_levels")]
    pub max_call_levels: usize,

    /// Maximum size of strings in characters
    #[serde(default = "default_max_string_size")]
    pub max_string_size: usize,

    /// Maximum number of array elements
    #[serde(default = "default_max_array_size")]
    pub max_array_size: usize,

    /// Maximum number of object map properties
    #[serde(default = "default_max_map_size")]
    pub max_map_size: usize,

    /// Maximum nesting of arrays and maps in values crossing the script
    /// boundary
    #[serde(default = "default_max_value_depth")]
    pub max_value_depth: usize,

    /// Stack size in bytes of the thread each script runs on. Cloning and
    /// dropping nested script values recurses on this stack.
    #[serde(default = "default_thread_stack_size")]
    pub thread_stack_size: usize,

    /// Maximum wall-clock time per script. Checked between script operations;
    /// a `fetch` already in flight is bounded by its own request timeout.
    #[serde(
        default = "default_execution_timeout",
        deserialize_with = "deserialize_duration_from_ms"
    )]
    pub execution_timeout: Duration,
}

impl Default for RhaiConfig {
    fn default() -> Self {
        Self {
            max_operations: default_max_operations(),
            max_call_levels: default_max_call_levels(),
            max_string_size: default_max_string_size(),
            max_array_size: default_max_array_size(),
            max_map_size: default_max_map_size(),
            max_value_depth: default_max_value_depth(),
            thread_stack_size: default_thread_stack_size(),
            execution_timeout: default_execution_timeout(),
        }
    }
}

fn default_max_operations() -> u64 {
    1_000_000
}

fn default_max_call_levels() -> usize {
    32
}

// Fetched bodies can arrive as raw strings, so this is sized for API payloads.
fn default_max_string_size() -> usize {
    4 * 1024 * 1024
}

fn default_max_array_size() -> usize {
    100_000
}

fn default_max_map_size() -> usize {
    10_000
}

fn default_max_value_depth() -> usize {
    64
}

// Deep enough for the nesting reachable within `max_array_size`.
fn default_thread_stack_size() -> usize {
    256 * 1024 * 1024
}

fn default_execution_timeout() -> Duration {
    Duration::from_millis(30_000)
}
