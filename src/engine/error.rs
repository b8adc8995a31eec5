//! Errors raised at the script execution boundary.

use std::time::Duration;

use thiserror::Error;

use crate::fetch::FetchError;

/// Why a widget invocation did not produce a result.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script failed: a parse error, an uncaught throw, a failed host
    /// call it did not catch, or an exceeded resource limit.
    #[error("Script failed: {0}")]
    GuestFault(String),

    /// The script ran past its execution deadline.
    #[error("Script exceeded its execution time limit of {0:?}")]
    Timeout(Duration),

    /// A value could not be converted across the script boundary.
    #[error("Script value could not be marshalled: {0}")]
    Marshal(#[from] MarshalError),

    /// The thread running the script was lost.
    #[error("Script runtime error: {0}")]
    Runtime(String),
}

/// An error converting a value across the script boundary.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// The JSON representation could not be produced or parsed.
    #[error("JSON marshalling failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The value has no lossless JSON representation: functions, timestamps,
    /// blobs, custom types, non-finite numbers, integers outside the script's
    /// integer range, or nesting past the configured depth.
    #[error("{0} cannot cross the script boundary")]
    Unsupported(String),
}

/// An error returned by a host function bound into a script. The script sees
/// it as a thrown error it may catch.
#[derive(Debug, Error)]
pub enum HostCallError {
    /// The `fetch` request failed.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// An argument or result could not be marshalled.
    #[error(transparent)]
    Marshal(#[from] MarshalError),
}
