use std::time::Duration;

use thiserror::Error;

/// Errors surfaced to a script by a failed `fetch` call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed (connection, protocol or body
    /// decoding failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// No complete response arrived within the request timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The request description could not be interpreted.
    #[error("malformed request: {0}")]
    MalformedSpec(String),
}

impl FetchError {
    pub(crate) fn from_middleware(err: reqwest_middleware::Error, timeout: Duration) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => Self::from_reqwest(err, timeout),
            other => FetchError::Transport(other.to_string()),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout)
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
