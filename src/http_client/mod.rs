//! The HTTP client used by the fetch bridge.

mod client;

pub use client::{HttpClientError, create_http_client, create_retryable_http_client};
