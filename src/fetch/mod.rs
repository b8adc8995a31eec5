//! Outbound HTTP for widget scripts.
//!
//! A script calls `fetch` with either a URL string or a request object. The
//! bridge resolves the URL against the app's base URL, performs the request and
//! classifies the response body by its content.

mod bridge;
mod classify;
mod error;
mod request;

pub use bridge::FetchBridge;
pub use classify::{FetchResult, classify_response};
pub use error::FetchError;
pub use request::{FetchRequest, HttpMethod, resolve_url};
