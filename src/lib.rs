#![warn(missing_docs)]
//! Widget host runs small, untrusted widget scripts on behalf of an app and
//! gives them a controlled way to call that app's HTTP API.

pub mod config;
pub mod engine;
pub mod fetch;
pub mod http_client;
pub mod http_server;
