//! Errors of the HTTP driver.

use std::net::AddrParseError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use widget_models::ErrorResponse;

/// A custom error type for the API that can be converted into an HTTP response.
pub enum ApiError {
    /// The script ran but did not produce a result. Carries the log entries
    /// written before the failure.
    ScriptFailed {
        /// Human-readable failure reason.
        message: String,
        /// Messages logged by the script.
        logs: Vec<String>,
    },

    /// Represents a generic internal server error.
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ScriptFailed { message, logs } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse { error: message, logs }),
            )
                .into_response(),
            ApiError::InternalServerError(err) => {
                tracing::error!("Internal server error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An internal server error occurred" })),
                )
                    .into_response()
            }
        }
    }
}

/// An error that prevents the HTTP server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured listen address is not a socket address.
    #[error("Invalid server.listen_address: {0}")]
    InvalidAddress(#[from] AddrParseError),

    /// Binding or serving failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
