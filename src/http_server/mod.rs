//! HTTP driver for the script host.
//!
//! Exposes `GET /health` and `POST /execute`. Each execute request runs one
//! widget script and answers with its result and logs.

mod error;
mod execute;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, post},
};
pub use error::{ApiError, ServerError};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{config::AppConfig, engine::ScriptHost};

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct ApiState {
    /// The host every request is executed on.
    pub host: Arc<ScriptHost>,
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Builds the router with all routes attached to `state`.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/execute", post(execute::execute))
        .with_state(state)
}

/// Serves the API on an already bound listener until the server stops.
pub async fn serve(listener: TcpListener, state: ApiState) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, router(state).into_make_service()).await?;
    Ok(())
}

/// Runs the HTTP server based on the provided application configuration.
pub async fn run_server_from_config(
    config: &AppConfig,
    host: Arc<ScriptHost>,
) -> Result<(), ServerError> {
    let addr: SocketAddr = config.server.listen_address.parse()?;
    let listener = TcpListener::bind(addr).await?;
    serve(listener, ApiState { host }).await
}
