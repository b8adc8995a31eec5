//! The `/execute` endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use widget_models::{ExecutionRequest, ExecutionResponse};

use super::{ApiError, ApiState};
use crate::engine::{GuestValue, ScriptError, ScriptInvocation};

/// Runs the submitted widget script and returns its result and logs.
pub async fn execute(
    State(state): State<ApiState>,
    Json(request): Json<ExecutionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invocation = ScriptInvocation {
        script: request.script,
        app_url: request.app_url,
        parameters: GuestValue::from(request.parameters),
    };

    let execution = state.host.execute(invocation).await;
    let logs: Vec<String> = execution.logs.into_iter().map(|entry| entry.message).collect();

    match execution.result {
        Ok(result) => {
            Ok((StatusCode::OK, Json(ExecutionResponse { result: result.into(), logs })))
        }
        Err(ScriptError::Runtime(message)) => Err(ApiError::InternalServerError(message)),
        Err(error) => Err(ApiError::ScriptFailed { message: error.to_string(), logs }),
    }
}
