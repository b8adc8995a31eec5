//! Wire models shared between the widget host and the drivers that submit
//! widget scripts to it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for executing a widget script.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutionRequest {
    /// The widget script source.
    pub script: String,
    /// Base URL of the app the widget belongs to. Relative fetch URLs are
    /// resolved against it.
    pub app_url: String,
    /// User-supplied parameters, exposed to the script as `parameters`.
    #[serde(default)]
    pub parameters: Value,
}

/// Response payload for a successful script execution.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutionResponse {
    /// The value the script produced.
    pub result: Value,
    /// Messages the script logged, in emission order.
    pub logs: Vec<String>,
}

/// Response payload for a failed script execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Messages logged before the failure.
    #[serde(default)]
    pub logs: Vec<String>,
}
