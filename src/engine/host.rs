//! Runs one widget script with `fetch`, `log` and `parameters` bound.

use std::{sync::Arc, thread, time::Instant};

use reqwest_middleware::ClientWithMiddleware;
use tokio::{runtime::Handle, sync::oneshot};

use super::{
    error::{HostCallError, MarshalError, ScriptError},
    guest::{GuestContext, GuestEngine},
    log_channel::{LogChannel, LogEntry},
    rhai::RhaiEngine,
    value::GuestValue,
};
use crate::{
    config::{AppConfig, FetchConfig},
    fetch::{FetchBridge, FetchRequest},
    http_client::{HttpClientError, create_http_client},
};

/// A single request to run a widget script.
#[derive(Debug, Clone)]
pub struct ScriptInvocation {
    /// Script source.
    pub script: String,
    /// Base URL relative `fetch` URLs are resolved against.
    pub app_url: String,
    /// Bound read-only as `parameters`.
    pub parameters: GuestValue,
}

/// The outcome of an invocation together with everything it logged.
#[derive(Debug)]
pub struct Execution {
    /// The script's final value, or why there is none.
    pub result: Result<GuestValue, ScriptError>,
    /// Entries in the order they were logged. Kept on failure too.
    pub logs: Vec<LogEntry>,
}

/// Executes widget scripts, each in its own guest context.
///
/// The host is shared between concurrent invocations. Only the outbound HTTP
/// connection pool is common to them; engines, bindings and logs are created
/// per invocation.
pub struct ScriptHost {
    engine: RhaiEngine,
    client: Arc<ClientWithMiddleware>,
    fetch_config: FetchConfig,
}

impl ScriptHost {
    /// Builds a host from the application configuration.
    pub fn new(config: &AppConfig) -> Result<Self, HttpClientError> {
        let client = create_http_client(&config.http_base_config, &config.http_retry_config)?;
        Ok(Self::with_client(
            RhaiEngine::new(config.script.clone()),
            Arc::new(client),
            config.fetch.clone(),
        ))
    }

    /// Builds a host around an existing client.
    pub fn with_client(
        engine: RhaiEngine,
        client: Arc<ClientWithMiddleware>,
        fetch_config: FetchConfig,
    ) -> Self {
        Self { engine, client, fetch_config }
    }

    /// Runs `invocation` to completion on a dedicated thread sized by
    /// `RhaiConfig::thread_stack_size`.
    ///
    /// Must be called from within a multi-threaded Tokio runtime; `fetch` calls
    /// made by the script are driven on that runtime.
    pub async fn execute(&self, invocation: ScriptInvocation) -> Execution {
        let started = Instant::now();
        let log = LogChannel::new();
        let bridge = Arc::new(FetchBridge::new(
            Arc::clone(&self.client),
            invocation.app_url.clone(),
            self.fetch_config.default_timeout,
            log.clone(),
        ));
        let engine = self.engine.clone();
        let handle = Handle::current();
        let script_log = log.clone();
        let (result_tx, result_rx) = oneshot::channel();

        let spawned = thread::Builder::new()
            .name("widget-script".to_string())
            .stack_size(engine.config().thread_stack_size)
            .spawn(move || {
                let result = run_script(&engine, invocation, handle, bridge, script_log);
                // The receiver is gone only if the caller stopped waiting.
                let _ = result_tx.send(result);
            });

        let result = match spawned {
            Ok(_) => result_rx.await.unwrap_or_else(|_| {
                Err(ScriptError::Runtime("script thread terminated unexpectedly".to_string()))
            }),
            Err(e) => Err(ScriptError::Runtime(format!("failed to start script thread: {e}"))),
        };

        let logs = log.drain();
        let elapsed = started.elapsed();
        match &result {
            Ok(_) => tracing::info!(?elapsed, log_entries = logs.len(), "Widget script completed"),
            Err(error) => {
                tracing::warn!(%error, ?elapsed, log_entries = logs.len(), "Widget script failed")
            }
        }

        Execution { result, logs }
    }
}

/// Binds the host capabilities into a fresh context and evaluates the script.
/// Everything created here, including the script's values, is dropped on the
/// calling thread.
fn run_script(
    engine: &RhaiEngine,
    invocation: ScriptInvocation,
    handle: Handle,
    bridge: Arc<FetchBridge>,
    log: LogChannel,
) -> Result<GuestValue, ScriptError> {
    let mut context = engine.create_context();
    context.bind_value("parameters", &invocation.parameters)?;
    context.bind_function(
        "fetch",
        Box::new(move |argument: GuestValue| -> Result<GuestValue, HostCallError> {
            let request = FetchRequest::from_guest(argument)?;
            let response = handle.block_on(bridge.fetch(request))?;
            Ok(response.into())
        }),
    );
    context.bind_function(
        "log",
        Box::new(move |argument: GuestValue| -> Result<GuestValue, HostCallError> {
            let message = match argument {
                GuestValue::String(message) => message,
                other => serde_json::to_string(&other).map_err(MarshalError::from)?,
            };
            log.log(message);
            Ok(GuestValue::Null)
        }),
    );
    context.evaluate(&invocation.script)
}
