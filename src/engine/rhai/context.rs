//! Rhai implementation of the guest engine interface.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use rhai::{Dynamic, Engine, EvalAltResult, FLOAT, INT, Scope};

use super::{
    conversions::{to_guest, to_host},
    create_engine,
};
use crate::{
    config::RhaiConfig,
    engine::{
        error::{MarshalError, ScriptError},
        guest::{GuestContext, GuestEngine, HostFunction},
        value::GuestValue,
    },
};

/// Produces a new, limit-configured Rhai engine for every context.
#[derive(Debug, Clone)]
pub struct RhaiEngine {
    config: RhaiConfig,
}

impl RhaiEngine {
    /// Creates an engine factory applying `config` to every context.
    pub fn new(config: RhaiConfig) -> Self {
        Self { config }
    }

    /// The limits applied to every context.
    pub fn config(&self) -> &RhaiConfig {
        &self.config
    }
}

impl GuestEngine for RhaiEngine {
    type Context = RhaiContext;

    fn create_context(&self) -> RhaiContext {
        RhaiContext {
            engine: create_engine(&self.config),
            scope: Scope::new(),
            execution_timeout: self.config.execution_timeout,
            max_value_depth: self.config.max_value_depth,
        }
    }
}

/// A single-use Rhai environment. Owns its engine, so functions bound here
/// are invisible to every other context.
pub struct RhaiContext {
    engine: Engine,
    scope: Scope<'static>,
    execution_timeout: Duration,
    max_value_depth: usize,
}

impl GuestContext for RhaiContext {
    fn bind_value(&mut self, name: &str, value: &GuestValue) -> Result<(), MarshalError> {
        let value = to_guest(value)?;
        self.scope.push_constant_dynamic(name, value);
        Ok(())
    }

    fn bind_function(&mut self, name: &str, function: HostFunction) {
        let function = Arc::new(function);
        let depth = self.max_value_depth;

        let call = Arc::clone(&function);
        self.engine.register_fn(name, move |argument: Dynamic| call_host(&call, argument, depth));

        // Numeric arguments would otherwise resolve to same-named builtins
        // such as the math package's `log`.
        let call = Arc::clone(&function);
        self.engine.register_fn(name, move |argument: INT| {
            call_host(&call, Dynamic::from(argument), depth)
        });
        let call = function;
        self.engine.register_fn(name, move |argument: FLOAT| {
            call_host(&call, Dynamic::from(argument), depth)
        });
    }

    fn evaluate(&mut self, source: &str) -> Result<GuestValue, ScriptError> {
        let timeout = self.execution_timeout;
        let deadline = Instant::now() + timeout;
        self.engine.on_progress(move |_| {
            (Instant::now() >= deadline).then(|| Dynamic::from("execution deadline exceeded"))
        });

        let value = self
            .engine
            .eval_with_scope::<Dynamic>(&mut self.scope, source)
            .map_err(|err| match *err {
                EvalAltResult::ErrorTerminated(..) => ScriptError::Timeout(timeout),
                other => ScriptError::GuestFault(other.to_string()),
            })?;

        Ok(to_host(&value, self.max_value_depth)?)
    }
}

fn call_host(
    function: &HostFunction,
    argument: Dynamic,
    max_depth: usize,
) -> Result<Dynamic, Box<EvalAltResult>> {
    let argument = to_host(&argument, max_depth).map_err(|e| e.to_string())?;
    let result = function(argument).map_err(|e| e.to_string())?;
    Ok(to_guest(&result).map_err(|e| e.to_string())?)
}
