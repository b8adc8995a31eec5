//! Engine-neutral interface for running guest scripts.
//!
//! A [`GuestEngine`] hands out one [`GuestContext`] per invocation. Dropping
//! the context tears down every binding made into it.

use super::{
    error::{HostCallError, MarshalError, ScriptError},
    value::GuestValue,
};

/// A host function callable from guest code. Arguments and results cross the
/// boundary as [`GuestValue`]s.
pub type HostFunction = Box<dyn Fn(GuestValue) -> Result<GuestValue, HostCallError> + Send + Sync>;

/// A scripting engine able to create isolated contexts.
pub trait GuestEngine {
    /// The context type produced by this engine.
    type Context: GuestContext;

    /// Creates a fresh context with no bindings.
    fn create_context(&self) -> Self::Context;
}

/// One isolated script environment.
pub trait GuestContext {
    /// Binds `value` as a read-only variable named `name`.
    fn bind_value(&mut self, name: &str, value: &GuestValue) -> Result<(), MarshalError>;

    /// Binds `function` as a one-argument guest function named `name`.
    fn bind_function(&mut self, name: &str, function: HostFunction);

    /// Runs `source` and returns the value it produced.
    fn evaluate(&mut self, source: &str) -> Result<GuestValue, ScriptError>;
}
