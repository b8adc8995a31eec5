//! Script execution: the guest engine, the values crossing into it and the
//! host that wires `fetch` and `log` into every invocation.

pub mod error;
pub mod guest;
pub mod host;
pub mod log_channel;
pub mod rhai;
pub mod value;

pub use error::{HostCallError, MarshalError, ScriptError};
pub use guest::{GuestContext, GuestEngine, HostFunction};
pub use host::{Execution, ScriptHost, ScriptInvocation};
pub use log_channel::{LogChannel, LogEntry};
pub use value::GuestValue;
