//! Rhai as the guest language for widget scripts.

mod context;
mod conversions;
mod create_engine;

pub use context::{RhaiContext, RhaiEngine};
pub use conversions::{json_to_guest, to_guest, to_host};
pub use create_engine::create_engine;
