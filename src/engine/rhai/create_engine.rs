use rhai::Engine;

use crate::config::RhaiConfig;

/// Language features widget scripts must not reach. Output goes through the
/// bound `log` function instead of `print`/`debug`.
const DISABLED_SYMBOLS: &[&str] = &["eval", "import", "export", "print", "debug"];

/// Creates a Rhai engine with the configured resource limits applied.
pub fn create_engine(rhai_config: &RhaiConfig) -> Engine {
    let mut engine = Engine::new();

    engine.set_max_operations(rhai_config.max_operations);
    engine.set_max_call_levels(rhai_config.max_call_levels);
    engine.set_max_string_size(rhai_config.max_string_size);
    engine.set_max_array_size(rhai_config.max_array_size);
    engine.set_max_map_size(rhai_config.max_map_size);

    for &symbol in DISABLED_SYMBOLS {
        engine.disable_symbol(symbol);
    }

    engine
}
