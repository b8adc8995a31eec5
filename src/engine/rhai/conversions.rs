//! Marshalling between host `GuestValue`s and Rhai `Dynamic` values.
//!
//! Values always cross the boundary as JSON text: the host serializes, the
//! other side parses a fresh copy. No host reference ever reaches a script,
//! and only JSON-shaped values are accepted back.

use rhai::{Array, Dynamic, FLOAT, INT, Map};

use crate::engine::{error::MarshalError, value::GuestValue};

/// Deepest nesting `serde_json` will parse; deeper host values could never
/// reach a script anyway.
const MAX_JSON_DEPTH: usize = 128;

/// Converts a host value into a fresh Rhai value.
///
/// Integers the script cannot hold as an `INT` are rejected instead of being
/// widened to a float.
pub fn to_guest(value: &GuestValue) -> Result<Dynamic, MarshalError> {
    ensure_representable(value, MAX_JSON_DEPTH)?;
    let text = serde_json::to_string(value)?;
    json_to_guest(&text)
}

/// Parses JSON text into a Rhai value.
pub fn json_to_guest(text: &str) -> Result<Dynamic, MarshalError> {
    Ok(serde_json::from_str::<Dynamic>(text)?)
}

/// Converts a Rhai value back into a host value.
///
/// Fails with [`MarshalError::Unsupported`] on the first value that has no
/// JSON shape, or on arrays and maps nested more than `max_depth` levels deep,
/// rather than substituting a placeholder.
pub fn to_host(value: &Dynamic, max_depth: usize) -> Result<GuestValue, MarshalError> {
    ensure_marshallable(value, max_depth)?;
    let text = serde_json::to_string(value)?;
    Ok(serde_json::from_str(&text)?)
}

fn too_deep(max_depth: usize) -> MarshalError {
    MarshalError::Unsupported(format!("value nested deeper than {max_depth} levels"))
}

fn ensure_representable(value: &GuestValue, depth: usize) -> Result<(), MarshalError> {
    match value {
        GuestValue::Number(number) if number.is_u64() && number.as_i64().is_none() => Err(
            MarshalError::Unsupported(format!("integer {number} outside the script integer range")),
        ),
        GuestValue::Sequence(_) | GuestValue::Mapping(_) if depth == 0 => {
            Err(too_deep(MAX_JSON_DEPTH))
        }
        GuestValue::Sequence(items) => {
            items.iter().try_for_each(|item| ensure_representable(item, depth - 1))
        }
        GuestValue::Mapping(map) => {
            map.values().try_for_each(|item| ensure_representable(item, depth - 1))
        }
        _ => Ok(()),
    }
}

fn ensure_marshallable(value: &Dynamic, max_depth: usize) -> Result<(), MarshalError> {
    check_marshallable(value, max_depth, max_depth)
}

fn check_marshallable(value: &Dynamic, depth: usize, max_depth: usize) -> Result<(), MarshalError> {
    if value.is_shared() {
        return check_marshallable(&value.flatten_clone(), depth, max_depth);
    }

    if value.is_unit()
        || value.is::<bool>()
        || value.is::<INT>()
        || value.is_string()
        || value.is_char()
    {
        return Ok(());
    }

    if let Some(float) = value.read_lock::<FLOAT>() {
        return if float.is_finite() {
            Ok(())
        } else {
            Err(MarshalError::Unsupported(format!("non-finite number {}", *float)))
        };
    }

    if value.is_array() || value.is_map() {
        if depth == 0 {
            return Err(too_deep(max_depth));
        }
        if let Some(array) = value.read_lock::<Array>() {
            return array.iter().try_for_each(|item| check_marshallable(item, depth - 1, max_depth));
        }
        if let Some(map) = value.read_lock::<Map>() {
            return map.values().try_for_each(|item| check_marshallable(item, depth - 1, max_depth));
        }
    }

    Err(MarshalError::Unsupported(format!("value of type '{}'", value.type_name())))
}
