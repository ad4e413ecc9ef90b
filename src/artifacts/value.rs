//! Text form of parameter and metric values

use serde::Serialize;
use serde_json::Value;

use crate::Result;

/// Render a value as it is stored on disk.
///
/// Strings are written raw. Numbers, booleans and `null` use their JSON
/// text (`0.01`, `32`, `true`); arrays and objects become compact JSON.
/// Non-finite floats have no JSON form and are written as `null`.
///
/// # Errors
///
/// Returns error if the value cannot be represented as JSON
pub fn render_value<V: Serialize + ?Sized>(value: &V) -> Result<String> {
    Ok(match serde_json::to_value(value)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}
