use serde_json::Value;

use super::format_scalar;

/// Print just the key answer from the output.
///
/// Looks for well-known fields in priority order, then falls back to the
/// first field of the object.
pub fn print_minimal(value: &Value) {
    let priority_keys = ["status", "estimated_sequestration", "supported_project_types"];

    if let Value::Object(map) = value {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_scalar(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(value));
}
