//! Schema type names
//!
//! Produces a short type label for a JSON-Schema node. `$ref` pointers are
//! named, never dereferenced, so the label carries the component name only.

use serde_json::Value;

/// Resolve a display type for a schema node
///
/// - explicit `type` is returned as is
/// - `array` recurses into `items`: `array[<inner>]`
/// - a `type` list (OpenAPI 3.1) is joined with ` | `
/// - `$ref` yields the last path segment of the pointer
/// - anything else is `object`
pub fn schema_type(schema: &Value) -> String {
    match schema.get("type") {
        Some(Value::String(t)) if t == "array" => {
            let inner = schema
                .get("items")
                .map(schema_type)
                .unwrap_or_else(|| "object".to_string());
            format!("array[{}]", inner)
        }
        Some(Value::String(t)) if !t.is_empty() => t.clone(),
        Some(Value::Array(types)) if types.iter().any(Value::is_string) => types
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" | "),
        _ => match schema.get("$ref").and_then(Value::as_str) {
            Some(pointer) => ref_name(pointer).to_string(),
            None => "object".to_string(),
        },
    }
}

/// Last segment of a `$ref` pointer (`#/components/schemas/Pet` -> `Pet`)
pub fn ref_name(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}
