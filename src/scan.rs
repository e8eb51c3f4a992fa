use serde_json::Value;

/// Evaluates whether a deserialized Kubernetes object contains `needle`
/// anywhere in its tree.
///
/// Maps are searched by value, arrays element-wise, strings by case-sensitive
/// substring. Non-string scalars never match. The input is a deserialized
/// JSON tree and therefore acyclic, so plain recursion terminates.
pub fn object_contains(object: &Value, needle: &str) -> bool {
    match object {
        Value::Object(map) => map.values().any(|v| object_contains(v, needle)),
        Value::Array(items) => items.iter().any(|v| object_contains(v, needle)),
        Value::String(s) => s.contains(needle),
        _ => false,
    }
}
