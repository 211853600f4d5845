//! Document parsing for JSON and YAML input.
//!
//! YAML documents are normalised into a `serde_json::Value` tree so the
//! same JSON-based checks and typed decoding apply to both syntaxes.

use serde_json::{Map, Number, Value};
use waypost_application::ImportError;

/// Parses JSON or YAML text into a JSON tree.
///
/// Text starting with `{` or `[` is parsed as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns `ImportError::InvalidSyntax` if the text is neither.
pub fn parse_document(content: &str) -> Result<Value, ImportError> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| ImportError::InvalidSyntax(e.to_string()));
    }
    serde_yaml::from_str::<serde_yaml::Value>(content)
        .map(yaml_to_json)
        .map_err(|e| ImportError::InvalidSyntax(e.to_string()))
}

/// Converts a YAML tree into the equivalent JSON tree.
///
/// Mapping keys must be strings: other keys are dropped. Tagged values are
/// unwrapped, and non-finite floats become `null`.
#[must_use]
pub fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                if let serde_yaml::Value::String(key) = key {
                    object.insert(key, yaml_to_json(value));
                } else {
                    tracing::debug!(?key, "dropping non-string YAML key");
                }
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}
