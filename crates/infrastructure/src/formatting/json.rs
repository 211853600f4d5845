//! JSON formatting helpers.
//!
//! Body formatting is best-effort: text that does not parse is returned
//! unchanged instead of failing the import.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Serializes a value as JSON with 2-space indentation.
///
/// Object keys keep their insertion order.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_pretty_string<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Serializes a value as a JSON document: 2-space indentation and a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_document<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut json = to_pretty_string(value)?;
    json.push('\n');
    Ok(json)
}

/// Pretty-prints JSON text, or returns it unchanged if it does not parse.
#[must_use]
pub fn pretty(content: &str) -> String {
    serde_json::from_str::<serde_json::Value>(content)
        .and_then(|value| to_pretty_string(&value))
        .unwrap_or_else(|e| {
            tracing::debug!(error = %e, "JSON body left unformatted");
            content.to_string()
        })
}

/// Minifies JSON text, or returns it unchanged if it does not parse.
#[must_use]
pub fn minify(content: &str) -> String {
    serde_json::from_str::<serde_json::Value>(content)
        .map(|value| value.to_string())
        .unwrap_or_else(|_| content.to_string())
}

/// Returns true if the text is a syntactically valid JSON document.
#[must_use]
pub fn is_valid(content: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(content).is_ok()
}
