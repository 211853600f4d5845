//! Format detection.
//!
//! Classifies raw text as Postman v1, Postman v2.x, OpenAPI 3.x or unknown
//! using schema URLs first and structural heuristics second. Detection
//! never fails: malformed input is simply `Unknown`.

use serde_json::{Map, Value};
use waypost_domain::FormatTag;

use super::yaml::parse_document;

/// Classifies collection text.
#[must_use]
pub fn detect_format(content: &str) -> FormatTag {
    if is_openapi_spec(content) {
        return FormatTag::OpenApi;
    }

    let Some(root) = parse_json_object(content) else {
        return FormatTag::Unknown;
    };

    if let Some(tag) = schema_url(&root).and_then(format_from_schema_url) {
        return tag;
    }

    detect_from_structure(&root)
}

/// Returns true if the text looks like a Postman collection of any version.
#[must_use]
pub fn is_postman_collection(content: &str) -> bool {
    let Some(root) = parse_json_object(content) else {
        return false;
    };

    schema_url(&root).is_some_and(|schema| schema.contains("postman"))
        || (root.contains_key("info") && root.contains_key("item"))
        || (root.contains_key("id")
            && root.contains_key("name")
            && (root.contains_key("requests") || root.contains_key("order")))
}

/// Returns true if the text is an OpenAPI 3.x document (JSON or YAML).
#[must_use]
pub fn is_openapi_spec(content: &str) -> bool {
    parse_document(content)
        .ok()
        .as_ref()
        .and_then(openapi_version)
        .is_some_and(|version| version.starts_with("3."))
}

/// Reads the `openapi` version of a parsed document.
///
/// YAML writers often leave the version unquoted (`openapi: 3.0`), so numbers
/// are accepted and rendered back to text.
pub(crate) fn openapi_version(document: &Value) -> Option<String> {
    match document.get("openapi")? {
        Value::String(version) => Some(version.clone()),
        Value::Number(version) => Some(version.to_string()),
        _ => None,
    }
}

fn parse_json_object(content: &str) -> Option<Map<String, Value>> {
    if !content.trim_start().starts_with('{') {
        return None;
    }
    match serde_json::from_str(content) {
        Ok(Value::Object(root)) => Some(root),
        _ => None,
    }
}

fn schema_url(root: &Map<String, Value>) -> Option<&str> {
    root.get("info")?.get("schema")?.as_str()
}

fn format_from_schema_url(schema: &str) -> Option<FormatTag> {
    if schema.contains("v2.1.0") {
        Some(FormatTag::PostmanV2_1)
    } else if schema.contains("v2.0.0") {
        Some(FormatTag::PostmanV2_0)
    } else if schema.contains("v1.0.0") {
        Some(FormatTag::PostmanV1)
    } else if schema.contains("postman") {
        Some(FormatTag::PostmanV2_1)
    } else {
        None
    }
}

fn detect_from_structure(root: &Map<String, Value>) -> FormatTag {
    let has = |key: &str| root.contains_key(key);

    if has("requests") || (has("order") && !has("item")) {
        FormatTag::PostmanV1
    } else if has("info") && has("item") {
        FormatTag::PostmanV2_1
    } else if has("id") && has("name") && (has("requests") || has("order")) {
        FormatTag::PostmanV1
    } else {
        FormatTag::Unknown
    }
}
