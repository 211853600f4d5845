//! Postman Collection v2.0/v2.1 Type Definitions
//!
//! These types mirror the Postman JSON shape field-for-field and are shared by
//! the v2 importer and the v2.1 exporter. Deserialization is lenient: most
//! fields are optional and several accept more than one JSON shape.

#![allow(missing_docs)]

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::import::value_text;

/// Schema URL written into exported collections.
pub const SCHEMA_V2_1: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Root structure for Postman Collection v2.x
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanCollection {
    pub info: PostmanInfo,
    #[serde(default)]
    pub item: Vec<PostmanItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<PostmanVariable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<PostmanAuth>,
}

/// Collection metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanInfo {
    #[serde(rename = "_postman_id", default, skip_serializing_if = "Option::is_none")]
    pub postman_id: Option<String>,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "description_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// An item is a folder iff it has an `item` array and no `request`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanItem {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "description_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<Self>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<PostmanRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<PostmanAuth>,
}

impl PostmanItem {
    /// Returns true if this item is a folder
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        self.item.is_some() && self.request.is_none()
    }
}

/// Postman Request definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanRequest {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub url: PostmanUrl,
    #[serde(default)]
    pub header: Vec<PostmanHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<PostmanBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<PostmanAuth>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// URL can be either a bare string or a structured object.
///
/// Decoding inspects the JSON node kind first and then branches, rather than
/// trying each shape in turn.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PostmanUrl {
    Raw(String),
    Structured(PostmanUrlObject),
}

impl Default for PostmanUrl {
    fn default() -> Self {
        Self::Raw(String::new())
    }
}

impl<'de> Deserialize<'de> for PostmanUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::default()),
            Value::String(raw) => Ok(Self::Raw(raw)),
            node @ Value::Object(_) => serde_json::from_value(node)
                .map(Self::Structured)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "url must be a string or an object, found {}",
                node_kind(&other)
            ))),
        }
    }
}

impl PostmanUrl {
    /// Returns the full URL text, rebuilding it from parts when `raw` is absent.
    #[must_use]
    pub fn raw(&self) -> String {
        match self {
            Self::Raw(raw) => raw.clone(),
            Self::Structured(url) => url.raw.clone().unwrap_or_else(|| url.rebuild()),
        }
    }

    /// Returns structured query parameters, if any.
    #[must_use]
    pub fn query(&self) -> &[PostmanQueryParam] {
        match self {
            Self::Raw(_) => &[],
            Self::Structured(url) => &url.query,
        }
    }
}

/// Structured URL object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanUrlObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(
        default,
        deserialize_with = "host_segments",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub host: Vec<String>,
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<String>,
    #[serde(
        default,
        deserialize_with = "path_segments",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<PostmanQueryParam>,
}

impl PostmanUrlObject {
    fn rebuild(&self) -> String {
        let mut url = String::new();
        if let Some(protocol) = &self.protocol {
            url.push_str(protocol);
            url.push_str("://");
        }
        url.push_str(&self.host.join("."));
        if let Some(port) = &self.port {
            url.push(':');
            url.push_str(port);
        }
        if !self.path.is_empty() {
            url.push('/');
            url.push_str(&self.path.join("/"));
        }
        let query: Vec<String> = self
            .query
            .iter()
            .filter(|param| !param.disabled)
            .map(|param| {
                format!(
                    "{}={}",
                    param.key.as_deref().unwrap_or_default(),
                    param.value.as_deref().unwrap_or_default()
                )
            })
            .collect();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }
}

/// Query parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanQueryParam {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(
        default,
        deserialize_with = "description_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// Request header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanHeader {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(
        default,
        deserialize_with = "description_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub header_type: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// Request body. `mode` is written even when null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanBody {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urlencoded: Option<Vec<PostmanFormParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formdata: Option<Vec<PostmanFormParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PostmanBodyFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphql: Option<PostmanGraphQL>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PostmanBodyOptions>,
}

/// Form parameter, used by both `urlencoded` and `formdata` modes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanFormParam {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// File path(s) for `type: file` entries; Postman writes a string or an array
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub src: Option<String>,
    #[serde(
        default,
        deserialize_with = "description_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// Binary file body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanBodyFile {
    #[serde(default, deserialize_with = "optional_text")]
    pub src: Option<String>,
}

/// GraphQL body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanGraphQL {
    #[serde(default)]
    pub query: String,
    /// Variables as JSON text; object values are re-serialized
    #[serde(
        default,
        deserialize_with = "json_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub variables: Option<String>,
}

/// Body options (e.g., raw language)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanBodyOptions {
    #[serde(default)]
    pub raw: Option<PostmanRawOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanRawOptions {
    #[serde(default)]
    pub language: Option<String>,
}

/// Authentication configuration.
///
/// Parameter lists are arrays of `{key, value}` in v2.1 and plain objects in
/// v2.0; both decode into [`PostmanAuthParams`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanAuth {
    #[serde(rename = "type")]
    pub auth_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic: Option<PostmanAuthParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer: Option<PostmanAuthParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apikey: Option<PostmanAuthParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<PostmanAuthParams>,
}

impl PostmanAuth {
    /// Creates an auth block of the given type with no parameters.
    #[must_use]
    pub fn of_type(auth_type: impl Into<String>) -> Self {
        Self {
            auth_type: auth_type.into(),
            basic: None,
            bearer: None,
            apikey: None,
            oauth2: None,
        }
    }
}

/// Ordered auth parameters
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PostmanAuthParams(pub Vec<PostmanAuthParam>);

impl PostmanAuthParams {
    /// Get a parameter value by key as text
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.0
            .iter()
            .find(|p| p.key == key)
            .and_then(|p| value_text(&p.value))
    }

    /// Builds string parameters from `(key, value)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(key, value)| PostmanAuthParam {
                    key: (*key).to_string(),
                    value: Value::String((*value).to_string()),
                    param_type: Some("string".to_string()),
                })
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for PostmanAuthParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::default()),
            node @ Value::Array(_) => serde_json::from_value(node)
                .map(Self)
                .map_err(D::Error::custom),
            Value::Object(map) => Ok(Self(
                map.into_iter()
                    .map(|(key, value)| PostmanAuthParam {
                        key,
                        value,
                        param_type: None,
                    })
                    .collect(),
            )),
            other => Err(D::Error::custom(format!(
                "auth parameters must be an array or an object, found {}",
                node_kind(&other)
            ))),
        }
    }
}

/// Auth parameter (key-value pair)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanAuthParam {
    pub key: String,
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
}

/// Variable definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanVariable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

fn node_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Descriptions are a string or `{ "content": ..., "type": ... }`.
fn description_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("content").and_then(Value::as_str).map(String::from),
        _ => None,
    })
}

/// Host is a dotted string or an array of segments.
fn host_segments<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Value::deserialize(deserializer).map(|value| split_segments(value, '.'))
}

/// Path is a slashed string or an array of segments.
fn path_segments<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Value::deserialize(deserializer).map(|value| split_segments(value, '/'))
}

fn split_segments(value: Value, separator: char) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split(separator)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(map) => map.get("value").and_then(value_text),
                other => value_text(other),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Scalars become text; arrays yield their first element.
fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.first().and_then(value_text),
        other => value_text(&other),
    })
}

/// JSON text kept verbatim, structured JSON serialized.
fn json_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}
