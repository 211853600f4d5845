//! Postman Collection v1.0.0 Type Definitions
//!
//! v1 keeps requests and folders in separate flat arrays linked by ids;
//! `order` arrays carry the authored sequence.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{PostmanAuth, PostmanGraphQL, PostmanVariable};

/// Root structure for Postman Collection v1.0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct V1Collection {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(rename = "folders_order", default)]
    pub folders_order: Option<Vec<String>>,
    #[serde(default)]
    pub folders: Vec<V1Folder>,
    #[serde(default)]
    pub requests: Vec<V1Request>,
    #[serde(default)]
    pub variables: Vec<PostmanVariable>,
    #[serde(default)]
    pub auth: Option<PostmanAuth>,
}

/// Folder definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct V1Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(rename = "folders_order", default)]
    pub folders_order: Vec<String>,
}

/// Request definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1Request {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    /// Newline separated `Key: Value` lines
    #[serde(default)]
    pub headers: Option<String>,
    #[serde(default)]
    pub header_data: Option<Vec<V1Header>>,
    #[serde(default)]
    pub query_params: Option<Vec<V1QueryParam>>,
    #[serde(default)]
    pub data_mode: Option<String>,
    /// A `key=value&...` string or an array of params
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub raw_mode_data: Option<String>,
    #[serde(default)]
    pub graphql_mode_data: Option<PostmanGraphQL>,
    #[serde(default)]
    pub auth: Option<PostmanAuth>,
    #[serde(default)]
    pub current_helper: Option<String>,
    #[serde(default)]
    pub helper_attributes: Option<V1HelperAttributes>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
}

impl V1Request {
    /// The folder this request claims to live in, if any
    #[must_use]
    pub fn folder_ref(&self) -> Option<&str> {
        self.folder.as_deref().or(self.folder_id.as_deref())
    }
}

fn default_method() -> String {
    "GET".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct V1Header {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct V1QueryParam {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Entry of an array-shaped `data` field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct V1DataParam {
    pub key: String,
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "type", default)]
    pub param_type: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Legacy helper attributes (`currentHelper` auth)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1HelperAttributes {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_collection() {
        let json = r#"{
            "id": "c1",
            "name": "Legacy",
            "order": ["r1"],
            "requests": [{"id": "r1", "name": "Ping", "url": "/ping", "folderId": "f9"}]
        }"#;

        let collection: V1Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.name, "Legacy");
        assert!(collection.folders_order.is_none());
        assert_eq!(collection.requests[0].method, "GET");
        assert_eq!(collection.requests[0].folder_ref(), Some("f9"));
    }

    #[test]
    fn test_data_accepts_string_and_array() {
        let text: V1Request =
            serde_json::from_str(r#"{"id": "1", "name": "a", "dataMode": "urlencoded", "data": "a=1"}"#)
                .unwrap();
        assert!(text.data.as_ref().is_some_and(Value::is_string));

        let list: V1Request = serde_json::from_str(
            r#"{"id": "1", "name": "a", "dataMode": "params", "data": [{"key": "a", "value": "1", "type": "text"}]}"#,
        )
        .unwrap();
        assert!(list.data.as_ref().is_some_and(Value::is_array));
    }
}
