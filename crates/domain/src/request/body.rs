//! HTTP Request body types

use serde::{Deserialize, Serialize};

use super::{FormField, KeyValue};

/// HTTP request body. Exactly one variant is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON document kept as text (formatting is preserved)
    Json {
        /// The JSON text
        content: String,
    },
    /// XML document kept as text
    Xml {
        /// The XML text
        content: String,
    },
    /// Any other textual payload
    Raw {
        /// The payload
        content: String,
        /// The MIME type sent with it (e.g., "text/plain")
        content_type: String,
    },
    /// Form URL encoded body
    FormUrlEncoded {
        /// Ordered fields
        fields: Vec<KeyValue>,
    },
    /// Multipart form data
    FormData {
        /// Ordered fields (text or file)
        fields: Vec<FormField>,
    },
    /// Binary body read from a file
    Binary {
        /// Path of the file to send
        file_path: String,
    },
    /// GraphQL query
    #[serde(rename = "graphql")]
    GraphQL {
        /// The query document
        query: String,
        /// Variables as a JSON string
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variables: Option<String>,
    },
}

impl RequestBody {
    /// Creates a JSON body.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Json {
            content: content.into(),
        }
    }

    /// Creates an XML body.
    #[must_use]
    pub fn xml(content: impl Into<String>) -> Self {
        Self::Xml {
            content: content.into(),
        }
    }

    /// Creates a raw body with an explicit content type.
    #[must_use]
    pub fn raw(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
            content_type: content_type.into(),
        }
    }

    /// Returns true if this is the `None` variant.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the MIME type implied by the variant, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None | Self::Binary { .. } => None,
            Self::Json { .. } | Self::GraphQL { .. } => Some("application/json"),
            Self::Xml { .. } => Some("application/xml"),
            Self::Raw { content_type, .. } => Some(content_type),
            Self::FormUrlEncoded { .. } => Some("application/x-www-form-urlencoded"),
            Self::FormData { .. } => Some("multipart/form-data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(r#"{"key": "value"}"#);
        assert_eq!(body.content_type(), Some("application/json"));
        assert!(!body.is_none());
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::default();
        assert!(body.is_none());
        assert_eq!(body.content_type(), None);
    }

    #[test]
    fn test_raw_body_uses_declared_type() {
        let body = RequestBody::raw("hello", "text/csv");
        assert_eq!(body.content_type(), Some("text/csv"));
    }

    #[test]
    fn test_serde_tag() {
        let body = RequestBody::GraphQL {
            query: "{ me { id } }".to_string(),
            variables: None,
        };
        let value = serde_json::to_value(&body).unwrap_or_default();
        assert_eq!(value["type"], "graphql");
    }
}
