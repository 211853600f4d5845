//! HTTP request specification

use serde::{Deserialize, Serialize};

use super::{HttpMethod, KeyValue, RequestBody};
use crate::auth::AuthConfig;
use crate::id::generate_id;

/// A canonical HTTP request, independent of the format it was imported from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// Opaque URL, may contain `{{variable}}` placeholders. Never carries a
    /// query string: query parameters live in `query_params`.
    pub url: String,
    /// Ordered headers
    #[serde(default)]
    pub headers: Vec<KeyValue>,
    /// Ordered query parameters
    #[serde(default)]
    pub query_params: Vec<KeyValue>,
    /// Optional body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Optional authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,
}

impl HttpRequest {
    /// Creates a request with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            method,
            url: url.into(),
            headers: Vec::new(),
            query_params: Vec::new(),
            body: None,
            auth: None,
        }
    }

    /// Sets the headers.
    #[must_use]
    pub fn with_headers(mut self, headers: Vec<KeyValue>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn with_query_params(mut self, params: Vec<KeyValue>) -> Self {
        self.query_params = params;
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the authentication.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Returns true if a header with the given name exists (case-insensitive).
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|header| header.key.eq_ignore_ascii_case(name))
    }
}
