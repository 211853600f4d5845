//! Authentication configuration types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Authentication configuration for a request, folder or collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,
    /// Basic authentication
    Basic {
        /// Username (may contain variables)
        username: String,
        /// Password (may contain variables)
        password: String,
    },
    /// Bearer token authentication
    Bearer {
        /// The bearer token (may contain variables like `{{access_token}}`)
        token: String,
    },
    /// API Key authentication
    ApiKey {
        /// Header or query parameter name
        key: String,
        /// The API key value
        value: String,
        /// Where to add the key
        add_to: ApiKeyLocation,
    },
}

/// Location for API key authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiKeyLocation {
    /// Add to request headers
    #[default]
    Header,
    /// Add to query parameters
    QueryParam,
}

impl ApiKeyLocation {
    /// Returns the Postman `in` value for this location.
    #[must_use]
    pub const fn as_postman_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::QueryParam => "query",
        }
    }
}

impl fmt::Display for ApiKeyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_postman_str())
    }
}

impl FromStr for ApiKeyLocation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "query" | "query_param" => Ok(Self::QueryParam),
            other => Err(DomainError::UnsupportedKeyLocation(other.to_string())),
        }
    }
}

impl AuthConfig {
    /// Returns true if authentication is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Creates a bearer token authentication.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Creates a basic authentication.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates an API key authentication.
    #[must_use]
    pub fn api_key(
        key: impl Into<String>,
        value: impl Into<String>,
        add_to: ApiKeyLocation,
    ) -> Self {
        Self::ApiKey {
            key: key.into(),
            value: value.into(),
            add_to,
        }
    }

    /// Returns the auth type name used in logs and summaries.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
            Self::ApiKey { .. } => "apikey",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_auth_none() {
        let auth = AuthConfig::None;
        assert!(!auth.is_configured());
        assert_eq!(auth.type_name(), "none");
    }

    #[test]
    fn test_bearer_auth() {
        let auth = AuthConfig::bearer("{{token}}");
        assert!(auth.is_configured());
        assert_eq!(
            auth,
            AuthConfig::Bearer {
                token: "{{token}}".to_string()
            }
        );
    }

    #[test]
    fn test_api_key_location_parse() {
        assert_eq!(
            "query".parse::<ApiKeyLocation>().unwrap(),
            ApiKeyLocation::QueryParam
        );
        assert_eq!(
            "Header".parse::<ApiKeyLocation>().unwrap(),
            ApiKeyLocation::Header
        );
        assert!("cookie".parse::<ApiKeyLocation>().is_err());
    }

    #[test]
    fn test_serde_representation() {
        let auth = AuthConfig::api_key("X-Key", "abc", ApiKeyLocation::QueryParam);
        let json = serde_json::to_value(&auth).unwrap();
        assert_eq!(json["type"], "api_key");
        assert_eq!(json["add_to"], "QUERY_PARAM");
    }
}
