//! Postman auth block mapping, shared by the v1 and v2 adapters and the exporter.

use waypost_domain::{ApiKeyLocation, AuthConfig};

use super::types::{PostmanAuth, PostmanAuthParams};

/// Maps a Postman auth block onto the canonical auth model.
///
/// `noauth` maps to [`AuthConfig::None`]. Types the canonical model cannot
/// express (oauth2, digest, hawk, ...) are logged and dropped.
#[must_use]
pub fn map_auth(auth: &PostmanAuth) -> Option<AuthConfig> {
    let param = |params: Option<&PostmanAuthParams>, key: &str| {
        params.and_then(|p| p.get(key)).unwrap_or_default()
    };

    match auth.auth_type.to_ascii_lowercase().as_str() {
        "noauth" | "none" => Some(AuthConfig::None),
        "basic" => Some(AuthConfig::basic(
            param(auth.basic.as_ref(), "username"),
            param(auth.basic.as_ref(), "password"),
        )),
        "bearer" => Some(AuthConfig::bearer(param(auth.bearer.as_ref(), "token"))),
        "apikey" => {
            let add_to = if param(auth.apikey.as_ref(), "in") == "query" {
                ApiKeyLocation::QueryParam
            } else {
                ApiKeyLocation::Header
            };
            Some(AuthConfig::api_key(
                param(auth.apikey.as_ref(), "key"),
                param(auth.apikey.as_ref(), "value"),
                add_to,
            ))
        }
        other => {
            tracing::warn!(auth_type = other, "unsupported auth type, request imported without auth");
            None
        }
    }
}

/// Renders canonical auth as a Postman v2.1 auth block.
#[must_use]
pub fn to_postman_auth(auth: &AuthConfig) -> PostmanAuth {
    match auth {
        AuthConfig::None => PostmanAuth::of_type("noauth"),
        AuthConfig::Basic { username, password } => PostmanAuth {
            basic: Some(PostmanAuthParams::from_pairs(&[
                ("username", username.as_str()),
                ("password", password.as_str()),
            ])),
            ..PostmanAuth::of_type("basic")
        },
        AuthConfig::Bearer { token } => PostmanAuth {
            bearer: Some(PostmanAuthParams::from_pairs(&[("token", token.as_str())])),
            ..PostmanAuth::of_type("bearer")
        },
        AuthConfig::ApiKey { key, value, add_to } => PostmanAuth {
            apikey: Some(PostmanAuthParams::from_pairs(&[
                ("key", key.as_str()),
                ("value", value.as_str()),
                ("in", add_to.as_postman_str()),
            ])),
            ..PostmanAuth::of_type("apikey")
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> PostmanAuth {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_basic() {
        let auth = parse(
            r#"{"type": "basic", "basic": [{"key": "username", "value": "u"}, {"key": "password", "value": "p"}]}"#,
        );
        assert_eq!(map_auth(&auth), Some(AuthConfig::basic("u", "p")));
    }

    #[test]
    fn test_apikey_in_query() {
        let auth = parse(
            r#"{"type": "apikey", "apikey": [{"key": "key", "value": "X-Api"}, {"key": "value", "value": "s3cr3t"}, {"key": "in", "value": "query"}]}"#,
        );
        assert_eq!(
            map_auth(&auth),
            Some(AuthConfig::api_key("X-Api", "s3cr3t", ApiKeyLocation::QueryParam))
        );
    }

    #[test]
    fn test_apikey_defaults_to_header() {
        let auth = parse(r#"{"type": "apikey", "apikey": [{"key": "key", "value": "X-Api"}]}"#);
        assert_eq!(
            map_auth(&auth),
            Some(AuthConfig::api_key("X-Api", "", ApiKeyLocation::Header))
        );
    }

    #[test]
    fn test_noauth_and_unknown() {
        assert_eq!(map_auth(&parse(r#"{"type": "noauth"}"#)), Some(AuthConfig::None));
        assert_eq!(map_auth(&parse(r#"{"type": "hawk"}"#)), None);
    }

    #[test]
    fn test_export_then_map_is_identity() {
        let configs = [
            AuthConfig::None,
            AuthConfig::basic("{{user}}", "{{pass}}"),
            AuthConfig::bearer("{{token}}"),
            AuthConfig::api_key("X-Key", "v", ApiKeyLocation::QueryParam),
        ];
        for config in configs {
            assert_eq!(map_auth(&to_postman_auth(&config)), Some(config));
        }
    }
}
