//! Postman Collection v2.1.0 exporter.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use waypost_application::{CollectionExporter, ExportError};
use waypost_domain::{
    CollectionItem, FormField, HttpRequest, KeyValue, RequestBody, RequestCollection, Variable,
    VariableType, generate_random_id,
};

use crate::formatting::json::to_json_document;
use crate::import::postman::auth::to_postman_auth;
use crate::import::postman::body::language_for_content_type;
use crate::import::postman::types::{
    PostmanBody, PostmanBodyFile, PostmanBodyOptions, PostmanCollection, PostmanFormParam,
    PostmanGraphQL, PostmanHeader, PostmanInfo, PostmanItem, PostmanQueryParam, PostmanRawOptions,
    PostmanRequest, PostmanUrl, PostmanUrlObject, PostmanVariable, SCHEMA_V2_1,
};

#[allow(clippy::expect_used)]
static PROTOCOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?)://").expect("valid regex"));

/// Writes canonical collections as Postman Collection v2.1.0 JSON.
///
/// Request auth is written on the item. `Some(AuthConfig::None)` becomes an
/// explicit `noauth` entry, so it still opts out of a parent's auth after
/// re-import. A request without auth writes no entry and inherits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostmanV21Exporter;

impl PostmanV21Exporter {
    /// Creates a new exporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the v2.1 DTO for a collection.
    ///
    /// Every export gets a fresh `_postman_id`.
    #[must_use]
    pub fn to_postman(collection: &RequestCollection) -> PostmanCollection {
        PostmanCollection {
            info: PostmanInfo {
                postman_id: Some(generate_random_id()),
                name: collection.name.clone(),
                description: non_empty(&collection.description),
                schema: Some(SCHEMA_V2_1.to_string()),
            },
            item: collection.items.iter().map(export_item).collect(),
            variable: collection.variables.iter().map(export_variable).collect(),
            auth: collection.auth.as_ref().map(to_postman_auth),
        }
    }
}

impl CollectionExporter for PostmanV21Exporter {
    fn export_postman_v2_1(&self, collection: &RequestCollection) -> Result<String, ExportError> {
        let document = to_json_document(&Self::to_postman(collection))
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
        tracing::info!(
            name = %collection.name,
            requests = collection.request_count(),
            "exported collection as Postman v2.1"
        );
        Ok(document)
    }
}

fn export_item(item: &CollectionItem) -> PostmanItem {
    match item {
        CollectionItem::Folder(folder) => PostmanItem {
            name: folder.name.clone(),
            description: non_empty(&folder.description),
            item: Some(folder.items.iter().map(export_item).collect()),
            request: None,
            auth: None,
        },
        // Auth lives on the item, not on the request.
        CollectionItem::Request(item) => PostmanItem {
            name: item.name.clone(),
            description: None,
            item: None,
            request: Some(export_request(&item.request)),
            auth: item.request.auth.as_ref().map(to_postman_auth),
        },
    }
}

fn export_request(request: &HttpRequest) -> PostmanRequest {
    PostmanRequest {
        method: request.method.as_str().to_string(),
        url: PostmanUrl::Structured(export_url(&request.url, &request.query_params)),
        header: request.headers.iter().map(export_header).collect(),
        body: request.body.as_ref().map(export_body),
        auth: None,
    }
}

/// Builds the structured URL. `raw` carries the enabled query parameters;
/// protocol, host and path are a best-effort split of the URL text.
fn export_url(url: &str, query_params: &[KeyValue]) -> PostmanUrlObject {
    let enabled: Vec<String> = query_params
        .iter()
        .filter(|param| param.enabled)
        .map(|param| format!("{}={}", param.key, param.value))
        .collect();
    let raw = if enabled.is_empty() {
        url.to_string()
    } else {
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{url}{separator}{}", enabled.join("&"))
    };

    let protocol = PROTOCOL
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string());
    let rest = protocol
        .as_ref()
        .map_or(url, |protocol| &url[protocol.len() + 3..]);
    let rest = rest.split('?').next().unwrap_or_default();

    let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            (host, Some(port.to_string()))
        }
        _ => (authority, None),
    };

    PostmanUrlObject {
        raw: Some(raw),
        protocol,
        host: split_non_empty(host, '.'),
        port,
        path: split_non_empty(path, '/'),
        query: query_params.iter().map(export_query_param).collect(),
    }
}

fn split_non_empty(text: &str, separator: char) -> Vec<String> {
    text.split(separator)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

fn export_query_param(param: &KeyValue) -> PostmanQueryParam {
    PostmanQueryParam {
        key: Some(param.key.clone()),
        value: Some(param.value.clone()),
        description: non_empty(&param.description),
        disabled: !param.enabled,
    }
}

fn export_header(header: &KeyValue) -> PostmanHeader {
    PostmanHeader {
        key: header.key.clone(),
        value: header.value.clone(),
        description: non_empty(&header.description),
        header_type: Some("text".to_string()),
        disabled: !header.enabled,
    }
}

fn export_body(body: &RequestBody) -> PostmanBody {
    match body {
        RequestBody::None => PostmanBody::default(),
        RequestBody::Json { content } => raw_body(content, "json"),
        RequestBody::Xml { content } => raw_body(content, "xml"),
        RequestBody::Raw {
            content,
            content_type,
        } => raw_body(content, language_for_content_type(content_type)),
        RequestBody::FormUrlEncoded { fields } => PostmanBody {
            mode: Some("urlencoded".to_string()),
            urlencoded: Some(fields.iter().map(export_urlencoded_field).collect()),
            ..PostmanBody::default()
        },
        RequestBody::FormData { fields } => PostmanBody {
            mode: Some("formdata".to_string()),
            formdata: Some(fields.iter().map(export_form_field).collect()),
            ..PostmanBody::default()
        },
        RequestBody::Binary { file_path } => PostmanBody {
            mode: Some("file".to_string()),
            file: Some(PostmanBodyFile {
                src: Some(file_path.clone()),
            }),
            ..PostmanBody::default()
        },
        RequestBody::GraphQL { query, variables } => PostmanBody {
            mode: Some("graphql".to_string()),
            graphql: Some(PostmanGraphQL {
                query: query.clone(),
                variables: variables.clone(),
            }),
            ..PostmanBody::default()
        },
    }
}

fn raw_body(content: &str, language: &str) -> PostmanBody {
    PostmanBody {
        mode: Some("raw".to_string()),
        raw: Some(content.to_string()),
        options: Some(PostmanBodyOptions {
            raw: Some(PostmanRawOptions {
                language: Some(language.to_string()),
            }),
        }),
        ..PostmanBody::default()
    }
}

fn export_urlencoded_field(field: &KeyValue) -> PostmanFormParam {
    PostmanFormParam {
        key: field.key.clone(),
        value: Some(field.value.clone()),
        src: None,
        description: non_empty(&field.description),
        param_type: Some("text".to_string()),
        disabled: !field.enabled,
    }
}

fn export_form_field(field: &FormField) -> PostmanFormParam {
    let (value, src, param_type) = if field.is_file() {
        (None, Some(field.value.clone()), "file")
    } else {
        (Some(field.value.clone()), None, "text")
    };
    PostmanFormParam {
        key: field.key.clone(),
        value,
        src,
        description: None,
        param_type: Some(param_type.to_string()),
        disabled: !field.enabled,
    }
}

fn export_variable(variable: &Variable) -> PostmanVariable {
    let var_type = match variable.variable_type {
        VariableType::Secret => "secret",
        VariableType::Default => "string",
    };
    PostmanVariable {
        id: Some(variable.id.clone()),
        key: variable.key.clone(),
        value: Value::String(variable.value.clone()),
        var_type: Some(var_type.to_string()),
        disabled: !variable.enabled,
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
