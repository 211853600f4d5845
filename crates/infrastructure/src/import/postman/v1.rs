//! Postman Collection v1.0.0 importer.
//!
//! Folders and requests are resolved through an id arena. Every recursive
//! step receives the arena and the set of already attached ids explicitly,
//! so each request lands in at most one place and folder cycles terminate.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;
use waypost_application::ImportError;
use waypost_domain::{
    AuthConfig, CollectionItem, Folder, FormField, FormatTag, HttpMethod, HttpRequest, KeyValue,
    RequestBody, RequestCollection, RequestItem, Variable,
};

use super::auth::map_auth;
use super::split_query;
use super::v1_types::{V1Collection, V1DataParam, V1Folder, V1Request};
use crate::import::{decode_json, value_text};

/// Imports a Postman v1.0.0 collection.
///
/// # Errors
///
/// Returns `InvalidSyntax` for non-JSON text and `MalformedStructure` when a
/// required field (collection name, request/folder id or name) is missing.
pub fn import(content: &str) -> Result<RequestCollection, ImportError> {
    let dto: V1Collection = decode_json(content, FormatTag::PostmanV1)?;
    Ok(map_collection(&dto))
}

/// Lookup tables over the flat v1 arrays, in document order.
struct Arena<'a> {
    folders: IndexMap<&'a str, &'a V1Folder>,
    requests: IndexMap<&'a str, &'a V1Request>,
}

/// Ids already attached to the tree.
#[derive(Default)]
struct Attached<'a> {
    folders: HashSet<&'a str>,
    requests: HashSet<&'a str>,
}

/// Maps a decoded v1 collection onto the canonical tree.
#[must_use]
pub fn map_collection(dto: &V1Collection) -> RequestCollection {
    let arena = Arena {
        folders: dto.folders.iter().map(|f| (f.id.as_str(), f)).collect(),
        requests: dto.requests.iter().map(|r| (r.id.as_str(), r)).collect(),
    };
    let mut attached = Attached::default();

    let mut collection = RequestCollection::new(&dto.name);
    collection.description = dto.description.clone().unwrap_or_default();
    collection.auth = dto.auth.as_ref().and_then(map_auth);
    collection.variables = dto
        .variables
        .iter()
        .filter(|variable| !variable.key.is_empty())
        .map(|variable| {
            let mapped = Variable::new(&variable.key, value_text(&variable.value).unwrap_or_default())
                .with_enabled(!variable.disabled);
            match &variable.id {
                Some(id) => mapped.with_id(id),
                None => mapped,
            }
        })
        .collect();

    for folder_id in root_folder_ids(dto, &arena) {
        if let Some(&folder) = arena.folders.get(folder_id) {
            if !attached.folders.contains(folder_id) {
                let folder = build_folder(folder, &arena, &mut attached);
                collection.items.push(CollectionItem::Folder(folder));
            }
        }
    }

    // Root requests: authored order first, then anything left without a home.
    let is_root = |request: &V1Request| {
        request
            .folder_ref()
            .is_none_or(|folder| !arena.folders.contains_key(folder))
    };
    let ordered = dto.order.iter().map(String::as_str);
    let swept = arena.requests.keys().copied();
    for request_id in ordered.chain(swept) {
        let Some(&request) = arena.requests.get(request_id) else {
            continue;
        };
        if is_root(request) && attached.requests.insert(request_id) {
            collection.items.push(CollectionItem::Request(RequestItem::new(map_request(request))));
        }
    }

    collection
}

/// Root folder candidates in priority order: `folders_order`, then every
/// folder no other folder nests, then everything (reaches cyclic nests).
fn root_folder_ids<'a>(dto: &'a V1Collection, arena: &Arena<'a>) -> Vec<&'a str> {
    let nested: HashSet<&str> = dto
        .folders
        .iter()
        .flat_map(|folder| folder.folders_order.iter().map(String::as_str))
        .collect();

    let declared = dto.folders_order.iter().flatten().map(String::as_str);
    let top_level = arena
        .folders
        .keys()
        .copied()
        .filter(|id| !nested.contains(id));
    let everything = arena.folders.keys().copied();

    declared.chain(top_level).chain(everything).collect()
}

fn build_folder<'a>(folder: &'a V1Folder, arena: &Arena<'a>, attached: &mut Attached<'a>) -> Folder {
    attached.folders.insert(&folder.id);
    let mut items = Vec::new();

    for sub_id in &folder.folders_order {
        if let Some(&sub) = arena.folders.get(sub_id.as_str()) {
            if !attached.folders.contains(sub_id.as_str()) {
                items.push(CollectionItem::Folder(build_folder(sub, arena, attached)));
            }
        }
    }

    for request_id in &folder.order {
        if let Some(&request) = arena.requests.get(request_id.as_str()) {
            if attached.requests.insert(request.id.as_str()) {
                items.push(CollectionItem::Request(RequestItem::new(map_request(request))));
            }
        }
    }

    // Requests pointing at this folder but missing from its `order`.
    for (&request_id, &request) in &arena.requests {
        if request.folder_ref() == Some(folder.id.as_str()) && attached.requests.insert(request_id) {
            items.push(CollectionItem::Request(RequestItem::new(map_request(request))));
        }
    }

    Folder::new(&folder.name)
        .with_description(folder.description.clone().unwrap_or_default())
        .with_items(items)
}

fn map_request(request: &V1Request) -> HttpRequest {
    let (url, raw_query) = split_query(&request.url);

    let mut mapped = HttpRequest::new(&request.name, HttpMethod::parse_lenient(&request.method), url)
        .with_headers(map_headers(request))
        .with_query_params(map_query(request, raw_query));
    mapped.body = map_body(request);
    mapped.auth = map_request_auth(request);
    mapped
}

/// `headerData` wins over the `Key: Value` header string.
fn map_headers(request: &V1Request) -> Vec<KeyValue> {
    if let Some(data) = request.header_data.as_ref().filter(|data| !data.is_empty()) {
        return data
            .iter()
            .map(|header| {
                KeyValue::new(&header.key, &header.value)
                    .with_enabled(header.enabled != Some(false))
                    .with_description(header.description.clone().unwrap_or_default())
            })
            .collect();
    }

    request
        .headers
        .as_deref()
        .unwrap_or_default()
        .lines()
        .filter_map(parse_header_line)
        .collect()
}

/// Lines commented out with `//` are disabled headers.
fn parse_header_line(line: &str) -> Option<KeyValue> {
    let line = line.trim();
    let (line, enabled) = match line.strip_prefix("//") {
        Some(rest) => (rest.trim_start(), false),
        None => (line, true),
    };
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some(KeyValue::new(key, value.trim()).with_enabled(enabled))
}

/// Structured `queryParams` win over the URL query string.
fn map_query(request: &V1Request, raw_query: Option<&str>) -> Vec<KeyValue> {
    match request.query_params.as_ref().filter(|params| !params.is_empty()) {
        Some(params) => params
            .iter()
            .map(|param| {
                KeyValue::new(&param.key, param.value.clone().unwrap_or_default())
                    .with_enabled(param.enabled != Some(false))
                    .with_description(param.description.clone().unwrap_or_default())
            })
            .collect(),
        None => raw_query.map(KeyValue::parse_pairs).unwrap_or_default(),
    }
}

fn map_body(request: &V1Request) -> Option<RequestBody> {
    let mode = request.data_mode.as_deref()?.to_ascii_lowercase();
    let data_text = || request.data.as_ref().and_then(value_text).unwrap_or_default();

    match mode.as_str() {
        "raw" => {
            let content = request.raw_mode_data.clone().unwrap_or_else(data_text);
            Some(raw_body(content))
        }
        "urlencoded" => Some(RequestBody::FormUrlEncoded {
            fields: data_params(request.data.as_ref())
                .into_iter()
                .map(|param| {
                    KeyValue::new(param.key, value_text(&param.value).unwrap_or_default())
                        .with_enabled(param.enabled != Some(false))
                })
                .collect(),
        }),
        "params" | "formdata" => Some(RequestBody::FormData {
            fields: data_params(request.data.as_ref())
                .into_iter()
                .map(|param| {
                    let value = value_text(&param.value).unwrap_or_default();
                    let field = if param.param_type.as_deref() == Some("file") {
                        FormField::file(param.key, value)
                    } else {
                        FormField::text(param.key, value)
                    };
                    field.with_enabled(param.enabled != Some(false))
                })
                .collect(),
        }),
        "binary" => Some(RequestBody::Binary {
            file_path: data_text(),
        }),
        "graphql" => request
            .graphql_mode_data
            .as_ref()
            .map(|graphql| RequestBody::GraphQL {
                query: graphql.query.clone(),
                variables: graphql.variables.clone(),
            }),
        other => {
            tracing::warn!(mode = other, request = %request.name, "unsupported v1 data mode, request imported without body");
            None
        }
    }
}

/// v1 raw bodies carry no language hint. Text opening with `{` or `[` is
/// JSON, kept verbatim; everything else is plain text.
fn raw_body(content: String) -> RequestBody {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        RequestBody::json(content)
    } else {
        RequestBody::raw(content, "text/plain")
    }
}

/// `data` is either a `key=value&...` string or an array of param objects.
fn data_params(data: Option<&Value>) -> Vec<V1DataParam> {
    match data {
        Some(Value::String(text)) => KeyValue::parse_pairs(text)
            .into_iter()
            .map(|pair| V1DataParam {
                key: pair.key,
                value: Value::String(pair.value),
                param_type: None,
                enabled: None,
            })
            .collect(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| match serde_json::from_value(entry.clone()) {
                Ok(param) => Some(param),
                Err(err) => {
                    tracing::debug!(error = %err, "skipping malformed v1 data entry");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// The `auth` object wins over the legacy `currentHelper` pair.
fn map_request_auth(request: &V1Request) -> Option<AuthConfig> {
    if let Some(auth) = &request.auth {
        return map_auth(auth);
    }

    let helper = request.current_helper.as_deref()?;
    let attributes = request.helper_attributes.as_ref()?;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    match helper.to_ascii_lowercase().as_str() {
        "basicauth" | "basic" => Some(AuthConfig::basic(
            text(&attributes.username),
            text(&attributes.password),
        )),
        "bearerauth" | "bearer" => Some(AuthConfig::bearer(
            attributes
                .access_token
                .clone()
                .or_else(|| attributes.token.clone())
                .unwrap_or_default(),
        )),
        "oauth2" => Some(AuthConfig::bearer(text(&attributes.access_token))),
        "normal" => None,
        other => {
            tracing::debug!(helper = other, "unsupported v1 auth helper ignored");
            None
        }
    }
}
