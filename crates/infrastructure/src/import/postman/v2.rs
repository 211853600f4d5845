//! Postman Collection v2.0/v2.1 importer.

use waypost_application::ImportError;
use waypost_domain::{
    CollectionItem, FormField, FormatTag, Folder, HttpMethod, HttpRequest, KeyValue,
    RequestBody, RequestCollection, RequestItem, Variable,
};

use super::auth::map_auth;
use super::body::classify_raw;
use super::split_query;
use super::types::{
    PostmanAuth, PostmanBody, PostmanCollection, PostmanFormParam, PostmanItem, PostmanRequest,
    PostmanVariable,
};
use crate::import::{decode_json, value_text};

/// Imports a Postman v2.0 or v2.1 collection.
///
/// # Errors
///
/// Returns `InvalidSyntax` for non-JSON text and `MalformedStructure` when
/// required fields (collection name, item names) are missing or mistyped.
pub fn import(content: &str) -> Result<RequestCollection, ImportError> {
    let dto: PostmanCollection = decode_json(content, FormatTag::PostmanV2_1)?;
    Ok(map_collection(&dto))
}

/// Maps a decoded v2 collection onto the canonical model.
#[must_use]
pub fn map_collection(dto: &PostmanCollection) -> RequestCollection {
    let mut collection = RequestCollection::new(&dto.info.name);
    collection.description = dto.info.description.clone().unwrap_or_default();
    collection.auth = dto.auth.as_ref().and_then(map_auth);
    collection.variables = dto.variable.iter().map(map_variable).collect();
    collection.items = map_items(&dto.item, dto.auth.as_ref());
    collection
}

fn map_items(items: &[PostmanItem], parent_auth: Option<&PostmanAuth>) -> Vec<CollectionItem> {
    items
        .iter()
        .map(|item| map_item(item, parent_auth))
        .collect()
}

fn map_item(item: &PostmanItem, parent_auth: Option<&PostmanAuth>) -> CollectionItem {
    let auth = item.auth.as_ref().or(parent_auth);

    if item.is_folder() {
        let children = item.item.as_deref().unwrap_or_default();
        let folder = Folder::new(&item.name)
            .with_description(item.description.clone().unwrap_or_default())
            .with_items(map_items(children, auth));
        return CollectionItem::Folder(folder);
    }

    let request = match &item.request {
        Some(request) => map_request(&item.name, request, auth),
        None => {
            tracing::debug!(name = %item.name, "item has neither request nor children");
            HttpRequest::new(&item.name, HttpMethod::Get, "")
        }
    };
    CollectionItem::Request(RequestItem::new(request))
}

fn map_request(
    name: &str,
    request: &PostmanRequest,
    inherited_auth: Option<&PostmanAuth>,
) -> HttpRequest {
    let raw_url = request.url.raw();
    let (url, raw_query) = split_query(&raw_url);

    // Structured query wins; otherwise parse the query string.
    let structured = request.url.query();
    let query_params = if structured.is_empty() {
        raw_query.map(KeyValue::parse_pairs).unwrap_or_default()
    } else {
        structured
            .iter()
            .map(|param| {
                KeyValue::new(
                    param.key.clone().unwrap_or_default(),
                    param.value.clone().unwrap_or_default(),
                )
                .with_enabled(!param.disabled)
                .with_description(param.description.clone().unwrap_or_default())
            })
            .collect()
    };

    let headers = request
        .header
        .iter()
        .map(|header| {
            KeyValue::new(&header.key, &header.value)
                .with_enabled(!header.disabled)
                .with_description(header.description.clone().unwrap_or_default())
        })
        .collect();

    let mut mapped = HttpRequest::new(name, HttpMethod::parse_lenient(&request.method), url)
        .with_headers(headers)
        .with_query_params(query_params);
    mapped.body = request.body.as_ref().and_then(map_body);
    mapped.auth = request.auth.as_ref().or(inherited_auth).and_then(map_auth);
    mapped
}

/// Maps a v2 body. A body with a null `mode` maps to `RequestBody::None`.
fn map_body(body: &PostmanBody) -> Option<RequestBody> {
    let Some(mode) = body.mode.as_deref() else {
        return Some(RequestBody::None);
    };

    match mode {
        "raw" => {
            let language = body
                .options
                .as_ref()
                .and_then(|options| options.raw.as_ref())
                .and_then(|raw| raw.language.as_deref());
            Some(classify_raw(body.raw.as_deref().unwrap_or_default(), language))
        }
        "urlencoded" => Some(RequestBody::FormUrlEncoded {
            fields: body
                .urlencoded
                .iter()
                .flatten()
                .map(map_urlencoded_field)
                .collect(),
        }),
        "formdata" => Some(RequestBody::FormData {
            fields: body
                .formdata
                .iter()
                .flatten()
                .map(map_form_field)
                .collect(),
        }),
        "file" => Some(RequestBody::Binary {
            file_path: body
                .file
                .as_ref()
                .and_then(|file| file.src.clone())
                .unwrap_or_default(),
        }),
        "graphql" => body.graphql.as_ref().map(|graphql| RequestBody::GraphQL {
            query: graphql.query.clone(),
            variables: graphql.variables.clone(),
        }),
        other => {
            tracing::warn!(mode = other, "unsupported body mode, request imported without body");
            None
        }
    }
}

fn map_urlencoded_field(param: &PostmanFormParam) -> KeyValue {
    KeyValue::new(&param.key, param.value.clone().unwrap_or_default())
        .with_enabled(!param.disabled)
        .with_description(param.description.clone().unwrap_or_default())
}

fn map_form_field(param: &PostmanFormParam) -> FormField {
    let field = if param.param_type.as_deref() == Some("file") {
        FormField::file(
            &param.key,
            param.src.clone().or_else(|| param.value.clone()).unwrap_or_default(),
        )
    } else {
        FormField::text(
            &param.key,
            param.value.clone().or_else(|| param.src.clone()).unwrap_or_default(),
        )
    };
    field.with_enabled(!param.disabled)
}

fn map_variable(variable: &PostmanVariable) -> Variable {
    let mut mapped = Variable::new(&variable.key, value_text(&variable.value).unwrap_or_default())
        .with_enabled(!variable.disabled);
    if let Some(id) = &variable.id {
        mapped = mapped.with_id(id);
    }
    if variable.var_type.as_deref() == Some("secret") {
        mapped = mapped.secret();
    }
    mapped
}
