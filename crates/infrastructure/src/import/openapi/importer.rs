//! OpenAPI 3.x importer.
//!
//! Every operation becomes a request. Tagged operations are grouped into one
//! folder per tag; untagged operations stay at the collection root.

use indexmap::IndexMap;
use serde_json::Value;
use waypost_application::ImportError;
use waypost_application::config::DEFAULT_SCHEMA_DEPTH_LIMIT;
use waypost_domain::{
    ApiKeyLocation, AuthConfig, CollectionItem, Folder, FormField, FormatTag, HttpMethod,
    HttpRequest, KeyValue, RequestBody, RequestCollection, RequestItem, Variable,
};

use super::resolver::resolve_or_self;
use super::synthesizer::ExampleSynthesizer;
use super::types::{
    Example, MediaType, OpenApiDocument, Operation, Parameter, Schema, SecurityRequirement,
    SecurityScheme,
};
use crate::formatting::json;
use crate::import::detect::openapi_version;
use crate::import::value_text;
use crate::import::yaml::parse_document;

/// Imports OpenAPI 3.0/3.1 documents (JSON or YAML).
#[derive(Debug, Clone, Copy)]
pub struct OpenApiImporter {
    schema_depth_limit: usize,
}

impl Default for OpenApiImporter {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA_DEPTH_LIMIT)
    }
}

impl OpenApiImporter {
    /// Creates an importer with the given example synthesis depth ceiling.
    #[must_use]
    pub const fn new(schema_depth_limit: usize) -> Self {
        Self { schema_depth_limit }
    }

    /// Imports an OpenAPI document.
    ///
    /// # Errors
    ///
    /// - `InvalidSyntax` if the text is neither JSON nor YAML
    /// - `UnsupportedVersion` for Swagger 2.0 or any non-3.x `openapi` version
    /// - `MalformedStructure` if required fields (`info.title`, ...) are missing
    pub fn import(&self, content: &str) -> Result<RequestCollection, ImportError> {
        let document = parse_document(content)?;
        check_version(&document)?;

        let spec: OpenApiDocument = serde_json::from_value(document)
            .map_err(|err| ImportError::malformed(FormatTag::OpenApi, err))?;
        Ok(self.map_document(&spec))
    }

    fn map_document(&self, spec: &OpenApiDocument) -> RequestCollection {
        let mapper = OperationMapper {
            spec,
            synth: ExampleSynthesizer::new(&spec.components.schemas, self.schema_depth_limit),
        };

        let mut tagged: IndexMap<&str, Vec<CollectionItem>> = IndexMap::new();
        let mut untagged = Vec::new();

        for (path, item) in &spec.paths {
            for (verb, operation) in item.operations() {
                if operation.tags.is_empty() {
                    untagged.push(mapper.map_operation(path, verb, operation, &item.parameters));
                    continue;
                }
                for tag in &operation.tags {
                    let request = mapper.map_operation(path, verb, operation, &item.parameters);
                    tagged.entry(tag.as_str()).or_default().push(request);
                }
            }
        }

        let mut collection = RequestCollection::new(&spec.info.title);
        collection.description = spec.info.description.clone().unwrap_or_default();
        collection.variables = server_variables(spec);
        collection.auth = mapper.auth_for(&spec.security);

        for (tag, items) in tagged {
            let description = spec
                .tags
                .iter()
                .find(|declared| declared.name == tag)
                .and_then(|declared| declared.description.clone())
                .unwrap_or_default();
            collection.add_item(Folder::new(tag).with_description(description).with_items(items));
        }
        collection.items.extend(untagged);

        collection
    }
}

fn check_version(document: &Value) -> Result<(), ImportError> {
    if let Some(swagger) = document.get("swagger") {
        let version = value_text(swagger).unwrap_or_default();
        return Err(ImportError::UnsupportedVersion(format!(
            "Swagger {version}; only OpenAPI 3.x is supported"
        )));
    }

    match openapi_version(document) {
        Some(version) if version.starts_with("3.") => Ok(()),
        Some(version) => Err(ImportError::UnsupportedVersion(format!(
            "OpenAPI {version}; only 3.x is supported"
        ))),
        None => Err(ImportError::malformed(
            FormatTag::OpenApi,
            "missing `openapi` version field",
        )),
    }
}

/// `baseUrl` from the first server, then that server's variables.
///
/// Server variable placeholders in the URL are rewritten to `{{name}}` so they
/// reference the collection variables created alongside.
fn server_variables(spec: &OpenApiDocument) -> Vec<Variable> {
    let Some(server) = spec.servers.first() else {
        return vec![Variable::new("baseUrl", "")];
    };

    let mut base_url = server.url.clone();
    let mut variables = Vec::with_capacity(server.variables.len() + 1);
    for (name, variable) in &server.variables {
        base_url = base_url.replace(&format!("{{{name}}}"), &format!("{{{{{name}}}}}"));
        variables.push(Variable::new(name, value_text(&variable.default).unwrap_or_default()));
    }
    variables.insert(0, Variable::new("baseUrl", base_url));
    variables
}

struct OperationMapper<'a> {
    spec: &'a OpenApiDocument,
    synth: ExampleSynthesizer<'a>,
}

impl<'a> OperationMapper<'a> {
    fn map_operation(
        &self,
        path: &str,
        verb: &str,
        operation: &'a Operation,
        path_parameters: &'a [Parameter],
    ) -> CollectionItem {
        let name = operation
            .summary
            .clone()
            .or_else(|| operation.operation_id.clone())
            .unwrap_or_else(|| format!("{verb} {path}"));

        let parameters = self.merged_parameters(path_parameters, &operation.parameters);

        let mut url = format!("{{{{baseUrl}}}}{path}");
        let mut headers = Vec::new();
        let mut query_params = Vec::new();
        for parameter in parameters {
            let value = self.parameter_value(parameter);
            match parameter.location.as_str() {
                "path" => {
                    let replacement = if value.is_empty() {
                        format!("{{{{{}}}}}", parameter.name)
                    } else {
                        value
                    };
                    url = url.replace(&format!("{{{}}}", parameter.name), &replacement);
                }
                "query" => query_params.push(parameter_entry(parameter, value)),
                "header" => headers.push(parameter_entry(parameter, value)),
                _ => {}
            }
        }

        let body = operation.request_body.as_ref().and_then(|body| {
            let body = resolve_or_self(body, "requestBodies", &self.spec.components.request_bodies);
            self.map_body(&body.content)
        });

        let mut request = HttpRequest::new(&name, HttpMethod::parse_lenient(verb), url)
            .with_query_params(query_params)
            .with_headers(headers);
        if let Some(content_type) = body.as_ref().and_then(RequestBody::content_type) {
            if !request.has_header("Content-Type") {
                request
                    .headers
                    .insert(0, KeyValue::new("Content-Type", content_type));
            }
        }
        request.body = body;
        request.auth = match &operation.security {
            Some(requirements) => self.auth_for(requirements),
            None => self.auth_for(&self.spec.security),
        };

        CollectionItem::Request(RequestItem::new(request))
    }

    /// Path-level parameters first; an operation-level parameter replaces the
    /// path-level one with the same name and location.
    fn merged_parameters(
        &self,
        path_parameters: &'a [Parameter],
        operation_parameters: &'a [Parameter],
    ) -> Vec<&'a Parameter> {
        let mut merged: IndexMap<(&str, &str), &Parameter> = IndexMap::new();
        for parameter in path_parameters.iter().chain(operation_parameters) {
            let parameter = resolve_or_self(parameter, "parameters", &self.spec.components.parameters);
            merged.insert((parameter.name.as_str(), parameter.location.as_str()), parameter);
        }
        merged.into_values().collect()
    }

    /// Parameter example, then the first `examples` entry, then the schema's
    /// example/default/first enum value.
    fn parameter_value(&self, parameter: &Parameter) -> String {
        parameter
            .example
            .clone()
            .or_else(|| self.first_example(&parameter.examples))
            .or_else(|| {
                parameter
                    .schema
                    .as_ref()
                    .and_then(|schema| schema_hint(self.synth.dereference(schema)))
            })
            .as_ref()
            .and_then(value_text)
            .unwrap_or_default()
    }

    fn first_example(&self, examples: &IndexMap<String, Example>) -> Option<Value> {
        let (_, example) = examples.first()?;
        resolve_or_self(example, "examples", &self.spec.components.examples)
            .value
            .clone()
    }

    /// JSON wins, then urlencoded, then multipart, then the first declared type.
    fn map_body(&self, content: &IndexMap<String, MediaType>) -> Option<RequestBody> {
        if let Some(media) = content.get("application/json") {
            return Some(RequestBody::json(self.json_example(media)));
        }
        if let Some(media) = content.get("application/x-www-form-urlencoded") {
            return Some(RequestBody::FormUrlEncoded {
                fields: self
                    .form_properties(media)
                    .into_iter()
                    .map(|(name, property, required)| {
                        KeyValue::new(name, schema_hint(property).as_ref().and_then(value_text).unwrap_or_default())
                            .with_enabled(required)
                            .with_description(property.description.clone().unwrap_or_default())
                    })
                    .collect(),
            });
        }
        if let Some(media) = content.get("multipart/form-data") {
            return Some(RequestBody::FormData {
                fields: self
                    .form_properties(media)
                    .into_iter()
                    .map(|(name, property, required)| {
                        let field = if property.is_binary() {
                            FormField::file(name, "")
                        } else {
                            FormField::text(
                                name,
                                schema_hint(property).as_ref().and_then(value_text).unwrap_or_default(),
                            )
                        };
                        field.with_enabled(required)
                    })
                    .collect(),
            });
        }

        let (content_type, media) = content.first()?;
        if content_type.contains("json") {
            Some(RequestBody::json(self.json_example(media)))
        } else {
            let example = self.example_value(media);
            Some(RequestBody::raw(
                value_text(&example).unwrap_or_default(),
                content_type,
            ))
        }
    }

    fn json_example(&self, media: &MediaType) -> String {
        match self.example_value(media) {
            Value::String(text) => json::pretty(&text),
            value => json::to_pretty_string(&value).unwrap_or_else(|_| value.to_string()),
        }
    }

    /// Media example, then the first `examples` entry, then a synthesized value.
    fn example_value(&self, media: &MediaType) -> Value {
        media
            .example
            .clone()
            .or_else(|| self.first_example(&media.examples))
            .or_else(|| media.schema.as_ref().map(|schema| self.synth.synthesize(schema)))
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }

    /// Properties of a form schema with their `required` flag.
    fn form_properties<'m>(&self, media: &'m MediaType) -> Vec<(&'m str, &'m Schema, bool)>
    where
        'a: 'm,
    {
        let Some(schema) = media.schema.as_ref() else {
            return Vec::new();
        };
        let schema = self.synth.dereference(schema);
        schema
            .properties
            .iter()
            .map(|(name, property)| {
                let property = self.synth.dereference(property);
                (name.as_str(), property, schema.required.contains(name))
            })
            .collect()
    }

    /// First scheme of the first requirement only.
    fn auth_for(&self, requirements: &[SecurityRequirement]) -> Option<AuthConfig> {
        let (scheme_name, _) = requirements.first()?.first()?;
        let Some(scheme) = self.spec.components.security_schemes.get(scheme_name) else {
            tracing::warn!(scheme = %scheme_name, "security requirement names an undeclared scheme");
            return None;
        };
        map_security_scheme(scheme)
    }
}

fn parameter_entry(parameter: &Parameter, value: String) -> KeyValue {
    KeyValue::new(&parameter.name, value)
        .with_enabled(parameter.required)
        .with_description(parameter.description.clone().unwrap_or_default())
}

/// Schema-level example, default or first enum value.
fn schema_hint(schema: &Schema) -> Option<Value> {
    schema
        .example
        .clone()
        .or_else(|| schema.default.clone())
        .or_else(|| schema.enum_values.first().cloned())
}

fn map_security_scheme(scheme: &SecurityScheme) -> Option<AuthConfig> {
    match scheme.scheme_type.to_ascii_lowercase().as_str() {
        "http" => match scheme.scheme.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("basic") => Some(AuthConfig::basic("", "")),
            Some("bearer") => Some(AuthConfig::bearer("")),
            other => {
                tracing::warn!(scheme = ?other, "unsupported http auth scheme, no auth attached");
                None
            }
        },
        "apikey" => {
            let add_to = if scheme.location.as_deref() == Some("query") {
                ApiKeyLocation::QueryParam
            } else {
                ApiKeyLocation::Header
            };
            Some(AuthConfig::api_key(
                scheme.name.clone().unwrap_or_default(),
                "",
                add_to,
            ))
        }
        other => {
            tracing::warn!(scheme_type = other, "unsupported security scheme, no auth attached");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use waypost_domain::FormFieldType;

    fn import(content: &str) -> RequestCollection {
        OpenApiImporter::default().import(content).unwrap()
    }

    fn only_request(collection: &RequestCollection) -> &HttpRequest {
        let requests = collection.requests();
        assert_eq!(requests.len(), 1);
        requests[0]
    }

    #[test]
    fn test_tags_become_folders() {
        let spec = r#"{
            "openapi": "3.0.3",
            "info": {"title": "Pets", "description": "Pet store"},
            "tags": [{"name": "pets", "description": "Pet operations"}],
            "paths": {
                "/pets": {
                    "get": {"tags": ["pets"], "summary": "List pets"},
                    "post": {"tags": ["pets"], "operationId": "createPet"}
                },
                "/health": {"get": {}}
            }
        }"#;

        let collection = import(spec);
        assert_eq!(collection.name, "Pets");
        assert_eq!(collection.description, "Pet store");
        assert_eq!(collection.items.len(), 2);

        let CollectionItem::Folder(pets) = &collection.items[0] else {
            panic!("expected folder");
        };
        assert_eq!(pets.name, "pets");
        assert_eq!(pets.description, "Pet operations");
        let names: Vec<&str> = pets.items.iter().map(CollectionItem::name).collect();
        assert_eq!(names, vec!["List pets", "createPet"]);
        assert_eq!(collection.items[1].name(), "GET /health");
    }

    #[test]
    fn test_path_parameter_substitution() {
        let spec = r#"{
            "openapi": "3.0.0",
            "info": {"title": "Users"},
            "paths": {
                "/users/{id}/posts/{postId}": {
                    "parameters": [{"name": "id", "in": "path", "required": true, "example": "42"}],
                    "get": {"parameters": [{"name": "postId", "in": "path", "required": true, "schema": {"type": "string"}}]}
                }
            }
        }"#;

        let collection = import(spec);
        assert_eq!(
            only_request(&collection).url,
            "{{baseUrl}}/users/42/posts/{{postId}}"
        );
    }

    #[test]
    fn test_operation_parameter_overrides_path_parameter() {
        let spec = r#"{
            "openapi": "3.0.0",
            "info": {"title": "X"},
            "paths": {
                "/items": {
                    "parameters": [
                        {"name": "limit", "in": "query", "example": 10},
                        {"name": "X-Trace", "in": "header", "required": true, "schema": {"type": "string", "default": "on"}}
                    ],
                    "get": {"parameters": [
                        {"name": "limit", "in": "query", "required": true, "schema": {"type": "integer", "enum": [25, 50]}}
                    ]}
                }
            }
        }"#;

        let collection = import(spec);
        let request = only_request(&collection);
        assert_eq!(request.query_params, vec![KeyValue::new("limit", "25")]);
        assert_eq!(request.headers, vec![KeyValue::new("X-Trace", "on")]);
    }

    #[test]
    fn test_optional_parameters_are_disabled() {
        let spec = r#"{
            "openapi": "3.0.0",
            "info": {"title": "X"},
            "paths": {"/s": {"get": {"parameters": [
                {"name": "q", "in": "query", "description": "Search term"}
            ]}}}
        }"#;

        let collection = import(spec);
        assert_eq!(
            only_request(&collection).query_params,
            vec![KeyValue::disabled("q", "").with_description("Search term")]
        );
    }

    #[test]
    fn test_referenced_parameter_and_body() {
        let spec = r##"{
            "openapi": "3.1.0",
            "info": {"title": "Refs"},
            "paths": {"/orders": {"post": {
                "parameters": [{"$ref": "#/components/parameters/Page"}],
                "requestBody": {"$ref": "#/components/requestBodies/Order"}
            }}},
            "components": {
                "parameters": {"Page": {"name": "page", "in": "query", "required": true, "example": 1}},
                "requestBodies": {"Order": {"content": {"application/json": {
                    "schema": {"$ref": "#/components/schemas/Order"}
                }}}},
                "schemas": {"Order": {"type": "object", "properties": {
                    "id": {"type": "integer"}, "note": {"type": "string"}
                }}}
            }
        }"##;

        let collection = import(spec);
        let request = only_request(&collection);
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.query_params, vec![KeyValue::new("page", "1")]);
        assert_eq!(
            request.body,
            Some(RequestBody::json("{\n  \"id\": 0,\n  \"note\": \"string\"\n}"))
        );
        assert_eq!(request.headers, vec![KeyValue::new("Content-Type", "application/json")]);
    }

    #[test]
    fn test_body_preference_and_examples() {
        let spec = r##"{
            "openapi": "3.0.0",
            "info": {"title": "Bodies"},
            "paths": {
                "/json": {"post": {"requestBody": {"content": {
                    "application/xml": {"example": "<a/>"},
                    "application/json": {"examples": {"first": {"value": {"k": "v"}}}}
                }}}},
                "/form": {"post": {
                    "parameters": [{"name": "content-type", "in": "header", "example": "custom"}],
                    "requestBody": {"content": {"application/x-www-form-urlencoded": {"schema": {
                        "type": "object", "required": ["user"],
                        "properties": {"user": {"type": "string", "example": "bob"}, "note": {"type": "string"}}
                    }}}}
                }},
                "/upload": {"post": {"requestBody": {"content": {"multipart/form-data": {"schema": {
                    "type": "object", "required": ["file"],
                    "properties": {"file": {"type": "string", "format": "binary"}, "label": {"type": "string", "default": "x"}}
                }}}}}},
                "/text": {"post": {"requestBody": {"content": {"text/plain": {"example": "hello"}}}}},
                "/vendor": {"post": {"requestBody": {"content": {"application/vnd.api+json": {"example": "{\"a\":1}"}}}}}
            }
        }"##;

        let collection = import(spec);
        let requests = collection.requests();

        assert_eq!(requests[0].body, Some(RequestBody::json("{\n  \"k\": \"v\"\n}")));

        assert_eq!(
            requests[1].body,
            Some(RequestBody::FormUrlEncoded {
                fields: vec![KeyValue::new("user", "bob"), KeyValue::disabled("note", "")]
            })
        );
        assert_eq!(requests[1].headers.len(), 1, "existing content-type kept");

        let Some(RequestBody::FormData { fields }) = &requests[2].body else {
            panic!("expected multipart body");
        };
        assert_eq!(fields[0].field_type, FormFieldType::File);
        assert!(fields[0].enabled);
        assert_eq!(fields[1], FormField::text("label", "x").with_enabled(false));
        assert_eq!(requests[2].headers[0], KeyValue::new("Content-Type", "multipart/form-data"));

        assert_eq!(requests[3].body, Some(RequestBody::raw("hello", "text/plain")));
        assert_eq!(requests[3].headers[0], KeyValue::new("Content-Type", "text/plain"));

        assert_eq!(requests[4].body, Some(RequestBody::json("{\n  \"a\": 1\n}")));
    }

    #[test]
    fn test_security_schemes() {
        let spec = r#"{
            "openapi": "3.0.0",
            "info": {"title": "Sec"},
            "security": [{"bearer": []}],
            "paths": {
                "/a": {"get": {}},
                "/b": {"get": {"security": [{"key": []}, {"basic": []}]}},
                "/c": {"get": {"security": []}},
                "/d": {"get": {"security": [{"oauth": ["read"]}]}}
            },
            "components": {"securitySchemes": {
                "bearer": {"type": "http", "scheme": "bearer"},
                "basic": {"type": "http", "scheme": "basic"},
                "key": {"type": "apiKey", "name": "api_key", "in": "query"},
                "oauth": {"type": "oauth2", "flows": {}}
            }}
        }"#;

        let collection = import(spec);
        assert_eq!(collection.auth, Some(AuthConfig::bearer("")));
        let auths: Vec<_> = collection.requests().iter().map(|r| r.auth.clone()).collect();
        assert_eq!(
            auths,
            vec![
                Some(AuthConfig::bearer("")),
                Some(AuthConfig::api_key("api_key", "", ApiKeyLocation::QueryParam)),
                None,
                None,
            ]
        );
    }

    #[test]
    fn test_server_variables() {
        let spec = r#"{
            "openapi": "3.0.0",
            "info": {"title": "Srv"},
            "servers": [
                {"url": "https://{env}.example.com:{port}/v1", "variables": {
                    "env": {"default": "api"}, "port": {"default": 443}
                }},
                {"url": "https://ignored"}
            ],
            "paths": {}
        }"#;

        let collection = import(spec);
        let vars: Vec<(&str, &str)> = collection
            .variables
            .iter()
            .map(|v| (v.key.as_str(), v.value.as_str()))
            .collect();
        assert_eq!(
            vars,
            vec![
                ("baseUrl", "https://{{env}}.example.com:{{port}}/v1"),
                ("env", "api"),
                ("port", "443"),
            ]
        );
    }

    #[test]
    fn test_no_servers_gives_empty_base_url() {
        let collection = import(r#"{"openapi": "3.0.0", "info": {"title": "x"}}"#);
        assert_eq!(collection.variables.len(), 1);
        assert_eq!(collection.variables[0].key, "baseUrl");
        assert_eq!(collection.variables[0].value, "");
    }

    #[test]
    fn test_yaml_with_numeric_version() {
        let yaml = "openapi: 3.0\ninfo:\n  title: Yaml API\npaths:\n  /ping:\n    get:\n      summary: Ping\n";
        let collection = import(yaml);
        assert_eq!(collection.name, "Yaml API");
        assert_eq!(only_request(&collection).name, "Ping");
    }

    #[test]
    fn test_version_rejections() {
        let importer = OpenApiImporter::default();
        assert!(matches!(
            importer.import(r#"{"swagger": "2.0", "info": {"title": "x"}, "paths": {}}"#),
            Err(ImportError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            importer.import(r#"{"openapi": "4.0.0", "info": {"title": "x"}}"#),
            Err(ImportError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            importer.import(r#"{"openapi": "3.0.0", "info": {}}"#),
            Err(ImportError::MalformedStructure {
                format: FormatTag::OpenApi,
                ..
            })
        ));
    }
}
