//! Integration tests for the interchange engine
//!
//! These tests drive detection, every import adapter and the Postman v2.1
//! exporter through the public API, including the file based use cases.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::tempdir;

use waypost_application::{
    CollectionImporter, CollectionStore, ExportCollectionToFile, ImportCollectionFromFile,
    ImportCollectionFromText, ImportConfig, ImportError,
};
use waypost_domain::{
    ApiKeyLocation, AuthConfig, CollectionItem, Folder, FormField, FormatTag, HttpMethod,
    HttpRequest, KeyValue, RequestBody, RequestCollection, Variable,
};
use waypost_infrastructure::{
    InMemoryCollectionStore, InterchangeImporter, PostmanV21Exporter, TokioFileSystem,
    detect_format, export_postman_v2_1, is_openapi_spec, is_postman_collection,
};

const V1_FIXTURE: &str = r#"{
    "id": "c1",
    "name": "Legacy",
    "order": ["r1"],
    "requests": [
        {
            "id": "r1",
            "name": "Create",
            "url": "https://legacy.example.com/items?draft=true",
            "method": "POST",
            "headers": "X-Old: 1\nX-Older: 2\n",
            "headerData": [{"key": "X-New", "value": "3"}]
        }
    ]
}"#;

const V2_SCHEMA_FIXTURE: &str = r#"{
    "info": {
        "name": "Modern",
        "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
    },
    "item": [
        {
            "name": "Secured",
            "auth": {"type": "bearer", "bearer": [{"key": "token", "value": "x"}]},
            "item": [
                {"name": "Inherits", "auth": null, "request": {"method": "GET", "url": "https://api.example.com/me"}},
                {"name": "Traced", "request": {"method": "TRACE", "url": "https://api.example.com/trace"}}
            ]
        }
    ]
}"#;

const V2_STRUCTURE_FIXTURE: &str =
    r#"{"info": {"name": "Bare"}, "item": [{"name": "Ping", "request": {"url": "/ping"}}]}"#;

const OPENAPI_FIXTURE: &str = r##"{
    "openapi": "3.0.3",
    "info": {"title": "Users", "version": "1.0"},
    "servers": [{"url": "https://users.example.com/v1"}],
    "paths": {
        "/users/{id}": {
            "get": {
                "operationId": "getUser",
                "parameters": [
                    {"name": "id", "in": "path", "required": true, "example": "42", "schema": {"type": "string"}}
                ]
            }
        },
        "/nodes": {
            "post": {
                "summary": "Create node",
                "requestBody": {
                    "content": {
                        "application/json": {"schema": {"$ref": "#/components/schemas/Node"}}
                    }
                }
            }
        }
    },
    "components": {
        "schemas": {
            "Node": {
                "type": "object",
                "properties": {
                    "value": {"type": "integer"},
                    "next": {"$ref": "#/components/schemas/Node"}
                }
            }
        }
    }
}"##;

const SWAGGER_FIXTURE: &str =
    r#"{"swagger": "2.0", "info": {"title": "Old", "version": "1"}, "paths": {}}"#;

fn first_request(collection: &RequestCollection) -> &HttpRequest {
    collection.requests()[0]
}

fn find_request<'a>(collection: &'a RequestCollection, name: &str) -> &'a HttpRequest {
    collection
        .requests()
        .into_iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no request named {name}"))
}

#[test]
fn test_detection_table() {
    assert_eq!(detect_format(V1_FIXTURE), FormatTag::PostmanV1);
    assert_eq!(detect_format(V2_SCHEMA_FIXTURE), FormatTag::PostmanV2_1);
    assert_eq!(detect_format(V2_STRUCTURE_FIXTURE), FormatTag::PostmanV2_1);
    assert_eq!(detect_format(OPENAPI_FIXTURE), FormatTag::OpenApi);
    assert_eq!(detect_format(SWAGGER_FIXTURE), FormatTag::Unknown);
    assert_eq!(detect_format("not even json"), FormatTag::Unknown);

    assert!(is_postman_collection(V1_FIXTURE));
    assert!(is_postman_collection(V2_STRUCTURE_FIXTURE));
    assert!(!is_postman_collection(OPENAPI_FIXTURE));
    assert!(is_openapi_spec(OPENAPI_FIXTURE));
    assert!(!is_openapi_spec(SWAGGER_FIXTURE));
    assert!(!is_openapi_spec("{ broken"));
}

#[test]
fn test_swagger_is_rejected() {
    let importer = InterchangeImporter::default();
    assert!(matches!(
        importer.import_collection(SWAGGER_FIXTURE),
        Err(ImportError::UnsupportedVersion(_))
    ));
}

#[test]
fn test_v1_header_data_wins() {
    let collection = InterchangeImporter::default()
        .import_collection(V1_FIXTURE)
        .unwrap();
    let request = first_request(&collection);

    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "https://legacy.example.com/items");
    assert_eq!(request.headers, vec![KeyValue::new("X-New", "3")]);
    assert_eq!(request.query_params, vec![KeyValue::new("draft", "true")]);
}

#[test]
fn test_v2_folder_auth_inherited_and_trace_defaults_to_get() {
    let collection = InterchangeImporter::default()
        .import_collection(V2_SCHEMA_FIXTURE)
        .unwrap();

    assert_eq!(collection.folder_count(), 1);
    let inherits = find_request(&collection, "Inherits");
    assert_eq!(inherits.auth, Some(AuthConfig::bearer("x")));

    let traced = find_request(&collection, "Traced");
    assert_eq!(traced.method, HttpMethod::Get);
    assert_eq!(traced.auth, Some(AuthConfig::bearer("x")));
}

#[test]
fn test_openapi_path_parameter_uses_example() {
    let collection = InterchangeImporter::default()
        .import_collection(OPENAPI_FIXTURE)
        .unwrap();
    let request = find_request(&collection, "getUser");

    assert_eq!(request.url, "{{baseUrl}}/users/42");
    assert!(!request.url.contains("{id}"));
    assert!(!request.url.contains("{{id}}"));
    assert_eq!(
        collection.variables[0],
        Variable::new("baseUrl", "https://users.example.com/v1").with_id(&collection.variables[0].id)
    );
}

#[test]
fn test_openapi_self_reference_terminates() {
    let collection = InterchangeImporter::default()
        .import_collection(OPENAPI_FIXTURE)
        .unwrap();
    let request = find_request(&collection, "Create node");

    let Some(RequestBody::Json { content }) = &request.body else {
        panic!("expected a JSON body, got {:?}", request.body);
    };
    let example: Value = serde_json::from_str(content).unwrap();

    let mut depth = 0;
    let mut cursor = &example;
    while let Some(next) = cursor.get("next") {
        depth += 1;
        cursor = next;
    }
    assert!(depth <= 5, "nesting depth {depth}");
    assert_eq!(example["value"], 0);
}

#[test]
fn test_openapi_depth_limit_is_configurable() {
    let shallow = InterchangeImporter::new(&ImportConfig::default().with_schema_depth_limit(1))
        .import_collection(OPENAPI_FIXTURE)
        .unwrap();
    let deep = InterchangeImporter::default()
        .import_collection(OPENAPI_FIXTURE)
        .unwrap();

    let body_len = |collection: &RequestCollection| match &find_request(collection, "Create node").body {
        Some(RequestBody::Json { content }) => content.len(),
        other => panic!("expected a JSON body, got {other:?}"),
    };
    assert!(body_len(&shallow) < body_len(&deep));
}

#[test]
fn test_disabled_items_encoding() {
    let mut collection = RequestCollection::new("Flags");
    collection.add_item(
        HttpRequest::new("List", HttpMethod::Get, "https://api.example.com/items").with_query_params(
            vec![KeyValue::new("page", "1"), KeyValue::disabled("debug", "true")],
        ),
    );

    let exported: Value = serde_json::from_str(&export_postman_v2_1(&collection).unwrap()).unwrap();
    let url = &exported["item"][0]["request"]["url"];

    assert_eq!(url["raw"], "https://api.example.com/items?page=1");
    assert!(url["query"][0].get("disabled").is_none());
    assert_eq!(url["query"][1]["disabled"], Value::Bool(true));
}

fn round_trip_fixture() -> RequestCollection {
    let mut collection = RequestCollection::new("Round Trip");
    collection.description = "Every v2.1 feature".to_string();
    collection.variables = vec![
        Variable::new("baseUrl", "https://api.example.com"),
        Variable::new("apiKey", "s3cret").secret(),
        Variable::new("unused", "0").with_enabled(false),
    ];

    let create = HttpRequest::new("Create pet", HttpMethod::Post, "{{baseUrl}}/pets")
        .with_headers(vec![
            KeyValue::new("Content-Type", "application/json").with_description("payload type"),
            KeyValue::disabled("X-Trace", "1"),
        ])
        .with_body(RequestBody::json("{\n  \"name\": \"Rex\",\n  \"tags\": [\n    \"dog\"\n  ]\n}"))
        .with_auth(AuthConfig::bearer("{{token}}"));

    let search = HttpRequest::new("Search", HttpMethod::Get, "https://api.example.com:8443/pets")
        .with_query_params(vec![
            KeyValue::new("q", "rex"),
            KeyValue::disabled("limit", "10").with_description("page size"),
        ])
        .with_auth(AuthConfig::api_key("api_key", "{{apiKey}}", ApiKeyLocation::QueryParam));

    let upload = HttpRequest::new("Upload", HttpMethod::Put, "{{baseUrl}}/pets/1/photo").with_body(
        RequestBody::FormData {
            fields: vec![
                FormField::text("caption", "hello"),
                FormField::file("photo", "/tmp/rex.png").with_enabled(false),
            ],
        },
    );
    let login = HttpRequest::new("Login", HttpMethod::Post, "{{baseUrl}}/login")
        .with_body(RequestBody::FormUrlEncoded {
            fields: vec![KeyValue::new("user", "a"), KeyValue::disabled("remember", "1")],
        })
        .with_auth(AuthConfig::basic("a", "b"));
    let graph = HttpRequest::new("Graph", HttpMethod::Post, "{{baseUrl}}/graphql").with_body(
        RequestBody::GraphQL {
            query: "{ pets { name } }".to_string(),
            variables: Some("{\"first\":1}".to_string()),
        },
    );
    let blob = HttpRequest::new("Blob", HttpMethod::Patch, "{{baseUrl}}/blob")
        .with_body(RequestBody::Binary {
            file_path: "/tmp/blob.bin".to_string(),
        });
    let text = HttpRequest::new("Note", HttpMethod::Options, "{{baseUrl}}/note")
        .with_body(RequestBody::raw("plain words", "text/plain"));
    let empty = HttpRequest::new("Empty", HttpMethod::Delete, "{{baseUrl}}/pets/1")
        .with_body(RequestBody::None);
    let head = HttpRequest::new("Health", HttpMethod::Head, "{{baseUrl}}/health");

    collection.add_item(
        Folder::new("Pets")
            .with_description("Pet endpoints")
            .with_items(vec![
                create.into(),
                search.into(),
                Folder::new("Media").with_items(vec![upload.into(), blob.into()]).into(),
            ]),
    );
    collection.add_item(login);
    collection.add_item(graph);
    collection.add_item(text);
    collection.add_item(empty);
    collection.add_item(head);
    collection
}

#[test]
fn test_round_trip_is_structurally_stable() {
    let original = round_trip_fixture();
    let exported = PostmanV21Exporter::to_postman(&original);
    let json = export_postman_v2_1(&original).unwrap();

    assert_eq!(detect_format(&json), FormatTag::PostmanV2_1);
    assert!(exported.info.postman_id.is_some());

    let imported = InterchangeImporter::default().import_collection(&json).unwrap();
    assert_eq!(imported.without_ids(), original.without_ids());
    assert!(imported.structurally_eq(&original));

    // Exporting again yields the same document apart from the collection id.
    let again: Value = serde_json::from_str(&export_postman_v2_1(&imported).unwrap()).unwrap();
    let mut first: Value = serde_json::from_str(&json).unwrap();
    let mut second = again;
    first["info"]["_postman_id"] = Value::Null;
    second["info"]["_postman_id"] = Value::Null;
    assert_eq!(first, second);
}

#[test]
fn test_round_trip_keeps_tree_shape() {
    let original = round_trip_fixture();
    let imported = InterchangeImporter::default()
        .import_collection(&export_postman_v2_1(&original).unwrap())
        .unwrap();

    assert_eq!(imported.request_count(), 9);
    assert_eq!(imported.folder_count(), 2);
    let CollectionItem::Folder(pets) = &imported.items[0] else {
        panic!("expected the Pets folder first");
    };
    assert_eq!(pets.description, "Pet endpoints");
    assert!(pets.items[2].is_folder());
}

#[test]
fn test_explicit_no_auth_survives_authed_parent() {
    let mut collection = RequestCollection::new("Guarded");
    collection.auth = Some(AuthConfig::bearer("outer"));
    collection.add_item(
        HttpRequest::new("Public", HttpMethod::Get, "{{baseUrl}}/status")
            .with_auth(AuthConfig::None),
    );
    collection.add_item(HttpRequest::new("Private", HttpMethod::Get, "{{baseUrl}}/me"));

    let json = export_postman_v2_1(&collection).unwrap();
    let written: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(written["auth"]["type"], "bearer");
    assert_eq!(written["item"][0]["auth"]["type"], "noauth");
    assert!(written["item"][1].get("auth").is_none());

    let imported = InterchangeImporter::default().import_collection(&json).unwrap();
    assert_eq!(imported.auth, Some(AuthConfig::bearer("outer")));
    assert_eq!(find_request(&imported, "Public").auth, Some(AuthConfig::None));
    assert_eq!(
        find_request(&imported, "Private").auth,
        Some(AuthConfig::bearer("outer"))
    );
}

#[tokio::test]
async fn test_import_file_then_export_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("legacy.postman_collection.json");
    std::fs::write(&input, V1_FIXTURE).unwrap();

    let store = Arc::new(InMemoryCollectionStore::new());
    let import = ImportCollectionFromFile::new(
        Arc::new(InterchangeImporter::default()),
        TokioFileSystem::new(),
        ImportConfig::default(),
    )
    .with_store(store.clone());
    let output = import.execute(&input).await.unwrap();

    assert_eq!(output.format, FormatTag::PostmanV1);
    assert_eq!(store.list().await.unwrap(), vec![(output.collection.id.clone(), "Legacy".to_string())]);

    let target = dir.path().join("exports/nested/legacy.v21.json");
    ExportCollectionToFile::new(PostmanV21Exporter::new(), TokioFileSystem::new())
        .execute(&output.collection, &target)
        .await
        .unwrap();

    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.ends_with('\n'));
    let reimported = InterchangeImporter::default().import_collection(&written).unwrap();
    assert!(reimported.structurally_eq(&output.collection));
}

#[tokio::test]
async fn test_import_file_limits_and_missing() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("users.json");
    std::fs::write(&input, OPENAPI_FIXTURE).unwrap();

    let tight = ImportCollectionFromFile::new(
        Arc::new(InterchangeImporter::default()),
        TokioFileSystem::new(),
        ImportConfig::default().with_max_file_size(16),
    );
    assert!(matches!(
        tight.execute(&input).await,
        Err(ImportError::FileTooLarge { max: 16, .. })
    ));
    assert!(matches!(
        tight.execute(&dir.path().join("missing.json")).await,
        Err(ImportError::Io(_))
    ));
}

#[tokio::test]
async fn test_import_text_persists_through_store() {
    let store = Arc::new(InMemoryCollectionStore::new());
    let import = ImportCollectionFromText::new(Arc::new(InterchangeImporter::default()))
        .with_store(store.clone());

    let output = import.execute(OPENAPI_FIXTURE).await.unwrap();
    assert_eq!(output.format, FormatTag::OpenApi);

    let loaded = store.load(&output.collection.id).await.unwrap();
    assert_eq!(loaded.name, "Users");
    assert_eq!(loaded.request_count(), 2);
}
