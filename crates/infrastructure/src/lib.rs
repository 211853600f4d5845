//! Waypost Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: format detection, the Postman and
//! OpenAPI import adapters, the Postman v2.1 exporter, and the file system
//! and store adapters.

pub mod export;
pub mod formatting;
pub mod import;
pub mod persistence;

pub use export::{PostmanV21Exporter, export_postman_v2_1};
pub use import::{
    ExampleSynthesizer, InterchangeImporter, OpenApiImporter, detect_format, is_openapi_spec,
    is_postman_collection,
};
pub use persistence::{InMemoryCollectionStore, TokioFileSystem};
