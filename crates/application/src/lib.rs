//! Waypost Application - Use cases and ports
//!
//! This crate defines the boundaries of the interchange engine (importer,
//! exporter, file system and store ports) and the async use cases that
//! orchestrate them.

pub mod config;
pub mod ports;
pub mod use_cases;

pub use config::ImportConfig;
pub use ports::{
    CollectionExporter, CollectionImporter, CollectionStore, ExportError, FileSystem,
    FileSystemError, ImportError, StoreError,
};
pub use use_cases::{
    ExportCollectionToFile, FormatDescriptor, ImportCollectionFromFile, ImportCollectionFromText,
    ImportOutput, supported_export_formats, supported_import_formats,
};
