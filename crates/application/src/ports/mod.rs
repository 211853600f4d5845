//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod exporter;
mod file_system;
mod importer;
mod store;

pub use exporter::{CollectionExporter, ExportError};
pub use file_system::{FileSystem, FileSystemError};
pub use importer::{CollectionImporter, DecodeError, ImportError};
pub use store::{CollectionStore, StoreError};
