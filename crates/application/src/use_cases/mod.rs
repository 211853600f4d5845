//! Application use cases (import/export orchestration).

mod export_collection;
mod formats;
mod import_collection;

pub use export_collection::ExportCollectionToFile;
pub use formats::{FormatDescriptor, supported_export_formats, supported_import_formats};
pub use import_collection::{ImportCollectionFromFile, ImportCollectionFromText, ImportOutput};
