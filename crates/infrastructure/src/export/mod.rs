//! Export infrastructure.
//!
//! Canonical collections are written out as Postman Collection v2.1.0.

mod postman;

pub use postman::PostmanV21Exporter;

use waypost_application::{CollectionExporter, ExportError};
use waypost_domain::RequestCollection;

/// Renders a collection as Postman v2.1 JSON with the default exporter.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized.
pub fn export_postman_v2_1(collection: &RequestCollection) -> Result<String, ExportError> {
    PostmanV21Exporter::new().export_postman_v2_1(collection)
}
