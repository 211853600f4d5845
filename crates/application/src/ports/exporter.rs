//! Collection exporter port

use thiserror::Error;
use waypost_domain::RequestCollection;

use super::FileSystemError;

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the output file failed.
    #[error(transparent)]
    Io(#[from] FileSystemError),

    /// The export document could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Converts canonical collections into Postman Collection v2.1 JSON.
pub trait CollectionExporter: Send + Sync {
    /// Renders the collection as pretty-printed Postman v2.1 JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialization`] if JSON rendering fails.
    fn export_postman_v2_1(&self, collection: &RequestCollection) -> Result<String, ExportError>;
}
