//! Collection importer port

use thiserror::Error;
use waypost_domain::{FormatTag, RequestCollection};

use super::{FileSystemError, StoreError};

/// Boxed decode error carried by [`ImportError::MalformedStructure`].
pub type DecodeError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal import failures.
///
/// Recoverable oddities (unknown methods, unknown auth types, unresolvable
/// `$ref`s) never surface here: they are logged and defaulted.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document declares a version this engine refuses (e.g. Swagger 2.0).
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),

    /// The text parses but required fields are absent or mistyped.
    #[error("malformed {format} document: {source}")]
    MalformedStructure {
        /// Format the document was decoded as
        format: FormatTag,
        /// Underlying decode error
        #[source]
        source: DecodeError,
    },

    /// The text is neither JSON nor YAML.
    #[error("invalid syntax: {0}")]
    InvalidSyntax(String),

    /// No adapter accepted the document.
    #[error("unrecognised collection format")]
    UnknownFormat,

    /// The file exceeds the configured size limit.
    #[error("file too large: {size} bytes (max {max} bytes)")]
    FileTooLarge {
        /// Actual size in bytes
        size: u64,
        /// Configured maximum in bytes
        max: u64,
    },

    /// Reading the source file failed.
    #[error(transparent)]
    Io(#[from] FileSystemError),

    /// Persisting the imported collection failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The background conversion task did not complete.
    #[error("import task failed: {0}")]
    Task(String),
}

impl ImportError {
    /// Wraps a decode error with the format it was decoded as.
    pub fn malformed(format: FormatTag, source: impl Into<DecodeError>) -> Self {
        Self::MalformedStructure {
            format,
            source: source.into(),
        }
    }
}

/// Converts external collection text into the canonical model.
///
/// Implementations are pure and synchronous; the use cases move them onto a
/// blocking thread.
pub trait CollectionImporter: Send + Sync {
    /// Classifies the text without failing.
    fn detect_format(&self, content: &str) -> FormatTag;

    /// Imports text already classified as `format`.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] when the text cannot be converted.
    fn import_format(
        &self,
        content: &str,
        format: FormatTag,
    ) -> Result<RequestCollection, ImportError>;

    /// Imports the text, auto-detecting its format.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] when the text cannot be converted.
    fn import_collection(&self, content: &str) -> Result<RequestCollection, ImportError> {
        self.import_format(content, self.detect_format(content))
    }
}
