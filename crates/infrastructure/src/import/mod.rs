//! Collection import
//!
//! Format detection plus one adapter per external format. [`InterchangeImporter`]
//! ties them together behind the [`CollectionImporter`] port.

pub mod detect;
pub mod openapi;
pub mod postman;
pub mod yaml;

use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::error::Category;
use waypost_application::{CollectionImporter, ImportConfig, ImportError};
use waypost_domain::{FormatTag, RequestCollection};

pub use detect::{detect_format, is_openapi_spec, is_postman_collection};
pub use openapi::{ExampleSynthesizer, OpenApiImporter};

/// Auto-detecting importer for every supported format.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterchangeImporter {
    openapi: OpenApiImporter,
}

impl InterchangeImporter {
    /// Creates an importer using the limits in `config`.
    #[must_use]
    pub const fn new(config: &ImportConfig) -> Self {
        Self {
            openapi: OpenApiImporter::new(config.schema_depth_limit),
        }
    }

    /// Imports text the detector could not classify.
    ///
    /// Swagger and non-3.x OpenAPI documents go to the OpenAPI adapter so the
    /// caller gets a version error. Everything else is tried as Postman v2.x,
    /// then as v1.
    fn import_unknown(&self, content: &str) -> Result<RequestCollection, ImportError> {
        if let Ok(document) = yaml::parse_document(content) {
            if document.get("swagger").is_some() || document.get("openapi").is_some() {
                return self.openapi.import(content);
            }
        }

        match postman::v2::import(content) {
            Ok(collection) => Ok(collection),
            Err(v2_error) => {
                tracing::debug!(error = %v2_error, "not a Postman v2 collection, trying v1");
                postman::v1::import(content).map_err(|v1_error| {
                    tracing::debug!(error = %v1_error, "not a Postman v1 collection either");
                    match v2_error {
                        ImportError::InvalidSyntax(_) => v2_error,
                        _ => ImportError::UnknownFormat,
                    }
                })
            }
        }
    }
}

impl CollectionImporter for InterchangeImporter {
    fn detect_format(&self, content: &str) -> FormatTag {
        detect_format(content)
    }

    fn import_format(
        &self,
        content: &str,
        format: FormatTag,
    ) -> Result<RequestCollection, ImportError> {
        let collection = match format {
            FormatTag::OpenApi => self.openapi.import(content),
            FormatTag::PostmanV2_0 | FormatTag::PostmanV2_1 => postman::v2::import(content),
            FormatTag::PostmanV1 => postman::v1::import(content),
            FormatTag::Unknown => self.import_unknown(content),
        }?;

        tracing::info!(
            name = %collection.name,
            %format,
            requests = collection.request_count(),
            folders = collection.folder_count(),
            "imported collection"
        );
        Ok(collection)
    }
}

/// Decodes JSON into a format DTO.
///
/// Text that is not JSON at all is `InvalidSyntax`; JSON of the wrong shape is
/// `MalformedStructure` tagged with `format`.
pub(crate) fn decode_json<T: DeserializeOwned>(
    content: &str,
    format: FormatTag,
) -> Result<T, ImportError> {
    serde_json::from_str(content).map_err(|err| match err.classify() {
        Category::Syntax | Category::Eof => ImportError::InvalidSyntax(err.to_string()),
        Category::Data | Category::Io => ImportError::malformed(format, err),
    })
}

/// Renders a JSON value as text. `null` yields `None`; strings are taken
/// verbatim and everything else is serialized.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}
