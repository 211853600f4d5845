//! Key/value pairs used for headers, query parameters and form fields

use serde::{Deserialize, Serialize};

/// A header, query parameter or url-encoded form field.
///
/// Supports enable/disable without deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// The key
    pub key: String,
    /// The value (may contain `{{variable}}` placeholders)
    #[serde(default)]
    pub value: String,
    /// Whether this entry is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Free-form description, empty when absent
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

const fn default_enabled() -> bool {
    true
}

impl KeyValue {
    /// Creates a new enabled entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
            description: String::new(),
        }
    }

    /// Creates a disabled entry.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::new(key, value)
        }
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Adds a description to this entry.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parses a `key=value&key2=value2` string into entries.
    ///
    /// Pairs without `=` become keys with an empty value. Blank segments are
    /// skipped. No percent-decoding is applied: values keep `{{variables}}`
    /// and encoded sequences exactly as written.
    #[must_use]
    pub fn parse_pairs(input: &str) -> Vec<Self> {
        input
            .split('&')
            .filter(|segment| !segment.trim().is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((key, value)) => Self::new(key, value),
                None => Self::new(segment, ""),
            })
            .collect()
    }
}

/// Kind of a multipart form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormFieldType {
    /// Plain text value
    #[default]
    Text,
    /// File reference; the value holds the file path
    File,
}

/// A multipart form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Field name
    pub key: String,
    /// Text value, or file path for file fields
    #[serde(default)]
    pub value: String,
    /// Field kind
    #[serde(default, rename = "type")]
    pub field_type: FormFieldType,
    /// Whether this field is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl FormField {
    /// Creates an enabled text field.
    #[must_use]
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            field_type: FormFieldType::Text,
            enabled: true,
        }
    }

    /// Creates an enabled file field.
    #[must_use]
    pub fn file(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: path.into(),
            field_type: FormFieldType::File,
            enabled: true,
        }
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns true if this field references a file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.field_type, FormFieldType::File)
    }
}
