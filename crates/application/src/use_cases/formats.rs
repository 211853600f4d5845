//! Supported format descriptors.

use waypost_domain::FormatTag;

/// Describes a format the engine can read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// The format tag.
    pub tag: FormatTag,
    /// Display name.
    pub name: &'static str,
    /// Typical file extensions, without the dot.
    pub extensions: &'static [&'static str],
    /// Short description.
    pub description: &'static str,
}

/// Formats accepted by the import use cases.
#[must_use]
pub fn supported_import_formats() -> Vec<FormatDescriptor> {
    FormatTag::importable()
        .iter()
        .map(|&tag| FormatDescriptor {
            tag,
            name: tag.display_name(),
            extensions: match tag {
                FormatTag::OpenApi => &["json", "yaml", "yml"],
                _ => &["json"],
            },
            description: match tag {
                FormatTag::PostmanV1 => "Legacy Postman export with flat requests and order arrays",
                FormatTag::OpenApi => "OpenAPI 3.0/3.1 specification, JSON or YAML",
                _ => "Postman collection with nested item tree",
            },
        })
        .collect()
}

/// Formats produced by the export use case.
#[must_use]
pub fn supported_export_formats() -> Vec<FormatDescriptor> {
    vec![FormatDescriptor {
        tag: FormatTag::PostmanV2_1,
        name: FormatTag::PostmanV2_1.display_name(),
        extensions: &["json"],
        description: "Postman collection with nested item tree",
    }]
}
