//! Interchange format tags.
//!
//! A [`FormatTag`] names the external document shape detected for an
//! input, and is also used to describe supported import/export targets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// External collection formats understood by the interchange engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    /// Postman Collection v1.0.0 (flat `requests` + `order` arrays).
    PostmanV1,
    /// Postman Collection v2.0.0.
    #[serde(rename = "postman_v2_0")]
    PostmanV2_0,
    /// Postman Collection v2.1.0.
    #[serde(rename = "postman_v2_1")]
    PostmanV2_1,
    /// OpenAPI 3.0.x / 3.1.x.
    OpenApi,
    /// Could not be classified.
    #[default]
    Unknown,
}

impl FormatTag {
    /// Every format that can be imported.
    #[must_use]
    pub const fn importable() -> &'static [Self] {
        &[Self::PostmanV1, Self::PostmanV2_0, Self::PostmanV2_1, Self::OpenApi]
    }

    /// Returns the display name for this format.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PostmanV1 => "Postman Collection v1.0",
            Self::PostmanV2_0 => "Postman Collection v2.0",
            Self::PostmanV2_1 => "Postman Collection v2.1",
            Self::OpenApi => "OpenAPI 3.x",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns true for any Postman version.
    #[must_use]
    pub const fn is_postman(self) -> bool {
        matches!(self, Self::PostmanV1 | Self::PostmanV2_0 | Self::PostmanV2_1)
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
