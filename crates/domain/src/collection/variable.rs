//! Collection variables

use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// Kind of a collection variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    /// Plain value
    #[default]
    Default,
    /// Value that should be masked in the UI
    Secret,
}

/// A collection variable referenced as `{{key}}` inside requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Identifier, preserved across import/export when the source has one
    pub id: String,
    /// Variable name
    pub key: String,
    /// Current value
    #[serde(default)]
    pub value: String,
    /// Whether the variable is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Variable kind
    #[serde(default, rename = "type")]
    pub variable_type: VariableType,
}

const fn default_enabled() -> bool {
    true
}

impl Variable {
    /// Creates an enabled default variable with a fresh id.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            key: key.into(),
            value: value.into(),
            enabled: true,
            variable_type: VariableType::Default,
        }
    }

    /// Replaces the id, typically with one carried by the source document.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Marks the variable as secret.
    #[must_use]
    pub const fn secret(mut self) -> Self {
        self.variable_type = VariableType::Secret;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_variable() {
        let variable = Variable::new("baseUrl", "https://api.example.com");
        assert!(variable.enabled);
        assert_eq!(variable.variable_type, VariableType::Default);
        assert!(!variable.id.is_empty());
    }

    #[test]
    fn test_builder_flags() {
        let variable = Variable::new("token", "x")
            .with_id("var-1")
            .with_enabled(false)
            .secret();
        assert_eq!(variable.id, "var-1");
        assert!(!variable.enabled);
        assert_eq!(variable.variable_type, VariableType::Secret);
    }
}
