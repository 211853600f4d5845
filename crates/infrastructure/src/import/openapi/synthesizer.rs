//! Example value synthesis from schemas.
//!
//! Produces a plausible value for a schema when the document has no example.
//! Recursion is bounded by a depth ceiling so self-referential schemas
//! terminate; past the ceiling an empty value of the declared kind is used.

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use super::resolver::resolve;
use super::types::Schema;

/// Synthesizes example values against one document's `components.schemas`.
#[derive(Debug, Clone, Copy)]
pub struct ExampleSynthesizer<'a> {
    schemas: &'a IndexMap<String, Schema>,
    max_depth: usize,
}

impl<'a> ExampleSynthesizer<'a> {
    /// Creates a synthesizer with the given depth ceiling.
    #[must_use]
    pub const fn new(schemas: &'a IndexMap<String, Schema>, max_depth: usize) -> Self {
        Self { schemas, max_depth }
    }

    /// Generates an example value for `schema`.
    #[must_use]
    pub fn synthesize(&self, schema: &Schema) -> Value {
        self.generate(schema, 0)
    }

    /// Follows `$ref` hops up to the depth ceiling.
    #[must_use]
    pub fn dereference<'s>(&self, schema: &'s Schema) -> &'s Schema
    where
        'a: 's,
    {
        let mut current = schema;
        for _ in 0..self.max_depth {
            let Some(target) = current
                .reference
                .as_deref()
                .and_then(|reference| resolve(reference, "schemas", self.schemas))
            else {
                break;
            };
            current = target;
        }
        current
    }

    fn generate(&self, schema: &Schema, depth: usize) -> Value {
        if depth > self.max_depth {
            return empty_value(schema);
        }

        if let Some(target) = schema
            .reference
            .as_deref()
            .and_then(|reference| resolve(reference, "schemas", self.schemas))
        {
            return self.generate(target, depth + 1);
        }

        if let Some(example) = schema.example.as_ref().or(schema.default.as_ref()) {
            return example.clone();
        }
        if let Some(first) = schema.enum_values.first() {
            return first.clone();
        }

        if !schema.all_of.is_empty() {
            let mut merged = Map::new();
            for part in &schema.all_of {
                if let Value::Object(fields) = self.generate(part, depth + 1) {
                    merged.extend(fields);
                }
            }
            return Value::Object(merged);
        }
        if let Some(first) = schema.one_of.first().or_else(|| schema.any_of.first()) {
            return self.generate(first, depth + 1);
        }

        match schema.schema_type.as_deref() {
            Some("object") => self.generate_object(schema, depth),
            None if !schema.properties.is_empty() => self.generate_object(schema, depth),
            Some("array") => schema.items.as_deref().map_or_else(
                || json!([]),
                |items| Value::Array(vec![self.generate(items, depth + 1)]),
            ),
            Some("string") => Value::String(string_example(schema.format.as_deref()).to_string()),
            Some("integer" | "number") => json!(0),
            Some("boolean") => Value::Bool(true),
            Some("null") => Value::Null,
            _ => Value::String(String::new()),
        }
    }

    fn generate_object(&self, schema: &Schema, depth: usize) -> Value {
        Value::Object(
            schema
                .properties
                .iter()
                .map(|(name, property)| (name.clone(), self.generate(property, depth + 1)))
                .collect(),
        )
    }
}

/// Canned string values keyed by `format`.
fn string_example(format: Option<&str>) -> &'static str {
    match format {
        Some("date") => "2024-01-01",
        Some("date-time") => "2024-01-01T00:00:00Z",
        Some("email") => "user@example.com",
        Some("uri" | "url") => "https://example.com",
        Some("uuid") => "550e8400-e29b-41d4-a716-446655440000",
        _ => "string",
    }
}

fn empty_value(schema: &Schema) -> Value {
    match schema.schema_type.as_deref() {
        Some("array") => json!([]),
        Some("string") => Value::String(String::new()),
        _ => json!({}),
    }
}
