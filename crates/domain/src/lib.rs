//! Waypost Domain - Canonical collection model
//!
//! This crate defines the format-independent request collection tree that
//! every importer produces and every exporter consumes.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod collection;
pub mod error;
pub mod format;
pub mod id;
pub mod request;

pub use auth::{ApiKeyLocation, AuthConfig};
pub use collection::{CollectionItem, Folder, RequestCollection, RequestItem, Variable, VariableType};
pub use error::{DomainError, DomainResult};
pub use format::FormatTag;
pub use id::{generate_id, generate_random_id};
pub use request::{FormField, FormFieldType, HttpMethod, HttpRequest, KeyValue, RequestBody};
