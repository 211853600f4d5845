//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building canonical values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not part of the canonical method set.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The API key location is not recognised.
    #[error("unsupported API key location: {0}")]
    UnsupportedKeyLocation(String),

    /// A collection item has an invalid structure.
    #[error("invalid collection item: {0}")]
    InvalidCollectionItem(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
