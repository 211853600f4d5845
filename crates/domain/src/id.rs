//! ID generation utilities.

use uuid::Uuid;

/// Generates a new identifier for a canonical entity.
///
/// Identifiers are UUID v7 strings, so entities created during one import
/// sort in creation order.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Generates a random (UUID v4) identifier.
///
/// Used where the identifier must not leak creation time, such as the
/// `_postman_id` of an exported collection.
#[must_use]
pub fn generate_random_id() -> String {
    Uuid::new_v4().to_string()
}
