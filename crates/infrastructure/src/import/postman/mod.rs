//! Postman Import Module
//!
//! Adapters for Postman Collection v1.0.0 and v2.0/v2.1 files, plus the
//! shared DTOs and auth/body helpers the v2.1 exporter reuses.

pub mod auth;
pub mod body;
pub mod types;
pub mod v1;
pub mod v1_types;
pub mod v2;

pub use types::PostmanCollection;
pub use v1_types::V1Collection;

/// Splits `url` at the first `?` into the base URL and the query string.
pub(crate) fn split_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("/a?b=1&c"), ("/a", Some("b=1&c")));
        assert_eq!(split_query("{{base}}/x"), ("{{base}}/x", None));
        assert_eq!(split_query("/a?"), ("/a", Some("")));
    }
}
