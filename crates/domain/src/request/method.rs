//! Canonical HTTP methods

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// The seven verbs a canonical request can carry.
///
/// Foreign formats may name others (TRACE, CONNECT, PROPFIND, ...); adapters
/// go through [`HttpMethod::parse_lenient`], which maps them to GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    #[default]
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

const VERBS: [(HttpMethod, &str); 7] = [
    (HttpMethod::Get, "GET"),
    (HttpMethod::Post, "POST"),
    (HttpMethod::Put, "PUT"),
    (HttpMethod::Patch, "PATCH"),
    (HttpMethod::Delete, "DELETE"),
    (HttpMethod::Head, "HEAD"),
    (HttpMethod::Options, "OPTIONS"),
];

impl HttpMethod {
    /// Upper-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        VERBS[self as usize].1
    }

    /// Parses a method name coming from a foreign format.
    ///
    /// Unknown methods are logged and mapped to GET instead of failing the
    /// import.
    #[must_use]
    pub fn parse_lenient(method: &str) -> Self {
        method.parse().unwrap_or_else(|_| {
            tracing::warn!(method, "unknown HTTP method, defaulting to GET");
            Self::Get
        })
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; surrounding whitespace is ignored.
impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let name = s.trim();
        VERBS
            .iter()
            .find(|(_, verb)| verb.eq_ignore_ascii_case(name))
            .map(|&(method, _)| method)
            .ok_or_else(|| DomainError::UnsupportedMethod(name.to_string()))
    }
}
