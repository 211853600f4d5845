//! Best-effort body formatters.
//!
//! Formatting never fails: text that cannot be formatted is kept as-is.

pub mod json;
pub mod xml;
