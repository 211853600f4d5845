//! Raw body classification helpers.

use waypost_domain::RequestBody;

use crate::formatting::{json, xml};

/// Maps a raw body `language` hint to a MIME type.
#[must_use]
pub fn guess_content_type(language: &str) -> &'static str {
    match language.to_ascii_lowercase().as_str() {
        "json" => "application/json",
        "xml" => "application/xml",
        "html" => "text/html",
        "javascript" | "js" => "application/javascript",
        _ => "text/plain",
    }
}

/// Maps a MIME type back to a raw body `language` hint.
#[must_use]
pub fn language_for_content_type(content_type: &str) -> &'static str {
    let content_type = content_type.to_ascii_lowercase();
    if content_type.contains("json") {
        "json"
    } else if content_type.contains("xml") {
        "xml"
    } else if content_type.contains("html") {
        "html"
    } else if content_type.contains("javascript") {
        "javascript"
    } else {
        "text"
    }
}

/// Classifies raw text, reformatting JSON and XML.
///
/// With a `json`/`xml` language hint the hint wins. Any other hint yields a
/// `Raw` body typed from the hint. Without a hint the content is sniffed:
/// `{`/`[` means JSON, `<` means XML, anything else is plain text.
#[must_use]
pub fn classify_raw(content: &str, language: Option<&str>) -> RequestBody {
    match language.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => RequestBody::json(json::pretty(content)),
        Some("xml") => RequestBody::xml(xml::pretty(content)),
        Some(other) => RequestBody::raw(content, guess_content_type(other)),
        None => {
            let trimmed = content.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                RequestBody::json(json::pretty(content))
            } else if trimmed.starts_with('<') {
                RequestBody::xml(xml::pretty(content))
            } else {
                RequestBody::raw(content, "text/plain")
            }
        }
    }
}
