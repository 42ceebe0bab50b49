//! Download filename derivation for exported agendas.

use super::sections::PLACEHOLDER_TITLE;
use once_cell::sync::Lazy;
use regex::Regex;

/// Extension appended to every exported document.
pub const DOCUMENT_EXTENSION: &str = "pdf";

static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid filename filter regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Filename stem derived from a meeting title.
///
/// Rules:
/// - the title is trimmed, then everything except ASCII letters, digits,
///   `_`, whitespace and `-` is removed;
/// - whitespace runs become a single `_`;
/// - blank titles, and titles with nothing left after filtering, use the
///   placeholder title instead.
pub fn filename_stem(title: &str) -> String {
    let stem = sanitize(title.trim());
    if stem.is_empty() {
        sanitize(PLACEHOLDER_TITLE)
    } else {
        stem
    }
}

/// Full download filename, e.g. `Q1_Planning.pdf`.
pub fn document_filename(title: &str) -> String {
    format!("{}.{DOCUMENT_EXTENSION}", filename_stem(title))
}

fn sanitize(source: &str) -> String {
    let filtered = DISALLOWED_RE.replace_all(source, "");
    WHITESPACE_RE.replace_all(&filtered, "_").into_owned()
}
