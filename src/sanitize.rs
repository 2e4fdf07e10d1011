use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\s-]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Turns raw OCR output into a filesystem-safe file stem.
///
/// Keeps letters, digits, `_` and hyphens, joins words with `_`, and drops any
/// separators or symbols left at the edges. Returns `None` when nothing usable
/// remains. Applying it to its own output returns the same string.
///
/// Combining marks and connector punctuation other than `_` are dropped, so
/// decomposed accents lose their mark.
pub fn sanitize(raw: &str) -> Option<String> {
    let text = DISALLOWED.replace_all(raw.trim(), "");
    let text = WHITESPACE.replace_all(&text, "_");
    let text = text
        .trim_matches(|c: char| c == '_' || c == '-')
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}
