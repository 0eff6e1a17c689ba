// ABOUTME: Error text normalization for anything surfaced to the user.
// ABOUTME: Strips ANSI escape sequences so terminal-colored backend errors render plain.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const UNKNOWN_ERROR: &str = "Unknown error";

static ANSI_PATTERN: OnceLock<Regex> = OnceLock::new();

/// ESC, up to two of `[ ( ? ) ;`, semicolon-separated digit groups, and a
/// final terminator character.
fn ansi_pattern() -> &'static Regex {
    ANSI_PATTERN.get_or_init(|| {
        Regex::new(r"\x1B[\[()?;]{0,2}(;?\d)*.").expect("ANSI pattern is valid")
    })
}

/// Remove ANSI escape sequences from a string.
pub fn strip_ansi(text: &str) -> String {
    ansi_pattern().replace_all(text, "").into_owned()
}

/// Normalize any displayable error into a plain, user-facing string.
///
/// Never fails; empty input (after stripping) yields "Unknown error".
pub fn normalize_error<E: fmt::Display>(err: E) -> String {
    let text = err.to_string();
    let cleaned = strip_ansi(text.trim());
    if cleaned.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        cleaned
    }
}

/// Pull a descriptive `message` field out of an arbitrary JSON body, if any.
pub fn message_from_body(body: &serde_json::Value) -> Option<String> {
    body.get("message")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}
