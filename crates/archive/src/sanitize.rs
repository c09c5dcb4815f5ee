//! Filename sanitization.

use regex::Regex;
use std::sync::LazyLock;

/// Filesystem-reserved and control characters that may not appear in a
/// filename on any supported platform.
static RESERVED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Longest sanitized title that goes into a filename.
pub const MAX_TITLE_CHARS: usize = 50;

/// Maps arbitrary title text to a filesystem-safe string of at most
/// [`MAX_TITLE_CHARS`] characters: newlines become spaces, reserved
/// characters become `_`, runs of whitespace collapse to a single space.
pub fn sanitize_title(title: &str) -> String {
    let title = title.replace('\n', " ").replace('\r', "");
    let title = RESERVED.replace_all(&title, "_");
    let title = WHITESPACE.replace_all(&title, " ");
    title.trim().chars().take(MAX_TITLE_CHARS).collect()
}
