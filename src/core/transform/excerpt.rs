use once_cell::sync::Lazy;
use regex::Regex;

pub const EXCERPT_MAX_CHARS: usize = 220;
pub const ELLIPSIS: char = '…';

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("Invalid tag pattern"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace pattern"));

/// Deletes markup tags and collapses whitespace runs into single spaces.
pub fn strip_markup(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let without_tags = TAG_RE.replace_all(raw, "");
    WHITESPACE_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Builds the excerpt for a description: markup stripped, then cut to
/// [`EXCERPT_MAX_CHARS`] characters with a trailing ellipsis when longer.
pub fn build_excerpt(description: &str) -> String {
    let text = strip_markup(description);
    if text.chars().count() <= EXCERPT_MAX_CHARS {
        return text;
    }

    let mut truncated: String = text.chars().take(EXCERPT_MAX_CHARS).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push(ELLIPSIS);
    truncated
}
