//! Text helpers shared by config parsing, loaders, and output formatting.

/// Longest error body kept in [`crate::Error::CatalogStatus`].
const ERROR_BODY_CHARS: usize = 180;

/// Trim a configured value, treating blank input as unset.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Whether `value` names an `http` or `https` location (scheme is case-insensitive).
pub fn is_http_url(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Flatten a response body onto one line and cap it for error messages.
pub fn compact_text(value: &str) -> String {
    preview_text(value, ERROR_BODY_CHARS)
}

/// Shorten text to `max_chars`, collapsing whitespace and appending `...`.
pub fn preview_text(value: &str, max_chars: usize) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}
