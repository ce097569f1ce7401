//! Helpers for Telegram's MarkdownV2 parse mode.
//!
//! Every character in [`MARKDOWN_V2_SPECIAL`] must be backslash-escaped when it
//! should appear literally, including inside user-provided reminder text.

/// Characters with special meaning in MarkdownV2.
pub const MARKDOWN_V2_SPECIAL: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Escapes markdown special characters for MarkdownV2 parsing mode
///
/// # Example
/// ```
/// use reminder_bot::utils::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("Call mom (5pm)!"), "Call mom \\(5pm\\)\\!");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Cuts `text` to at most `max_chars` characters, appending `...` when shortened.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
