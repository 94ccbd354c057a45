/// True when `s` contains at least one word character (alphanumeric or '_').
fn has_word_char(s: &str) -> bool {
    s.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// A notification is sendable when both title and body carry real content,
/// or when the title is omitted entirely and the body carries real content.
///
/// A present-but-meaningless title (whitespace or punctuation only) rejects
/// the whole notification.
pub fn is_sendable(title: &str, body: &str) -> bool {
    if has_word_char(title) && has_word_char(body) {
        return true;
    }

    // Title can be empty, body is required; every other combination is invalid.
    title.is_empty() && has_word_char(body)
}
