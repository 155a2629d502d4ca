/// Take at most `max_chars` characters from `s` without splitting a UTF-8 sequence.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a body for error messages, noting how large it really was.
pub fn truncate_with_note(body: &str, max_chars: usize) -> String {
    let head = take_chars(body, max_chars);
    if head.len() == body.len() {
        body.to_string()
    } else {
        format!("{}... (truncated, {} total bytes)", head, body.len())
    }
}
