//! Match guards standing in for lookaround assertions.
//!
//! A web address that ends a sentence (`www.example.de.` or
//! `example.de/path.` before whitespace or end of text) is still redacted;
//! the trailing period stays in the text. Any other following period, as
//! in `example.de.x`, rejects the match.

const MAILTO: &str = "mailto:";

/// Web-address context rules:
/// - not preceded by `@` or `mailto:`
/// - host does not start with a digit
/// - not followed by a word character, `@`, or `/`
/// - a following `.` is only allowed as sentence punctuation (then
///   whitespace or end of text)
pub fn web_guard(text: &str, start: usize, end: usize) -> bool {
    let before = &text[..start];
    let mailto_tail = before.get(before.len().saturating_sub(MAILTO.len())..);
    if before.ends_with('@') || mailto_tail.is_some_and(|t| t.eq_ignore_ascii_case(MAILTO)) {
        return false;
    }

    // `www.` may be read as a host label, so only the scheme is stripped.
    let matched = &text[start..end];
    let host = strip_prefix_ci(matched, "https://")
        .or_else(|| strip_prefix_ci(matched, "http://"))
        .unwrap_or(matched);
    if host.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }

    let mut after = text[end..].chars();
    match after.next() {
        None => true,
        Some(c) if c.is_alphanumeric() || c == '_' || c == '@' || c == '/' => false,
        Some('.') => after.next().map_or(true, char::is_whitespace),
        Some(_) => true,
    }
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}
