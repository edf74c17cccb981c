use std::borrow::Cow;

/// Returns true if `s` reads back unchanged when written without quotes.
#[inline]
fn is_plain_safe(s: &str) -> bool {
    let bytes = s.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last))
            if first.is_ascii_whitespace() || last.is_ascii_whitespace() =>
        {
            return false;
        }
        // A double quote at either edge could pair with the tag's outer quotes.
        (Some(b'"'), _) | (_, Some(b'"')) => return false,
        _ => {}
    }
    !bytes
        .iter()
        .any(|b| matches!(b, b',' | b'=' | b'\'' | b'\\' | b'\x0b'))
}

/// Render `value` so that it parses back to exactly `value` as a key or value.
///
/// Text without special characters is returned unchanged. Anything containing
/// a comma, `=`, a single quote, a backslash, leading or trailing blanks, or a
/// leading or trailing double quote is wrapped in single quotes, with single
/// quotes and backslashes inside escaped.
///
/// ```rust
/// use tagparser::quote;
///
/// assert_eq!(quote("plain"), "plain");
/// assert_eq!(quote("a,b"), "'a,b'");
/// assert_eq!(quote(r"it's"), r"'it\'s'");
///
/// let tag = tagparser::parse(&format!("pattern={}", quote("x=1, y='2'"))).unwrap();
/// assert_eq!(tag.get("pattern"), Some("x=1, y='2'"));
/// ```
pub fn quote(value: &str) -> Cow<'_, str> {
    if is_plain_safe(value) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if matches!(c, '\'' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    Cow::Owned(out)
}
