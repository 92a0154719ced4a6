//! Small string helpers.

/// Truncates a string to at most `max_chars` characters.
///
/// Counts Unicode codepoints, so a nickname is never cut inside a
/// multi-byte character.
///
/// # Examples
///
/// ```
/// use slirc_sync::util::truncate_chars;
///
/// assert_eq!(truncate_chars("rustacean", 5), "rusta");
/// assert_eq!(truncate_chars("bob", 5), "bob");
/// assert_eq!(truncate_chars("héllo wörld", 3), "hél");
/// ```
#[inline]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Strips a single leading `:` if present.
#[inline]
pub(crate) fn strip_colon(s: &str) -> &str {
    s.strip_prefix(':').unwrap_or(s)
}
