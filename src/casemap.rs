//! Canonical keys for nickname and channel lookups.
//!
//! Every insert into and lookup from the state model goes through
//! [`irc_to_lower`], so `#Rust`, `#rust` and `#RUST` address the same
//! channel. Display forms keep their original case.
//!
//! The mapping is `rfc1459`: ASCII letters fold to lowercase, and
//! `[]\~` fold to `{}|^`.

#[inline]
fn fold(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c.to_ascii_lowercase(),
    }
}

/// Canonical lookup key for a nickname or channel name.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(fold).collect()
}

/// Case-insensitive comparison under the same mapping as [`irc_to_lower`].
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.chars().map(fold).eq(b.chars().map(fold))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_ascii() {
        assert_eq!(irc_to_lower("#Rust-Lang"), "#rust-lang");
        assert_eq!(irc_to_lower("NickServ"), "nickserv");
    }

    #[test]
    fn test_rfc1459_specials() {
        assert_eq!(irc_to_lower("[Guest]\\~"), "{guest}|^");
        assert!(irc_eq("foo[1]", "FOO{1}"));
        assert!(!irc_eq("foo", "foobar"));
    }

    #[test]
    fn test_non_ascii_untouched() {
        assert_eq!(irc_to_lower("#Ünïcode"), "#Ünïcode");
    }
}
