//! Left-to-right scan of a channel mode string and its parameters.
//!
//! `o`, `v`, `b`, `k` and `l` each take the next parameter, in the order the
//! letters appear. Every other letter is a plain flag. Letters before the
//! first `+` or `-` still consume their parameter but change nothing.

use crate::error::ModeParseError;
use crate::util::strip_colon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlusMinus {
    Plus,
    Minus,
    NoPrefix,
}

/// Whether a change adds or removes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeDirection {
    Add,
    Remove,
}

impl ModeDirection {
    #[inline]
    pub fn is_add(self) -> bool {
        self == ModeDirection::Add
    }
}

/// One effective change from a mode string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModeChange<'a> {
    /// `+o` / `-o` on a nickname.
    Op(ModeDirection, &'a str),
    /// `+v` / `-v` on a nickname.
    Voice(ModeDirection, &'a str),
    /// `+b` / `-b` on a mask.
    Ban(ModeDirection, &'a str),
    /// `+l <n>` sets the user limit, `-l` clears it.
    Limit(Option<u32>),
    /// `+k <key>` sets the key, `-k` clears it.
    Key(Option<&'a str>),
    /// Any parameterless letter.
    Flag(ModeDirection, char),
}

/// Result of scanning one mode string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeScan<'a> {
    /// Changes in wire order.
    pub changes: Vec<ModeChange<'a>>,
    /// Non-fatal problems; the affected letters were skipped.
    pub errors: Vec<ModeParseError>,
}

/// Scan `modes` (such as `+ov-b`) against `params` (such as
/// `["alice", "bob", "*!*@spam"]`).
///
/// ```
/// use slirc_sync::mode::{scan_channel_modes, ModeChange, ModeDirection};
///
/// let scan = scan_channel_modes("+ov", &["alice", "bob"]);
/// assert_eq!(scan.changes, vec![
///     ModeChange::Op(ModeDirection::Add, "alice"),
///     ModeChange::Voice(ModeDirection::Add, "bob"),
/// ]);
/// ```
pub fn scan_channel_modes<'a>(modes: &str, params: &[&'a str]) -> ModeScan<'a> {
    use self::PlusMinus::*;

    let mut scan = ModeScan::default();
    let mut args = params.iter().copied().map(strip_colon);
    let mut cur_mod = NoPrefix;

    for c in strip_colon(modes).chars() {
        let dir = match cur_mod {
            Plus => Some(ModeDirection::Add),
            Minus => Some(ModeDirection::Remove),
            NoPrefix => None,
        };

        match c {
            '+' => cur_mod = Plus,
            '-' => cur_mod = Minus,
            'o' | 'v' | 'b' => {
                let Some(arg) = args.next() else {
                    scan.errors.push(ModeParseError::MissingParameter { mode: c });
                    continue;
                };
                if let Some(dir) = dir {
                    scan.changes.push(match c {
                        'o' => ModeChange::Op(dir, arg),
                        'v' => ModeChange::Voice(dir, arg),
                        _ => ModeChange::Ban(dir, arg),
                    });
                }
            }
            'k' => match (dir, args.next()) {
                (Some(ModeDirection::Add), Some(key)) => scan.changes.push(ModeChange::Key(Some(key))),
                (Some(ModeDirection::Remove), _) => scan.changes.push(ModeChange::Key(None)),
                (_, None) => scan.errors.push(ModeParseError::MissingParameter { mode: c }),
                (None, Some(_)) => {}
            },
            'l' => match (dir, args.next()) {
                (Some(ModeDirection::Add), Some(limit)) => match limit.parse::<u32>() {
                    Ok(n) => scan.changes.push(ModeChange::Limit(Some(n))),
                    Err(_) => scan.errors.push(ModeParseError::InvalidLimit(limit.to_string())),
                },
                (Some(ModeDirection::Add), None) => {
                    scan.errors.push(ModeParseError::MissingParameter { mode: c })
                }
                (Some(ModeDirection::Remove), _) => scan.changes.push(ModeChange::Limit(None)),
                (None, _) => {}
            },
            _ => {
                if let Some(dir) = dir {
                    scan.changes.push(ModeChange::Flag(dir, c));
                }
            }
        }
    }

    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use ModeDirection::*;

    #[test]
    fn test_flags_without_params() {
        let scan = scan_channel_modes("+nt-s", &[]);
        assert_eq!(
            scan.changes,
            vec![
                ModeChange::Flag(Add, 'n'),
                ModeChange::Flag(Add, 't'),
                ModeChange::Flag(Remove, 's'),
            ]
        );
        assert!(scan.errors.is_empty());
    }

    #[test]
    fn test_letters_before_sign_are_noops() {
        let scan = scan_channel_modes("nt+i", &[]);
        assert_eq!(scan.changes, vec![ModeChange::Flag(Add, 'i')]);
    }

    #[test]
    fn test_unsigned_param_letter_still_consumes() {
        let scan = scan_channel_modes("o+v", &["alice", "bob"]);
        assert_eq!(scan.changes, vec![ModeChange::Voice(Add, "bob")]);
    }

    #[test]
    fn test_key_and_limit() {
        let scan = scan_channel_modes("+kl", &["secret", "25"]);
        assert_eq!(
            scan.changes,
            vec![ModeChange::Key(Some("secret")), ModeChange::Limit(Some(25))]
        );

        let scan = scan_channel_modes("-kl", &["secret"]);
        assert_eq!(scan.changes, vec![ModeChange::Key(None), ModeChange::Limit(None)]);
    }

    #[test]
    fn test_bad_limit_is_reported() {
        let scan = scan_channel_modes("+lt", &["lots"]);
        assert_eq!(scan.changes, vec![ModeChange::Flag(Add, 't')]);
        assert_eq!(scan.errors, vec![ModeParseError::InvalidLimit("lots".to_string())]);
    }

    #[test]
    fn test_missing_param_is_reported() {
        let scan = scan_channel_modes("+oo", &["alice"]);
        assert_eq!(scan.changes, vec![ModeChange::Op(Add, "alice")]);
        assert_eq!(scan.errors, vec![ModeParseError::MissingParameter { mode: 'o' }]);
    }

    #[test]
    fn test_colon_on_last_param() {
        let scan = scan_channel_modes(":+b", &[":*!*@spam.example"]);
        assert_eq!(scan.changes, vec![ModeChange::Ban(Add, "*!*@spam.example")]);
    }
}
