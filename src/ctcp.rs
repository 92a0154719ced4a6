//! Client-To-Client Protocol framing.
//!
//! A CTCP body travels inside the trailing text of a `PRIVMSG` (request) or
//! `NOTICE` (reply), delimited on both ends by `0x01`:
//!
//! ```text
//! :alice!a@host PRIVMSG bob :\x01VERSION\x01
//! :alice!a@host PRIVMSG #rust :\x01ACTION waves\x01
//! ```
//!
//! Only ACTION, PING, VERSION and CLIENTINFO are understood; anything else
//! parses as [`CtcpKind::Other`] and is left to listeners.

/// The CTCP delimiter byte.
pub const CTCP_DELIM: char = '\x01';

/// Answer sent for `CLIENTINFO`.
pub const CLIENTINFO: &str = "ACTION CLIENTINFO PING VERSION";

/// Version string of this crate, used in `VERSION` replies.
pub const VERSION_STRING: &str = concat!("slirc-sync ", env!("CARGO_PKG_VERSION"));

/// Recognised CTCP commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CtcpKind<'a> {
    Action,
    Ping,
    Version,
    ClientInfo,
    /// Any other command, verbatim.
    Other(&'a str),
}

impl<'a> CtcpKind<'a> {
    /// The command as it appears on the wire.
    pub fn command(&self) -> &'a str {
        match *self {
            CtcpKind::Action => "ACTION",
            CtcpKind::Ping => "PING",
            CtcpKind::Version => "VERSION",
            CtcpKind::ClientInfo => "CLIENTINFO",
            CtcpKind::Other(command) => command,
        }
    }
}

/// A CTCP body split into command and parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ctcp<'a> {
    pub kind: CtcpKind<'a>,
    /// Everything after the command and its separating space.
    pub params: Option<&'a str>,
}

/// Whether `text` is wrapped in CTCP delimiters.
#[inline]
pub fn is_ctcp(text: &str) -> bool {
    text.len() >= 2 && text.starts_with(CTCP_DELIM) && text.ends_with(CTCP_DELIM)
}

/// Whether `text` is a CTCP ACTION (`\x01ACTION <text>\x01`).
#[inline]
pub fn is_action(text: &str) -> bool {
    is_ctcp(text) && text[1..].starts_with("ACTION ")
}

/// The body of an ACTION without its framing.
pub fn action_text(text: &str) -> Option<&str> {
    if is_action(text) {
        Some(&text["\x01ACTION ".len()..text.len() - 1])
    } else {
        None
    }
}

/// Wrap a body in CTCP delimiters.
pub fn wrap(body: &str) -> String {
    let mut s = String::with_capacity(body.len() + 2);
    s.push(CTCP_DELIM);
    s.push_str(body);
    s.push(CTCP_DELIM);
    s
}

/// The `VERSION` answer, optionally led by an application-supplied string.
pub fn version_reply(custom: Option<&str>) -> String {
    match custom {
        Some(custom) => format!("{} | using {}", custom, VERSION_STRING),
        None => VERSION_STRING.to_string(),
    }
}

impl<'a> Ctcp<'a> {
    /// Unwrap a delimited CTCP body. Returns `None` if `text` is not CTCP.
    pub fn parse(text: &'a str) -> Option<Ctcp<'a>> {
        if !is_ctcp(text) {
            return None;
        }
        let body = &text[1..text.len() - 1];
        let (command, params) = match body.split_once(' ') {
            Some((command, params)) => (command, Some(params)),
            None => (body, None),
        };

        let kind = match command {
            "ACTION" => CtcpKind::Action,
            "PING" => CtcpKind::Ping,
            "VERSION" => CtcpKind::Version,
            "CLIENTINFO" => CtcpKind::ClientInfo,
            other => CtcpKind::Other(other),
        };

        Some(Ctcp { kind, params })
    }

    /// The reply body this client answers a request with, undelimited.
    ///
    /// ACTION and unknown commands get no reply.
    pub fn reply(&self, version: Option<&str>) -> Option<String> {
        match self.kind {
            CtcpKind::Ping => Some(match self.params {
                Some(payload) => format!("PING {}", payload),
                None => "PING".to_string(),
            }),
            CtcpKind::Version => Some(format!("VERSION {}", version_reply(version))),
            CtcpKind::ClientInfo => Some(format!("CLIENTINFO {}", CLIENTINFO)),
            CtcpKind::Action | CtcpKind::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection() {
        assert!(is_ctcp("\x01VERSION\x01"));
        assert!(is_ctcp("\x01\x01"));
        assert!(!is_ctcp("\x01"));
        assert!(!is_ctcp("\x01VERSION"));
        assert!(!is_ctcp("hello"));
    }

    #[test]
    fn test_action() {
        assert!(is_action("\x01ACTION waves\x01"));
        assert!(!is_action("\x01ACTION\x01"));
        assert!(!is_action("ACTION waves"));
        assert_eq!(action_text("\x01ACTION waves\x01"), Some("waves"));
        assert_eq!(action_text("\x01VERSION\x01"), None);

        let ctcp = Ctcp::parse("\x01ACTION waves hello\x01").unwrap();
        assert_eq!(ctcp.kind, CtcpKind::Action);
        assert_eq!(ctcp.params, Some("waves hello"));
    }

    #[test]
    fn test_ping_echo() {
        let ctcp = Ctcp::parse("\x01PING 1700000000\x01").unwrap();
        assert_eq!(ctcp.kind, CtcpKind::Ping);
        assert_eq!(ctcp.reply(None).as_deref(), Some("PING 1700000000"));
    }

    #[test]
    fn test_version_reply() {
        let ctcp = Ctcp::parse("\x01VERSION\x01").unwrap();
        assert_eq!(
            ctcp.reply(None),
            Some(format!("VERSION {}", VERSION_STRING))
        );
        assert_eq!(
            ctcp.reply(Some("mybot 2.0")),
            Some(format!("VERSION mybot 2.0 | using {}", VERSION_STRING))
        );
    }

    #[test]
    fn test_clientinfo_and_other() {
        let ctcp = Ctcp::parse("\x01CLIENTINFO\x01").unwrap();
        assert_eq!(
            ctcp.reply(None).as_deref(),
            Some("CLIENTINFO ACTION CLIENTINFO PING VERSION")
        );

        let ctcp = Ctcp::parse("\x01TIME\x01").unwrap();
        assert_eq!(ctcp.kind, CtcpKind::Other("TIME"));
        assert_eq!(ctcp.kind.command(), "TIME");
        assert!(ctcp.reply(None).is_none());
        assert_eq!(CtcpKind::ClientInfo.command(), "CLIENTINFO");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("PING 1"), "\x01PING 1\x01");
    }
}
