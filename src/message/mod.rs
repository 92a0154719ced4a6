//! Parsing one raw protocol line into a structured, classified message.

mod classify;
mod kind;
mod nom_parser;

pub use self::classify::classify;
pub use self::kind::MessageKind;
pub use self::nom_parser::Origin;

use self::nom_parser::LineParts;
use crate::error::ParseDiagnostic;
use crate::response::Response;
use crate::util::strip_colon;

/// A classified line with borrowed fields.
///
/// Built by [`ParsedMessage::parse`], which never fails: short lines come
/// back with the missing fields set to `None` and a [`ParseDiagnostic`].
///
/// ```
/// use slirc_sync::{MessageKind, ParsedMessage};
///
/// let msg = ParsedMessage::parse(":alice!al@example.org PRIVMSG #rust :hi all");
/// assert_eq!(msg.kind, MessageKind::ChannelMessage);
/// assert_eq!(msg.nick, Some("alice"));
/// assert_eq!(msg.channel, Some("#rust"));
/// assert_eq!(msg.trailing, Some("hi all"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMessage<'a> {
    /// The line as received.
    pub raw: &'a str,
    /// The line split on single spaces. Token 0 keeps its leading `:`.
    pub tokens: Vec<&'a str>,
    /// Classification result.
    pub kind: MessageKind,
    /// Prefix without the leading `:`, if the line had one.
    pub from: Option<&'a str>,
    /// Origin nickname (prefix contained `!`).
    pub nick: Option<&'a str>,
    /// Origin ident (prefix contained `!` and `@`).
    pub ident: Option<&'a str>,
    /// Origin host (prefix contained `@`).
    pub host: Option<&'a str>,
    /// Command token: a textual command or a three-digit numeric.
    pub command: &'a str,
    /// Channel name for channel-scoped kinds.
    pub channel: Option<&'a str>,
    /// Text after the first `" :"`.
    pub trailing: Option<&'a str>,
    /// Trailing text split on single spaces; `None` iff `trailing` is.
    pub trailing_tokens: Option<Vec<&'a str>>,
    /// Set when the line was shorter than its kind expects.
    pub diagnostic: Option<ParseDiagnostic>,
}

impl<'a> ParsedMessage<'a> {
    /// Parse and classify a single line (no CR/LF).
    pub fn parse(line: &'a str) -> ParsedMessage<'a> {
        let tokens: Vec<&'a str> = line.split(' ').collect();
        let parts = LineParts::split(line);
        let origin = parts.prefix.map(Origin::parse).unwrap_or_default();
        let kind = classify::classify_parts(line, &parts, &tokens);

        let mut diagnostic = if line.is_empty() {
            Some(ParseDiagnostic::EmptyLine)
        } else {
            None
        };

        let channel = match kind.channel_token() {
            Some(index) => match tokens.get(index) {
                Some(token) => Some(strip_colon(token)),
                None => {
                    diagnostic = Some(ParseDiagnostic::MissingToken {
                        kind,
                        index,
                        len: tokens.len(),
                    });
                    None
                }
            },
            None => None,
        };

        ParsedMessage {
            raw: line,
            tokens,
            kind,
            from: parts.prefix,
            nick: origin.nick,
            ident: origin.ident,
            host: origin.host,
            command: parts.command,
            channel,
            trailing: parts.trailing,
            trailing_tokens: parts.trailing.map(|t| t.split(' ').collect()),
            diagnostic,
        }
    }

    /// Whether the line started with a `:prefix`.
    #[inline]
    pub fn has_prefix(&self) -> bool {
        self.from.is_some()
    }

    /// Token at `index`, if the line is long enough.
    #[inline]
    pub fn token(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    /// The numeric reply, if the command is one RFC 2812 defines.
    pub fn response(&self) -> Option<Response> {
        Response::from_token(self.command)
    }

    /// Whether the parser recorded a structural diagnostic.
    #[inline]
    pub fn is_short(&self) -> bool {
        matches!(self.diagnostic, Some(ParseDiagnostic::MissingToken { .. }))
    }
}
