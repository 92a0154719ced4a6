//! Ordered classification rules. The first rule that matches wins.
//!
//! 1. numeric reply, via the [`Response`] table
//! 2. `PRIVMSG` carrying CTCP ACTION
//! 3. `PRIVMSG` carrying any other CTCP
//! 4. plain `PRIVMSG`
//! 5. `NOTICE`, CTCP or plain
//! 6. `INVITE`, `JOIN`, `TOPIC`, `NICK`, `KICK`, `PART`, `MODE`, `QUIT`
//! 7. [`MessageKind::Unknown`]
//!
//! Every rule requires a `:prefix`; unprefixed lines are connection-level
//! and classify as `Unknown`.

use tracing::warn;

use super::kind::MessageKind;
use super::nom_parser::LineParts;
use crate::chan::ChannelExt;
use crate::ctcp;
use crate::response::Response;

/// Classify one raw line.
pub fn classify(line: &str) -> MessageKind {
    let parts = LineParts::split(line);
    let tokens: Vec<&str> = line.split(' ').collect();
    classify_parts(line, &parts, &tokens)
}

pub(crate) fn classify_parts(line: &str, parts: &LineParts<'_>, tokens: &[&str]) -> MessageKind {
    if parts.prefix.is_none() {
        return MessageKind::Unknown;
    }
    let command = parts.command;
    let trailing = parts.trailing;

    if tokens.len() >= 3 && is_numeric(command) {
        return classify_numeric(line, command);
    }

    let target_kind = |channel: MessageKind, query: MessageKind| match tokens.get(2) {
        Some(target) if target.is_channel_name() => channel,
        _ => query,
    };

    if command.eq_ignore_ascii_case("PRIVMSG") && tokens.len() >= 3 {
        if let Some(text) = trailing {
            if ctcp::is_action(text) {
                return target_kind(MessageKind::ChannelAction, MessageKind::QueryAction);
            }
            if ctcp::is_ctcp(text) {
                return MessageKind::CtcpRequest;
            }
            return target_kind(MessageKind::ChannelMessage, MessageKind::QueryMessage);
        }
    }

    if command.eq_ignore_ascii_case("NOTICE") && tokens.len() >= 3 {
        if let Some(text) = trailing {
            if ctcp::is_ctcp(text) {
                return MessageKind::CtcpReply;
            }
            return target_kind(MessageKind::ChannelNotice, MessageKind::QueryNotice);
        }
    }

    match command.to_ascii_uppercase().as_str() {
        "INVITE" if tokens.len() >= 4 => MessageKind::Invite,
        "JOIN" if tokens.len() >= 3 => MessageKind::Join,
        "TOPIC" if tokens.len() >= 3 && trailing.is_some() => MessageKind::TopicChange,
        "NICK" if tokens.len() >= 3 => MessageKind::NickChange,
        "KICK" if tokens.len() >= 4 => MessageKind::Kick,
        "PART" if tokens.len() >= 3 => MessageKind::Part,
        "MODE" if tokens.len() >= 4 => MessageKind::ModeChange,
        "QUIT" if trailing.is_some() => MessageKind::Quit,
        _ => {
            warn!("message type unknown: {:?}", line);
            MessageKind::Unknown
        }
    }
}

#[inline]
fn is_numeric(command: &str) -> bool {
    command.len() == 3 && command.bytes().all(|b| b.is_ascii_digit())
}

fn classify_numeric(line: &str, command: &str) -> MessageKind {
    match Response::from_token(command) {
        Some(response) => match response.kind() {
            Some(kind) => kind,
            None => {
                warn!("reply code unknown ({}): {:?}", command, line);
                MessageKind::Unknown
            }
        },
        None => {
            warn!(
                "server does not conform to RFC 2812, ignoring unrecognized reply code {}",
                command
            );
            MessageKind::Unknown
        }
    }
}
