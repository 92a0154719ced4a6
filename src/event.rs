//! Notifications delivered to listeners after a line has been applied.
//!
//! Every event borrows from the line it was produced from, so listeners that
//! want to keep data past the callback must copy it.

use std::fmt;

/// Fields of an `RPL_WHOREPLY` (352).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhoReply<'a> {
    /// Channel the reply is about; `*` when the user shares none.
    pub channel: &'a str,
    pub nick: &'a str,
    pub ident: &'a str,
    pub host: &'a str,
    pub server: &'a str,
    /// Everything after the hop count, rejoined with spaces.
    pub realname: String,
    pub hop_count: u32,
    pub away: bool,
    pub op: bool,
    pub voice: bool,
    pub ircop: bool,
}

impl<'a> WhoReply<'a> {
    /// Parse the reply flags field (`H`, `G`, `@`, `+`, `*`).
    pub(crate) fn apply_flags(&mut self, flags: &str) {
        for c in flags.chars() {
            match c {
                'H' => self.away = false,
                'G' => self.away = true,
                '@' => self.op = true,
                '+' => self.voice = true,
                '*' => self.ircop = true,
                _ => {}
            }
        }
    }
}

/// A notification.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum IrcEvent<'a> {
    /// `RPL_WELCOME` arrived; `nick` is the nickname the server assigned.
    Registered { nick: &'a str },
    /// Server keepalive. A PONG has already been queued.
    Ping { payload: &'a str },
    /// Connection-level `ERROR` line.
    Error { message: Option<&'a str> },
    Join {
        channel: &'a str,
        nick: &'a str,
    },
    Part {
        channel: &'a str,
        nick: &'a str,
        reason: Option<&'a str>,
    },
    Kick {
        channel: &'a str,
        victim: &'a str,
        kicker: &'a str,
        reason: Option<&'a str>,
    },
    Quit {
        nick: &'a str,
        reason: Option<&'a str>,
    },
    Invite {
        channel: &'a str,
        inviter: &'a str,
    },
    NickChange {
        old: &'a str,
        new: &'a str,
    },
    /// Topic reported by `RPL_TOPIC`, or empty for `RPL_NOTOPIC`.
    Topic {
        channel: &'a str,
        topic: &'a str,
    },
    TopicChange {
        channel: &'a str,
        nick: &'a str,
        topic: &'a str,
    },
    Op {
        channel: &'a str,
        actor: &'a str,
        target: &'a str,
    },
    Deop {
        channel: &'a str,
        actor: &'a str,
        target: &'a str,
    },
    Voice {
        channel: &'a str,
        actor: &'a str,
        target: &'a str,
    },
    Devoice {
        channel: &'a str,
        actor: &'a str,
        target: &'a str,
    },
    Ban {
        channel: &'a str,
        actor: &'a str,
        mask: &'a str,
    },
    Unban {
        channel: &'a str,
        actor: &'a str,
        mask: &'a str,
    },
    /// Any `MODE` line, after its op/voice/ban events.
    ModeChange { target: &'a str },
    Who(WhoReply<'a>),
    ChannelMessage {
        channel: &'a str,
        nick: &'a str,
        text: &'a str,
    },
    /// `text` is the action body without the CTCP framing.
    ChannelAction {
        channel: &'a str,
        nick: &'a str,
        text: &'a str,
    },
    ChannelNotice {
        channel: &'a str,
        nick: Option<&'a str>,
        text: &'a str,
    },
    QueryMessage {
        nick: &'a str,
        text: &'a str,
    },
    QueryAction {
        nick: &'a str,
        text: &'a str,
    },
    QueryNotice {
        nick: Option<&'a str>,
        text: &'a str,
    },
    CtcpRequest {
        nick: &'a str,
        command: &'a str,
        params: Option<&'a str>,
    },
    CtcpReply {
        nick: Option<&'a str>,
        command: &'a str,
        params: Option<&'a str>,
    },
}

/// Discriminant of [`IrcEvent`], used as the listener registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum EventKind {
    Registered,
    Ping,
    Error,
    Join,
    Part,
    Kick,
    Quit,
    Invite,
    NickChange,
    Topic,
    TopicChange,
    Op,
    Deop,
    Voice,
    Devoice,
    Ban,
    Unban,
    ModeChange,
    Who,
    ChannelMessage,
    ChannelAction,
    ChannelNotice,
    QueryMessage,
    QueryAction,
    QueryNotice,
    CtcpRequest,
    CtcpReply,
}

impl IrcEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            IrcEvent::Registered { .. } => EventKind::Registered,
            IrcEvent::Ping { .. } => EventKind::Ping,
            IrcEvent::Error { .. } => EventKind::Error,
            IrcEvent::Join { .. } => EventKind::Join,
            IrcEvent::Part { .. } => EventKind::Part,
            IrcEvent::Kick { .. } => EventKind::Kick,
            IrcEvent::Quit { .. } => EventKind::Quit,
            IrcEvent::Invite { .. } => EventKind::Invite,
            IrcEvent::NickChange { .. } => EventKind::NickChange,
            IrcEvent::Topic { .. } => EventKind::Topic,
            IrcEvent::TopicChange { .. } => EventKind::TopicChange,
            IrcEvent::Op { .. } => EventKind::Op,
            IrcEvent::Deop { .. } => EventKind::Deop,
            IrcEvent::Voice { .. } => EventKind::Voice,
            IrcEvent::Devoice { .. } => EventKind::Devoice,
            IrcEvent::Ban { .. } => EventKind::Ban,
            IrcEvent::Unban { .. } => EventKind::Unban,
            IrcEvent::ModeChange { .. } => EventKind::ModeChange,
            IrcEvent::Who(_) => EventKind::Who,
            IrcEvent::ChannelMessage { .. } => EventKind::ChannelMessage,
            IrcEvent::ChannelAction { .. } => EventKind::ChannelAction,
            IrcEvent::ChannelNotice { .. } => EventKind::ChannelNotice,
            IrcEvent::QueryMessage { .. } => EventKind::QueryMessage,
            IrcEvent::QueryAction { .. } => EventKind::QueryAction,
            IrcEvent::QueryNotice { .. } => EventKind::QueryNotice,
            IrcEvent::CtcpRequest { .. } => EventKind::CtcpRequest,
            IrcEvent::CtcpReply { .. } => EventKind::CtcpReply,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
