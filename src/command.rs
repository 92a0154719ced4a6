//! Requests the engine hands to the command sender.
//!
//! The engine decides *that* something must be sent and with what
//! arguments; queueing and rate control belong to whoever drains the
//! returned [`Outbound`] values. [`Command`] renders its wire form through
//! `Display`, without the trailing CRLF.

use std::fmt;

use crate::ctcp;

/// Send priority. Ordered so that `Critical` compares greatest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// A command the client wants sent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Command {
    /// `PASS <password>`
    Pass(String),
    /// `NICK <nickname>`
    Nick(String),
    /// `USER <username> <mode> * :<realname>`
    User {
        username: String,
        mode: u8,
        realname: String,
    },
    /// `JOIN <channel>`
    Join(String),
    /// `PONG :<payload>`
    Pong(String),
    /// `MODE <target>` (query)
    ModeQuery(String),
    /// `MODE <channel> +b` (ban list query)
    BanListQuery(String),
    /// `WHO <target>`
    Who(String),
    /// `NOTICE <target> :\x01<body>\x01`
    CtcpReply { target: String, body: String },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Pass(password) => write!(f, "PASS {}", password),
            Command::Nick(nick) => write!(f, "NICK {}", nick),
            Command::User {
                username,
                mode,
                realname,
            } => write!(f, "USER {} {} * :{}", username, mode, realname),
            Command::Join(channel) => write!(f, "JOIN {}", channel),
            Command::Pong(payload) => write!(f, "PONG :{}", payload),
            Command::ModeQuery(target) => write!(f, "MODE {}", target),
            Command::BanListQuery(channel) => write!(f, "MODE {} +b", channel),
            Command::Who(target) => write!(f, "WHO {}", target),
            Command::CtcpReply { target, body } => {
                write!(f, "NOTICE {} :{}", target, ctcp::wrap(body))
            }
        }
    }
}

/// A [`Command`] tagged with its send priority.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outbound {
    pub command: Command,
    pub priority: Priority,
}

impl Outbound {
    pub fn new(command: Command, priority: Priority) -> Self {
        Self { command, priority }
    }

    /// Registration, PONG and nickname recovery.
    pub fn critical(command: Command) -> Self {
        Self::new(command, Priority::Critical)
    }

    pub fn high(command: Command) -> Self {
        Self::new(command, Priority::High)
    }

    pub fn medium(command: Command) -> Self {
        Self::new(command, Priority::Medium)
    }
}

impl fmt::Display for Outbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.command.fmt(f)
    }
}
