//! # slirc-sync
//!
//! A client-side IRC protocol engine: it turns server lines into typed,
//! classified messages and keeps a live model of the channels and users
//! the connection can see.
//!
//! ## Features
//!
//! - Infallible line parsing with origin, channel and trailing extraction
//! - Ordered classification covering RFC 2812 numerics and CTCP framing
//! - Channel syncing: membership, op/voice, bans, modes, topics, WHO data
//! - Ordered listener dispatch with per-listener panic containment
//! - Sans-IO engine, with an optional Tokio line driver
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_sync::{ClientConfig, IrcClient, MessageKind, ParsedMessage};
//!
//! let msg = ParsedMessage::parse(":nick!user@host PRIVMSG #channel :Hello!");
//! assert_eq!(msg.kind, MessageKind::ChannelMessage);
//!
//! let mut config = ClientConfig::new("rustbot", "Rust Bot");
//! config.channel_syncing = true;
//! let mut client = IrcClient::new(config);
//!
//! client.process_line(":rustbot!bot@host JOIN :#channel");
//! client.process_line(":irc.example.net 353 rustbot = #channel :@alice bob");
//! assert!(client.channel_user("#channel", "alice").unwrap().op);
//! ```

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod casemap;
pub mod chan;
pub mod client;
pub mod command;
pub mod config;
pub mod ctcp;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod message;
pub mod mode;
pub mod response;
pub mod state;
pub mod util;

#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub mod line;
#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub mod transport;

pub use self::casemap::{irc_eq, irc_to_lower};
pub use self::chan::ChannelExt;
pub use self::client::IrcClient;
pub use self::command::{Command, Outbound, Priority};
pub use self::config::ClientConfig;
pub use self::ctcp::{Ctcp, CtcpKind};
pub use self::dispatch::Dispatcher;
pub use self::error::{ModeParseError, ParseDiagnostic, ProtocolError, SyncError};
pub use self::event::{EventKind, IrcEvent, WhoReply};
pub use self::message::{classify, MessageKind, Origin, ParsedMessage};
pub use self::response::Response;
pub use self::state::{Channel, ChannelUser, IrcUser, SyncState, UserId};

#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_IRC_LINE_LEN};
#[cfg(feature = "tokio")]
pub use self::transport::Connection;
