//! The synchronization engine.
//!
//! [`IrcClient`] is sans-IO: it is fed one decoded line at a time and hands
//! back the commands that line makes necessary. It never touches a socket.
//!
//! # Example
//!
//! ```
//! use slirc_sync::{ClientConfig, EventKind, IrcClient, IrcEvent};
//!
//! let mut config = ClientConfig::new("rustbot", "Rust Bot");
//! config.channel_syncing = true;
//! let mut client = IrcClient::new(config);
//!
//! client.on(EventKind::Join, |event, _msg, state| {
//!     if let IrcEvent::Join { channel, nick } = event {
//!         assert!(state.is_member(channel, nick));
//!     }
//! });
//!
//! for out in client.login() {
//!     // hand `out.command` to the writer
//!     let _wire = out.to_string();
//! }
//!
//! let replies = client.process_line(":rustbot!bot@host JOIN :#rust");
//! assert_eq!(replies.len(), 3); // MODE, WHO and ban list queries
//! assert!(client.is_joined("#rust"));
//! ```

mod handlers;
mod numeric;

use tracing::{debug, info, warn};

use crate::casemap::irc_eq;
use crate::command::{Command, Outbound};
use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::ParseDiagnostic;
use crate::event::{EventKind, IrcEvent};
use crate::message::ParsedMessage;
use crate::state::{Channel, ChannelUser, IrcUser, SyncState};

/// What one line produced: commands to send and events to deliver.
#[derive(Debug, Default)]
pub(crate) struct Reaction<'a> {
    outbound: Vec<Outbound>,
    events: Vec<IrcEvent<'a>>,
}

impl<'a> Reaction<'a> {
    fn send(&mut self, out: Outbound) {
        debug!("queueing {:?}: {}", out.priority, out.command);
        self.outbound.push(out);
    }

    fn emit(&mut self, event: IrcEvent<'a>) {
        self.events.push(event);
    }
}

/// A client session: configuration, local identity, the synced channel/user
/// model and the listener registry.
#[derive(Debug)]
pub struct IrcClient {
    config: ClientConfig,
    nickname: String,
    usermode: String,
    joined: Vec<String>,
    state: SyncState,
    dispatcher: Dispatcher,
}

impl IrcClient {
    /// A fresh session. Nothing is sent until [`login`](Self::login).
    pub fn new(config: ClientConfig) -> Self {
        let nickname = config.login_nickname();
        Self {
            config,
            nickname,
            usermode: String::new(),
            joined: Vec::new(),
            state: SyncState::new(),
            dispatcher: Dispatcher::new(),
        }
    }

    /// The configuration, including runtime toggles.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The local nickname as last confirmed or attempted.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// The local user mode string, as last reported by the server.
    pub fn usermode(&self) -> &str {
        &self.usermode
    }

    /// Whether `nick` is the local nickname, compared case-insensitively.
    pub fn is_me(&self, nick: &str) -> bool {
        irc_eq(&self.nickname, nick)
    }

    /// Channels the connection believes it occupies, in join order.
    ///
    /// Maintained whether or not channel syncing is enabled.
    pub fn joined_channels(&self) -> &[String] {
        &self.joined
    }

    /// Whether the local user is a tracked member of `channel`.
    pub fn is_joined(&self, channel: &str) -> bool {
        self.state.is_member(channel, &self.nickname)
    }

    /// Whether `nick` is a tracked member of `channel`.
    pub fn is_joined_by(&self, channel: &str, nick: &str) -> bool {
        self.state.is_member(channel, nick)
    }

    /// Tracked channel by name.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.state.channel(name)
    }

    /// Every tracked channel.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> + '_ {
        self.state.channels()
    }

    /// Tracked user by nickname.
    pub fn irc_user(&self, nick: &str) -> Option<&IrcUser> {
        self.state.user(nick)
    }

    /// Membership entry of `nick` in `channel`.
    pub fn channel_user(&self, channel: &str, nick: &str) -> Option<&ChannelUser> {
        self.state.channel_user(channel, nick)
    }

    /// Read-only view of the synced model.
    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Whether channel syncing is on.
    pub fn channel_syncing(&self) -> bool {
        self.config.channel_syncing
    }

    /// Switch channel syncing on or off.
    ///
    /// Turning it on mid-session leaves the model empty until the next
    /// JOIN/WHO/NAMES traffic fills it; handlers treat the gap as missing
    /// state and skip it.
    pub fn set_channel_syncing(&mut self, enabled: bool) {
        if enabled {
            info!("channel syncing enabled");
        } else {
            info!("channel syncing disabled");
        }
        self.config.channel_syncing = enabled;
    }

    /// Whether a kick is answered with a rejoin.
    pub fn auto_rejoin(&self) -> bool {
        self.config.auto_rejoin
    }

    /// Switch rejoining after a kick on or off.
    pub fn set_auto_rejoin(&mut self, enabled: bool) {
        if enabled {
            info!("auto-rejoin enabled");
        } else {
            info!("auto-rejoin disabled");
        }
        self.config.auto_rejoin = enabled;
    }

    /// Custom text for CTCP `VERSION` replies.
    pub fn set_ctcp_version(&mut self, version: Option<String>) {
        self.config.ctcp_version = version;
    }

    /// The listener registry.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The listener registry, for registering or clearing listeners.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Shorthand for `dispatcher_mut().on(..)`.
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&IrcEvent<'_>, &ParsedMessage<'_>, &SyncState) + Send + 'static,
    {
        self.dispatcher.on(kind, listener);
    }

    /// Shorthand for `dispatcher_mut().on_raw(..)`.
    pub fn on_raw<F>(&mut self, listener: F)
    where
        F: FnMut(&ParsedMessage<'_>, &SyncState) + Send + 'static,
    {
        self.dispatcher.on_raw(listener);
    }

    /// Registration commands: `PASS` if a password is set, then `NICK` and
    /// `USER`, all critical.
    pub fn login(&mut self) -> Vec<Outbound> {
        info!("logging in as {}", self.config.login_nickname());
        self.nickname = self.config.login_nickname();

        let mut out = Vec::with_capacity(3);
        if let Some(password) = self.config.password.as_ref().filter(|p| !p.is_empty()) {
            out.push(Outbound::critical(Command::Pass(password.clone())));
        }
        out.push(Outbound::critical(Command::Nick(self.nickname.clone())));
        out.push(Outbound::critical(Command::User {
            username: self.config.login_username(),
            mode: self.config.usermode,
            realname: self.config.realname.clone(),
        }));
        out
    }

    /// Commands to replay after the transport has reconnected.
    ///
    /// The channel/user model is dropped, since fresh JOIN, WHO and NAMES
    /// traffic rebuilds it. Every remembered channel is rejoined at high
    /// priority, after the login commands if `login` is set.
    pub fn reconnect(&mut self, login: bool) -> Vec<Outbound> {
        self.state.clear();
        self.usermode.clear();

        let mut out = if login { self.login() } else { Vec::new() };
        if !self.joined.is_empty() {
            info!("rejoining {} channels", self.joined.len());
        }
        out.extend(
            self.joined
                .iter()
                .map(|channel| Outbound::high(Command::Join(channel.clone()))),
        );
        out
    }

    /// Parse, classify and apply one line, then notify listeners.
    ///
    /// Listeners registered for the raw line run first, before any state
    /// change. Kind-specific listeners run after the line has been fully
    /// applied. Returns the commands the line requires, in the order they
    /// were decided.
    pub fn process_line(&mut self, line: &str) -> Vec<Outbound> {
        let msg = ParsedMessage::parse(line);
        match &msg.diagnostic {
            Some(ParseDiagnostic::EmptyLine) => debug!("empty line"),
            Some(diagnostic) => warn!("{}: {:?}", diagnostic, line),
            None => {}
        }

        self.dispatcher.dispatch_raw(&msg, &self.state);

        let mut reaction = Reaction::default();
        if msg.has_prefix() {
            self.handle_command(&msg, &mut reaction);
            // Textual commands have no numeric; that is the normal case.
            if let Some(response) = msg.response() {
                self.handle_numeric(response, &msg, &mut reaction);
            }
        } else {
            self.handle_connection_line(&msg, &mut reaction);
        }

        for event in &reaction.events {
            self.dispatcher.dispatch(event, &msg, &self.state);
        }
        reaction.outbound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Priority;

    fn client() -> IrcClient {
        let mut config = ClientConfig::new("me", "Me Myself");
        config.channel_syncing = true;
        IrcClient::new(config)
    }

    #[test]
    fn test_login_without_password() {
        let mut client = client();
        let out = client.login();
        let wire: Vec<String> = out.iter().map(ToString::to_string).collect();
        assert_eq!(wire, vec!["NICK me", "USER me 0 * :Me Myself"]);
        assert!(out.iter().all(|o| o.priority == Priority::Critical));
    }

    #[test]
    fn test_login_with_password() {
        let mut config = ClientConfig::new("me", "Me");
        config.password = Some("hunter2".to_string());
        config.username = "ident".to_string();
        let mut client = IrcClient::new(config);
        let wire: Vec<String> = client.login().iter().map(ToString::to_string).collect();
        assert_eq!(wire, vec!["PASS hunter2", "NICK me", "USER ident 0 * :Me"]);
    }

    #[test]
    fn test_is_me_is_case_insensitive() {
        let client = client();
        assert!(client.is_me("ME"));
        assert!(!client.is_me("you"));
    }

    #[test]
    fn test_reconnect_rejoins() {
        let mut client = client();
        client.process_line(":me!u@h JOIN :#a");
        client.process_line(":me!u@h JOIN :#b");
        assert_eq!(client.state().channel_count(), 2);

        let out = client.reconnect(false);
        let wire: Vec<String> = out.iter().map(ToString::to_string).collect();
        assert_eq!(wire, vec!["JOIN #a", "JOIN #b"]);
        assert!(out.iter().all(|o| o.priority == Priority::High));
        assert_eq!(client.state().channel_count(), 0);
        assert_eq!(client.joined_channels(), ["#a".to_string(), "#b".to_string()]);
    }

    #[test]
    fn test_reconnect_with_login() {
        let mut client = client();
        client.process_line(":me!u@h JOIN :#a");
        let wire: Vec<String> = client
            .reconnect(true)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(wire, vec!["NICK me", "USER me 0 * :Me Myself", "JOIN #a"]);
    }

    #[test]
    fn test_toggles() {
        let mut client = client();
        client.set_channel_syncing(false);
        client.set_auto_rejoin(true);
        client.set_ctcp_version(Some("bot 1.0".to_string()));
        assert!(!client.channel_syncing());
        assert!(client.auto_rejoin());
        assert_eq!(client.config().ctcp_version.as_deref(), Some("bot 1.0"));
    }
}
