//! Tracked users.

/// Stable identity of a tracked user.
///
/// Survives nickname changes; channel memberships refer to users by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserId(pub(crate) u64);

/// A user observed on the network.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IrcUser {
    pub(crate) id: UserId,
    pub(crate) nick: String,
    pub ident: Option<String>,
    pub host: Option<String>,
    pub server: Option<String>,
    pub realname: Option<String>,
    pub hop_count: u32,
    pub away: bool,
    /// IRC operator (`*` in a WHO reply).
    pub ircop: bool,
}

impl IrcUser {
    pub(crate) fn new(id: UserId, nick: &str) -> Self {
        IrcUser {
            id,
            nick: nick.to_string(),
            ident: None,
            host: None,
            server: None,
            realname: None,
            hop_count: 0,
            away: false,
            ircop: false,
        }
    }

    #[inline]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Nickname in the case the server last used.
    #[inline]
    pub fn nick(&self) -> &str {
        &self.nick
    }
}
