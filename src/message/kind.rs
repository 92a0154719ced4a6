//! Message-kind tags and the positional channel table.

/// The kind a raw line was classified as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    /// Registration numerics (001-004).
    Login,
    /// LUSERS numerics.
    Info,
    /// Message of the day.
    Motd,
    /// NAMES listing.
    Names,
    /// WHO listing.
    Who,
    /// LIST listing.
    List,
    /// Channel ban list.
    BanList,
    /// Channel topic reply (332/331).
    Topic,
    /// WHOIS numerics.
    Whois,
    /// WHOWAS numerics.
    Whowas,
    /// Own user mode reply.
    UserMode,
    /// Channel mode reply.
    ChannelMode,
    /// Error numerics the engine reacts to.
    Error,
    /// `PRIVMSG` to a channel.
    ChannelMessage,
    /// CTCP ACTION to a channel.
    ChannelAction,
    /// `NOTICE` to a channel.
    ChannelNotice,
    /// `PRIVMSG` to the local user.
    QueryMessage,
    /// CTCP ACTION to the local user.
    QueryAction,
    /// `NOTICE` to the local user.
    QueryNotice,
    /// CTCP request other than ACTION.
    CtcpRequest,
    /// CTCP reply (NOTICE).
    CtcpReply,
    Invite,
    Join,
    /// `TOPIC` carrying a new topic.
    TopicChange,
    NickChange,
    Kick,
    Part,
    /// `MODE` with a parameter.
    ModeChange,
    Quit,
    /// Nothing matched.
    Unknown,
}

impl MessageKind {
    /// Token index holding the channel name, counted with the prefix as
    /// token 0. `None` for kinds that are not channel-scoped.
    pub const fn channel_token(self) -> Option<usize> {
        use MessageKind::*;

        match self {
            Join | Kick | Part | ModeChange | TopicChange | ChannelMessage | ChannelAction => {
                Some(2)
            }
            Who | Topic | BanList | ChannelMode => Some(3),
            Names => Some(4),
            _ => None,
        }
    }

    /// Whether lines of this kind carry a channel name.
    #[inline]
    pub const fn is_channel_scoped(self) -> bool {
        self.channel_token().is_some()
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_table() {
        assert_eq!(MessageKind::Join.channel_token(), Some(2));
        assert_eq!(MessageKind::ChannelAction.channel_token(), Some(2));
        assert_eq!(MessageKind::Who.channel_token(), Some(3));
        assert_eq!(MessageKind::ChannelMode.channel_token(), Some(3));
        assert_eq!(MessageKind::Names.channel_token(), Some(4));
        assert_eq!(MessageKind::ChannelNotice.channel_token(), None);
        assert_eq!(MessageKind::Quit.channel_token(), None);
        assert!(!MessageKind::Unknown.is_channel_scoped());
    }
}
