//! Tracked channels and their memberships.

use std::collections::{BTreeSet, HashMap};

use super::user::UserId;
use crate::casemap::irc_to_lower;
use crate::error::SyncError;

/// Per-channel view of a member.
///
/// Does not own the [`IrcUser`](super::IrcUser); resolve it through
/// [`SyncState::user_by_id`](super::SyncState::user_by_id).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelUser {
    pub(crate) user: UserId,
    pub op: bool,
    pub voice: bool,
}

impl ChannelUser {
    pub(crate) fn new(user: UserId) -> Self {
        ChannelUser {
            user,
            op: false,
            voice: false,
        }
    }

    #[inline]
    pub fn user_id(&self) -> UserId {
        self.user
    }
}

/// A channel the local user is in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    pub(crate) name: String,
    pub topic: String,
    pub(crate) modes: BTreeSet<char>,
    /// 0 when unset.
    pub user_limit: u32,
    /// Empty when unset.
    pub key: String,
    pub(crate) bans: BTreeSet<String>,
    pub(crate) users: HashMap<String, ChannelUser>,
}

impl Channel {
    pub(crate) fn new(name: &str) -> Self {
        Channel {
            name: name.to_string(),
            topic: String::new(),
            modes: BTreeSet::new(),
            user_limit: 0,
            key: String::new(),
            bans: BTreeSet::new(),
            users: HashMap::new(),
        }
    }

    /// Channel name as first seen.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Single-letter flags currently set (excluding `o v b k l`).
    pub fn modes(&self) -> impl Iterator<Item = char> + '_ {
        self.modes.iter().copied()
    }

    pub fn has_mode(&self, letter: char) -> bool {
        self.modes.contains(&letter)
    }

    /// Flags as a `+`-led string, e.g. `+nt`. Empty if none are set.
    pub fn mode_string(&self) -> String {
        if self.modes.is_empty() {
            return String::new();
        }
        std::iter::once('+').chain(self.modes()).collect()
    }

    pub fn bans(&self) -> impl Iterator<Item = &str> + '_ {
        self.bans.iter().map(String::as_str)
    }

    pub fn is_banned(&self, mask: &str) -> bool {
        self.bans.contains(mask)
    }

    /// Member count.
    #[inline]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Membership keyed by canonical nickname.
    pub fn users(&self) -> impl Iterator<Item = (&str, &ChannelUser)> + '_ {
        self.users.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn user(&self, nick: &str) -> Option<&ChannelUser> {
        self.users.get(&irc_to_lower(nick))
    }

    pub fn contains(&self, nick: &str) -> bool {
        self.users.contains_key(&irc_to_lower(nick))
    }

    /// Canonical nicknames of members holding `+o`.
    pub fn ops(&self) -> impl Iterator<Item = &str> + '_ {
        self.users
            .iter()
            .filter(|(_, u)| u.op)
            .map(|(k, _)| k.as_str())
    }

    /// Canonical nicknames of members holding `+v`.
    pub fn voices(&self) -> impl Iterator<Item = &str> + '_ {
        self.users
            .iter()
            .filter(|(_, u)| u.voice)
            .map(|(k, _)| k.as_str())
    }

    pub(crate) fn member_mut(&mut self, nick: &str) -> Result<&mut ChannelUser, SyncError> {
        let channel = &self.name;
        self.users
            .get_mut(&irc_to_lower(nick))
            .ok_or_else(|| SyncError::NotMember {
                channel: channel.clone(),
                nick: nick.to_string(),
            })
    }

    /// Insert a member, keeping the existing entry if there is one.
    pub(crate) fn add_member(&mut self, nick: &str, user: UserId) -> &mut ChannelUser {
        self.users
            .entry(irc_to_lower(nick))
            .or_insert_with(|| ChannelUser::new(user))
    }

    pub(crate) fn remove_member(&mut self, nick: &str) -> Result<ChannelUser, SyncError> {
        self.users
            .remove(&irc_to_lower(nick))
            .ok_or_else(|| SyncError::NotMember {
                channel: self.name.clone(),
                nick: nick.to_string(),
            })
    }

    pub(crate) fn set_flag(&mut self, letter: char, on: bool) {
        if on {
            self.modes.insert(letter);
        } else {
            self.modes.remove(&letter);
        }
    }

    pub(crate) fn set_ban(&mut self, mask: &str, on: bool) {
        if on {
            self.bans.insert(mask.to_string());
        } else {
            self.bans.remove(mask);
        }
    }
}
