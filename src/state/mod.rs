//! In-memory channel/user graph.
//!
//! [`SyncState`] owns every tracked [`Channel`] and [`IrcUser`]. Channels hold
//! [`ChannelUser`] entries that point at users by [`UserId`], so a user in
//! several channels exists once and a nickname change touches one record.
//!
//! All keys are canonicalized with [`irc_to_lower`]. The graph is read-only
//! from outside the crate; only the sync engine in [`crate::client`] mutates
//! it.

mod channel;
mod user;

pub use self::channel::{Channel, ChannelUser};
pub use self::user::{IrcUser, UserId};

use std::collections::HashMap;

use crate::casemap::irc_to_lower;
use crate::error::SyncError;

/// The tracked channels and users of one connection.
#[derive(Clone, Debug, Default)]
pub struct SyncState {
    channels: HashMap<String, Channel>,
    users: HashMap<UserId, IrcUser>,
    nicks: HashMap<String, UserId>,
    next_id: u64,
}

impl SyncState {
    /// An empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracked channel by name, in any case.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&irc_to_lower(name))
    }

    /// Every tracked channel, in no particular order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> + '_ {
        self.channels.values()
    }

    /// Number of tracked channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Tracked user by nickname, in any case.
    pub fn user(&self, nick: &str) -> Option<&IrcUser> {
        self.nicks
            .get(&irc_to_lower(nick))
            .and_then(|id| self.users.get(id))
    }

    /// Resolve a [`ChannelUser`] back-link.
    pub fn user_by_id(&self, id: UserId) -> Option<&IrcUser> {
        self.users.get(&id)
    }

    /// Every tracked user, in no particular order.
    pub fn users(&self) -> impl Iterator<Item = &IrcUser> + '_ {
        self.users.values()
    }

    /// Number of tracked users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Membership entry of `nick` in `channel`.
    pub fn channel_user(&self, channel: &str, nick: &str) -> Option<&ChannelUser> {
        self.channel(channel).and_then(|c| c.user(nick))
    }

    /// Whether `nick` is a believed member of `channel`.
    pub fn is_member(&self, channel: &str, nick: &str) -> bool {
        self.channel(channel).map_or(false, |c| c.contains(nick))
    }

    /// Names of the tracked channels `nick` is in.
    pub fn user_channels(&self, nick: &str) -> Vec<&str> {
        let key = irc_to_lower(nick);
        self.channels
            .values()
            .filter(|c| c.users.contains_key(&key))
            .map(Channel::name)
            .collect()
    }

    pub(crate) fn channel_mut(&mut self, name: &str) -> Result<&mut Channel, SyncError> {
        self.channels
            .get_mut(&irc_to_lower(name))
            .ok_or_else(|| SyncError::UnknownChannel(name.to_string()))
    }

    pub(crate) fn user_mut(&mut self, nick: &str) -> Result<&mut IrcUser, SyncError> {
        let id = *self
            .nicks
            .get(&irc_to_lower(nick))
            .ok_or_else(|| SyncError::UnknownUser(nick.to_string()))?;
        self.users
            .get_mut(&id)
            .ok_or_else(|| SyncError::UnknownUser(nick.to_string()))
    }

    /// Start tracking a channel with empty membership, replacing any stale
    /// entry of the same name.
    pub(crate) fn add_channel(&mut self, name: &str) -> &mut Channel {
        let chan = self
            .channels
            .entry(irc_to_lower(name))
            .or_insert_with(|| Channel::new(name));
        *chan = Channel::new(name);
        chan
    }

    pub(crate) fn remove_channel(&mut self, name: &str) -> Result<Channel, SyncError> {
        self.channels
            .remove(&irc_to_lower(name))
            .ok_or_else(|| SyncError::UnknownChannel(name.to_string()))
    }

    /// Return the user tracked under `nick`, creating it on first sighting.
    /// The flag is true when the user was created.
    pub(crate) fn ensure_user(&mut self, nick: &str) -> (&mut IrcUser, bool) {
        let key = irc_to_lower(nick);
        let mut created = false;
        let id = match self.nicks.get(&key) {
            Some(id) => *id,
            None => {
                let id = UserId(self.next_id);
                self.next_id += 1;
                self.nicks.insert(key, id);
                self.users.insert(id, IrcUser::new(id, nick));
                created = true;
                id
            }
        };
        let user = self
            .users
            .entry(id)
            .or_insert_with(|| IrcUser::new(id, nick));
        (user, created)
    }

    /// Link `nick` into `channel`, creating the user if needed.
    pub(crate) fn add_member(
        &mut self,
        channel: &str,
        nick: &str,
    ) -> Result<&mut ChannelUser, SyncError> {
        if !self.channels.contains_key(&irc_to_lower(channel)) {
            return Err(SyncError::UnknownChannel(channel.to_string()));
        }
        let id = self.ensure_user(nick).0.id;
        let chan = self.channel_mut(channel)?;
        Ok(chan.add_member(nick, id))
    }

    pub(crate) fn remove_member(
        &mut self,
        channel: &str,
        nick: &str,
    ) -> Result<ChannelUser, SyncError> {
        self.channel_mut(channel)?.remove_member(nick)
    }

    /// Drop `nick` from every channel and forget the user. Returns the
    /// channels the user was removed from.
    pub(crate) fn remove_user(&mut self, nick: &str) -> Vec<String> {
        let key = irc_to_lower(nick);
        let mut left = Vec::new();
        for chan in self.channels.values_mut() {
            if chan.users.remove(&key).is_some() {
                left.push(chan.name.clone());
            }
        }
        if let Some(id) = self.nicks.remove(&key) {
            self.users.remove(&id);
        }
        left
    }

    /// Re-key a user from `old` to `new`, carrying every membership along.
    pub(crate) fn rename_user(&mut self, old: &str, new: &str) -> Result<UserId, SyncError> {
        let old_key = irc_to_lower(old);
        let new_key = irc_to_lower(new);

        let id = self
            .nicks
            .remove(&old_key)
            .ok_or_else(|| SyncError::UnknownUser(old.to_string()))?;

        if old_key != new_key {
            if self.nicks.contains_key(&new_key) {
                // The server has already reassigned the name, so the old
                // holder is no longer observable.
                tracing::warn!("dropping stale user {} to make room for rename", new);
                self.remove_user(new);
            }
            for chan in self.channels.values_mut() {
                if let Some(member) = chan.users.remove(&old_key) {
                    chan.users.insert(new_key.clone(), member);
                }
            }
        }

        self.nicks.insert(new_key, id);
        if let Some(user) = self.users.get_mut(&id) {
            user.nick = new.to_string();
        }
        Ok(id)
    }

    /// Forget everything.
    pub(crate) fn clear(&mut self) {
        self.channels.clear();
        self.users.clear();
        self.nicks.clear();
    }
}
