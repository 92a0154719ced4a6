//! Client configuration.

/// Identity and behavior settings for an [`IrcClient`](crate::IrcClient).
///
/// ```
/// use slirc_sync::ClientConfig;
///
/// let mut config = ClientConfig::new("rustbot", "Rust Bot");
/// config.channel_syncing = true;
/// assert_eq!(config.login_username(), "rustbot");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClientConfig {
    /// Desired nickname.
    pub nickname: String,
    /// Username (ident). Falls back to the nickname when empty.
    pub username: String,
    /// Real name / GECOS.
    pub realname: String,
    /// Server password, if required.
    pub password: Option<String>,
    /// Mode bitmask sent with `USER`.
    pub usermode: u8,
    /// Leading part of the CTCP `VERSION` answer.
    pub ctcp_version: Option<String>,
    /// Maintain the channel/user model.
    pub channel_syncing: bool,
    /// Rejoin a channel after being kicked from it.
    pub auto_rejoin: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            nickname: "slirc".to_string(),
            username: String::new(),
            realname: "slirc-sync user".to_string(),
            password: None,
            usermode: 0,
            ctcp_version: None,
            channel_syncing: false,
            auto_rejoin: false,
        }
    }
}

impl ClientConfig {
    pub fn new(nickname: impl Into<String>, realname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            realname: realname.into(),
            ..Self::default()
        }
    }

    /// Nickname as sent at login, with spaces removed.
    pub fn login_nickname(&self) -> String {
        self.nickname.replace(' ', "")
    }

    /// Username as sent at login, with spaces removed.
    pub fn login_username(&self) -> String {
        let username = self.username.replace(' ', "");
        if username.is_empty() {
            self.login_nickname()
        } else {
            username
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(!config.channel_syncing);
        assert!(!config.auto_rejoin);
        assert!(config.password.is_none());
    }

    #[test]
    fn test_login_names_strip_spaces() {
        let mut config = ClientConfig::new("my nick", "Real Name");
        assert_eq!(config.login_nickname(), "mynick");
        assert_eq!(config.login_username(), "mynick");

        config.username = " id ent ".to_string();
        assert_eq!(config.login_username(), "ident");
    }
}
