//! Channel-name detection.

/// Characters that address a channel rather than a user.
pub const CHANNEL_PREFIXES: [char; 4] = ['#', '!', '&', '+'];

/// Extension trait for telling channel targets from query targets.
pub trait ChannelExt {
    /// Returns true if the first character is one of `# ! & +`.
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        self.starts_with(CHANNEL_PREFIXES)
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}
