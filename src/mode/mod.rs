//! Channel mode strings.

mod parse;

pub use self::parse::{scan_channel_modes, ModeChange, ModeDirection, ModeScan};
