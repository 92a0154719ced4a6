//! Error types for the sync engine.
//!
//! Nothing in the line pipeline is fatal. Structural problems with a line are
//! attached to the parsed message as a [`ParseDiagnostic`]; state lookups that
//! miss surface as [`SyncError`] and are logged, then skipped. Only the
//! optional transport returns [`ProtocolError`] to the caller.

use thiserror::Error;

use crate::message::MessageKind;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Transport-level errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The server closed the connection.
    #[error("connection closed by peer")]
    ConnectionClosed,
}

/// Structural diagnostics recorded while parsing a single line.
///
/// A message carrying a diagnostic is still dispatched, with the affected
/// fields left empty.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseDiagnostic {
    /// The line was empty.
    #[error("empty line")]
    EmptyLine,

    /// A kind expects a token at a position the line does not reach.
    #[error("{kind:?} expects token {index}, line has {len} tokens")]
    MissingToken {
        /// Kind the line was classified as.
        kind: MessageKind,
        /// Token index the kind reads from.
        index: usize,
        /// Number of tokens the line actually has.
        len: usize,
    },
}

/// A handler referenced state the model does not hold.
///
/// Happens when syncing was switched on mid-session or the server relays
/// something for an entry that was never observed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyncError {
    /// No tracked channel with this name.
    #[error("channel not tracked: {0}")]
    UnknownChannel(String),

    /// No tracked user with this nickname.
    #[error("user not tracked: {0}")]
    UnknownUser(String),

    /// The user is tracked but not a member of the channel.
    #[error("{nick} is not a member of {channel}")]
    NotMember {
        /// Channel name.
        channel: String,
        /// Nickname.
        nick: String,
    },
}

/// Errors encountered when scanning a mode string.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModeParseError {
    /// A parameter-taking mode letter ran out of parameters.
    #[error("mode '{mode}' requires a parameter but none is left")]
    MissingParameter {
        /// The mode letter.
        mode: char,
    },

    /// The `+l` parameter is not a number.
    #[error("invalid user limit: {0}")]
    InvalidLimit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseDiagnostic::MissingToken {
            kind: MessageKind::Names,
            index: 4,
            len: 3,
        };
        assert_eq!(format!("{}", err), "Names expects token 4, line has 3 tokens");

        let err = SyncError::NotMember {
            channel: "#rust".to_string(),
            nick: "alice".to_string(),
        };
        assert_eq!(format!("{}", err), "alice is not a member of #rust");

        let err = ModeParseError::MissingParameter { mode: 'o' };
        assert_eq!(
            format!("{}", err),
            "mode 'o' requires a parameter but none is left"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let protocol_err: ProtocolError = io_err.into();

        match protocol_err {
            ProtocolError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }
}
