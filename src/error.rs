//! Error types for wireserve
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using WireError
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type for wireserve operations
///
/// Unknown commands and missing GET targets are not errors: the server
/// answers them with a plain-text reply and keeps the session open. Only
/// conditions that end a session or stop a process live here.
#[derive(Debug, Error)]
pub enum WireError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Short or broken read/write on the connection.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    /// Payload bytes were not valid UTF-8 where text was expected.
    #[error("payload is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    /// Invalid bind/target address or static root. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),
}

impl WireError {
    /// Whether this error is a peer disconnect rather than a local fault
    pub fn is_disconnect(&self) -> bool {
        match self {
            WireError::Transport(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}
