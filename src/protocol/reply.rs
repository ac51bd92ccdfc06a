//! Reply definitions
//!
//! Server replies: every command is answered with either a plain-text
//! frame or, for a successful GET, a raw-byte frame streamed from a file.

use std::path::PathBuf;

/// A reply to send back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text, framed with a trailing CRLF
    Text(String),

    /// Raw file content, framed by byte size with no text encoding
    File { path: PathBuf, size: u32 },
}

impl Reply {
    /// Echo reply for BOUNCE: arguments rejoined with single spaces
    /// (empty text when there are none)
    pub fn bounce(args: &[String]) -> Self {
        Reply::Text(args.join(" "))
    }

    /// Goodbye reply for EXIT, echoing the exit code verbatim
    pub fn goodbye(code: &str) -> Self {
        Reply::Text(format!("Goodbye: {code}"))
    }

    /// Reply for an unrecognized verb
    pub fn invalid(verb: &str) -> Self {
        Reply::Text(format!("Invalid Command: {verb}"))
    }

    /// Reply for GET with no filename argument
    pub fn no_file_provided() -> Self {
        Reply::Text("ERROR: no file provided".to_string())
    }

    /// Reply for GET naming a path that does not exist
    pub fn no_such_file() -> Self {
        Reply::Text("ERROR: no such file".to_string())
    }

    /// Reply for GET naming a path that is not a regular file
    pub fn not_a_file() -> Self {
        Reply::Text("ERROR: not a file".to_string())
    }

    /// Reply for GET naming a file too large for the 32-bit length field
    pub fn file_too_large() -> Self {
        Reply::Text("ERROR: file too large".to_string())
    }
}
