//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────────────┬─────────────────────────────┐
//! │ Length (4, LE)   │      Payload (L bytes)      │
//! └──────────────────┴─────────────────────────────┘
//! ```
//!
//! ## Command grammar (client → server)
//!
//! `<VERB> [arg1] [arg2] ...` — space-separated, verb case-insensitive.
//!
//! - `GET <file>`    fetch a file from the server's static root
//! - `BOUNCE <msg>`  server echoes the message back
//! - `EXIT [<code>]` close the session with a goodbye
//!
//! Server responses are plain text frames, except the GET success case
//! which is a raw-byte frame of the file content.

mod codec;
mod command;
mod reply;

pub use codec::{
    decode_text, encode_frame, read_length, read_payload, write_frame, write_raw, write_text,
    DEFAULT_CHUNK_SIZE, LENGTH_BYTES,
};
pub use command::{tokenize, Command};
pub use reply::Reply;
