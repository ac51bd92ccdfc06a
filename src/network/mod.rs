//! Network Module
//!
//! TCP listener and per-connection session handling.
//!
//! ## Architecture
//! - Iterative accept loop, one session at a time
//! - Sessions read command frames and write reply frames
//! - Shutdown via an explicit cancellation token

mod server;
mod session;

pub use server::{Server, ShutdownToken};
pub use session::Session;
