//! # wireserve
//!
//! A minimal framed request/response protocol between a single client and
//! a single server over TCP:
//! - Length-prefixed wire framing (u32 little-endian + payload)
//! - Text command grammar: GET / BOUNCE / EXIT
//! - Static file serving confined to a server-owned root
//! - One blocking session at a time, strict request-then-response
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────┐   frames    ┌──────────────────────────┐
//! │   Client    │◄───────────►│        Server            │
//! │   (REPL)    │             │  accept → Session loop   │
//! └─────────────┘             └────────────┬─────────────┘
//!                                          │
//!                             ┌────────────▼─────────────┐
//!                             │    Command dispatch      │
//!                             │  GET / BOUNCE / EXIT     │
//!                             └────────────┬─────────────┘
//!                                          │ GET
//!                             ┌────────────▼─────────────┐
//!                             │      File Resolver       │
//!                             │     (static root)        │
//!                             └──────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod resolver;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, WireError};
pub use config::Config;
pub use client::Client;
pub use network::{Server, ShutdownToken};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of wireserve
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
