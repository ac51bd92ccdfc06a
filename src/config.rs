//! Configuration for wireserve
//!
//! Centralized configuration with sensible defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{Result, WireError};

/// Main configuration shared by server and client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Address to bind (server) or connect to (client), as "host:port"
    pub addr: String,

    /// Idle read timeout on the connection (milliseconds, 0 = no timeout)
    pub read_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Maximum bytes pulled off the socket per read while draining a payload
    pub max_chunk_size: usize,

    // -------------------------------------------------------------------------
    // Server Configuration
    // -------------------------------------------------------------------------
    /// Directory that confines all GET-able files
    pub static_root: PathBuf,

    /// Exit code echoed in the Goodbye reply when EXIT carries no argument
    pub default_exit_code: u32,

    // -------------------------------------------------------------------------
    // Client Configuration
    // -------------------------------------------------------------------------
    /// Prompt printed before each line of interactive input
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            read_timeout_ms: 0,
            max_chunk_size: 4096,
            static_root: PathBuf::from("./static"),
            default_exit_code: 200,
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse the configured address, failing with a configuration error
    /// before any socket is opened
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.addr
            .parse()
            .map_err(|_| WireError::Config(format!("invalid address: {}", self.addr)))
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the bind/target address ("host:port")
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.config.addr = addr.into();
        self
    }

    /// Set the idle read timeout (in milliseconds, 0 disables)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the maximum per-read chunk size (in bytes)
    pub fn max_chunk_size(mut self, size: usize) -> Self {
        self.config.max_chunk_size = size;
        self
    }

    /// Set the static file root served by GET
    pub fn static_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.static_root = path.into();
        self
    }

    /// Set the exit code used when EXIT carries no argument
    pub fn default_exit_code(mut self, code: u32) -> Self {
        self.config.default_exit_code = code;
        self
    }

    /// Set the interactive prompt string
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt = prompt.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
