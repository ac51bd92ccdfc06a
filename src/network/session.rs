//! Server session
//!
//! Per-connection state machine: read a frame, decode, dispatch, reply,
//! until EXIT, a zero-length read, or a transport fault ends the session.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{decode_text, read_length, read_payload, write_raw, write_text, Command, Reply};
use crate::resolver::{self, Resolution};

/// Whether the session keeps reading after a dispatch
enum Flow {
    Continue,
    Closed,
}

/// Handles a single client connection
pub struct Session {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Server configuration (static root, chunking, defaults)
    config: Config,

    /// Peer address for logging
    peer_addr: String,
}

impl Session {
    /// Create a session over an accepted stream
    pub fn new(stream: TcpStream, config: Config) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            config,
            peer_addr,
        })
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads command frames in a loop and sends replies. Returns when the
    /// client disconnects, sends EXIT, or a transport error occurs.
    pub fn handle(&mut self) -> Result<()> {
        tracing::info!("Received connection from client, address: {}", self.peer_addr);

        loop {
            let length = read_length(&mut self.reader)?;
            tracing::debug!("Next frame size: {length}");

            // Zero length is the peer closing cleanly; no reply owed
            if length == 0 {
                tracing::info!("Closing connection to client, address: {}", self.peer_addr);
                return Ok(());
            }

            let payload = read_payload(&mut self.reader, length, self.config.max_chunk_size)?;

            // After a decode failure the stream state is unknown, so the
            // session ends rather than resynchronize
            let text = match decode_text(&payload) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Could not decode data sent, closing connection: {e}");
                    return Ok(());
                }
            };
            if text.is_empty() {
                tracing::error!("Client sent no data, closing connection.");
                return Ok(());
            }

            tracing::debug!("Message received: {text}");

            match self.dispatch(Command::parse(&text))? {
                Flow::Continue => {}
                Flow::Closed => return Ok(()),
            }
        }
    }

    /// Dispatch one parsed command, reply, and decide whether the session
    /// keeps going
    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Exit { code } => {
                let code =
                    code.unwrap_or_else(|| self.config.default_exit_code.to_string());
                tracing::info!(
                    "Closing connection to client, address: {}, exit code: {}",
                    self.peer_addr,
                    code
                );
                self.send(Reply::goodbye(&code))?;
                Ok(Flow::Closed)
            }
            Command::Get { filename } => {
                self.handle_get(filename)?;
                Ok(Flow::Continue)
            }
            Command::Bounce { args } => {
                self.send(Reply::bounce(&args))?;
                Ok(Flow::Continue)
            }
            // The server has no HELP handler; it falls through as invalid
            Command::Help => {
                self.send(Reply::invalid("HELP"))?;
                Ok(Flow::Continue)
            }
            Command::Unknown { verb } => {
                tracing::debug!("Unknown command received.");
                self.send(Reply::invalid(&verb))?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Handle GET: resolve the filename under the static root and stream
    /// the file, or answer with a specific error text
    fn handle_get(&mut self, filename: Option<String>) -> Result<()> {
        let Some(filename) = filename else {
            return self.send(Reply::no_file_provided());
        };
        tracing::debug!("Processed file name: {filename}");

        match resolver::resolve(&self.config.static_root, &filename) {
            Resolution::NotFound => self.send(Reply::no_such_file()),
            Resolution::NotAFile => self.send(Reply::not_a_file()),
            Resolution::File(path) => {
                let size = fs::metadata(&path)?.len();
                match u32::try_from(size) {
                    Ok(size) => self.send(Reply::File { path, size }),
                    // A size that overflows the length field cannot be framed
                    Err(_) => self.send(Reply::file_too_large()),
                }
            }
        }
    }

    /// Send a reply frame to the client
    fn send(&mut self, reply: Reply) -> Result<()> {
        match reply {
            Reply::Text(text) => {
                tracing::debug!("Sending data: {text}");
                write_text(&mut self.writer, &text)
            }
            Reply::File { path, size } => {
                tracing::debug!("Sending file: {}", path.display());
                let mut file = File::open(&path)?;
                write_raw(&mut self.writer, &mut file, size)
            }
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
