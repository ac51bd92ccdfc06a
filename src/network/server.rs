//! TCP Server
//!
//! Iterative accept loop: one connection is serviced to completion before
//! the next accept. A failed session never takes the listener down.

use std::io;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::network::Session;

/// How long the accept loop sleeps between shutdown checks when idle
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Cancellation signal for the accept loop and the active connection
///
/// Cloned into an interrupt handler. Cancelling stops the accept loop
/// before its next accept and shuts down the connection currently being
/// serviced, so a blocked session read returns instead of hanging.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    cancelled: Arc<AtomicBool>,
    active: Arc<Mutex<Option<TcpStream>>>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown: stop accepting and close the active connection
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
        if let Ok(mut active) = self.active.lock() {
            if let Some(stream) = active.take() {
                let _ = stream.shutdown(Shutdown::Both);
            }
        }
    }

    /// Whether shutdown has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Register the connection currently being serviced
    pub(crate) fn track(&self, stream: &TcpStream) {
        if let (Ok(mut active), Ok(clone)) = (self.active.lock(), stream.try_clone()) {
            *active = Some(clone);
        }
    }

    /// Drop the tracked connection once its session ends
    pub(crate) fn clear(&self) {
        if let Ok(mut active) = self.active.lock() {
            *active = None;
        }
    }
}

/// TCP server for wireserve
pub struct Server {
    config: Config,
    listener: TcpListener,
    shutdown: ShutdownToken,
}

impl Server {
    /// Bind the listener
    ///
    /// Fails with a configuration error on a bad address, before any
    /// session runs.
    pub fn bind(config: Config) -> Result<Self> {
        let addr = config.socket_addr()?;
        let listener = TcpListener::bind(addr)?;

        Ok(Self {
            config,
            listener,
            shutdown: ShutdownToken::new(),
        })
    }

    /// The address the listener actually bound (resolves port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// A handle that cancels the accept loop and the active session
    pub fn shutdown_token(&self) -> ShutdownToken {
        self.shutdown.clone()
    }

    /// Run the accept loop (blocking)
    ///
    /// Accepts one connection at a time and services it to completion.
    /// Returns once the shutdown token is cancelled.
    pub fn run(&self) -> Result<()> {
        // Non-blocking accept so the shutdown token is observed while idle
        self.listener.set_nonblocking(true)?;
        tracing::info!("Server started, listening at: {}", self.local_addr()?);

        loop {
            if self.shutdown.is_cancelled() {
                tracing::info!("Shutdown requested, stopping accept loop.");
                return Ok(());
            }

            match self.listener.accept() {
                Ok((stream, _)) => {
                    // The session itself blocks; only the accept is polled
                    stream.set_nonblocking(false)?;
                    self.shutdown.track(&stream);
                    match Session::new(stream, self.config.clone()) {
                        Ok(mut session) => {
                            if let Err(e) = session.handle() {
                                if e.is_disconnect() {
                                    tracing::debug!(
                                        "Client {} disconnected: {e}",
                                        session.peer_addr()
                                    );
                                } else {
                                    tracing::error!("There was a connection error: {e}");
                                }
                            }
                        }
                        Err(e) => tracing::error!("Could not set up session: {e}"),
                    }
                    self.shutdown.clear();
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => {
                    tracing::error!("Accept failed: {e}");
                }
            }
        }
    }
}
