//! Client session
//!
//! Interactive loop: read a line, send it as a command frame, await and
//! display exactly one response frame. HELP is handled locally and never
//! touches the network.

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::Result;
use crate::network::ShutdownToken;
use crate::protocol::{decode_text, read_length, read_payload, write_text, Command};

/// Interactive client over one connection
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    config: Config,

    /// Set by the interrupt handler; checked once per input turn
    interrupt: ShutdownToken,
}

impl Client {
    /// Connect to the server
    ///
    /// Fails with a configuration error on a bad address and a transport
    /// error when the server is unreachable.
    pub fn connect(config: Config, interrupt: ShutdownToken) -> Result<Self> {
        let addr = config.socket_addr()?;
        tracing::debug!("Connecting to server, address: {addr}");
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        interrupt.track(&stream);

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            config,
            interrupt,
        })
    }

    /// Run the interactive loop (blocking)
    ///
    /// Returns after EXIT completes, on end of input, or once the
    /// interrupt token is cancelled. The connection drops with `self`.
    pub fn run(&mut self) -> Result<()> {
        println!("Connected to server: {}", self.config.addr);
        println!("Please enter commands or type \"HELP\" for list of available commands");

        let stdin = io::stdin();
        loop {
            if self.interrupt.is_cancelled() {
                tracing::info!("Client stopped by interrupt.");
                return Ok(());
            }

            print!("{}", self.config.prompt);
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // End of input behaves like an interrupt: close without
                // sending another frame
                tracing::info!("End of input, closing.");
                return Ok(());
            }

            let input = line.trim();
            tracing::debug!("Processed input: {input}");
            if input.is_empty() {
                continue;
            }

            match Command::parse(input) {
                Command::Help => print_help(),
                // Unrecognized verbs are ignored locally, nothing is sent
                Command::Unknown { .. } => continue,
                Command::Get { .. } | Command::Bounce { .. } => {
                    self.exchange(input)?;
                }
                Command::Exit { .. } => {
                    self.exchange(input)?;
                    tracing::debug!("EXIT complete, closing connection.");
                    return Ok(());
                }
            }
        }
    }

    /// Send one command frame and display the single response frame
    fn exchange(&mut self, input: &str) -> Result<()> {
        tracing::debug!("Sending message to server.");
        write_text(&mut self.writer, input)?;

        tracing::debug!("Awaiting response from server.");
        let length = read_length(&mut self.reader)?;
        if length == 0 {
            println!("No data sent by server...");
            return Ok(());
        }

        let payload = read_payload(&mut self.reader, length, self.config.max_chunk_size)?;
        match decode_text(&payload) {
            Ok(text) => println!("{text}"),
            // Undecodable payload is shown as an empty response
            Err(_) => println!(),
        }
        Ok(())
    }
}

/// Print the static command summary
fn print_help() {
    println!("Commands you can enter are the following:");
    println!("HELP\t\t\tShows this menu.");
    println!("GET <file>\t\tGets specified file from the server.");
    println!("BOUNCE <msg>\t\tThe server echos the message back to the client.");
    println!("EXIT [<code>]\t\tClose connection and exit with provided code.");
}
