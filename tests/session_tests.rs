//! Session Tests
//!
//! End-to-end tests driving a real server over a TCP socket with a
//! temporary static root.

use std::fs;
use std::net::{SocketAddr, TcpStream};
use std::thread::JoinHandle;

use tempfile::TempDir;
use wireserve::protocol::{read_length, read_payload, write_frame, write_text, DEFAULT_CHUNK_SIZE};
use wireserve::{Config, Server, ShutdownToken};

struct TestServer {
    addr: SocketAddr,
    shutdown: ShutdownToken,
    handle: Option<JoinHandle<()>>,
    _root: TempDir,
}

impl TestServer {
    fn start() -> Self {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("hello.txt"), b"hello world").unwrap();
        fs::create_dir(root.path().join("sub")).unwrap();

        let config = Config::builder()
            .addr("127.0.0.1:0")
            .static_root(root.path())
            .build();

        let server = Server::bind(config).unwrap();
        let addr = server.local_addr().unwrap();
        let shutdown = server.shutdown_token();
        let handle = std::thread::spawn(move || {
            server.run().unwrap();
        });

        Self {
            addr,
            shutdown,
            handle: Some(handle),
            _root: root,
        }
    }

    fn connect(&self) -> TcpStream {
        TcpStream::connect(self.addr).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap();
        }
    }
}

/// Read one response frame; None when the peer signalled a clean close
fn read_reply(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let length = read_length(stream).unwrap();
    if length == 0 {
        return None;
    }
    Some(read_payload(stream, length, DEFAULT_CHUNK_SIZE).unwrap().to_vec())
}

// =============================================================================
// BOUNCE
// =============================================================================

#[test]
fn test_bounce_echoes_args() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "BOUNCE ping").unwrap();

    let length = read_length(&mut stream).unwrap();
    assert_eq!(length, 6); // "ping\r\n"
    let payload = read_payload(&mut stream, length, DEFAULT_CHUNK_SIZE).unwrap();
    assert_eq!(&payload[..], b"ping\r\n");
}

#[test]
fn test_bounce_rejoins_with_single_spaces() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "BOUNCE a b").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"a b\r\n");
}

#[test]
fn test_bounce_without_args_is_empty_text() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "BOUNCE").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"\r\n");
}

#[test]
fn test_verb_is_case_insensitive() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "bounce hi").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"hi\r\n");
}

// =============================================================================
// GET
// =============================================================================

#[test]
fn test_get_streams_raw_file_bytes() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "GET hello.txt").unwrap();

    let length = read_length(&mut stream).unwrap();
    assert_eq!(length, 11);
    let payload = read_payload(&mut stream, length, DEFAULT_CHUNK_SIZE).unwrap();
    // Raw content, no CRLF framing
    assert_eq!(&payload[..], b"hello world");
}

#[test]
fn test_get_without_filename() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "GET").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"ERROR: no file provided\r\n");
}

#[test]
fn test_get_missing_file() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "GET nope.txt").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"ERROR: no such file\r\n");
}

#[test]
fn test_get_directory() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "GET sub").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"ERROR: not a file\r\n");
}

#[test]
fn test_get_error_keeps_session_open() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "GET nope.txt").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"ERROR: no such file\r\n");

    // Session continues: the next command is still served
    write_text(&mut stream, "BOUNCE still alive").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"still alive\r\n");
}

// =============================================================================
// EXIT
// =============================================================================

#[test]
fn test_exit_echoes_code_then_closes() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "EXIT 7").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"Goodbye: 7\r\n");

    // Server closed its end; the next length read is a clean zero
    assert_eq!(read_length(&mut stream).unwrap(), 0);
}

#[test]
fn test_exit_default_code() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "EXIT").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"Goodbye: 200\r\n");
}

#[test]
fn test_exit_non_numeric_code_echoed_verbatim() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "EXIT soon").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"Goodbye: soon\r\n");
}

// =============================================================================
// Invalid commands and session termination
// =============================================================================

#[test]
fn test_unknown_verb_answered_not_fatal() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "PING now").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"Invalid Command: PING\r\n");

    write_text(&mut stream, "BOUNCE ok").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"ok\r\n");
}

#[test]
fn test_help_is_invalid_on_the_server() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "HELP").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"Invalid Command: HELP\r\n");
}

#[test]
fn test_zero_length_frame_closes_without_reply() {
    let server = TestServer::start();
    let mut stream = server.connect();

    // An explicit zero-length frame is the client saying it is done
    write_frame(&mut stream, b"").unwrap();

    // No reply: the server just closes, so the next read is EOF
    assert_eq!(read_length(&mut stream).unwrap(), 0);
}

#[test]
fn test_whitespace_only_message_closes_session() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "   ").unwrap();
    assert_eq!(read_length(&mut stream).unwrap(), 0);
}

#[test]
fn test_invalid_utf8_closes_session() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_frame(&mut stream, &[0xFF, 0xFE, 0x01]).unwrap();
    assert_eq!(read_length(&mut stream).unwrap(), 0);
}

#[test]
fn test_listener_survives_a_closed_session() {
    let server = TestServer::start();

    {
        let mut first = server.connect();
        write_text(&mut first, "EXIT").unwrap();
        assert_eq!(read_reply(&mut first).unwrap(), b"Goodbye: 200\r\n");
    }

    // A fresh connection is accepted and served after the first closed
    let mut second = server.connect();
    write_text(&mut second, "BOUNCE again").unwrap();
    assert_eq!(read_reply(&mut second).unwrap(), b"again\r\n");
}

#[test]
fn test_strict_request_response_sequence() {
    let server = TestServer::start();
    let mut stream = server.connect();

    write_text(&mut stream, "BOUNCE one").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"one\r\n");

    write_text(&mut stream, "GET hello.txt").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"hello world");

    write_text(&mut stream, "EXIT 0").unwrap();
    assert_eq!(read_reply(&mut stream).unwrap(), b"Goodbye: 0\r\n");
}
