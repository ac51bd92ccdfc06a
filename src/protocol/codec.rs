//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────────────┬─────────────────────────────┐
//! │ Length (4, LE)   │      Payload (L bytes)      │
//! └──────────────────┴─────────────────────────────┘
//! ```
//!
//! Both directions use the same envelope: an unsigned 32-bit little-endian
//! length followed by exactly that many payload bytes. Text messages carry
//! UTF-8 bytes of `<content>\r\n`; the trailing CRLF is ordinary payload
//! counted by the length field. A GET success response carries raw file
//! bytes with no CRLF and no UTF-8 requirement.
//!
//! A length of 0 read off the wire means the peer closed cleanly; it is a
//! valid terminal signal, not an error.

use std::io::{self, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};

/// Size of the length prefix
pub const LENGTH_BYTES: usize = 4;

/// Default maximum bytes pulled per read while draining a payload
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a payload into a frame: 4-byte LE length prefix + payload
pub fn encode_frame(payload: &[u8]) -> Bytes {
    let mut frame = BytesMut::with_capacity(LENGTH_BYTES + payload.len());
    frame.put_u32_le(payload.len() as u32);
    frame.put_slice(payload);
    frame.freeze()
}

/// Write a complete frame, retrying short writes internally
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let frame = encode_frame(payload);
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

/// Write a text message as a frame
///
/// Appends the `\r\n` terminator before encoding, so the length field
/// counts it as payload.
pub fn write_text<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    let payload = format!("{text}\r\n");
    write_frame(writer, payload.as_bytes())
}

/// Write the 4-byte size prefix then stream `size` raw bytes from `reader`
///
/// Used for the GET success response: file content goes out verbatim with
/// no text framing.
pub fn write_raw<W: Write, R: Read>(writer: &mut W, reader: &mut R, size: u32) -> Result<()> {
    writer.write_all(&size.to_le_bytes())?;
    let copied = io::copy(&mut reader.take(size as u64), writer)?;
    if copied != size as u64 {
        return Err(WireError::Transport(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("source ended after {copied} of {size} bytes"),
        )));
    }
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Decoding
// =============================================================================

/// Read the next frame length
///
/// Reads exactly 4 bytes, retrying partial reads. Returns 0 when the peer
/// closed before sending any byte (clean end-of-stream). An EOF in the
/// middle of the length field is a transport error.
pub fn read_length<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; LENGTH_BYTES];
    let mut filled = 0;

    while filled < LENGTH_BYTES {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            if filled == 0 {
                return Ok(0);
            }
            return Err(WireError::Transport(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("connection closed after {filled} of {LENGTH_BYTES} length bytes"),
            )));
        }
        filled += n;
    }

    Ok(u32::from_le_bytes(buf))
}

/// Read exactly `length` payload bytes, in chunks of at most `max_chunk`
pub fn read_payload<R: Read>(reader: &mut R, length: u32, max_chunk: usize) -> Result<Bytes> {
    let length = length as usize;
    let max_chunk = max_chunk.max(1);

    let mut payload = BytesMut::with_capacity(length);
    let mut chunk = vec![0u8; max_chunk.min(length.max(1))];

    while payload.len() < length {
        let want = (length - payload.len()).min(max_chunk);
        let n = reader.read(&mut chunk[..want])?;
        if n == 0 {
            return Err(WireError::Transport(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("connection closed after {} of {length} payload bytes", payload.len()),
            )));
        }
        payload.put_slice(&chunk[..n]);
    }

    Ok(payload.freeze())
}

/// Decode payload bytes as a text message
///
/// Fails with a decode error on invalid UTF-8. Surrounding whitespace,
/// including the trailing `\r\n`, is stripped.
pub fn decode_text(payload: &[u8]) -> Result<String> {
    let text = String::from_utf8(payload.to_vec())?;
    Ok(text.trim().to_string())
}
