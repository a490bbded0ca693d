//! Frame codec
//!
//! Length-prefixed framing for the wire protocol.
//!
//! Every message, in both directions, is a 4-byte big-endian length
//! followed by exactly that many payload bytes. The payload is opaque
//! here; text encoding is the caller's concern.

use std::io::{Read, Write};

use bytes::{BufMut, BytesMut};

use crate::error::{ClientError, Result};

/// Length prefix size: 4 bytes, big-endian
pub const LEN_PREFIX_SIZE: usize = 4;

/// Maximum frame payload size (16 MB)
pub const MAX_FRAME_SIZE: u32 = 16 * 1024 * 1024;

/// Encode a payload into a single frame
///
/// Format: payload_len (4, big-endian) + payload
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > MAX_FRAME_SIZE as usize {
        return Err(ClientError::Protocol(format!(
            "Frame too large: {} bytes (max {})",
            payload.len(),
            MAX_FRAME_SIZE
        )));
    }

    let mut frame = BytesMut::with_capacity(LEN_PREFIX_SIZE + payload.len());
    frame.put_u32(payload.len() as u32);
    frame.put_slice(payload);

    Ok(frame.to_vec())
}

/// Decode a single frame from a byte slice
///
/// Returns the payload bytes of the first frame in `bytes`.
pub fn decode_frame(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < LEN_PREFIX_SIZE {
        return Err(ClientError::Protocol(format!(
            "Incomplete length prefix: expected {} bytes, got {}",
            LEN_PREFIX_SIZE,
            bytes.len()
        )));
    }

    let payload_len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    if payload_len > MAX_FRAME_SIZE {
        return Err(ClientError::Protocol(format!(
            "Frame too large: {} bytes (max {})",
            payload_len, MAX_FRAME_SIZE
        )));
    }

    let total_len = LEN_PREFIX_SIZE + payload_len as usize;
    if bytes.len() < total_len {
        return Err(ClientError::Protocol(format!(
            "Incomplete frame: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    Ok(&bytes[LEN_PREFIX_SIZE..total_len])
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write one frame to a stream and flush it
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let frame = encode_frame(payload)?;
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

/// Read one complete frame from a stream
///
/// Blocks until the full payload is received or an error occurs.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut prefix = [0u8; LEN_PREFIX_SIZE];
    reader.read_exact(&mut prefix)?;

    let payload_len = u32::from_be_bytes(prefix);
    if payload_len > MAX_FRAME_SIZE {
        return Err(ClientError::Protocol(format!(
            "Frame too large: {} bytes (max {})",
            payload_len, MAX_FRAME_SIZE
        )));
    }

    let mut payload = vec![0u8; payload_len as usize];
    if payload_len > 0 {
        reader.read_exact(&mut payload)?;
    }

    Ok(payload)
}
