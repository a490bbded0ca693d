//! Codec Tests
//!
//! Tests for the length-prefixed frame codec.

use std::io::Cursor;

use fifaclient::protocol::{
    decode_frame, encode_frame, read_frame, write_frame, LEN_PREFIX_SIZE, MAX_FRAME_SIZE,
};

// =============================================================================
// Encode/Decode Tests
// =============================================================================

#[test]
fn test_encode_decode_round_trip() {
    let payload = b"2 FIFA23.bin";
    let frame = encode_frame(payload).unwrap();
    let decoded = decode_frame(&frame).unwrap();
    assert_eq!(decoded, payload);
}

#[test]
fn test_round_trip_various_lengths() {
    // From empty up to a realistic frame size, the prefix always decodes
    // back to the payload length.
    for len in [0usize, 1, 2, 3, 15, 255, 256, 1024, 65_536] {
        let payload = vec![b'x'; len];
        let frame = encode_frame(&payload).unwrap();
        assert_eq!(frame.len(), LEN_PREFIX_SIZE + len);
        let decoded = decode_frame(&frame).unwrap();
        assert_eq!(decoded.len(), len);
    }
}

#[test]
fn test_wire_format() {
    let frame = encode_frame(b"hi").unwrap();

    // Expected: [0x00 0x00 0x00 0x02][h i]
    assert_eq!(&frame[..4], &[0x00, 0x00, 0x00, 0x02]);
    assert_eq!(&frame[4..], b"hi");
}

#[test]
fn test_prefix_is_big_endian() {
    let payload = vec![0u8; 258];
    let frame = encode_frame(&payload).unwrap();
    assert_eq!(&frame[..4], &[0x00, 0x00, 0x01, 0x02]);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_incomplete_prefix() {
    let result = decode_frame(&[0x00, 0x00]);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Incomplete length prefix"));
}

#[test]
fn test_incomplete_payload() {
    // Prefix says 10 bytes, only 3 present
    let bytes = [0x00, 0x00, 0x00, 0x0A, 0x61, 0x62, 0x63];
    let result = decode_frame(&bytes);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Incomplete frame"));
}

#[test]
fn test_oversized_frame_rejected() {
    let prefix = (MAX_FRAME_SIZE + 1).to_be_bytes();
    let result = decode_frame(&prefix);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Frame too large"));
}

#[test]
fn test_read_truncated_stream() {
    // A stream that ends mid-payload surfaces the underlying I/O error.
    let mut bytes = vec![0x00, 0x00, 0x00, 0x08];
    bytes.extend_from_slice(b"abc");
    let mut cursor = Cursor::new(bytes);
    let result = read_frame(&mut cursor);
    assert!(matches!(result, Err(fifaclient::ClientError::Io(_))));
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_write_read() {
    let mut buffer = Vec::new();
    write_frame(&mut buffer, b"3 FIFA23.bin 1\n1 id 7").unwrap();

    let mut cursor = Cursor::new(buffer);
    let payload = read_frame(&mut cursor).unwrap();
    assert_eq!(payload, b"3 FIFA23.bin 1\n1 id 7");
}

#[test]
fn test_stream_multiple_frames() {
    let messages: Vec<&[u8]> = vec![b"first", b"", b"third frame"];

    let mut buffer = Vec::new();
    for message in &messages {
        write_frame(&mut buffer, message).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    for expected in &messages {
        let payload = read_frame(&mut cursor).unwrap();
        assert_eq!(&payload, expected);
    }
}
