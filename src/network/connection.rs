//! Connection Handler
//!
//! Owns one TCP connection to the record server and performs strict
//! half-duplex round trips over it: one framed write, then one framed
//! read, before the channel may be reused.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, TcpStream};

use crate::error::{ClientError, Result};
use crate::protocol::{read_frame, write_frame};

/// Connection lifecycle
///
/// `Unconnected --connect--> Connecting --socket opens--> Connected
/// --disconnect--> Unconnected`; a connect I/O error also lands back in
/// `Unconnected`. There is no reconnecting state: a fresh connect always
/// constructs a new [`Connection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unconnected,
    Connecting,
    Connected,
}

/// One established connection to the server
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Open a TCP connection to `host:port`
    ///
    /// Sets up buffered I/O over cloned stream handles. No timeouts are
    /// configured: a stalled server blocks the round trip indefinitely,
    /// matching the protocol's lack of a cancellation story.
    pub fn open(host: &str, port: u16, nodelay: bool) -> Result<Self> {
        let stream = TcpStream::connect((host, port))?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        if nodelay {
            // Disable Nagle's algorithm for low latency
            stream.set_nodelay(true)?;
        }

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connection established to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Perform one request/response round trip
    ///
    /// Writes the command text as a single frame, flushes, then blocks
    /// reading exactly one response frame. I/O errors surface as-is and
    /// are never retried here; retry policy belongs to the caller, and
    /// this client has none.
    pub fn round_trip(&mut self, command: &str) -> Result<String> {
        write_frame(&mut self.writer, command.as_bytes())?;

        let response = read_frame(&mut self.reader)?;
        String::from_utf8(response)
            .map_err(|_| ClientError::Protocol("response is not valid UTF-8".to_string()))
    }

    /// Close the connection
    ///
    /// A failed shutdown is reported but the socket handles are released
    /// either way (fail-safe close); the caller transitions state to
    /// unconnected regardless of the outcome.
    pub fn close(self) -> Result<()> {
        tracing::debug!("Closing connection to {}", self.peer_addr);
        self.writer.get_ref().shutdown(Shutdown::Both)?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
