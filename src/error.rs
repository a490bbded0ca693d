//! Error types for the client
//!
//! Provides a unified error type for all operations.
//!
//! The taxonomy keeps the failure families distinct so callers can tell
//! them apart: transport failures (`Io`, `NotConnected`), decode failures
//! (`Protocol`, `Decode`), and domain-level failures reported by the
//! server on a well-formed response (`Server`).

use thiserror::Error;

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Unified error type for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("socket is not connected")]
    NotConnected,

    // -------------------------------------------------------------------------
    // Protocol / Decode Errors
    // -------------------------------------------------------------------------
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("server returned status {status}: {message}")]
    Server { status: i32, message: String },

    // -------------------------------------------------------------------------
    // Dispatcher Errors
    // -------------------------------------------------------------------------
    #[error("client worker has shut down")]
    Shutdown,
}
