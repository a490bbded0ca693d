//! # fifaclient
//!
//! Client core for a player-record server that stores records in a
//! server-side binary file with an auxiliary index:
//! - Length-prefixed TCP transport (strict half-duplex round trips)
//! - Textual command encoding for the five server operations
//! - Substring-scan response decoding (status, message, record list)
//! - Single-flight request dispatcher with consumer-thread callbacks
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Caller (UI / CLI thread)                   │
//! │        builds Command ── drains ResponseQueue callbacks       │
//! └──────────────┬─────────────────────────────▲─────────────────┘
//!                │ jobs                        │ completions
//! ┌──────────────▼─────────────────────────────┴─────────────────┐
//! │                     Client worker thread                      │
//! │          (owns the Connection, one request in flight)         │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ framed round trip
//!                        ┌───────▼────────┐
//!                        │   TCP server   │
//!                        └────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod ops;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ClientError, Result};
pub use config::Config;
pub use network::{Client, ConnectionState, ResponseQueue};
pub use ops::Session;
pub use protocol::{Command, Player, PlayerUpdate, QueryFilter};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
