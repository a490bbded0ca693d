//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Frame Format (both directions)
//! ```text
//! ┌───────────────┬─────────────────────────────┐
//! │   Len (4 BE)  │       Payload (text)        │
//! └───────────────┴─────────────────────────────┘
//! ```
//!
//! The payload bytes are opaque at this layer. One request frame is always
//! followed by exactly one response frame; there is no pipelining and no
//! multiplexing.
//!
//! ## Commands
//! The payload of a request frame is one text command:
//! - `1 <store>.csv <store>.bin`                    create binary store
//! - `2 <store>.bin`                                list all records
//! - `3 <store>.bin 1\n<count> <fields...>`         filtered query
//! - `5 <store>.bin <store>Indice.bin 1\n1 id <id>` delete by id
//! - `6 <store>.bin <store>Indice.bin 1\n<record>`  update (full replace)
//!
//! ## Responses
//! The payload of a response frame is a JSON-shaped envelope with a
//! `"status"` integer (200 ok, 404 not found, 500 internal error) and a
//! `"payload"` that is either a quoted message or an array of flat records
//! with keys `id`, `idade`, `nomeJogador`, `nacionalidade`, `nomeClube`.
//! It is decoded by substring scanning, never by a JSON parser; see
//! [`decode`] for the exact (and intentionally brittle) rules.

mod codec;
mod command;
pub mod decode;
mod player;

pub use codec::{
    decode_frame, encode_frame, read_frame, write_frame, LEN_PREFIX_SIZE, MAX_FRAME_SIZE,
};
pub use command::{Command, PlayerUpdate, QueryFilter, NULL_TOKEN};
pub use player::{Player, AGE_UNSET};
