//! Network Module
//!
//! Blocking TCP connection handling and the request dispatcher.

mod client;
mod connection;

pub use client::{route_response, Callback, Client, ResponseQueue};
pub use connection::{Connection, ConnectionState};
