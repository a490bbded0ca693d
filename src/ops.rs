//! Typed store operations
//!
//! Wraps the raw command/dispatch layer in per-store operations with
//! decoded results. Callbacks fire on the consuming thread like every
//! other dispatcher callback, so an operation may chain further sends
//! from inside its callback.

use crate::error::{ClientError, Result};
use crate::network::Client;
use crate::protocol::decode;
use crate::protocol::{Command, Player, PlayerUpdate, QueryFilter};

/// A client bound to one store name
///
/// The store name is the file stem shared by the server-side binary file
/// and its index (`<store>.bin` / `<store>Indice.bin`).
pub struct Session {
    client: Client,
    store: String,
}

impl Session {
    pub fn new(client: Client, store: impl Into<String>) -> Self {
        Self {
            client,
            store: store.into(),
        }
    }

    /// The underlying dispatcher handle
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// The store name this session targets
    pub fn store(&self) -> &str {
        &self.store
    }

    /// Create the binary store from `<store>.csv` on the server
    pub fn create_store<F>(&self, callback: F)
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        let command = Command::CreateStore {
            store: self.store.clone(),
        };
        self.client.send(&command, move |result| {
            callback(result.and_then(|response| expect_ok(&response)));
        });
    }

    /// List every record in the store
    ///
    /// A 404 means the store holds no records and yields an empty list;
    /// any other non-200 status is a domain error.
    pub fn list_all<F>(&self, callback: F)
    where
        F: FnOnce(Result<Vec<Player>>) + Send + 'static,
    {
        let command = Command::ListAll {
            store: self.store.clone(),
        };
        self.client.send(&command, move |result| {
            callback(result.and_then(|response| decode_records(&response)));
        });
    }

    /// Run a filtered query; an empty filter matches nothing useful but
    /// is still sent as-is
    pub fn query<F>(&self, filter: QueryFilter, callback: F)
    where
        F: FnOnce(Result<Vec<Player>>) + Send + 'static,
    {
        let command = Command::Query {
            store: self.store.clone(),
            filter,
        };
        self.client.send(&command, move |result| {
            callback(result.and_then(|response| decode_records(&response)));
        });
    }

    /// Delete one record by id
    pub fn delete_by_id<F>(&self, id: i32, callback: F)
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        let command = Command::DeleteById {
            store: self.store.clone(),
            id,
        };
        self.client.send(&command, move |result| {
            callback(result.and_then(|response| expect_ok(&response)));
        });
    }

    /// Update one record (full replace)
    ///
    /// The server has no in-place update: the record is deleted first
    /// and re-inserted through the opcode-6 command. The insert is only
    /// attempted when the delete came back with status 200; both round
    /// trips run on the same single-flight queue, so nothing can slip in
    /// between them from this client.
    pub fn update_player<F>(&self, fields: PlayerUpdate, callback: F)
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        let client = self.client.clone();
        let delete = Command::DeleteById {
            store: self.store.clone(),
            id: fields.id,
        };
        let update = Command::Update {
            store: self.store.clone(),
            fields,
        };

        self.client.send(&delete, move |result| {
            let response = match result {
                Ok(response) => response,
                Err(e) => return callback(Err(e)),
            };
            if let Err(e) = expect_ok(&response) {
                return callback(Err(e));
            }
            client.send(&update, move |result| {
                callback(result.and_then(|response| expect_ok(&response)));
            });
        });
    }
}

/// Map a non-200 status to a domain error
fn expect_ok(response: &str) -> Result<()> {
    match decode::extract_status(response) {
        decode::STATUS_OK => Ok(()),
        status => Err(ClientError::Server {
            status,
            message: decode::extract_message(response),
        }),
    }
}

/// Decode the record list of a 200 response; 404 yields an empty list
fn decode_records(response: &str) -> Result<Vec<Player>> {
    match decode::extract_status(response) {
        decode::STATUS_OK => decode::parse_players(response),
        decode::STATUS_NOT_FOUND => Ok(Vec::new()),
        status => Err(ClientError::Server {
            status,
            message: decode::extract_message(response),
        }),
    }
}
