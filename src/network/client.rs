//! Request Dispatcher
//!
//! Runs every transport round trip on a dedicated worker thread that owns
//! the connection, and marshals each result back to the single consuming
//! thread through a completion queue.
//!
//! ## Concurrency Model: Single-Flight Queue
//!
//! All jobs (connect, send, disconnect) go through one crossbeam channel
//! drained sequentially by one worker. At most one request is in flight
//! per connection, so two requests issued back to back can never
//! interleave their frames on the shared socket. Callbacks are never
//! invoked on the worker: completions are posted to a [`ResponseQueue`]
//! that the consumer drains on its own thread.
//!
//! Every submitted job produces exactly one callback invocation, success
//! or failure — never zero, never more than one.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::network::connection::{Connection, ConnectionState};
use crate::protocol::decode;
use crate::protocol::Command;

/// Boxed result callback, invoked exactly once on the consuming thread
pub type Callback<T> = Box<dyn FnOnce(Result<T>) + Send + 'static>;

/// A callback bound to its result, ready to run on the consuming thread
type Completion = Box<dyn FnOnce() + Send + 'static>;

/// One unit of work for the dispatcher worker
enum Job {
    Connect {
        host: String,
        port: u16,
        nodelay: bool,
        callback: Callback<()>,
    },
    Send {
        command: String,
        callback: Callback<String>,
    },
    Disconnect {
        callback: Callback<()>,
    },
    Shutdown,
}

// =============================================================================
// Response Queue (consumer side)
// =============================================================================

/// Receiving end of the completion channel
///
/// The consumer drains this queue on its own single-threaded context (UI
/// loop, CLI main thread, test thread); callbacks run on whichever thread
/// calls [`drain`](Self::drain) or [`run_one`](Self::run_one), never on
/// the dispatcher worker.
pub struct ResponseQueue {
    completions: Receiver<Completion>,
}

impl ResponseQueue {
    /// Run all pending completions, returning how many ran
    pub fn drain(&self) -> usize {
        let mut count = 0;
        while let Ok(completion) = self.completions.try_recv() {
            completion();
            count += 1;
        }
        count
    }

    /// Wait up to `timeout` for one completion and run it
    ///
    /// Returns false if no completion arrived in time.
    pub fn run_one(&self, timeout: Duration) -> bool {
        match self.completions.recv_timeout(timeout) {
            Ok(completion) => {
                completion();
                true
            }
            Err(_) => false,
        }
    }
}

// =============================================================================
// Client (producer side)
// =============================================================================

/// Joins the worker thread when the last client handle is dropped
struct WorkerHandle {
    jobs: Sender<Job>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        let _ = self.jobs.send(Job::Shutdown);
        if let Some(handle) = self.thread.lock().take() {
            let _ = handle.join();
        }
    }
}

/// Handle to the request dispatcher
///
/// Cheap to clone; all clones share the same worker, connection, and
/// completion queue. Exactly one connection is active at a time —
/// reconnecting replaces it wholesale.
#[derive(Clone)]
pub struct Client {
    jobs: Sender<Job>,
    completions: Sender<Completion>,
    state: Arc<Mutex<ConnectionState>>,
    _worker: Arc<WorkerHandle>,
}

impl Client {
    /// Create a client and the response queue its consumer drains
    pub fn new() -> (Self, ResponseQueue) {
        let (jobs_tx, jobs_rx) = unbounded::<Job>();
        let (completions_tx, completions_rx) = unbounded::<Completion>();
        let state = Arc::new(Mutex::new(ConnectionState::Unconnected));

        let worker_state = Arc::clone(&state);
        let worker_completions = completions_tx.clone();
        let thread = thread::spawn(move || {
            run_worker(jobs_rx, worker_completions, worker_state);
        });

        let client = Self {
            jobs: jobs_tx.clone(),
            completions: completions_tx,
            state,
            _worker: Arc::new(WorkerHandle {
                jobs: jobs_tx,
                thread: Mutex::new(Some(thread)),
            }),
        };

        (client, ResponseQueue {
            completions: completions_rx,
        })
    }

    /// Open a connection to the configured server
    ///
    /// Runs off the calling thread; the callback reports success or the
    /// underlying I/O error. On failure the state is left unconnected.
    pub fn connect<F>(&self, config: &Config, callback: F)
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        self.submit(Job::Connect {
            host: config.host.clone(),
            port: config.port,
            nodelay: config.nodelay,
            callback: Box::new(callback),
        });
    }

    /// Close the connection, if open
    ///
    /// Always leaves the state unconnected, even when the close itself
    /// fails; the failure is still reported through the callback. Safe to
    /// call concurrently (e.g. a shutdown hook racing a window-close
    /// handler): jobs serialize on the worker and a second disconnect is
    /// a no-op.
    pub fn disconnect<F>(&self, callback: F)
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        self.submit(Job::Disconnect {
            callback: Box::new(callback),
        });
    }

    /// Send a command and receive the raw response text
    pub fn send<F>(&self, command: &Command, callback: F)
    where
        F: FnOnce(Result<String>) + Send + 'static,
    {
        self.send_text(command.encode(), callback);
    }

    /// Send raw command text and receive the raw response text
    ///
    /// Fails fast with [`ClientError::NotConnected`] when no connection
    /// is established.
    pub fn send_text<F>(&self, command: String, callback: F)
    where
        F: FnOnce(Result<String>) + Send + 'static,
    {
        self.submit(Job::Send {
            command,
            callback: Box::new(callback),
        });
    }

    /// True only if a connection exists and was successfully established
    pub fn is_connected(&self) -> bool {
        *self.state.lock() == ConnectionState::Connected
    }

    /// Current connection lifecycle state
    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Queue a job, preserving the one-callback invariant even when the
    /// worker is already gone
    fn submit(&self, job: Job) {
        if let Err(rejected) = self.jobs.send(job) {
            match rejected.0 {
                Job::Connect { callback, .. } => self.post_shutdown(callback),
                Job::Send { callback, .. } => self.post_shutdown(callback),
                Job::Disconnect { callback } => self.post_shutdown(callback),
                Job::Shutdown => {}
            }
        }
    }

    fn post_shutdown<T: Send + 'static>(&self, callback: Callback<T>) {
        let _ = self
            .completions
            .send(Box::new(move || callback(Err(ClientError::Shutdown))));
    }
}

// =============================================================================
// Worker Loop
// =============================================================================

/// Drain jobs sequentially; the worker owns the connection outright
fn run_worker(
    jobs: Receiver<Job>,
    completions: Sender<Completion>,
    state: Arc<Mutex<ConnectionState>>,
) {
    let mut connection: Option<Connection> = None;

    while let Ok(job) = jobs.recv() {
        match job {
            Job::Connect {
                host,
                port,
                nodelay,
                callback,
            } => {
                *state.lock() = ConnectionState::Connecting;
                match Connection::open(&host, port, nodelay) {
                    Ok(conn) => {
                        tracing::info!("Connected to {}", conn.peer_addr());
                        // A fresh connect replaces any previous connection.
                        connection = Some(conn);
                        *state.lock() = ConnectionState::Connected;
                        post(&completions, callback, Ok(()));
                    }
                    Err(e) => {
                        tracing::warn!("Connect to {}:{} failed: {}", host, port, e);
                        *state.lock() = ConnectionState::Unconnected;
                        post(&completions, callback, Err(e));
                    }
                }
            }

            Job::Send { command, callback } => {
                let result = match connection.as_mut() {
                    Some(conn) => conn.round_trip(&command),
                    None => Err(ClientError::NotConnected),
                };
                if let Err(e) = &result {
                    tracing::warn!("Request failed: {}", e);
                }
                post(&completions, callback, result);
            }

            Job::Disconnect { callback } => {
                let result = match connection.take() {
                    Some(conn) => conn.close(),
                    None => Ok(()),
                };
                if let Err(e) = &result {
                    tracing::warn!("Disconnect failed: {}", e);
                }
                // Fail-safe close: unconnected no matter what.
                *state.lock() = ConnectionState::Unconnected;
                post(&completions, callback, result);
            }

            Job::Shutdown => break,
        }
    }

    *state.lock() = ConnectionState::Unconnected;
}

/// Bind a result to its callback and hand it to the consuming thread
fn post<T: Send + 'static>(
    completions: &Sender<Completion>,
    callback: Callback<T>,
    result: Result<T>,
) {
    if completions
        .send(Box::new(move || callback(result)))
        .is_err()
    {
        tracing::warn!("Completion dropped: response queue is gone");
    }
}

// =============================================================================
// Status-based Routing
// =============================================================================

/// Route a raw response to one of three outcome actions by status code
///
/// Status 200 runs `on_success`; 404 runs `on_not_found` or falls back to
/// an informational log; anything else (including the unknown sentinel)
/// runs `on_error` or falls back to an error log. The log fallbacks stand
/// in for the dialog hooks a UI layer would supply. Handlers run before
/// this returns, so they may borrow from the caller's scope.
pub fn route_response(
    response: &str,
    on_success: impl FnOnce(),
    on_not_found: Option<Box<dyn FnOnce() + '_>>,
    on_error: Option<Box<dyn FnOnce() + '_>>,
) {
    match decode::extract_status(response) {
        decode::STATUS_OK => on_success(),
        decode::STATUS_NOT_FOUND => match on_not_found {
            Some(action) => action(),
            None => log_response(response),
        },
        _ => match on_error {
            Some(action) => action(),
            None => log_response(response),
        },
    }
}

/// Default handling for non-success responses
fn log_response(response: &str) {
    let status = decode::extract_status(response);
    let message = decode::extract_message(response);
    match status {
        decode::STATUS_NOT_FOUND => {
            tracing::info!("No record found. {}", message);
        }
        decode::STATUS_INTERNAL_ERROR => {
            tracing::error!("Internal server error. {}", message);
        }
        _ => {
            tracing::error!("Unknown error: {}. {}", status, message);
        }
    }
}
