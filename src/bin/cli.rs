//! CLI Client
//!
//! Command-line interface for the player-record server: connects, runs
//! one operation, prints the result. The main thread is the consuming
//! thread — it drains the response queue while waiting.

use std::process;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fifaclient::{Client, Config, PlayerUpdate, QueryFilter, ResponseQueue, Session};

/// Player-record client CLI
#[derive(Parser, Debug)]
#[command(name = "fifaclient-cli")]
#[command(about = "CLI for the FIFA player-record server")]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Store name (file stem, e.g. FIFA23)
    #[arg(short, long)]
    store: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the binary store from <store>.csv on the server
    Create,

    /// List all records as CSV
    List,

    /// Run a filtered query
    Query {
        #[arg(long)]
        id: Option<i32>,

        #[arg(long)]
        age: Option<i32>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        nationality: Option<String>,

        #[arg(long)]
        club: Option<String>,
    },

    /// Delete a record by id
    Delete {
        /// The record id to delete
        id: i32,
    },

    /// Replace a record (omitted fields are stored as unset)
    Update {
        /// The record id to replace
        id: i32,

        #[arg(long)]
        age: Option<i32>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        nationality: Option<String>,

        #[arg(long)]
        club: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::builder()
        .host(args.host.clone())
        .port(args.port)
        .build();

    let (client, queue) = Client::new();
    let session = Session::new(client.clone(), args.store.clone());

    // Connect first; every operation requires an established connection.
    tracing::debug!("Connecting to {}", config.server_addr());
    let (tx, rx) = mpsc::channel();
    client.connect(&config, move |result| {
        let _ = tx.send(result);
    });
    if let Err(e) = wait(&queue, &rx) {
        eprintln!("connection failed: {e}");
        process::exit(1);
    }

    let outcome = run_command(&session, &queue, args.command);

    // Fail-safe close before reporting the outcome.
    let (tx, rx) = mpsc::channel();
    client.disconnect(move |result| {
        let _ = tx.send(result);
    });
    let _ = wait(&queue, &rx);

    if let Err(e) = outcome {
        eprintln!("operation failed: {e}");
        process::exit(1);
    }
}

fn run_command(
    session: &Session,
    queue: &ResponseQueue,
    command: Commands,
) -> fifaclient::Result<()> {
    match command {
        Commands::Create => {
            let (tx, rx) = mpsc::channel();
            session.create_store(move |result| {
                let _ = tx.send(result);
            });
            wait(queue, &rx)?;
            println!("store created");
            Ok(())
        }

        Commands::List => {
            let (tx, rx) = mpsc::channel();
            session.list_all(move |result| {
                let _ = tx.send(result);
            });
            print_players(wait(queue, &rx)?);
            Ok(())
        }

        Commands::Query {
            id,
            age,
            name,
            nationality,
            club,
        } => {
            let filter = QueryFilter {
                id,
                age,
                name,
                nationality,
                club,
            };
            let (tx, rx) = mpsc::channel();
            session.query(filter, move |result| {
                let _ = tx.send(result);
            });
            print_players(wait(queue, &rx)?);
            Ok(())
        }

        Commands::Delete { id } => {
            let (tx, rx) = mpsc::channel();
            session.delete_by_id(id, move |result| {
                let _ = tx.send(result);
            });
            wait(queue, &rx)?;
            println!("record {id} deleted");
            Ok(())
        }

        Commands::Update {
            id,
            age,
            name,
            nationality,
            club,
        } => {
            let fields = PlayerUpdate {
                id,
                age,
                name,
                nationality,
                club,
            };
            let (tx, rx) = mpsc::channel();
            session.update_player(fields, move |result| {
                let _ = tx.send(result);
            });
            wait(queue, &rx)?;
            println!("record {id} updated");
            Ok(())
        }
    }
}

fn print_players(players: Vec<fifaclient::Player>) {
    println!("id,age,name,nationality,club");
    for player in players {
        println!("{}", player.to_csv_row());
    }
}

/// Drain the response queue on this thread until the callback reports in
fn wait<T>(queue: &ResponseQueue, rx: &mpsc::Receiver<T>) -> T {
    let deadline = Instant::now() + Duration::from_secs(30);
    loop {
        queue.run_one(Duration::from_millis(100));
        if let Ok(value) = rx.try_recv() {
            return value;
        }
        if Instant::now() >= deadline {
            eprintln!("timed out waiting for the server");
            process::exit(1);
        }
    }
}
