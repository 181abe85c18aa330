use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod auth;
use sealkv::{FileStorage, SecuredStore, default_storage};

fn resolve_storage(path: Option<PathBuf>) -> Result<FileStorage> {
    match path {
        Some(p) => Ok(FileStorage::new(p)),
        None => default_storage(),
    }
}

#[derive(Debug, Parser)]
#[command(name = "sealkv")]
#[command(
    version,
    about = "Key-value store with password-encrypted values."
)]
struct Cli {
    /// Path to the sealkv storage file
    #[arg(long, global = true, value_name = "PATH", env = "SEALKV_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Initializes the store with a fresh salt
    Init,

    /// Encrypts and stores a value
    #[command(arg_required_else_help = true)]
    Put { key: String, value: String },

    /// Retrieves and decrypts a value
    #[command(arg_required_else_help = true)]
    Get { key: String },

    /// Removes a value
    #[command(arg_required_else_help = true)]
    Delete { key: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Cli::parse();
    let storage = resolve_storage(args.store)?;
    tracing::debug!(path = %storage.path().display(), "using storage file");

    match args.command {
        Commands::Init => {
            let password = auth::read_new_password_with_confirmation()?;
            SecuredStore::create(password, storage)?;
            println!("store initialized");
        }
        Commands::Put { key, value } => {
            let password = auth::read_password()?;
            let store = SecuredStore::open(password, storage)?;
            store.put(key.as_bytes(), value.as_bytes())?;
            println!("stored value '{key}'");
        }
        Commands::Get { key } => {
            let password = auth::read_password()?;
            let store = SecuredStore::open(password, storage)?;
            match store.get(key.as_bytes())? {
                Some(value) => {
                    let mut stdout = std::io::stdout().lock();
                    stdout
                        .write_all(&value)
                        .and_then(|_| stdout.write_all(b"\n"))
                        .context("failed to write value")?;
                }
                None => println!("key not found"),
            }
        }
        Commands::Delete { key } => {
            let password = auth::read_password()?;
            let store = SecuredStore::open(password, storage)?;
            store.delete(key.as_bytes())?;
            println!("key '{key}' removed");
        }
    }

    Ok(())
}
