//! Command-line interface for the Wiperhub coordination server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wiperhub_api::ServerState;
use wiperhub_core::config::{HubConfig, StorageKind, env_vars};
use wiperhub_core::storage::StorageBackend;
use wiperhub_storage::{MemoryBackend, RedbBackend};

/// Wiperhub - wiper command coordination over CAN and LIN.
#[derive(Parser, Debug)]
#[command(name = "wiperhub")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the coordination server.
    Serve {
        /// Host to bind to.
        #[arg(long, env = env_vars::HOST)]
        host: Option<String>,
        /// Port to bind to.
        #[arg(short, long, env = env_vars::PORT)]
        port: Option<u16>,
        /// Directory holding the database file.
        #[arg(long, env = env_vars::DATA_DIR)]
        data_dir: Option<String>,
        /// Use the volatile in-memory backend instead of redb.
        #[arg(long)]
        memory: bool,
    },
    /// Print the resolved configuration and exit.
    Config,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("WIPERHUB_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_backend(config: &HubConfig) -> Result<Arc<dyn StorageBackend>> {
    match config.storage {
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage, commands will not survive a restart");
            Ok(Arc::new(MemoryBackend::default()))
        }
        StorageKind::Redb => {
            let path = config.db_path();
            let backend = RedbBackend::open(&path)
                .with_context(|| format!("failed to open database at {}", path.display()))?;
            tracing::info!("opened database at {}", path.display());
            Ok(Arc::new(backend))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Serve {
            host,
            port,
            data_dir,
            memory,
        } => {
            let mut config = HubConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            if memory {
                config.storage = StorageKind::Memory;
            }

            let backend = build_backend(&config)?;
            let state = ServerState::new(backend);

            let addr: SocketAddr = format!("{}:{}", config.host, config.port)
                .parse()
                .with_context(|| {
                    format!("invalid bind address {}:{}", config.host, config.port)
                })?;

            wiperhub_api::run(addr, state)
                .await
                .context("server exited with an error")?;
        }
        Command::Config => {
            let config = HubConfig::from_env();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
