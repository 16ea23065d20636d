//! archive-api-server binary
//!
//! Serves the archive API over an in-memory Domain Store.
//!
//! ## Configuration (CLI > env > TOML via `config` crate)
//!
//! | Key                       | Default          | Description                          |
//! |---------------------------|------------------|--------------------------------------|
//! | `ARCHIVE_API_CONFIG`      | *(none)*         | TOML file with the keys below        |
//! | `ARCHIVE_API_ADDRESS`     | `localhost:8080` | `ip:port` to listen on               |
//! | `ARCHIVE_API_SEED`        | *(none)*         | JSON document seeding the store      |
//! | `ARCHIVE_API_CLIENT_DIR`  | *(none)*         | Directory served under `/client`     |
//! | `ARCHIVE_API_SWAGGER_DIR` | *(none)*         | Swagger UI served under `/apidocs`   |

use anyhow::{Context, Result};
use archive_api::{memory::MemoryStore, server, types::ServerConfig, ProjectData, SharedStore};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "archive-api-server", about = "Archive API server", version)]
struct Args {
    /// TOML configuration file
    #[arg(long, env = "ARCHIVE_API_CONFIG")]
    config: Option<PathBuf>,

    /// The ip:port combination to listen on
    #[arg(long)]
    address: Option<String>,

    /// JSON document with the source template and initial projects
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Directory with client files, served under /client
    #[arg(long)]
    client_dir: Option<PathBuf>,

    /// Directory with the Swagger UI resources, served under /apidocs
    #[arg(long)]
    swagger_dir: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<ServerConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = &args.config {
        builder = builder.add_source(config::File::from(path.as_path()));
    }
    let mut config: ServerConfig = builder
        .add_source(config::Environment::with_prefix("ARCHIVE_API"))
        .build()
        .context("Failed to load configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    if let Some(address) = &args.address {
        config.address = address.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed.clone();
    }
    if args.client_dir.is_some() {
        config.client_dir = args.client_dir.clone();
    }
    if args.swagger_dir.is_some() {
        config.swagger_dir = args.swagger_dir.clone();
    }
    Ok(config)
}

fn load_store(config: &ServerConfig) -> Result<MemoryStore> {
    match &config.seed {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Seed is not available: {}", path.display()))?;
            MemoryStore::from_json(&json)
                .with_context(|| format!("Seed is not valid: {}", path.display()))
        }
        None => {
            log::warn!("No seed given; starting with an empty source template");
            Ok(MemoryStore::new(ProjectData::default()))
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("archive_api=debug".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    log::info!(
        "Starting archive-api-server (address='{}', seed={:?}, client={:?}, swagger={:?})",
        config.address,
        config.seed,
        config.client_dir,
        config.swagger_dir,
    );

    let store: SharedStore = Arc::new(load_store(&config)?);
    server::serve(&config, store).await
}
