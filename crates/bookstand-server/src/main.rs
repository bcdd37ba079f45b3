use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bookstand_core::{AppConfig, Database};
use bookstand_server::HttpServer;

#[derive(Parser)]
#[command(
    name = "bookstand",
    about = "Self-hosted book catalogue server",
    version,
    long_about = None
)]
struct Cli {
    /// Host to bind to.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to.
    #[arg(long)]
    port: Option<u16>,

    /// Path to the SQLite store. Defaults to `bookstand.db` beside the
    /// binary.
    #[arg(long)]
    database: Option<PathBuf>,

    /// Path to a config file. Defaults to `~/.config/bookstand/config.toml`.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load_or_default()?,
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(database) = cli.database {
        config.database.path = Some(database);
    }

    let db_path = config.database.resolve_path();
    tracing::info!("opening catalogue store at {}", db_path.display());
    let db = Database::open(&db_path)?;

    let server = HttpServer::with_config(db, config.server);
    server.start().await?;

    Ok(())
}
