//! fifty-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite fun-fact store, and serves the states API over HTTP.
//!
//! # Seeding
//!
//! To replace the stored fun facts with the canonical seed set:
//!
//! ```text
//! cargo run -p fifty-server -- seed
//! ```

mod seed;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use fifty_api::AppState;
use fifty_core::store::FunFactStore;
use fifty_store_sqlite::SqliteStore;
use settings::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "U.S. states reference API with fun facts")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, Default)]
enum Command {
  /// Serve the HTTP API (default).
  #[default]
  Serve,
  /// Replace all stored fun facts with the seed set and exit.
  Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store_path = server_cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command.unwrap_or_default() {
    Command::Seed => {
      let written = store
        .seed(seed::entries()?)
        .await
        .context("failed to seed fun facts")?;
      tracing::info!(written, "Database seeded");
      Ok(())
    }
    Command::Serve => serve(server_cfg, store).await,
  }
}

async fn serve(server_cfg: ServerConfig, store: SqliteStore) -> anyhow::Result<()> {
  let states = server_cfg.load_states()?;
  tracing::info!(states = states.len(), "Loaded reference dataset");

  let app = fifty_api::router(AppState::new(states, store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      tokio::signal::ctrl_c().await.ok();
      tracing::info!("shutting down");
    })
    .await
    .context("server error")?;

  Ok(())
}
