//! Runtime configuration: an optional TOML file overlaid by `FIFTY_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use fifty_core::state::StateTable;
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  /// SQLite file holding the fun facts; a leading `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path:   PathBuf,
  /// Replacement for the built-in states dataset.
  #[serde(default)]
  pub dataset_path: Option<PathBuf>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("fifty.db") }

impl ServerConfig {
  /// Read `path` if it exists, then apply `FIFTY_*` overrides.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FIFTY"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  /// The reference table: the configured file, or the built-in dataset.
  pub fn load_states(&self) -> anyhow::Result<StateTable> {
    match &self.dataset_path {
      Some(path) => {
        let path = expand_tilde(path);
        let json = std::fs::read_to_string(&path)
          .with_context(|| format!("failed to read dataset {path:?}"))?;
        StateTable::from_json(&json)
          .with_context(|| format!("invalid dataset {path:?}"))
      }
      None => StateTable::builtin().context("invalid built-in dataset"),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
