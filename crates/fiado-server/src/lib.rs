//! Server assembly for Fiado.
//!
//! Wires the JSON API from `fiado-api` onto a concrete [`LedgerStore`] and
//! exposes the configuration the binary reads from `config.toml` and the
//! `FIADO_` environment.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use fiado_core::store::LedgerStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`. Every
/// field has a default so the server runs without a config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite database file.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Directory that receives deletion snapshots.
  #[serde(default = "default_backup_dir")]
  pub backup_dir: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }
fn default_store_path() -> PathBuf { PathBuf::from("fiado.db") }
fn default_backup_dir() -> PathBuf { PathBuf::from("backups") }

// ─── Application ──────────────────────────────────────────────────────────────

/// Build the full application router: the JSON API under `/api`, with
/// request tracing.
pub fn app<S>(store: Arc<S>) -> Router<()>
where
  S: LedgerStore + Clone + Send + Sync + 'static,
  S::Error: Into<fiado_core::Error>,
{
  Router::new()
    .nest("/api", fiado_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
