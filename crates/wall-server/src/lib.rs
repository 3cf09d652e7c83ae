//! HTTP server assembly for the wall.
//!
//! Mounts the [`wall_api`] router under `/api`, in front of which sits Basic
//! auth session resolution and request tracing.

pub mod auth;
pub mod error;

pub use error::Error;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, middleware};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use uuid::Uuid;
use wall_api::Backend;
use wall_store_sqlite::DEFAULT_ITEM_LIMIT;

use auth::{AuthConfig, resolve_session};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  /// Persisted items returned per wall before statuses are merged in.
  #[serde(default = "default_item_limit")]
  pub store_item_limit: usize,
  #[serde(default)]
  pub users:            Vec<UserEntry>,
}

fn default_item_limit() -> usize { DEFAULT_ITEM_LIMIT }

impl ServerConfig {
  /// `store_path` with a leading `~/` replaced by `home`. Without a home
  /// directory the path is used as written.
  pub fn resolved_store_path(&self, home: Option<&Path>) -> PathBuf {
    match (self.store_path.strip_prefix("~"), home) {
      (Ok(rest), Some(home)) => home.join(rest),
      _ => self.store_path.clone(),
    }
  }

  /// The `host:port` pair to listen on.
  pub fn listen_address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// One login account and the person it acts as.
#[derive(Deserialize, Clone)]
pub struct UserEntry {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub person_id:     Uuid,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<B: Backend>(store: Arc<B>, auth: Arc<AuthConfig>) -> Router {
  Router::new()
    .nest("/api", wall_api::api_router(store))
    .layer(middleware::from_fn_with_state(auth, resolve_session))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
