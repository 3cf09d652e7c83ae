//! `wall-server`: serves the wall API over HTTP from a SQLite store.
//!
//! Settings come from a TOML file (`--config`, default `config.toml`) with
//! `WALL_*` environment variables layered on top. Run with `--hash-password`
//! to produce the argon2 PHC string for a `[[users]]` entry:
//!
//! ```text
//! wall-server --hash-password
//! ```

use std::{io::BufRead as _, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher as _, password_hash::SaltString};
use clap::Parser;
use rand_core::OsRng;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wall_server::{ServerConfig, auth::AuthConfig};
use wall_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Activity wall server")]
struct Cli {
  /// TOML settings file; a missing file falls back to defaults and env vars.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Hash a password read from stdin, print it, and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let cli = Cli::parse();
  if cli.hash_password {
    println!("{}", hash_stdin_password()?);
    return Ok(());
  }

  let cfg = load_config(cli.config)?;
  serve(cfg).await
}

/// Layer the settings file under `WALL_*` environment overrides.
fn load_config(file: PathBuf) -> anyhow::Result<ServerConfig> {
  config::Config::builder()
    .add_source(config::File::from(file.clone()).required(false))
    .add_source(config::Environment::with_prefix("WALL"))
    .build()
    .and_then(|settings| settings.try_deserialize())
    .with_context(|| format!("invalid server settings in {}", file.display()))
}

/// Open the store, wire up auth and run the HTTP server until it stops.
async fn serve(cfg: ServerConfig) -> anyhow::Result<()> {
  let home = std::env::var_os("HOME").map(PathBuf::from);
  let db = cfg.resolved_store_path(home.as_deref());

  let store = SqliteStore::open(&db)
    .await
    .with_context(|| format!("cannot open wall store {}", db.display()))?
    .with_item_limit(cfg.store_item_limit);

  if cfg.users.is_empty() {
    tracing::warn!("no [[users]] configured; all requests are anonymous");
  }

  let address = cfg.listen_address();
  let listener = tokio::net::TcpListener::bind(&address)
    .await
    .with_context(|| format!("cannot listen on {address}"))?;
  tracing::info!(
    %address,
    users = cfg.users.len(),
    item_limit = cfg.store_item_limit,
    "wall server ready"
  );

  let auth = AuthConfig { users: cfg.users };
  let app = wall_server::router(Arc::new(store), Arc::new(auth));
  axum::serve(listener, app).await.context("http server stopped")
}

/// Prompt on stderr, read one line from stdin and return its argon2 hash.
fn hash_stdin_password() -> anyhow::Result<String> {
  eprint!("Password: ");
  let mut line = String::new();
  std::io::stdin()
    .lock()
    .read_line(&mut line)
    .context("reading password from stdin")?;
  let password = line.trim_end_matches(['\n', '\r']);

  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|e| anyhow::anyhow!("hashing password: {e}"))?;
  Ok(hash.to_string())
}
