//! maildrop server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! JSON-file store, and serves the contact-form and admin API over HTTP.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for `admin_password_hash` in
//! config.toml:
//!
//! ```
//! cargo run -p maildrop-api --bin server -- --hash-password
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use maildrop_api::AppState;
use maildrop_core::{
  admin::AdminPanel,
  credentials::{CredentialCheck, HashedSecret, StaticSecret},
  writer::{SimulatedTransport, Writer},
};
use maildrop_store_json::JsonStore;
use rand_core::OsRng;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  host:                String,
  port:                u16,
  store_path:          PathBuf,
  /// The fixed address every submission is logically addressed to.
  inbox_address:       String,
  /// Plaintext admin secret — a cosmetic gate, readable by anyone with
  /// the config file. Prefer `admin_password_hash`.
  admin_password:      Option<String>,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  admin_password_hash: Option<String>,
  /// Simulated send latency in milliseconds. Defaults to 1500.
  send_latency_ms:     Option<u64>,
}

#[derive(Parser)]
#[command(author, version, about = "maildrop submission-inbox server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
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

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let password = read_password()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string();
    println!("{hash}");
    return Ok(());
  }

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("MAILDROP"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Pick the credential check: hashed when configured, plaintext otherwise.
  let credentials: Box<dyn CredentialCheck> =
    match (&server_cfg.admin_password_hash, &server_cfg.admin_password) {
      (Some(hash), _) => Box::new(HashedSecret::new(hash.clone())),
      (None, Some(plain)) => {
        tracing::warn!(
          "admin_password is plaintext in the configuration; this gate is \
           cosmetic, not a security boundary"
        );
        Box::new(StaticSecret::new(plain.clone()))
      }
      (None, None) => anyhow::bail!(
        "set admin_password or admin_password_hash in the configuration"
      ),
    };

  // Open the JSON-file store; `~` in the path expands to $HOME.
  let store = JsonStore::open(expand_tilde(&server_cfg.store_path));

  let latency =
    Duration::from_millis(server_cfg.send_latency_ms.unwrap_or(1500));
  let writer = Writer::new(
    store.clone(),
    SimulatedTransport::new(latency),
    server_cfg.inbox_address.clone(),
  );
  let panel = AdminPanel::new(store, credentials);

  let state = AppState {
    writer: Arc::new(writer),
    panel:  Arc::new(Mutex::new(panel)),
  };

  let app = maildrop_api::router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
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
