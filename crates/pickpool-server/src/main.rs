//! Server binary for the playoff pick pool.
//!
//! Wires together configuration, logging, the team catalog, the roster,
//! the win-count store, and the HTTP API, then serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `pickpool-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Load the team catalog and the roster
//! 4. Open the win-count store at the configured location
//! 5. Warm the store so a missing snapshot is bootstrapped before the
//!    first request
//! 6. Serve the HTTP API

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;

use pickpool_api::{AppState, ServerConfig};
use pickpool_registry::{Roster, TeamRegistry, default_roster, playoff_registry};
use pickpool_store::WinCountStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig, PoolConfig};
use crate::error::ServerError;

const CONFIG_FILE: &str = "pickpool-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the server itself fails.
#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        host = config.server.host,
        port = config.server.port,
        storage_mode = ?config.storage.mode,
        "pickpool-server starting"
    );

    // 3. Catalog and roster.
    let registry = Arc::new(load_registry(&config)?);
    let roster = Arc::new(load_roster(&config, &registry)?);
    info!(
        teams = registry.len(),
        participants = roster.len(),
        "Catalog and roster loaded"
    );

    // 4. Win-count store.
    let location = config.storage.location();
    let store = Arc::new(WinCountStore::open(
        Arc::clone(&registry),
        &location,
        &config.storage.file_name,
        config.storage.bundled_snapshot.clone(),
    ));

    // 5. Warm up: bootstraps the snapshot if it does not exist yet.
    let warm = Arc::clone(&store);
    match tokio::task::spawn_blocking(move || warm.try_load_all()).await {
        Ok(Ok(counts)) => info!(teams = counts.len(), storage = %store.describe(), "Win counts ready"),
        Ok(Err(e)) => tracing::warn!(error = %e, "Win counts unreadable; serving catalog defaults"),
        Err(e) => tracing::warn!(error = %e, "Warm-up task failed"),
    }

    // 6. Serve.
    let state = Arc::new(AppState::new(registry, roster, store));
    let server = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    pickpool_api::start_server(&server, state).await?;

    info!("pickpool-server exited cleanly");
    Ok(())
}

/// Load configuration from `pickpool-config.yaml`.
///
/// A missing file means defaults; environment overrides apply either way.
fn load_config() -> Result<PoolConfig, ServerError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok(PoolConfig::from_file(config_path)?)
    } else {
        let mut config = PoolConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_logging(logging: &LoggingConfig) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|e| ServerError::Logging {
        message: e.to_string(),
    })
}

fn load_registry(config: &PoolConfig) -> Result<TeamRegistry, ServerError> {
    let registry = match &config.catalog.teams_file {
        Some(path) => {
            info!(path = %path.display(), "Loading team catalog");
            TeamRegistry::from_file(path)?
        }
        None => playoff_registry()?,
    };
    Ok(registry)
}

fn load_roster(config: &PoolConfig, registry: &TeamRegistry) -> Result<Roster, ServerError> {
    let roster = match &config.catalog.participants_file {
        Some(path) => {
            info!(path = %path.display(), "Loading roster");
            Roster::from_file(path, registry)?
        }
        None => default_roster(registry)?,
    };
    Ok(roster)
}
