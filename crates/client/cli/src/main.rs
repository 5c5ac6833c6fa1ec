//! Terminal client entry point.
mod app;
mod command;
mod config;
mod render;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use rail_content::ContentFactory;
use rail_runtime::{OracleManager, Runtime, RuntimeError};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use app::CliApp;
use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let mut config = CliConfig::from_env();
    let _guard = setup_logging(config.session_id.as_deref())?;

    let oracles = match &config.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            match factory.load_config() {
                Ok(game_config) => config.runtime.game_config = game_config,
                Err(error) => tracing::debug!(%error, "Keeping default game config"),
            }
            let tables = factory
                .load_tables()
                .with_context(|| format!("loading tables from {}", dir.display()))?;
            tracing::info!(dir = %dir.display(), "Loaded tables");
            OracleManager::from_tables(tables)
        }
        None => OracleManager::standard(),
    };

    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .oracles(oracles)
        .build()
        .await?;
    let handle = runtime.handle();

    if !config.players.is_empty() {
        match handle.query_state().await {
            Err(RuntimeError::NoActiveGame) => handle.new_game(config.players.clone()).await?,
            Ok(_) => tracing::info!("Resumed saved game; ignoring RAIL_PLAYERS"),
            Err(error) => return Err(error.into()),
        }
    }

    CliApp::new(handle).run().await?;
    runtime.shutdown().await?;
    Ok(())
}

/// Logs to stderr (warnings and above unless `RUST_LOG` says otherwise) and
/// to a per-session file.
fn setup_logging(session_id: Option<&str>) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let session_id = session_id.map(str::to_string).unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{timestamp}")
    });

    let session_log_dir = log_directory().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)
        .with_context(|| format!("creating log directory {}", session_log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(tracing_subscriber::filter::LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(guard)
}

/// Platform cache directory for logs, falling back to the temp directory.
fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "rail-baron")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("rail-baron").join("logs"))
}
