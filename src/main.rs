use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use lookout_core::UiEvent;
use lookout_engine::{start_stats_ticker, Dashboard};
use lookout_gateway::HttpGateway;
use lookout_settings::LookoutSettings;
use lookout_telemetry::TelemetryConfig;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Lookout dashboard client.
#[derive(Parser, Debug)]
#[command(name = "lookout", about = "Account monitoring dashboard client")]
struct Cli {
    /// Path to the settings file (defaults to ~/.lookout/settings.json).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Backend base URL (overrides settings).
    #[arg(long)]
    base_url: Option<String>,
}

/// Resolve the log DB path from settings. Relative paths land under
/// ~/.lookout so a bare "logs.db" does not depend on the working directory.
fn resolve_log_db_path(raw: &str) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        dirs_home().join(".lookout").join(path)
    }
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load settings early (telemetry config comes from them). A broken
    // settings file falls back to defaults rather than refusing to start.
    let settings = match &args.settings {
        Some(path) => lookout_settings::load_settings_from_path(path),
        None => lookout_settings::load_settings(),
    }
    .unwrap_or_else(|e| {
        eprintln!("lookout: failed to load settings, using defaults: {e}");
        LookoutSettings::default()
    });

    let _telemetry = lookout_telemetry::init_telemetry(TelemetryConfig {
        log_to_sqlite: settings.telemetry.log_to_sqlite,
        log_db_path: resolve_log_db_path(&settings.telemetry.log_db_path),
        ..TelemetryConfig::default()
    });

    let base_url = args
        .base_url
        .unwrap_or_else(|| settings.backend.base_url.clone());
    tracing::info!(base_url = %base_url, "Starting lookout dashboard client");

    let gateway = HttpGateway::with_connect_timeout(
        &base_url,
        Duration::from_secs(settings.backend.connect_timeout_secs),
    );
    let dashboard = Arc::new(
        Dashboard::new(Arc::new(gateway))
            .with_settle_delay(Duration::from_millis(settings.sync.settle_delay_ms)),
    );

    // Surface engine events on the console until a UI frontend subscribes.
    let _event_log = spawn_event_logger(dashboard.subscribe());

    // Initial hydration, same order the dashboard page loads in:
    // accounts first (the content walk needs the roster), then contents,
    // then the statistics tiles.
    if let Err(e) = dashboard.refresh_accounts().await {
        tracing::warn!(error = %e, "Initial account refresh failed");
    }
    let loaded = dashboard.load_contents().await;
    dashboard.refresh_statistics().await;
    tracing::info!(
        accounts = dashboard.roster().len(),
        contents = loaded,
        "Initial load complete"
    );

    // Keep statistics fresh in the background.
    let cancel = CancellationToken::new();
    let ticker = start_stats_ticker(
        dashboard.clone(),
        Duration::from_secs(settings.sync.stats_interval_secs),
        cancel.clone(),
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down");
    cancel.cancel();
    let _ = ticker.await;

    Ok(())
}

/// Read the engine's event stream and echo it to the log.
fn spawn_event_logger(mut rx: broadcast::Receiver<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(UiEvent::Notice { level, message }) => {
                    tracing::info!(level = ?level, %message, "notice");
                }
                Ok(event) => {
                    tracing::debug!(event = event.event_type(), "ui event");
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged, dropped events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_no_overrides() {
        let cli = Cli::parse_from(["lookout"]);
        assert_eq!(cli.settings, None);
        assert_eq!(cli.base_url, None);
    }

    #[test]
    fn cli_custom_base_url() {
        let cli = Cli::parse_from(["lookout", "--base-url", "http://10.0.0.5:5000"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.5:5000"));
    }

    #[test]
    fn cli_settings_path() {
        let cli = Cli::parse_from(["lookout", "--settings", "/tmp/settings.json"]);
        assert_eq!(cli.settings, Some(PathBuf::from("/tmp/settings.json")));
    }

    #[test]
    fn log_db_path_absolute_is_kept() {
        let resolved = resolve_log_db_path("/var/log/lookout.db");
        assert_eq!(resolved, PathBuf::from("/var/log/lookout.db"));
    }

    #[test]
    fn log_db_path_relative_lands_under_lookout_dir() {
        let resolved = resolve_log_db_path("logs.db");
        assert!(resolved.ends_with(".lookout/logs.db"));
    }
}
