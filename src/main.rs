//! jukeboxd - the jukebox server binary.

use jukebox_fm::catalog::YouTubeDataClient;
use jukebox_fm::config::{Config, validate};
use jukebox_fm::db::Database;
use jukebox_fm::events::Gateway;
use jukebox_fm::{app, http, metrics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(server = %config.server.name, "Starting jukeboxd");

    let db = Database::new(&config.database.path).await?;
    info!(path = %config.database.path, "Database ready");

    let catalog = Arc::new(YouTubeDataClient::new(&config.youtube)?);
    let app = Arc::new(app::assemble(db, catalog, &config)?);

    // Prometheus metrics are optional.
    // Convention: metrics_port = 0 disables the HTTP endpoint (used by tests).
    let metrics_port = config.server.metrics_port.unwrap_or(9090);
    if metrics_port == 0 {
        info!("Metrics disabled");
    } else {
        metrics::init();
        tokio::spawn(async move {
            http::run_metrics_server(metrics_port).await;
        });
        info!(port = metrics_port, "Prometheus HTTP server started");
    }

    let gateway = Gateway::bind(&config.event_stream, Arc::clone(&app.hub)).await?;
    let api = http::run_api_server(config.http.address, Arc::clone(&app));

    tokio::select! {
        result = gateway.run() => result?,
        result = api => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }

    Ok(())
}
