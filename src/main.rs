//! Panel binary entrypoint.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nginx_panel::config::{load_config, PanelConfig};
use nginx_panel::HttpServer;

#[derive(Parser)]
#[command(name = "nginx-panel")]
#[command(about = "Web panel for managing nginx site configurations", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "panel.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nginx_panel=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        tracing::warn!(path = %cli.config.display(), "Config file not found, using defaults");
        PanelConfig::default()
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        available_dir = %config.nginx.available_dir,
        enabled_dir = %config.nginx.enabled_dir,
        data_dir = %config.panel.data_dir,
        "Configuration loaded"
    );

    // The panel's own state lives under the data directory.
    let data_dir = PathBuf::from(&config.panel.data_dir);
    tokio::fs::create_dir_all(data_dir.join("history")).await?;
    tokio::fs::create_dir_all(data_dir.join("backups")).await?;

    if config.panel.bootstrap_password_hash.is_empty()
        && !data_dir.join("users.json").exists()
    {
        tracing::warn!(
            "No users.json and no bootstrap_password_hash configured; nobody will be able to log in"
        );
    }

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            nginx_panel::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
