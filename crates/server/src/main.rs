//! Inventory server binary.

use anyhow::{Context, Result};
use clap::Parser;
use inventory_core::config::AppConfig;
use inventory_server::{AppState, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Inventory - a product inventory HTTP API
#[derive(Parser, Debug)]
#[command(name = "inventoryd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "INVENTORY_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Inventory v{}", env!("CARGO_PKG_VERSION"));

    if std::path::Path::new(&args.config).exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config = AppConfig::load(&args.config).context(
        "failed to load configuration (set API_KEY or INVENTORY_AUTH__API_KEY, \
         or provide a config file with [auth] api_key)",
    )?;

    // Initialize inventory store
    let store = inventory_store::from_config(&config.store)
        .await
        .context("failed to initialize inventory store")?;
    store
        .health_check()
        .await
        .context("inventory store health check failed")?;
    tracing::info!(
        backend = %store.backend_info().await.unwrap_or_else(|e| e.to_string()),
        url = %config.store.redacted_url(),
        "Inventory store ready"
    );

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.server.bind))?;

    let state = AppState::new(config, store);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
