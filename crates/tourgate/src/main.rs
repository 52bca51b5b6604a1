//! Tourgate - account registration and sign-in for the tour catalog site

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

mod config;
mod logging;

use config::Config;
use logging::init_logging;
use tourgate_api::{AppState, create_router};
use tourgate_auth::JwtManager;
use tourgate_db::Database;

/// Tourgate - account registration and sign-in server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "TOURGATE_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "TOURGATE_PORT")]
    port: Option<u16>,

    /// Token signing secret
    #[arg(long, env = "TOURGATE_JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;
    if let Some(secret) = args.jwt_secret {
        config.auth.jwt_secret = secret;
    }

    // Initialize logging
    init_logging(&config.logging)?;

    info!("Starting Tourgate v{}", env!("CARGO_PKG_VERSION"));

    if config.uses_default_secret() {
        warn!("Using the placeholder JWT secret; set TOURGATE_JWT_SECRET before deploying");
    }

    // Create data directory
    if let Some(parent) = Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
    }

    // Initialize database
    let db = Database::new(&config.database.url())
        .await
        .with_context(|| format!("Failed to open database: {}", config.database.path))?;

    // Pay for the unknown-user dummy hash now, not on the first login
    tourgate_auth::prepare_dummy_hash().context("Failed to prepare dummy password hash")?;

    // Initialize JWT manager
    let jwt = Arc::new(JwtManager::new(
        &config.auth.jwt_secret,
        config.auth.token_expiry_hours,
    ));

    // Create application state
    let state = AppState::new(Arc::new(db), jwt, config.api_settings());

    // Create router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port)
        .parse()
        .with_context(|| format!("Invalid bind address: {}:{}", bind_addr, port))?;

    info!("Listening on {}", addr);
    info!("Serving pages from {}", config.ui.path);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for CTRL+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
