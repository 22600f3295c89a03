//! OSS Blinks Server
//!
//! A Solana Actions endpoint that lets anyone donate an SPL token to an
//! open-source repository from a Blink.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::ConfigLoader;
use ossb_sdk::links::{DEFAULT_INTERSTITIAL, donate_url, share_url};
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use state::{AppState, Clients};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// OSS Blinks - donate to open-source repositories from a Solana Blink
#[derive(Parser, Debug)]
#[command(name = "ossb-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "OSSB_CONFIG", default_value = "./ossb-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting ossb-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = Arc::new(ConfigLoader::new(&args.config, args.listen));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = loaded_config.server.listen;
    let action_path = loaded_config.action.action_path.clone();
    tracing::info!(
        cluster = ?loaded_config.action.chain.cluster,
        mint = %loaded_config.action.token.mint,
        "Configuration loaded from {:?}",
        args.config
    );

    if loaded_config.action.public_url.is_some() {
        let action = &loaded_config.action;
        let action_url = donate_url(
            &action.action_endpoint(),
            &action.defaults.destination,
            &action.defaults.repository.url,
        );
        tracing::info!(
            share_url = %share_url(DEFAULT_INTERSTITIAL, &action_url, action.chain.cluster),
            "Share link for the default donation"
        );
    }

    // Create outbound clients
    let clients = Clients::from_config(&loaded_config.action).map_err(|e| {
        tracing::error!("Failed to create HTTP clients: {}", e);
        e
    })?;

    // Create application state
    let state = AppState::new(loaded_config.action, clients);

    // Spawn config reload handler (listens for SIGHUP)
    let shutdown_notify = spawn_config_reload_handler(state.clone(), config_loader);

    // Build the router
    let router = build_router(state, &action_path);

    // Run the server
    tracing::info!("Serving donate action at {} on {}", action_path, listen_addr);
    let result = run_server(router, listen_addr).await;

    // Signal the config reload handler to stop
    shutdown_notify.notify_one();
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
