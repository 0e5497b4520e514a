use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use kinship::{config::ConfigBuilder, init};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

mod api;
mod cli;
mod config;
mod error;
mod state;

use crate::api::create_router;
use crate::cli::CliArgs;
use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();

    // Set up logging
    let filter = if let Some(ref level) = cli_args.log_level {
        tracing_subscriber::EnvFilter::new(level)
            .add_directive("surrealdb_core=warn".parse()?)
            .add_directive("surrealdb=warn".parse()?)
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("surrealdb_core=warn".parse()?)
            .add_directive("surrealdb=warn".parse()?)
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Kinship server v{}", kinship::VERSION);

    // Load configuration from CLI arguments and environment variables
    let server_config = ServerConfig::from_cli_and_env(cli_args.clone())?;
    info!("Server configuration loaded");

    // Initialize the registry, loading configuration from file if provided
    let registry_config = if let Some(config_file) = &cli_args.config_file {
        info!(
            "Loading registry configuration from: {}",
            config_file.display()
        );

        let mut loader = kinship::config::ConfigLoader::new();
        match loader.load_file(config_file) {
            Ok(_) => match loader.extract() {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        config_file.display(),
                        e
                    );
                    default_registry_config()?
                }
            },
            Err(e) => {
                warn!(
                    "Failed to load config file {}: {}. Using defaults.",
                    config_file.display(),
                    e
                );
                default_registry_config()?
            }
        }
    } else {
        info!("No config file provided, using default configuration");
        default_registry_config()?
    };

    let registry = init(registry_config).await?;
    info!("Kinship registry initialized");

    // Create application state
    let app_state = Arc::new(AppState::new(registry, server_config.clone()));

    // Create the router with all API endpoints
    let app = create_router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("API documentation available at http://{}/docs", addr);

    if server_config.enable_auth {
        info!("Authentication is enabled");
    } else {
        info!("Authentication is disabled, requests act as the system caller");
    }

    axum::serve(listener, app).await?;

    Ok(())
}

fn default_registry_config() -> Result<kinship::config::KinshipConfig> {
    Ok(ConfigBuilder::new()
        .with_default_storage()
        .with_remote_surrealdb_if_configured()
        .build()?)
}
