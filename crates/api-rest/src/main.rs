//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server (with
//! OpenAPI/Swagger UI). The workspace's main `cleanlabel-run` binary also loads `.env`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use cleanlabel_core::CoreConfig;

/// Main entry point for the CleanLabel REST API server
///
/// # Environment Variables
/// - `CLEANLABEL_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CLEANLABEL_DATA_DIR`: Directory for health profile storage (default: "profile_data")
/// - `CLEANLABEL_TAXONOMY`: Optional YAML taxonomy file replacing the bundled tables
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the taxonomy or profile directory cannot be loaded, or
/// - the server address cannot be bound or the server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CLEANLABEL_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::from_env_values(
        std::env::var("CLEANLABEL_DATA_DIR").ok(),
        std::env::var("CLEANLABEL_TAXONOMY").ok(),
    )?;
    let state = AppState::from_config(&cfg)?;

    tracing::info!("-- Starting CleanLabel REST API on {}", addr);
    api_rest::serve(&addr, state).await
}
