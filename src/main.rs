use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use cleanlabel_core::CoreConfig;

/// Main entry point for the CleanLabel application
///
/// Loads `.env`, resolves configuration once, then serves the REST API (with Swagger UI at
/// `/swagger-ui`).
///
/// # Environment Variables
/// - `CLEANLABEL_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CLEANLABEL_DATA_DIR`: Directory for health profile storage (default: "profile_data")
/// - `CLEANLABEL_TAXONOMY`: Optional YAML taxonomy file replacing the bundled tables
/// - `RUST_LOG`: Log filter
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cleanlabel=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("CLEANLABEL_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::from_env_values(
        std::env::var("CLEANLABEL_DATA_DIR").ok(),
        std::env::var("CLEANLABEL_TAXONOMY").ok(),
    )?;
    tracing::info!(
        data_dir = %cfg.profile_data_dir().display(),
        taxonomy = ?cfg.taxonomy_path(),
        "configuration resolved"
    );

    let state = AppState::from_config(&cfg)?;

    tracing::info!("++ Starting CleanLabel REST on {}", rest_addr);
    api_rest::serve(&rest_addr, state).await
}
