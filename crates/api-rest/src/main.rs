//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful during development when working on the HTTP surface. The workspace's main
//! `mediscan-run` binary serves the same router.

use api_rest::{router, shutdown_signal, AppState};
use mediscan_core::CoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the MediScan REST API server
///
/// # Environment Variables
/// - `MEDISCAN_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `GEMINI_API_KEY`: Upstream credential; when unset every analysis uses the local classifier
/// - `GEMINI_MODEL`, `GEMINI_BASE_URL`, `MEDISCAN_UPSTREAM_TIMEOUT_SECS`: upstream settings
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the upstream configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("mediscan_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDISCAN_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::from_values(
        std::env::var("GEMINI_API_KEY").ok(),
        std::env::var("GEMINI_MODEL").ok(),
        std::env::var("GEMINI_BASE_URL").ok(),
        std::env::var("MEDISCAN_UPSTREAM_TIMEOUT_SECS").ok(),
    )?;
    if !cfg.has_api_key() {
        tracing::warn!("GEMINI_API_KEY not set; all analyses will use the local classifier");
    }

    tracing::info!("-- Starting MediScan REST API on {}", addr);

    let app = router(AppState::from_config(&cfg)?);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
