use api_rest::{router, shutdown_signal, AppState};
use mediscan_core::CoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the MediScan application
///
/// Resolves configuration once, then serves the REST API:
/// - `POST /api/analyze` symptom analysis with local fallback
/// - `GET /api/health` health check
/// - `/swagger-ui` OpenAPI documentation
///
/// # Environment Variables
/// - `MEDISCAN_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `GEMINI_API_KEY`: Gemini API key (no default; unset means local analysis only)
/// - `GEMINI_MODEL`: Gemini model (default: "gemini-pro")
/// - `GEMINI_BASE_URL`: Gemini API root (default: the public v1beta endpoint)
/// - `MEDISCAN_UPSTREAM_TIMEOUT_SECS`: upstream HTTP timeout (default: 30)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediscan_run=info".parse()?)
                .add_directive("mediscan_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("MEDISCAN_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::from_values(
        std::env::var("GEMINI_API_KEY").ok(),
        std::env::var("GEMINI_MODEL").ok(),
        std::env::var("GEMINI_BASE_URL").ok(),
        std::env::var("MEDISCAN_UPSTREAM_TIMEOUT_SECS").ok(),
    )?;
    tracing::debug!("Resolved configuration: {:?}", cfg);

    tracing::info!("++ Starting MediScan on {}", rest_addr);
    tracing::info!(
        "++ Gemini API: {}",
        if cfg.has_api_key() {
            "configured"
        } else {
            "not configured (local analysis only)"
        }
    );

    let app = router(AppState::from_config(&cfg)?);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
