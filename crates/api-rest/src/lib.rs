//! # API REST
//!
//! REST API implementation for MediScan.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, status codes, CORS, request tracing)
//!
//! Uses `api-shared` for wire types and `mediscan-core` for the analysis itself.

#![warn(rust_2018_idioms)]

use api_shared::{
    AgeField, AnalysisResult, AnalyzeReq, Condition, HealthRes, HealthService, ResultEnvelope,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use mediscan_core::{
    AnalysisService, CoreConfig, CoreResult, DynAnalysisService, GeminiClient, InferenceClient,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers
///
/// Holds the analysis service, which owns the upstream client. The service keeps no
/// per-request state, so a single instance is shared by every handler.
#[derive(Clone)]
pub struct AppState {
    analysis_service: Arc<DynAnalysisService>,
}

impl AppState {
    pub fn new(analysis_service: DynAnalysisService) -> Self {
        Self {
            analysis_service: Arc::new(analysis_service),
        }
    }

    /// State backed by the Gemini client described by `cfg`.
    pub fn from_config(cfg: &CoreConfig) -> CoreResult<Self> {
        let client: Box<dyn InferenceClient> = Box::new(GeminiClient::new(cfg)?);
        Ok(Self::new(AnalysisService::new(client)))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyze),
    components(schemas(
        HealthRes,
        AnalyzeReq,
        AgeField,
        AnalysisResult,
        Condition,
        ResultEnvelope
    ))
)]
pub struct ApiDoc;

/// Build the REST router with documentation, CORS and tracing layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolves when the process receives Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("-- Shutdown signal received");
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the MediScan service, including whether an upstream
/// credential is configured. No upstream call is made.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(
        state.analysis_service.client().is_configured(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeReq,
    responses(
        (status = 200, description = "Analysis result, from the model or the local fallback", body = ResultEnvelope),
        (status = 400, description = "Missing or invalid fields", body = ResultEnvelope)
    )
)]
/// Analyse a symptom description
///
/// Upstream failures are never surfaced: the local classifier answers instead and the
/// envelope carries a `note`.
///
/// # Errors
/// Returns `400 Bad Request` with a `success: false` envelope if:
/// - the body is not a JSON object,
/// - `age` or `symptoms` is missing or empty, or
/// - `age` is not a whole number between 1 and 120.
#[axum::debug_handler]
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeReq>, JsonRejection>,
) -> (StatusCode, Json<ResultEnvelope>) {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!("Rejected analyze body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ResultEnvelope::rejected(
                    format!("Invalid request body: {}", rejection.body_text()),
                    None,
                )),
            );
        }
    };

    let envelope = state.analysis_service.analyze(&req).await;
    let status = if envelope.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use mediscan_core::{InferenceError, InferenceResult};
    use tower::ServiceExt;

    struct FixedClient(Option<&'static str>);

    #[async_trait]
    impl InferenceClient for FixedClient {
        async fn generate(&self, _prompt: &str) -> InferenceResult<String> {
            self.0
                .map(str::to_string)
                .ok_or(InferenceError::Connection("http://upstream.invalid".into()))
        }

        fn is_configured(&self) -> bool {
            self.0.is_some()
        }
    }

    fn app(client: FixedClient) -> Router {
        let client: Box<dyn InferenceClient> = Box::new(client);
        router(AppState::new(AnalysisService::new(client)))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_configuration() {
        let response = app(FixedClient(None))
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "MediScan AI");
        assert_eq!(body["geminiApi"], "not configured");
    }

    #[tokio::test]
    async fn analyze_missing_field_is_bad_request() {
        let response = app(FixedClient(Some("{}")))
            .oneshot(post_json("/api/analyze", r#"{"age":"","symptoms":"fever"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing required fields");
        assert_eq!(body["required"], serde_json::json!(["symptoms", "age"]));
    }

    #[tokio::test]
    async fn analyze_malformed_body_is_bad_request() {
        let response = app(FixedClient(Some("{}")))
            .oneshot(post_json("/api/analyze", "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn analyze_falls_back_when_upstream_unavailable() {
        let response = app(FixedClient(None))
            .oneshot(post_json(
                "/api/analyze",
                r#"{"age":72,"symptoms":"Fever and cough"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["note"], "Using local analysis (API unavailable)");
        assert_eq!(body["analysis"]["urgency"], "Urgent Care");
        assert_eq!(body["analysis"]["conditions"][0]["name"], "Influenza (Flu)");
        assert_eq!(
            body["analysis"]["immediateAttention"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
    }

    #[tokio::test]
    async fn analyze_returns_upstream_result_and_raw_response() {
        let completion = r#"{"conditions":[{"name":"Allergic rhinitis","confidence":"80%"}],"urgency":"Self-Care","immediateAttention":["Swelling of the face"]}"#;
        let response = app(FixedClient(Some(completion)))
            .oneshot(post_json(
                "/api/analyze",
                r#"{"age":"25","symptoms":"sneezing in spring"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["rawResponse"], completion);
        assert!(body.get("note").is_none());
        assert_eq!(
            body["analysis"]["conditions"][0]["name"],
            "Allergic rhinitis"
        );
    }
}
