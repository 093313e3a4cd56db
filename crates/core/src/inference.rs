//! Upstream text-generation collaborator.
//!
//! The orchestrator only needs "prompt in, completion text out", expressed by
//! [`InferenceClient`]. [`GeminiClient`] implements it against the Google Gemini
//! `generateContent` REST API. Tests substitute their own implementations.

use crate::config::CoreConfig;
use crate::{AnalysisError, CoreResult, InferenceError, InferenceResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A service that turns a prompt into completion text.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Generate a completion for `prompt`. A single attempt; no retries.
    async fn generate(&self, prompt: &str) -> InferenceResult<String>;

    /// Whether the client has what it needs to attempt a call.
    fn is_configured(&self) -> bool {
        true
    }
}

#[async_trait]
impl InferenceClient for Box<dyn InferenceClient> {
    async fn generate(&self, prompt: &str) -> InferenceResult<String> {
        (**self).generate(prompt).await
    }

    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }
}

/// Gemini REST client.
///
/// The API key is sent in the `x-goog-api-key` header so it never appears in URLs or logs.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    fn into_completion(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

impl GeminiClient {
    /// Create a client from the startup configuration.
    pub fn new(cfg: &CoreConfig) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.upstream_timeout())
            .build()
            .map_err(AnalysisError::HttpClientInit)?;

        Ok(Self {
            client,
            api_key: cfg.gemini_api_key().map(str::to_string),
            endpoint: format!(
                "{}/models/{}:generateContent",
                cfg.gemini_base_url(),
                cfg.gemini_model()
            ),
            timeout_secs: cfg.upstream_timeout().as_secs(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, e: reqwest::Error) -> InferenceError {
        if e.is_connect() {
            InferenceError::Connection(self.endpoint.clone())
        } else if e.is_timeout() {
            InferenceError::Timeout(self.timeout_secs)
        } else {
            InferenceError::HttpClient(e.to_string())
        }
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> InferenceResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(InferenceError::MissingCredential)?;

        let body = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::ResponseParsing(e.to_string()))?;

        parsed
            .into_completion()
            .filter(|text| !text.trim().is_empty())
            .ok_or(InferenceError::EmptyCompletion)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
