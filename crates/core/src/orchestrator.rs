//! Analysis orchestration: validate, ask the model, fall back locally.

use crate::constants::{LOCAL_FALLBACK_NOTE, REQUIRED_FIELDS};
use crate::inference::InferenceClient;
use crate::request::AnalysisRequest;
use crate::{classifier, normalizer, prompt, AnalysisError};
use api_shared::{AnalyzeReq, ResultEnvelope};
use uuid::Uuid;

/// Analysis service over a boxed client, as held by the HTTP server state.
pub type DynAnalysisService = AnalysisService<Box<dyn InferenceClient>>;

/// Runs symptom analyses.
///
/// Holds no per-request state, so one instance can serve concurrent requests behind an `Arc`.
pub struct AnalysisService<C> {
    client: C,
}

impl<C: InferenceClient> AnalysisService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Analyse a request as received from a client.
    ///
    /// Never fails: invalid input produces a `success: false` envelope without contacting the
    /// upstream service, and every upstream failure is replaced by the local classifier.
    pub async fn analyze(&self, req: &AnalyzeReq) -> ResultEnvelope {
        match AnalysisRequest::try_from(req) {
            Ok(request) => self.analyze_request(&request).await,
            Err(e) => {
                tracing::info!("rejecting analysis request: {}", e);
                reject(&e)
            }
        }
    }

    /// Analyse an already validated request.
    pub async fn analyze_request(&self, request: &AnalysisRequest) -> ResultEnvelope {
        let request_id = Uuid::new_v4();
        tracing::info!(
            %request_id,
            age = request.age().years(),
            symptom_chars = request.symptoms().char_count(),
            "received analysis request"
        );

        let prompt = prompt::build_analysis_prompt(request);
        match self.client.generate(&prompt).await {
            Ok(completion) => {
                tracing::info!(%request_id, "upstream analysis received");
                let analysis = normalizer::normalize(&completion);
                ResultEnvelope::analysed(analysis, completion)
            }
            Err(e) => {
                tracing::warn!(
                    %request_id,
                    "upstream analysis failed, using local analysis: {}",
                    e
                );
                self.analyze_locally(request)
            }
        }
    }

    /// Analyse with the local classifier only.
    pub fn analyze_locally(&self, request: &AnalysisRequest) -> ResultEnvelope {
        classify_locally(request)
    }
}

/// Analyse a request as received from a client using the local classifier only.
///
/// Validation and the rejection envelope are the same as [`AnalysisService::analyze`]; no
/// upstream client is needed.
pub fn analyze_offline(req: &AnalyzeReq) -> ResultEnvelope {
    match AnalysisRequest::try_from(req) {
        Ok(request) => classify_locally(&request),
        Err(e) => reject(&e),
    }
}

fn classify_locally(request: &AnalysisRequest) -> ResultEnvelope {
    let analysis = classifier::classify(request.symptoms().as_str(), request.age().years());
    ResultEnvelope::fallback(analysis, LOCAL_FALLBACK_NOTE)
}

fn reject(error: &AnalysisError) -> ResultEnvelope {
    let required = match error {
        AnalysisError::MissingFields => {
            Some(REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect())
        }
        _ => None,
    };
    ResultEnvelope::rejected(error.to_string(), required)
}
