//! # MediScan Core
//!
//! Core analysis logic for the MediScan symptom checker.
//!
//! This crate contains the pure analysis pipeline and its upstream collaborator:
//! - [`classifier`]: deterministic keyword classifier used as the offline fallback
//! - [`normalizer`]: turns free-form model output into the canonical result shape
//! - [`orchestrator`]: validates requests, calls the model, falls back on failure
//! - [`inference`]: the Gemini REST client behind the [`InferenceClient`] trait
//!
//! **No API concerns**: HTTP routing and serving belong in `api-rest`; wire types live in
//! `api-shared` and are re-exported here.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod normalizer;
pub mod orchestrator;
pub mod prompt;
pub mod request;
pub mod urgency;

// Use the shared api-shared crate for wire types.
pub use api_shared::{AnalysisResult, AnalyzeReq, Condition, ResultEnvelope};

pub use config::CoreConfig;
pub use error::{AnalysisError, CoreResult, InferenceError, InferenceResult};
pub use inference::{GeminiClient, InferenceClient};
pub use orchestrator::{analyze_offline, AnalysisService, DynAnalysisService};
pub use request::AnalysisRequest;
pub use urgency::{UrgencyCategory, UrgencyLevel};
