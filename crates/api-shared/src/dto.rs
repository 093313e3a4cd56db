//! JSON wire types.
//!
//! Keys are camelCase on the wire (`immediateAttention`, `rawResponse`) because that is what the
//! browser UI and the upstream prompt both use. Absent optional fields are omitted rather than
//! serialized as `null`.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/analyze`.
///
/// Both fields are optional at the wire level so that a missing field can be reported as a
/// failure envelope instead of a deserialization rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeReq {
    #[serde(default)]
    pub age: Option<AgeField>,
    #[serde(default)]
    pub symptoms: Option<String>,
}

impl AnalyzeReq {
    pub fn new(age: impl Into<String>, symptoms: impl Into<String>) -> Self {
        Self {
            age: Some(AgeField::Text(age.into())),
            symptoms: Some(symptoms.into()),
        }
    }
}

/// Age as submitted by a client.
///
/// HTML forms post the age as a string while scripted clients tend to send a number; both are
/// accepted and validated later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AgeField {
    Whole(i64),
    Fractional(f64),
    Text(String),
}

impl AgeField {
    /// The age rendered as text, ready for parsing.
    pub fn as_text(&self) -> String {
        match self {
            AgeField::Whole(n) => n.to_string(),
            AgeField::Fractional(f) => f.to_string(),
            AgeField::Text(s) => s.clone(),
        }
    }
}

/// A single candidate diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Condition {
    pub name: String,
    /// Opaque display string such as `"75%"` or `"N/A"`.
    #[serde(
        default,
        deserialize_with = "display_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Structured analysis of a symptom description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub conditions: Vec<Condition>,
    /// One of `Emergency`, `Urgent Care`, `Primary Care`, `Self-Care`, or a free-form label.
    pub urgency: String,
    pub immediate_attention: Vec<String>,
}

/// Uniform response of the analyze operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Names of the request fields that must be supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Set when the analysis came from the local fallback classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Completion text returned by the upstream model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ResultEnvelope {
    /// Successful envelope built from an upstream completion.
    pub fn analysed(analysis: AnalysisResult, raw_response: String) -> Self {
        Self {
            success: true,
            analysis: Some(analysis),
            error: None,
            required: None,
            note: None,
            raw_response: Some(raw_response),
        }
    }

    /// Successful envelope built by the local fallback classifier.
    pub fn fallback(analysis: AnalysisResult, note: impl Into<String>) -> Self {
        Self {
            success: true,
            analysis: Some(analysis),
            error: None,
            required: None,
            note: Some(note.into()),
            raw_response: None,
        }
    }

    /// Failure envelope for a request that could not be analysed.
    pub fn rejected(error: impl Into<String>, required: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            analysis: None,
            error: Some(error.into()),
            required,
            note: None,
            raw_response: None,
        }
    }
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthRes {
    pub status: String,
    pub service: String,
    pub version: String,
    pub features: Vec<String>,
    /// RFC 3339 timestamp of the check.
    pub timestamp: String,
    /// `"configured"` when an upstream credential is present, `"not configured"` otherwise.
    pub gemini_api: String,
}

/// Accepts a JSON string or number and keeps it as display text.
///
/// Models frequently answer `"confidence": 75` instead of `"75%"`.
fn display_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
