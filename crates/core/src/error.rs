use mediscan_types::AgeError;

/// Errors raised while validating input or building core services.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Age must be a whole number between 1 and 120")]
    InvalidAge(#[source] AgeError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClientInit(reqwest::Error),
}

pub type CoreResult<T> = std::result::Result<T, AnalysisError>;

/// Errors from the upstream inference collaborator.
///
/// None of these reach a caller of the orchestrator; they all trigger the local fallback.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("no API credential configured")]
    MissingCredential,
    #[error("could not connect to {0}")]
    Connection(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("upstream returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },
    #[error("HTTP client error: {0}")]
    HttpClient(String),
    #[error("response parsing error: {0}")]
    ResponseParsing(String),
    #[error("response contained no completion text")]
    EmptyCompletion,
}

pub type InferenceResult<T> = std::result::Result<T, InferenceError>;
