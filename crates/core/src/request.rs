//! Validated analysis requests.

use crate::{AnalysisError, CoreResult};
use api_shared::AnalyzeReq;
use mediscan_types::{AgeError, NonEmptyText, PatientAge};

/// A symptom analysis request that has passed validation.
///
/// Constructed per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    age: PatientAge,
    symptoms: NonEmptyText,
}

impl AnalysisRequest {
    pub fn new(age: PatientAge, symptoms: NonEmptyText) -> Self {
        Self { age, symptoms }
    }

    /// Validate raw field values.
    ///
    /// A missing or blank field yields [`AnalysisError::MissingFields`]; an age that is present
    /// but not a whole number in range yields [`AnalysisError::InvalidAge`].
    pub fn from_fields(age: Option<&str>, symptoms: Option<&str>) -> CoreResult<Self> {
        let symptoms = symptoms
            .and_then(|s| NonEmptyText::new(s).ok())
            .ok_or(AnalysisError::MissingFields)?;
        let age = match PatientAge::parse(age.unwrap_or_default()) {
            Ok(age) => age,
            Err(AgeError::Empty) => return Err(AnalysisError::MissingFields),
            Err(e) => return Err(AnalysisError::InvalidAge(e)),
        };
        Ok(Self { age, symptoms })
    }

    pub fn age(&self) -> PatientAge {
        self.age
    }

    pub fn symptoms(&self) -> &NonEmptyText {
        &self.symptoms
    }
}

impl TryFrom<&AnalyzeReq> for AnalysisRequest {
    type Error = AnalysisError;

    fn try_from(req: &AnalyzeReq) -> CoreResult<Self> {
        let age = req.age.as_ref().map(|a| a.as_text());
        Self::from_fields(age.as_deref(), req.symptoms.as_deref())
    }
}
