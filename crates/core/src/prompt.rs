//! Upstream prompt construction.

use crate::request::AnalysisRequest;

/// JSON shape the model is asked to answer with. Matches `api_shared::AnalysisResult`.
const RESPONSE_SHAPE: &str = r#"{
    "conditions": [
        {
            "name": "Condition name",
            "confidence": "percentage",
            "description": "Brief description",
            "recommendations": ["rec1", "rec2", "rec3"]
        }
    ],
    "urgency": "urgency level",
    "immediateAttention": ["when to seek help"]
}"#;

/// Build the analysis prompt for a validated request.
pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    format!(
        "Act as a medical symptom checker. Analyze these symptoms and provide:\n\
         \n\
         Patient Age: {age}\n\
         Symptoms: {symptoms}\n\
         \n\
         Please provide:\n\
         1. TOP 3 possible conditions (with confidence percentages)\n\
         2. Recommended urgency level (Emergency, Urgent Care, Primary Care, Self-Care)\n\
         3. Specific recommendations for each condition\n\
         4. When to seek immediate medical attention\n\
         \n\
         Format as JSON with this structure:\n\
         {shape}\n",
        age = request.age(),
        symptoms = request.symptoms(),
        shape = RESPONSE_SHAPE,
    )
}
