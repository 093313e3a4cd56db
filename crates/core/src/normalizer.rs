//! Turns model completion text into an [`AnalysisResult`].
//!
//! Generative models do not reliably return clean JSON: answers come wrapped in prose or code
//! fences, fields go missing, and individual entries are malformed. Normalization never fails.
//! It either recovers a structured result or degrades to a single condition carrying the raw
//! text.
//!
//! The JSON payload is located with a greedy brace span (first `{` to last `}`). When the text
//! contains several unrelated brace-delimited spans, the outermost span is taken; it usually
//! fails to parse and the degrade path applies.

use crate::classifier::general_advice;
use crate::constants::{
    DEFAULT_URGENCY, UNPARSED_CONDITION_NAME, UNPARSED_IMMEDIATE_ATTENTION, UNPARSED_URGENCY,
};
use api_shared::{AnalysisResult, Condition};
use serde::Deserialize;

/// Top-level payload as the model is asked to produce it. Every field is optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    conditions: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    urgency: Option<String>,
    #[serde(default, alias = "immediate_attention")]
    immediate_attention: Option<Vec<serde_json::Value>>,
}

/// Normalize completion text into the canonical result shape.
pub fn normalize(raw_text: &str) -> AnalysisResult {
    match extract_brace_span(raw_text).and_then(parse_payload) {
        Some(result) => result,
        None => {
            tracing::debug!("model completion had no parseable JSON payload");
            unparsed(raw_text)
        }
    }
}

/// The largest `{ ... }` span of `text`, if any.
pub fn extract_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn parse_payload(span: &str) -> Option<AnalysisResult> {
    let raw: RawAnalysis = match serde_json::from_str(span) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!("model payload is not valid JSON: {}", e);
            return None;
        }
    };

    let mut conditions: Vec<Condition> =
        parse_array_lenient::<Condition>(raw.conditions.as_deref())
            .into_iter()
            .filter(|c| !c.name.trim().is_empty())
            .collect();
    if conditions.is_empty() {
        conditions.push(general_advice());
    }

    let urgency = raw
        .urgency
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_URGENCY.into());

    let immediate_attention = raw
        .immediate_attention
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect();

    Some(AnalysisResult {
        conditions,
        urgency,
        immediate_attention,
    })
}

/// Parse each element independently, skipping the ones that do not fit `T`.
fn parse_array_lenient<T: for<'de> Deserialize<'de>>(
    items: Option<&[serde_json::Value]>,
) -> Vec<T> {
    match items {
        None => vec![],
        Some(arr) => arr
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect(),
    }
}

fn unparsed(raw_text: &str) -> AnalysisResult {
    AnalysisResult {
        conditions: vec![Condition {
            name: UNPARSED_CONDITION_NAME.into(),
            confidence: None,
            description: Some(raw_text.to_string()),
            recommendations: vec![],
        }],
        urgency: UNPARSED_URGENCY.into(),
        immediate_attention: vec![UNPARSED_IMMEDIATE_ATTENTION.into()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_embedded_payload() {
        let text = r#"Here is my assessment:
{"conditions":[],"urgency":"Emergency","immediateAttention":[]}
Please consult a doctor."#;
        let result = normalize(text);
        assert_eq!(result.urgency, "Emergency");
        // Empty conditions are replaced by the advisory default.
        assert_eq!(result.conditions.len(), 1);
        assert_eq!(result.conditions[0].name, "General Medical Advice");
        assert!(result.immediate_attention.is_empty());
    }

    #[test]
    fn parses_fenced_full_payload() {
        let text = r#"```json
{
  "conditions": [
    {
      "name": "Migraine",
      "confidence": "60%",
      "description": "Recurrent headache",
      "recommendations": ["Rest in a dark room", "Stay hydrated"]
    },
    {
      "name": "Tension headache",
      "confidence": 30
    }
  ],
  "urgency": "Primary Care",
  "immediateAttention": ["Sudden severe headache"]
}
```"#;
        let result = normalize(text);
        assert_eq!(result.urgency, "Primary Care");
        assert_eq!(result.conditions.len(), 2);
        assert_eq!(result.conditions[0].recommendations.len(), 2);
        assert_eq!(result.conditions[1].confidence.as_deref(), Some("30"));
        assert!(result.conditions[1].recommendations.is_empty());
        assert_eq!(result.immediate_attention, ["Sudden severe headache"]);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let result = normalize(r#"{"conditions":[{"name":"Cold"}]}"#);
        assert_eq!(result.conditions[0].name, "Cold");
        assert_eq!(result.urgency, "Self-Care");
        assert!(result.immediate_attention.is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let result = normalize(
            r#"{"conditions":[{"confidence":"10%"},"text",{"name":"  "},{"name":"Sinusitis"}],"urgency":"  ","immediateAttention":["Fever over 40C",3]}"#,
        );
        assert_eq!(result.conditions.len(), 1);
        assert_eq!(result.conditions[0].name, "Sinusitis");
        assert_eq!(result.urgency, "Self-Care");
        assert_eq!(result.immediate_attention, ["Fever over 40C"]);
    }

    #[test]
    fn text_without_braces_degrades() {
        let text = "You may have a cold. Rest and drink fluids.";
        let result = normalize(text);
        assert_eq!(result.conditions.len(), 1);
        assert_eq!(result.conditions[0].name, "Analysis Complete");
        assert_eq!(result.conditions[0].description.as_deref(), Some(text));
        assert_eq!(result.urgency, "Consult results");
        assert_eq!(result.immediate_attention, ["If symptoms worsen"]);
    }

    #[test]
    fn invalid_json_degrades_with_full_text() {
        let text = "Result: {conditions: [flu]} end";
        let result = normalize(text);
        assert_eq!(result.conditions[0].name, "Analysis Complete");
        assert_eq!(result.conditions[0].description.as_deref(), Some(text));
    }

    #[test]
    fn unrelated_spans_take_outermost() {
        let text = r#"{"a":1} and then {"urgency":"Emergency"}"#;
        assert_eq!(extract_brace_span(text), Some(text));
        // The outermost span is not a single JSON value, so the result degrades.
        assert_eq!(normalize(text).urgency, "Consult results");
    }

    #[test]
    fn reversed_braces_are_not_a_span() {
        assert_eq!(extract_brace_span("} nothing {"), None);
        assert_eq!(extract_brace_span("no braces"), None);
    }

    #[test]
    fn non_string_urgency_degrades() {
        let result = normalize(r#"{"urgency": 3}"#);
        assert_eq!(result.urgency, "Consult results");
    }
}
