//! Local keyword classifier.
//!
//! Used when the upstream model cannot be reached. The classifier is a pure function of its
//! inputs: two ordered rule tables are evaluated against the lowercased symptom text.
//! - every matching [`ConditionRule`] contributes a condition, in table order
//! - the first matching [`UrgencyRule`] decides the urgency
//!
//! Table order is part of the contract; reordering entries changes results.

use crate::constants::RED_FLAGS;
use crate::urgency::UrgencyLevel;
use api_shared::{AnalysisResult, Condition};

/// Keyword predicate over lowercased symptom text.
#[derive(Debug, Clone, Copy)]
enum Keywords {
    All(&'static [&'static str]),
    Any(&'static [&'static str]),
}

impl Keywords {
    fn matches(self, text: &str) -> bool {
        match self {
            Keywords::All(words) => words.iter().all(|w| text.contains(w)),
            Keywords::Any(words) => words.iter().any(|w| text.contains(w)),
        }
    }
}

struct ConditionRule {
    keywords: Keywords,
    name: &'static str,
    confidence: &'static str,
    description: &'static str,
    recommendations: &'static [&'static str],
}

impl ConditionRule {
    fn to_condition(&self) -> Condition {
        Condition {
            name: self.name.into(),
            confidence: Some(self.confidence.into()),
            description: Some(self.description.into()),
            recommendations: self.recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }
}

const CONDITION_RULES: [ConditionRule; 4] = [
    ConditionRule {
        keywords: Keywords::All(&["fever", "cough"]),
        name: "Influenza (Flu)",
        confidence: "75%",
        description: "Viral infection affecting respiratory system",
        recommendations: &[
            "Rest and stay hydrated",
            "Consider antiviral medications",
            "Use fever reducers as needed",
        ],
    },
    ConditionRule {
        keywords: Keywords::Any(&["runny nose", "sneezing"]),
        name: "Common Cold",
        confidence: "70%",
        description: "Viral upper respiratory infection",
        recommendations: &[
            "Get plenty of rest",
            "Stay hydrated",
            "Use over-the-counter cold medications",
        ],
    },
    ConditionRule {
        keywords: Keywords::All(&["sore throat", "fever"]),
        name: "Strep Throat",
        confidence: "65%",
        description: "Bacterial throat infection",
        recommendations: &[
            "See doctor for strep test",
            "Complete antibiotics if prescribed",
            "Gargle warm salt water",
        ],
    },
    ConditionRule {
        keywords: Keywords::Any(&["shortness of breath", "chest pain"]),
        name: "Seek Immediate Care",
        confidence: "90%",
        description: "These symptoms require urgent evaluation",
        recommendations: &["Go to emergency room", "Call emergency services if severe"],
    },
];

const GENERAL_ADVICE: ConditionRule = ConditionRule {
    keywords: Keywords::Any(&[]),
    name: "General Medical Advice",
    confidence: "N/A",
    description: "Based on your symptoms, general advice includes:",
    recommendations: &[
        "Monitor symptoms closely",
        "Stay hydrated",
        "Rest as needed",
        "Consult healthcare provider if symptoms persist",
    ],
};

struct UrgencyRule {
    keywords: Keywords,
    /// Rule only applies when the patient is strictly older than this.
    older_than: Option<u8>,
    level: UrgencyLevel,
}

impl UrgencyRule {
    fn matches(&self, text: &str, age: u8) -> bool {
        self.keywords.matches(text) && self.older_than.map_or(true, |limit| age > limit)
    }
}

const URGENCY_RULES: [UrgencyRule; 3] = [
    UrgencyRule {
        keywords: Keywords::Any(&["emergency", "severe pain", "bleeding"]),
        older_than: None,
        level: UrgencyLevel::Emergency,
    },
    UrgencyRule {
        keywords: Keywords::All(&["fever"]),
        older_than: Some(65),
        level: UrgencyLevel::UrgentCare,
    },
    UrgencyRule {
        keywords: Keywords::Any(&["persistent", "worsening"]),
        older_than: None,
        level: UrgencyLevel::PrimaryCare,
    },
];

/// The advisory condition used when nothing more specific is known.
pub fn general_advice() -> Condition {
    GENERAL_ADVICE.to_condition()
}

/// The fixed list of red-flag symptoms.
pub fn red_flags() -> Vec<String> {
    RED_FLAGS.iter().map(|s| s.to_string()).collect()
}

/// Urgency level for the given symptoms and age.
pub fn urgency_for(symptoms: &str, age: u8) -> UrgencyLevel {
    let text = symptoms.to_lowercase();
    URGENCY_RULES
        .iter()
        .find(|rule| rule.matches(&text, age))
        .map_or(UrgencyLevel::SelfCare, |rule| rule.level)
}

/// Classify a symptom description without any network access.
///
/// Always returns at least one condition and exactly five immediate-attention items.
pub fn classify(symptoms: &str, age: u8) -> AnalysisResult {
    let text = symptoms.to_lowercase();

    let mut conditions: Vec<Condition> = CONDITION_RULES
        .iter()
        .filter(|rule| rule.keywords.matches(&text))
        .map(ConditionRule::to_condition)
        .collect();
    if conditions.is_empty() {
        conditions.push(general_advice());
    }

    AnalysisResult {
        conditions,
        urgency: urgency_for(&text, age).label().into(),
        immediate_attention: red_flags(),
    }
}
