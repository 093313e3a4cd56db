//! Urgency levels and their display categories.

/// The fixed urgency levels produced by the local classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyLevel {
    Emergency,
    UrgentCare,
    PrimaryCare,
    SelfCare,
}

impl UrgencyLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Emergency => "Emergency",
            Self::UrgentCare => "Urgent Care",
            Self::PrimaryCare => "Primary Care",
            Self::SelfCare => "Self-Care",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How an urgency label is presented to the user, most severe first.
///
/// Urgency labels from the upstream model are free-form text, so the category is derived by
/// case-insensitive substring checks rather than an exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UrgencyCategory {
    Emergency,
    Urgent,
    Primary,
    SelfCare,
}

impl UrgencyCategory {
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("emergency") {
            Self::Emergency
        } else if lower.contains("urgent") {
            Self::Urgent
        } else if lower.contains("primary") {
            Self::Primary
        } else {
            Self::SelfCare
        }
    }

    /// CSS class used by the browser UI for the urgency badge.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Emergency => "urgency-emergency",
            Self::Urgent => "urgency-urgent",
            Self::Primary => "urgency-primary",
            Self::SelfCare => "urgency-self",
        }
    }
}
