//! Constants used throughout the MediScan core crate.
//!
//! Fixed labels and defaults live here so the classifier, normalizer and orchestrator agree on
//! the exact strings clients see.

/// Default Gemini model name when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Default Gemini REST API root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default upstream HTTP timeout in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Urgency used when nothing else applies.
pub const DEFAULT_URGENCY: &str = "Self-Care";

/// Note attached to envelopes produced by the local classifier.
pub const LOCAL_FALLBACK_NOTE: &str = "Using local analysis (API unavailable)";

/// Error reported when age or symptoms are missing.
pub const MISSING_FIELDS_ERROR: &str = "Missing required fields";

/// Request fields that must be supplied, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 2] = ["symptoms", "age"];

/// Condition name used when a model completion cannot be parsed.
pub const UNPARSED_CONDITION_NAME: &str = "Analysis Complete";

/// Urgency label used when a model completion cannot be parsed.
pub const UNPARSED_URGENCY: &str = "Consult results";

/// Immediate-attention advice used when a model completion cannot be parsed.
pub const UNPARSED_IMMEDIATE_ATTENTION: &str = "If symptoms worsen";

/// Red-flag symptoms that always warrant immediate care.
pub const RED_FLAGS: [&str; 5] = [
    "Difficulty breathing",
    "Chest pain or pressure",
    "Severe bleeding",
    "Sudden confusion",
    "High fever that doesn't respond to medication",
];
