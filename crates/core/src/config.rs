//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Nothing in this crate reads process-wide environment variables;
//! the binaries collect raw values from the environment and hand them to [`CoreConfig::new`].

use crate::constants::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_UPSTREAM_TIMEOUT_SECS,
};
use crate::{AnalysisError, CoreResult};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone)]
pub struct CoreConfig {
    gemini_api_key: Option<String>,
    gemini_model: String,
    gemini_base_url: String,
    upstream_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// A blank API key is treated as absent. The base URL is stored without a trailing slash.
    pub fn new(
        gemini_api_key: Option<String>,
        gemini_model: String,
        gemini_base_url: String,
        upstream_timeout: Duration,
    ) -> CoreResult<Self> {
        let gemini_model = gemini_model.trim().to_string();
        if gemini_model.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "gemini_model cannot be empty".into(),
            ));
        }

        let gemini_base_url = gemini_base_url.trim().trim_end_matches('/').to_string();
        if gemini_base_url.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "gemini_base_url cannot be empty".into(),
            ));
        }

        if upstream_timeout.is_zero() {
            return Err(AnalysisError::InvalidConfig(
                "upstream timeout must be greater than zero".into(),
            ));
        }

        let gemini_api_key = gemini_api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            upstream_timeout,
        })
    }

    /// Build a configuration from raw (possibly unset) values, applying defaults.
    ///
    /// Binaries pass `std::env::var(..).ok()` for each argument.
    pub fn from_values(
        gemini_api_key: Option<String>,
        gemini_model: Option<String>,
        gemini_base_url: Option<String>,
        upstream_timeout_secs: Option<String>,
    ) -> CoreResult<Self> {
        Self::new(
            gemini_api_key,
            non_blank(gemini_model).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            non_blank(gemini_base_url).unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
            upstream_timeout_from_env_value(upstream_timeout_secs)?,
        )
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref()
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    pub fn gemini_model(&self) -> &str {
        &self.gemini_model
    }

    pub fn gemini_base_url(&self) -> &str {
        &self.gemini_base_url
    }

    pub fn upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }
}

// The API key must never end up in logs.
impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.into(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

/// Parse the upstream timeout (whole seconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default timeout.
pub fn upstream_timeout_from_env_value(value: Option<String>) -> CoreResult<Duration> {
    match non_blank(value) {
        None => Ok(Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS)),
        Some(v) => v.parse::<u64>().map(Duration::from_secs).map_err(|_| {
            AnalysisError::InvalidConfig(format!(
                "upstream timeout must be a whole number of seconds, got {v:?}"
            ))
        }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_applies_defaults() {
        let cfg = CoreConfig::from_values(None, None, Some("  ".into()), None).expect("config");
        assert!(!cfg.has_api_key());
        assert_eq!(cfg.gemini_model(), DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.gemini_base_url(), DEFAULT_GEMINI_BASE_URL);
        assert_eq!(
            cfg.upstream_timeout(),
            Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS)
        );
    }

    #[test]
    fn blank_api_key_is_treated_as_absent() {
        let cfg = CoreConfig::from_values(Some("   ".into()), None, None, None).expect("config");
        assert!(cfg.gemini_api_key().is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let cfg = CoreConfig::new(
            Some("key".into()),
            "gemini-pro".into(),
            "http://localhost:8080/v1beta/".into(),
            Duration::from_secs(5),
        )
        .expect("config");
        assert_eq!(cfg.gemini_base_url(), "http://localhost:8080/v1beta");
    }

    #[test]
    fn rejects_empty_model_and_zero_timeout() {
        let err = CoreConfig::new(None, " ".into(), "http://x".into(), Duration::from_secs(1))
            .expect_err("empty model");
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));

        let err = CoreConfig::new(None, "m".into(), "http://x".into(), Duration::ZERO)
            .expect_err("zero timeout");
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn timeout_parse_rejects_garbage() {
        assert_eq!(
            upstream_timeout_from_env_value(Some("12".into())).expect("parse"),
            Duration::from_secs(12)
        );
        assert!(upstream_timeout_from_env_value(Some("soon".into())).is_err());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = CoreConfig::from_values(Some("secret-key".into()), None, None, None)
            .expect("config");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
