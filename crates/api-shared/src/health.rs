use crate::dto::HealthRes;

/// Simple health service used by the REST API and the CLI.
///
/// This service provides a standardised way to check the health status of MediScan. It reports
/// whether an upstream credential is configured but never performs a network call, so it stays
/// cheap enough for load balancer probes.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    pub const SERVICE_NAME: &'static str = "MediScan AI";

    /// Builds the health document
    ///
    /// # Arguments
    /// * `gemini_configured` - whether an upstream API credential was supplied at startup
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health(gemini_configured: bool) -> HealthRes {
        HealthRes {
            status: "healthy".into(),
            service: Self::SERVICE_NAME.into(),
            version: env!("CARGO_PKG_VERSION").into(),
            features: vec!["symptom-analysis".into(), "local-fallback".into()],
            timestamp: chrono::Utc::now().to_rfc3339(),
            gemini_api: if gemini_configured {
                "configured".into()
            } else {
                "not configured".into()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_credential_state() {
        assert_eq!(HealthService::check_health(true).gemini_api, "configured");
        assert_eq!(HealthService::check_health(false).gemini_api, "not configured");
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let res = HealthService::check_health(false);
        assert_eq!(res.status, "healthy");
        chrono::DateTime::parse_from_rfc3339(&res.timestamp).expect("rfc3339 timestamp");
    }
}
