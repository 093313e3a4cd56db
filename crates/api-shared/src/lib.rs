//! # API Shared
//!
//! Shared definitions for MediScan APIs.
//!
//! Contains:
//! - Wire types (`dto` module) for analysis requests, results and envelopes
//! - Shared services like `HealthService`
//!
//! Used by `mediscan-core`, `api-rest` and the CLI so that every surface speaks the same JSON.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
