//! Response DTOs.

use serde::{Deserialize, Serialize};

use booking_service::DispatchSnapshot;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Application version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// State of one dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// `"up"` or `"down"`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedHealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Application version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Booking store reachability.
    pub store: ComponentHealth,
    /// Vehicle status dispatch counters.
    pub dispatcher: DispatchSnapshot,
    /// Updates currently held in the dead-letter log.
    pub dead_letters: usize,
}
