//! Adjacent service endpoints.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base URLs and call budget for the user and vehicle services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the user service.
    #[serde(default = "default_user_service_url")]
    pub user_service_url: String,
    /// Base URL of the vehicle service.
    #[serde(default = "default_vehicle_service_url")]
    pub vehicle_service_url: String,
    /// Upper bound for a single adapter call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ServicesConfig {
    /// Adapter call timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            user_service_url: default_user_service_url(),
            vehicle_service_url: default_vehicle_service_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_user_service_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_vehicle_service_url() -> String {
    "http://localhost:8002".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}
