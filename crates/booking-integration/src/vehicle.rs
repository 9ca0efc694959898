//! HTTP client for the vehicle service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use booking_core::config::ServicesConfig;
use booking_core::error::{AppError, ErrorKind};
use booking_core::result::AppResult;
use booking_core::traits::VehicleCoordinator;
use booking_core::types::VehicleStatus;

use crate::client::{build_client, resource_url};

#[derive(Debug, Deserialize)]
struct VehicleRecord {
    #[serde(default)]
    status: String,
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: VehicleStatus,
}

/// Talks to the vehicle service under `{base}/api/v1/vehicles`.
#[derive(Debug, Clone)]
pub struct HttpVehicleCoordinator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVehicleCoordinator {
    /// Create a coordinator for the configured vehicle service.
    pub fn new(config: &ServicesConfig) -> AppResult<Self> {
        Ok(Self {
            client: build_client(config.timeout())?,
            base_url: config.vehicle_service_url.clone(),
        })
    }

    /// Create a coordinator with a preconfigured client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn vehicle_url(&self, vehicle_id: &str, rest: &[&str]) -> AppResult<reqwest::Url> {
        let mut segments = vec!["api", "v1", "vehicles", vehicle_id];
        segments.extend_from_slice(rest);
        resource_url(&self.base_url, &segments)
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Vehicle service request failed: {e}"),
        e,
    )
}

#[async_trait]
impl VehicleCoordinator for HttpVehicleCoordinator {
    async fn is_available(&self, vehicle_id: &str, at: DateTime<Utc>) -> AppResult<bool> {
        let response = self
            .client
            .get(self.vehicle_url(vehicle_id, &[])?)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(vehicle_id, at = %at, status = %status, "Vehicle service responded");

        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Vehicle service returned {status}"
            )));
        }

        let vehicle: VehicleRecord = response.json().await.map_err(transport_error)?;
        Ok(vehicle.status == VehicleStatus::Available.as_str())
    }

    async fn set_status(&self, vehicle_id: &str, status: VehicleStatus) -> AppResult<()> {
        let url = self.vehicle_url(vehicle_id, &["status"])?;
        let response = self
            .client
            .put(url)
            .json(&StatusBody { status })
            .send()
            .await
            .map_err(transport_error)?;

        let code = response.status();
        if !code.is_success() {
            return Err(AppError::external_service(format!(
                "Vehicle service rejected status {status} for {vehicle_id}: {code}"
            )));
        }
        debug!(vehicle_id, status = %status, "Vehicle status updated");
        Ok(())
    }
}
