//! In-process stand-ins for the user and vehicle services.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use booking_core::error::AppError;
use booking_core::result::AppResult;
use booking_core::traits::{UserValidator, VehicleCoordinator};
use booking_core::types::VehicleStatus;

/// Accepts every user except the ones explicitly rejected.
#[derive(Debug, Clone, Default)]
pub struct StaticUserValidator {
    rejected: Arc<Mutex<HashSet<String>>>,
    unreachable: Arc<AtomicBool>,
}

impl StaticUserValidator {
    /// A validator that accepts everyone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject `user_id` from now on.
    pub async fn reject(&self, user_id: impl Into<String>) {
        self.rejected.lock().await.insert(user_id.into());
    }

    /// Simulate the user service being down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserValidator for StaticUserValidator {
    async fn validate(&self, user_id: &str) -> AppResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AppError::external_service("user service unreachable"));
        }
        if self.rejected.lock().await.contains(user_id) {
            return Err(AppError::invalid_user(format!("user {user_id} is not active")));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct VehicleState {
    unavailable: HashSet<String>,
    statuses: HashMap<String, VehicleStatus>,
    calls: Vec<(String, VehicleStatus)>,
}

/// Vehicle coordinator that reports every vehicle available unless told
/// otherwise and records every status write.
#[derive(Debug, Clone, Default)]
pub struct StubVehicleCoordinator {
    state: Arc<Mutex<VehicleState>>,
    fail_status_updates: Arc<AtomicBool>,
    status_delay: Arc<Mutex<Option<Duration>>>,
    availability_delay: Arc<Mutex<Option<Duration>>>,
}

impl StubVehicleCoordinator {
    /// A coordinator where every vehicle is available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `vehicle_id` as not bookable.
    pub async fn mark_unavailable(&self, vehicle_id: impl Into<String>) {
        self.state.lock().await.unavailable.insert(vehicle_id.into());
    }

    /// Make every `set_status` call fail.
    pub fn fail_status_updates(&self, fail: bool) {
        self.fail_status_updates.store(fail, Ordering::SeqCst);
    }

    /// Delay every `set_status` call by `delay`.
    pub async fn delay_status_updates(&self, delay: Duration) {
        *self.status_delay.lock().await = Some(delay);
    }

    /// Delay every `is_available` call by `delay`.
    pub async fn delay_availability(&self, delay: Duration) {
        *self.availability_delay.lock().await = Some(delay);
    }

    /// Every successful `set_status` call, in order.
    pub async fn status_calls(&self) -> Vec<(String, VehicleStatus)> {
        self.state.lock().await.calls.clone()
    }

    /// Last status recorded for `vehicle_id`.
    pub async fn status_of(&self, vehicle_id: &str) -> Option<VehicleStatus> {
        self.state.lock().await.statuses.get(vehicle_id).copied()
    }
}

#[async_trait]
impl VehicleCoordinator for StubVehicleCoordinator {
    async fn is_available(&self, vehicle_id: &str, _at: DateTime<Utc>) -> AppResult<bool> {
        let delay = *self.availability_delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(!self.state.lock().await.unavailable.contains(vehicle_id))
    }

    async fn set_status(&self, vehicle_id: &str, status: VehicleStatus) -> AppResult<()> {
        let delay = *self.status_delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_status_updates.load(Ordering::SeqCst) {
            return Err(AppError::external_service(format!(
                "vehicle service refused status {status} for {vehicle_id}"
            )));
        }

        let mut state = self.state.lock().await;
        state.statuses.insert(vehicle_id.to_string(), status);
        state.calls.push((vehicle_id.to_string(), status));
        Ok(())
    }
}
