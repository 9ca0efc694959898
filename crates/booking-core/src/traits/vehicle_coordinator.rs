//! Vehicle availability and status capability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::vehicle::VehicleStatus;

/// Narrow view of the vehicle service used by the booking lifecycle.
///
/// `is_available` is a hard precondition for creating a booking;
/// `set_status` is a best-effort side effect of transitions and its
/// failures never change a transition's outcome.
#[async_trait]
pub trait VehicleCoordinator: Send + Sync + 'static {
    /// Whether the vehicle can be booked starting at `at`.
    async fn is_available(&self, vehicle_id: &str, at: DateTime<Utc>) -> AppResult<bool>;

    /// Record a new status on the vehicle.
    async fn set_status(&self, vehicle_id: &str, status: VehicleStatus) -> AppResult<()>;
}
