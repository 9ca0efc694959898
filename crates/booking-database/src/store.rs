//! The booking store contract.

use async_trait::async_trait;

use booking_core::result::AppResult;
use booking_core::types::BookingId;
use booking_entity::booking::{Booking, BookingFilter, BookingPatch, BookingStats, BookingStatus};

/// Persistence for booking records.
///
/// `update` and `transition` are sparse: only the `Some` fields of the
/// patch are written, and `updated_at` is always refreshed.
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Insert a new booking and return the stored row.
    async fn create(&self, booking: &Booking) -> AppResult<Booking>;

    /// Fetch one booking.
    async fn get_by_id(&self, id: BookingId) -> AppResult<Option<Booking>>;

    /// Apply a sparse patch unconditionally. `NotFound` when the row is missing.
    async fn update(&self, id: BookingId, patch: &BookingPatch) -> AppResult<Booking>;

    /// Remove a booking. `NotFound` when the row is missing.
    async fn delete(&self, id: BookingId) -> AppResult<()>;

    /// Bookings matching `filter`, newest first, windowed by limit/offset.
    async fn list(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>>;

    /// Number of bookings matching `filter`, ignoring limit/offset.
    async fn count(&self, filter: &BookingFilter) -> AppResult<i64>;

    /// Confirmed and active bookings, earliest start first.
    async fn get_active(&self) -> AppResult<Vec<Booking>>;

    /// Aggregate statistics, optionally for a single user.
    async fn get_stats(&self, user_id: Option<&str>) -> AppResult<BookingStats>;

    /// Conditionally apply `patch`.
    ///
    /// The write happens only when the stored status is one of `from` and,
    /// when `owner` is given, the stored `user_id` equals it. Returns `None`
    /// when no row satisfied the guard.
    async fn transition(
        &self,
        id: BookingId,
        owner: Option<&str>,
        from: &[BookingStatus],
        patch: &BookingPatch,
    ) -> AppResult<Option<Booking>>;

    /// Verify the backing storage is reachable.
    async fn ping(&self) -> AppResult<()>;

    /// One user's bookings, newest first.
    async fn get_by_user(&self, user_id: &str, limit: i64, offset: i64) -> AppResult<Vec<Booking>> {
        self.list(&BookingFilter::for_user(user_id).paginate(limit, offset))
            .await
    }

    /// One vehicle's bookings, newest first.
    async fn get_by_vehicle(
        &self,
        vehicle_id: &str,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Booking>> {
        self.list(&BookingFilter::for_vehicle(vehicle_id).paginate(limit, offset))
            .await
    }
}
