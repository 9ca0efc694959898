//! Aggregate booking statistics.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::model::Booking;
use super::status::BookingStatus;

/// Counts and totals over all bookings.
///
/// Revenue sums every recorded cost. The averages ignore bookings without a
/// recorded distance or duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total_bookings: i64,
    pub active_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
    pub total_revenue: f64,
    pub average_distance: f64,
    pub average_duration: f64,
}

impl BookingStats {
    /// Compute statistics over an in-memory set of bookings.
    pub fn from_bookings<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        let mut stats = Self::default();
        let (mut distance_sum, mut distance_n) = (0.0, 0u32);
        let (mut duration_sum, mut duration_n) = (0.0, 0u32);

        for booking in bookings {
            stats.total_bookings += 1;
            match booking.status {
                BookingStatus::Active => stats.active_bookings += 1,
                BookingStatus::Completed => stats.completed_bookings += 1,
                BookingStatus::Cancelled => stats.cancelled_bookings += 1,
                BookingStatus::Pending | BookingStatus::Confirmed => {}
            }
            stats.total_revenue += booking.cost.unwrap_or(0.0);
            if let Some(distance) = booking.distance {
                distance_sum += distance;
                distance_n += 1;
            }
            if let Some(duration) = booking.duration {
                duration_sum += f64::from(duration);
                duration_n += 1;
            }
        }

        if distance_n > 0 {
            stats.average_distance = distance_sum / f64::from(distance_n);
        }
        if duration_n > 0 {
            stats.average_duration = duration_sum / f64::from(duration_n);
        }
        stats
    }
}
