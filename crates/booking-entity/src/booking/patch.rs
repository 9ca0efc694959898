//! Sparse booking updates.

use chrono::{DateTime, Utc};

use super::model::Booking;
use super::status::BookingStatus;

/// A sparse set of field changes. `None` leaves the field untouched.
///
/// `user_id`, `vehicle_id`, `start_time`, pickup fields and `created_at`
/// are deliberately absent: they never change after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPatch {
    pub status: Option<BookingStatus>,
    pub end_time: Option<DateTime<Utc>>,
    pub dropoff_latitude: Option<f64>,
    pub dropoff_longitude: Option<f64>,
    pub dropoff_address: Option<String>,
    pub distance: Option<f64>,
    pub duration: Option<i32>,
    pub cost: Option<f64>,
}

impl BookingPatch {
    /// Patch that only moves the booking to `status`.
    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the supplied fields to `booking` and stamp `updated_at`.
    pub fn apply_to(&self, booking: &mut Booking, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            booking.status = status;
        }
        if let Some(end_time) = self.end_time {
            booking.end_time = Some(end_time);
        }
        if let Some(lat) = self.dropoff_latitude {
            booking.dropoff_latitude = Some(lat);
        }
        if let Some(lng) = self.dropoff_longitude {
            booking.dropoff_longitude = Some(lng);
        }
        if let Some(address) = &self.dropoff_address {
            booking.dropoff_address = Some(address.clone());
        }
        if let Some(distance) = self.distance {
            booking.distance = Some(distance);
        }
        if let Some(duration) = self.duration {
            booking.duration = Some(duration);
        }
        if let Some(cost) = self.cost {
            booking.cost = Some(cost);
        }
        booking.updated_at = now;
    }
}
