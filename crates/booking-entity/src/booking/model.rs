//! Booking entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use booking_core::types::BookingId;

use super::input::NewBooking;
use super::status::BookingStatus;

/// A reservation of a vehicle by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// Owning user. Never changes after creation.
    pub user_id: String,
    /// Booked vehicle.
    pub vehicle_id: String,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Scheduled start of the trip.
    pub start_time: DateTime<Utc>,
    /// When the trip ended. Set on completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Pickup latitude.
    pub pickup_latitude: f64,
    /// Pickup longitude.
    pub pickup_longitude: f64,
    /// Pickup street address.
    pub pickup_address: String,
    /// Dropoff latitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_latitude: Option<f64>,
    /// Dropoff longitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_longitude: Option<f64>,
    /// Dropoff street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_address: Option<String>,
    /// Distance driven, in kilometres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Trip duration, in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    /// Price charged for the trip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Build a fresh `pending` booking from validated input.
    pub fn from_new(input: NewBooking, now: DateTime<Utc>) -> Self {
        Self {
            id: BookingId::new(),
            user_id: input.user_id,
            vehicle_id: input.vehicle_id,
            status: BookingStatus::Pending,
            start_time: input.start_time,
            end_time: None,
            pickup_latitude: input.pickup_latitude,
            pickup_longitude: input.pickup_longitude,
            pickup_address: input.pickup_address,
            dropoff_latitude: input.dropoff_latitude,
            dropoff_longitude: input.dropoff_longitude,
            dropoff_address: input.dropoff_address,
            distance: None,
            duration: None,
            cost: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` owns this booking.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
