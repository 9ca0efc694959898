//! Booking list filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use booking_core::types::{DEFAULT_LIMIT, clamp_limit, clamp_offset};

use super::model::Booking;
use super::status::BookingStatus;

/// Conjunctive filter over bookings. Unset fields match everything.
///
/// `start_date` and `end_date` bound `start_time` inclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingFilter {
    pub user_id: Option<String>,
    pub vehicle_id: Option<String>,
    pub status: Option<BookingStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for BookingFilter {
    fn default() -> Self {
        Self {
            user_id: None,
            vehicle_id: None,
            status: None,
            start_date: None,
            end_date: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl BookingFilter {
    /// Filter for one user's bookings.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    /// Filter for one vehicle's bookings.
    pub fn for_vehicle(vehicle_id: impl Into<String>) -> Self {
        Self {
            vehicle_id: Some(vehicle_id.into()),
            ..Self::default()
        }
    }

    /// Set the page window, clamping to the accepted range.
    pub fn paginate(mut self, limit: i64, offset: i64) -> Self {
        self.limit = clamp_limit(limit);
        self.offset = clamp_offset(offset);
        self
    }

    /// Whether `booking` satisfies every set predicate.
    pub fn matches(&self, booking: &Booking) -> bool {
        self.user_id.as_ref().is_none_or(|u| &booking.user_id == u)
            && self
                .vehicle_id
                .as_ref()
                .is_none_or(|v| &booking.vehicle_id == v)
            && self.status.is_none_or(|s| booking.status == s)
            && self.start_date.is_none_or(|d| booking.start_time >= d)
            && self.end_date.is_none_or(|d| booking.start_time <= d)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::booking::input::NewBooking;

    fn booking_at(start: DateTime<Utc>) -> Booking {
        Booking::from_new(
            NewBooking {
                user_id: "u1".into(),
                vehicle_id: "v1".into(),
                start_time: start,
                pickup_latitude: 0.0,
                pickup_longitude: 0.0,
                pickup_address: "A".into(),
                dropoff_latitude: None,
                dropoff_longitude: None,
                dropoff_address: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(BookingFilter::default().matches(&booking_at(Utc::now())));
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let b = booking_at(Utc::now());
        let mut filter = BookingFilter::for_user("u1");
        assert!(filter.matches(&b));
        filter.vehicle_id = Some("v2".into());
        assert!(!filter.matches(&b));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let start = Utc::now();
        let b = booking_at(start);
        let filter = BookingFilter {
            start_date: Some(start),
            end_date: Some(start),
            ..BookingFilter::default()
        };
        assert!(filter.matches(&b));

        let later = BookingFilter {
            start_date: Some(start + Duration::seconds(1)),
            ..BookingFilter::default()
        };
        assert!(!later.matches(&b));
    }

    #[test]
    fn test_status_predicate() {
        let b = booking_at(Utc::now());
        let filter = BookingFilter {
            status: Some(BookingStatus::Active),
            ..BookingFilter::default()
        };
        assert!(!filter.matches(&b));
    }

    #[test]
    fn test_paginate_clamps() {
        let f = BookingFilter::default().paginate(0, -5);
        assert_eq!(f.limit, DEFAULT_LIMIT);
        assert_eq!(f.offset, 0);
        assert_eq!(BookingFilter::default().paginate(1000, 3).limit, 100);
    }
}
