//! Query-string and body DTOs.
//!
//! Booking bodies deserialize straight into the entity inputs
//! (`NewBooking`, `CompleteBooking`, `UpdateBooking`); this module holds
//! only the shapes that exist at the HTTP edge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use booking_core::result::AppResult;
use booking_core::types::DEFAULT_LIMIT;
use booking_entity::booking::{BookingFilter, BookingStatus};

/// Query for `GET /bookings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBookingsQuery {
    /// Filter by user.
    pub user_id: Option<String>,
    /// Filter by vehicle.
    pub vehicle_id: Option<String>,
    /// Filter by status tag.
    pub status: Option<String>,
    /// Earliest start time (inclusive).
    pub start_date: Option<DateTime<Utc>>,
    /// Latest start time (inclusive).
    pub end_date: Option<DateTime<Utc>>,
    /// Page size.
    pub limit: Option<i64>,
    /// Rows to skip.
    pub offset: Option<i64>,
}

impl ListBookingsQuery {
    /// Convert into a store filter. Empty strings count as absent.
    pub fn into_filter(self) -> AppResult<BookingFilter> {
        let status = match non_empty(self.status) {
            Some(tag) => Some(tag.parse::<BookingStatus>()?),
            None => None,
        };

        Ok(BookingFilter {
            user_id: non_empty(self.user_id),
            vehicle_id: non_empty(self.vehicle_id),
            status,
            start_date: self.start_date,
            end_date: self.end_date,
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// Limit/offset query for per-user and per-vehicle listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    /// Page size.
    pub limit: Option<i64>,
    /// Rows to skip.
    pub offset: Option<i64>,
}

impl PageQuery {
    /// `(limit, offset)` with defaults applied.
    pub fn window(&self) -> (i64, i64) {
        (self.limit.unwrap_or(DEFAULT_LIMIT), self.offset.unwrap_or(0))
    }
}

/// Query for `GET /bookings/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsQuery {
    /// Restrict statistics to one user.
    pub user_id: Option<String>,
}

impl StatsQuery {
    /// The user scope, if any.
    pub fn scope(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|u| !u.is_empty())
    }
}

/// Body of `POST /bookings/{id}/confirmation`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    /// Reference issued by the confirming system.
    #[serde(default)]
    pub reference: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use booking_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_empty_query_uses_defaults() {
        let filter = ListBookingsQuery::default().into_filter().expect("filter");
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.offset, 0);
        assert!(filter.user_id.is_none());
        assert!(filter.status.is_none());
    }

    #[test]
    fn test_status_and_blank_fields() {
        let filter = ListBookingsQuery {
            user_id: Some(String::new()),
            status: Some("active".into()),
            limit: Some(3),
            ..ListBookingsQuery::default()
        }
        .into_filter()
        .expect("filter");
        assert!(filter.user_id.is_none());
        assert_eq!(filter.status, Some(BookingStatus::Active));
        assert_eq!(filter.limit, 3);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = ListBookingsQuery {
            status: Some("parked".into()),
            ..ListBookingsQuery::default()
        }
        .into_filter()
        .expect_err("invalid status");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_stats_scope() {
        assert_eq!(StatsQuery::default().scope(), None);
        let query = StatsQuery {
            user_id: Some("u1".into()),
        };
        assert_eq!(query.scope(), Some("u1"));
    }
}
