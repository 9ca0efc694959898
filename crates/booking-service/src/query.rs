//! Read-only booking queries and reporting.

use std::sync::Arc;

use serde::Serialize;

use booking_core::result::AppResult;
use booking_core::types::{clamp_limit, clamp_offset};
use booking_database::BookingStore;
use booking_entity::booking::{Booking, BookingFilter, BookingStats};

/// One page of a filtered booking listing.
#[derive(Debug, Clone, Serialize)]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    /// Matches across all pages.
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Thin read path over the booking store.
#[derive(Clone)]
pub struct BookingQueryService {
    store: Arc<dyn BookingStore>,
}

impl BookingQueryService {
    /// Creates a new query service.
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// List bookings matching `filter`, clamping the page window.
    pub async fn list_bookings(&self, filter: BookingFilter) -> AppResult<BookingPage> {
        let filter = BookingFilter {
            limit: clamp_limit(filter.limit),
            offset: clamp_offset(filter.offset),
            ..filter
        };

        let bookings = self.store.list(&filter).await?;
        let total = self.store.count(&filter).await?;

        Ok(BookingPage {
            bookings,
            total,
            limit: filter.limit,
            offset: filter.offset,
        })
    }

    /// One user's bookings, newest first.
    pub async fn user_bookings(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Booking>> {
        self.store
            .get_by_user(user_id, clamp_limit(limit), clamp_offset(offset))
            .await
    }

    /// One vehicle's bookings, newest first.
    pub async fn vehicle_bookings(
        &self,
        vehicle_id: &str,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Booking>> {
        self.store
            .get_by_vehicle(vehicle_id, clamp_limit(limit), clamp_offset(offset))
            .await
    }

    /// Confirmed and active bookings, earliest start first.
    pub async fn active_bookings(&self) -> AppResult<Vec<Booking>> {
        self.store.get_active().await
    }

    /// Aggregate statistics, optionally for one user.
    pub async fn stats(&self, user_id: Option<&str>) -> AppResult<BookingStats> {
        self.store.get_stats(user_id).await
    }
}
