//! In-process booking store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use booking_core::error::AppError;
use booking_core::result::AppResult;
use booking_core::types::BookingId;
use booking_entity::booking::{Booking, BookingFilter, BookingPatch, BookingStats, BookingStatus};

use crate::store::BookingStore;

/// Booking store backed by a mutex-guarded map.
///
/// Every operation runs under one lock, so `transition` is a true
/// compare-and-swap. Contents are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookingStore {
    bookings: Arc<Mutex<HashMap<BookingId, Booking>>>,
}

impl MemoryBookingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings.
    pub async fn len(&self) -> usize {
        self.bookings.lock().await.len()
    }

    /// Whether the store holds no bookings.
    pub async fn is_empty(&self) -> bool {
        self.bookings.lock().await.is_empty()
    }
}

fn not_found(id: BookingId) -> AppError {
    AppError::not_found(format!("booking {id} not found"))
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn create(&self, booking: &Booking) -> AppResult<Booking> {
        let mut bookings = self.bookings.lock().await;
        if bookings.contains_key(&booking.id) {
            return Err(AppError::database(format!(
                "booking {} already exists",
                booking.id
            )));
        }
        bookings.insert(booking.id, booking.clone());
        Ok(booking.clone())
    }

    async fn get_by_id(&self, id: BookingId) -> AppResult<Option<Booking>> {
        Ok(self.bookings.lock().await.get(&id).cloned())
    }

    async fn update(&self, id: BookingId, patch: &BookingPatch) -> AppResult<Booking> {
        let mut bookings = self.bookings.lock().await;
        let booking = bookings.get_mut(&id).ok_or_else(|| not_found(id))?;
        patch.apply_to(booking, Utc::now());
        Ok(booking.clone())
    }

    async fn delete(&self, id: BookingId) -> AppResult<()> {
        self.bookings
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        let mut matched: Vec<Booking> = bookings
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matched
            .into_iter()
            .skip(usize::try_from(filter.offset.max(0)).unwrap_or(0))
            .take(usize::try_from(filter.limit.max(0)).unwrap_or(0))
            .collect())
    }

    async fn count(&self, filter: &BookingFilter) -> AppResult<i64> {
        let bookings = self.bookings.lock().await;
        let n = bookings.values().filter(|b| filter.matches(b)).count();
        Ok(i64::try_from(n).unwrap_or(i64::MAX))
    }

    async fn get_active(&self) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        let mut active: Vec<Booking> = bookings
            .values()
            .filter(|b| BookingStatus::IN_PROGRESS.contains(&b.status))
            .cloned()
            .collect();
        active.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(active)
    }

    async fn get_stats(&self, user_id: Option<&str>) -> AppResult<BookingStats> {
        let bookings = self.bookings.lock().await;
        Ok(BookingStats::from_bookings(
            bookings
                .values()
                .filter(|b| user_id.is_none_or(|u| b.user_id == u)),
        ))
    }

    async fn transition(
        &self,
        id: BookingId,
        owner: Option<&str>,
        from: &[BookingStatus],
        patch: &BookingPatch,
    ) -> AppResult<Option<Booking>> {
        let mut bookings = self.bookings.lock().await;
        let Some(booking) = bookings.get_mut(&id) else {
            return Ok(None);
        };
        if !from.contains(&booking.status) || owner.is_some_and(|o| booking.user_id != o) {
            return Ok(None);
        }
        patch.apply_to(booking, Utc::now());
        Ok(Some(booking.clone()))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
