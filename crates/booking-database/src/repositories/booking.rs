//! PostgreSQL booking repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use booking_core::error::{AppError, ErrorKind};
use booking_core::result::AppResult;
use booking_core::types::BookingId;
use booking_entity::booking::{Booking, BookingFilter, BookingPatch, BookingStats, BookingStatus};

use crate::store::BookingStore;

const STATS_SQL: &str = "SELECT \
     COUNT(*) AS total_bookings, \
     COUNT(*) FILTER (WHERE status = 'active') AS active_bookings, \
     COUNT(*) FILTER (WHERE status = 'completed') AS completed_bookings, \
     COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled_bookings, \
     COALESCE(SUM(cost), 0)::DOUBLE PRECISION AS total_revenue, \
     COALESCE(AVG(distance), 0)::DOUBLE PRECISION AS average_distance, \
     COALESCE(AVG(duration), 0)::DOUBLE PRECISION AS average_duration \
     FROM bookings \
     WHERE ($1::TEXT IS NULL OR user_id = $1)";

/// Repository for booking rows in the `bookings` table.
#[derive(Debug, Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `WHERE` predicates for every set filter field.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &BookingFilter) {
    let mut first = true;

    if let Some(user_id) = &filter.user_id {
        push_predicate(qb, &mut first, "user_id = ");
        qb.push_bind(user_id.clone());
    }
    if let Some(vehicle_id) = &filter.vehicle_id {
        push_predicate(qb, &mut first, "vehicle_id = ");
        qb.push_bind(vehicle_id.clone());
    }
    if let Some(status) = filter.status {
        push_predicate(qb, &mut first, "status = ");
        qb.push_bind(status);
    }
    if let Some(start_date) = filter.start_date {
        push_predicate(qb, &mut first, "start_time >= ");
        qb.push_bind(start_date);
    }
    if let Some(end_date) = filter.end_date {
        push_predicate(qb, &mut first, "start_time <= ");
        qb.push_bind(end_date);
    }
}

fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, first: &mut bool, column: &str) {
    qb.push(if *first { " WHERE " } else { " AND " }).push(column);
    *first = false;
}

/// Append `SET` assignments for the supplied patch fields plus `updated_at`.
fn push_assignments(qb: &mut QueryBuilder<'_, Postgres>, patch: &BookingPatch, now: DateTime<Utc>) {
    let mut set = qb.separated(", ");
    if let Some(status) = patch.status {
        set.push("status = ").push_bind_unseparated(status);
    }
    if let Some(end_time) = patch.end_time {
        set.push("end_time = ").push_bind_unseparated(end_time);
    }
    if let Some(lat) = patch.dropoff_latitude {
        set.push("dropoff_latitude = ").push_bind_unseparated(lat);
    }
    if let Some(lng) = patch.dropoff_longitude {
        set.push("dropoff_longitude = ").push_bind_unseparated(lng);
    }
    if let Some(address) = &patch.dropoff_address {
        set.push("dropoff_address = ")
            .push_bind_unseparated(address.clone());
    }
    if let Some(distance) = patch.distance {
        set.push("distance = ").push_bind_unseparated(distance);
    }
    if let Some(duration) = patch.duration {
        set.push("duration = ").push_bind_unseparated(duration);
    }
    if let Some(cost) = patch.cost {
        set.push("cost = ").push_bind_unseparated(cost);
    }
    set.push("updated_at = ").push_bind_unseparated(now);
}

fn list_query(filter: &BookingFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT * FROM bookings");
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset);
    qb
}

fn count_query(filter: &BookingFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM bookings");
    push_filter(&mut qb, filter);
    qb
}

fn transition_query(
    id: BookingId,
    owner: Option<&str>,
    from: &[BookingStatus],
    patch: &BookingPatch,
    now: DateTime<Utc>,
) -> QueryBuilder<'static, Postgres> {
    let tags: Vec<String> = from.iter().map(|s| s.as_str().to_string()).collect();

    let mut qb = QueryBuilder::new("UPDATE bookings SET ");
    push_assignments(&mut qb, patch, now);
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" AND status = ANY(").push_bind(tags).push(")");
    if let Some(owner) = owner {
        qb.push(" AND user_id = ").push_bind(owner.to_string());
    }
    qb.push(" RETURNING *");
    qb
}

#[async_trait]
impl BookingStore for PgBookingRepository {
    async fn create(&self, booking: &Booking) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, vehicle_id, status, start_time, end_time, \
             pickup_latitude, pickup_longitude, pickup_address, \
             dropoff_latitude, dropoff_longitude, dropoff_address, \
             distance, duration, cost, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING *",
        )
        .bind(booking.id)
        .bind(&booking.user_id)
        .bind(&booking.vehicle_id)
        .bind(booking.status)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.pickup_latitude)
        .bind(booking.pickup_longitude)
        .bind(&booking.pickup_address)
        .bind(booking.dropoff_latitude)
        .bind(booking.dropoff_longitude)
        .bind(&booking.dropoff_address)
        .bind(booking.distance)
        .bind(booking.duration)
        .bind(booking.cost)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create booking", e))
    }

    async fn get_by_id(&self, id: BookingId) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    async fn update(&self, id: BookingId, patch: &BookingPatch) -> AppResult<Booking> {
        let mut qb = QueryBuilder::new("UPDATE bookings SET ");
        push_assignments(&mut qb, patch, Utc::now());
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Booking>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update booking", e))?
            .ok_or_else(|| AppError::not_found(format!("booking {id} not found")))
    }

    async fn delete(&self, id: BookingId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete booking", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("booking {id} not found")));
        }
        Ok(())
    }

    async fn list(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>> {
        list_query(filter)
            .build_query_as::<Booking>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))
    }

    async fn count(&self, filter: &BookingFilter) -> AppResult<i64> {
        count_query(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))
    }

    async fn get_active(&self) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE status IN ('confirmed', 'active') \
             ORDER BY start_time ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active bookings", e)
        })
    }

    async fn get_stats(&self, user_id: Option<&str>) -> AppResult<BookingStats> {
        sqlx::query_as::<_, BookingStats>(STATS_SQL)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to compute booking stats", e)
            })
    }

    async fn transition(
        &self,
        id: BookingId,
        owner: Option<&str>,
        from: &[BookingStatus],
        patch: &BookingPatch,
    ) -> AppResult<Option<Booking>> {
        transition_query(id, owner, from, patch, Utc::now())
            .build_query_as::<Booking>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to transition booking", e)
            })
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
