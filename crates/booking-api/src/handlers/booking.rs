//! Booking handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use booking_entity::booking::{Booking, BookingStats, CompleteBooking, NewBooking, UpdateBooking};
use booking_service::{BookingPage, ConfirmationEvent};

use crate::dto::request::{ConfirmationRequest, ListBookingsQuery, PageQuery, StatsQuery};
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery, BookingPath, ConfirmationCaller, OwnerId};
use crate::state::AppState;

/// POST /api/v1/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let booking = state.lifecycle.create_booking(req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/v1/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListBookingsQuery>,
) -> Result<Json<BookingPage>, ApiError> {
    let page = state.queries.list_bookings(query.into_filter()?).await?;
    Ok(Json(page))
}

/// GET /api/v1/bookings/active
pub async fn active_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.queries.active_bookings().await?))
}

/// GET /api/v1/bookings/stats
pub async fn booking_stats(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> Result<Json<BookingStats>, ApiError> {
    Ok(Json(state.queries.stats(query.scope()).await?))
}

/// GET /api/v1/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    BookingPath(id): BookingPath,
) -> Result<Json<Booking>, ApiError> {
    Ok(Json(state.lifecycle.get_booking(id).await?))
}

/// PUT /api/v1/bookings/{id}
pub async fn update_booking(
    State(state): State<AppState>,
    owner: OwnerId,
    BookingPath(id): BookingPath,
    ApiJson(req): ApiJson<UpdateBooking>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state
        .lifecycle
        .update_booking(id, owner.as_str(), req)
        .await?;
    Ok(Json(booking))
}

/// POST /api/v1/bookings/{id}/start
pub async fn start_booking(
    State(state): State<AppState>,
    owner: OwnerId,
    BookingPath(id): BookingPath,
) -> Result<StatusCode, ApiError> {
    state.lifecycle.start_booking(id, owner.as_str()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/bookings/{id}/complete
pub async fn complete_booking(
    State(state): State<AppState>,
    owner: OwnerId,
    BookingPath(id): BookingPath,
    ApiJson(req): ApiJson<CompleteBooking>,
) -> Result<StatusCode, ApiError> {
    state
        .lifecycle
        .complete_booking(id, owner.as_str(), req)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    owner: OwnerId,
    BookingPath(id): BookingPath,
) -> Result<StatusCode, ApiError> {
    state.lifecycle.cancel_booking(id, owner.as_str()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/bookings/{id}/confirmation
///
/// Delivery point for the confirming system; carries no user identity but
/// must present the confirmation token when one is configured.
pub async fn confirm_booking(
    State(state): State<AppState>,
    _caller: ConfirmationCaller,
    BookingPath(id): BookingPath,
    ApiJson(req): ApiJson<ConfirmationRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .lifecycle
        .confirm_booking(ConfirmationEvent {
            booking_id: id,
            reference: req.reference,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{user_id}/bookings
pub async fn user_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let (limit, offset) = page.window();
    Ok(Json(
        state.queries.user_bookings(&user_id, limit, offset).await?,
    ))
}

/// GET /api/v1/vehicles/{vehicle_id}/bookings
pub async fn vehicle_bookings(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let (limit, offset) = page.window();
    Ok(Json(
        state
            .queries
            .vehicle_bookings(&vehicle_id, limit, offset)
            .await?,
    ))
}
