//! Route definitions for the booking HTTP API.
//!
//! Booking routes are mounted under `/api/v1`; health checks stay at the
//! root so they do not depend on the API version.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with every route and the request-logging middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", booking_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Booking lifecycle, listings, and statistics
fn booking_routes() -> Router<AppState> {
    use handlers::booking;

    Router::new()
        .route(
            "/bookings",
            post(booking::create_booking).get(booking::list_bookings),
        )
        .route("/bookings/active", get(booking::active_bookings))
        .route("/bookings/stats", get(booking::booking_stats))
        .route(
            "/bookings/{id}",
            get(booking::get_booking).put(booking::update_booking),
        )
        .route("/bookings/{id}/start", post(booking::start_booking))
        .route("/bookings/{id}/complete", post(booking::complete_booking))
        .route("/bookings/{id}/cancel", post(booking::cancel_booking))
        .route(
            "/bookings/{id}/confirmation",
            post(booking::confirm_booking),
        )
        .route("/users/{user_id}/bookings", get(booking::user_bookings))
        .route(
            "/vehicles/{vehicle_id}/bookings",
            get(booking::vehicle_bookings),
        )
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
