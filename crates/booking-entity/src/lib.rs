//! # booking-entity
//!
//! Domain entity models for the booking service. `Booking` represents a
//! row of the `bookings` table and derives `sqlx::FromRow`; the remaining
//! types describe inputs, sparse patches, query filters, and aggregates.

pub mod booking;

pub use booking::{
    Booking, BookingFilter, BookingPatch, BookingStats, BookingStatus, CompleteBooking,
    NewBooking, UpdateBooking,
};
