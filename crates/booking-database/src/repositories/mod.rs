//! PostgreSQL repository implementations.

pub mod booking;

pub use booking::PgBookingRepository;
