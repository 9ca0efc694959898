//! Core type definitions used across the booking workspace.

pub mod id;
pub mod pagination;
pub mod vehicle;

pub use id::BookingId;
pub use pagination::{DEFAULT_LIMIT, MAX_LIMIT, clamp_limit, clamp_offset};
pub use vehicle::VehicleStatus;
