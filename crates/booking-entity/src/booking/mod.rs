//! Booking domain entities.

pub mod filter;
pub mod input;
pub mod model;
pub mod patch;
pub mod pricing;
pub mod stats;
pub mod status;

pub use filter::BookingFilter;
pub use input::{CompleteBooking, NewBooking, UpdateBooking};
pub use model::Booking;
pub use patch::BookingPatch;
pub use pricing::{PER_KM_RATE, PER_MINUTE_RATE, trip_cost};
pub use stats::BookingStats;
pub use status::BookingStatus;
