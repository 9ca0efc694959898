//! Capability traits defined in `booking-core` and implemented by other crates.

pub mod user_validator;
pub mod vehicle_coordinator;

pub use user_validator::UserValidator;
pub use vehicle_coordinator::VehicleCoordinator;
