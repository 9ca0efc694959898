//! # booking-integration
//!
//! Implementations of the [`UserValidator`] and [`VehicleCoordinator`]
//! capabilities: HTTP clients for the adjacent services and in-process
//! stubs for tests and local runs.
//!
//! [`UserValidator`]: booking_core::traits::UserValidator
//! [`VehicleCoordinator`]: booking_core::traits::VehicleCoordinator

pub mod client;
pub mod stub;
pub mod user;
pub mod vehicle;

pub use stub::{StaticUserValidator, StubVehicleCoordinator};
pub use user::HttpUserValidator;
pub use vehicle::HttpVehicleCoordinator;
