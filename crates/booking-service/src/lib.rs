//! # booking-service
//!
//! Business logic for bookings. [`BookingLifecycleManager`] owns every
//! status transition, [`BookingQueryService`] serves listings and
//! statistics, and [`VehicleStatusDispatcher`] carries vehicle status
//! changes to the vehicle service off the request path.
//!
//! Services follow constructor injection: the store and the capability
//! adapters are supplied as `Arc<dyn Trait>` at construction time.

pub mod dispatch;
pub mod lifecycle;
pub mod query;

pub use dispatch::{
    DeadLetter, DispatchSnapshot, DispatchWorker, StatusUpdate, VehicleStatusDispatcher,
};
pub use lifecycle::{BookingLifecycleManager, ConfirmationEvent};
pub use query::{BookingPage, BookingQueryService};
