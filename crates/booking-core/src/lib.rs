//! # booking-core
//!
//! Core crate for the booking service. Contains the capability traits for
//! the adjacent user and vehicle services, configuration schemas, typed
//! identifiers, pagination limits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other booking crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
