//! # booking-database
//!
//! The [`BookingStore`] contract and its implementations: a PostgreSQL
//! repository built on sqlx and an in-process store used by tests and
//! single-node deployments.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryBookingStore;
pub use repositories::PgBookingRepository;
pub use store::BookingStore;
