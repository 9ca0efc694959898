//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use booking_core::config::AppConfig;
use booking_core::traits::{UserValidator, VehicleCoordinator};
use booking_database::BookingStore;
use booking_service::{BookingLifecycleManager, BookingQueryService, VehicleStatusDispatcher};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Booking store, used directly only for health checks.
    pub store: Arc<dyn BookingStore>,
    /// Status transitions.
    pub lifecycle: Arc<BookingLifecycleManager>,
    /// Listings and statistics.
    pub queries: Arc<BookingQueryService>,
    /// Vehicle status dispatch handle.
    pub dispatcher: VehicleStatusDispatcher,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Wire the services over a store, the two capability adapters, and a
    /// running dispatcher.
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn BookingStore>,
        users: Arc<dyn UserValidator>,
        vehicles: Arc<dyn VehicleCoordinator>,
        dispatcher: VehicleStatusDispatcher,
    ) -> Self {
        let lifecycle = BookingLifecycleManager::new(
            Arc::clone(&store),
            users,
            vehicles,
            dispatcher.clone(),
            config.services.timeout(),
        );
        let queries = BookingQueryService::new(Arc::clone(&store));

        Self {
            config,
            store,
            lifecycle: Arc::new(lifecycle),
            queries: Arc::new(queries),
            dispatcher,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was built.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
