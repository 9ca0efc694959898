//! Application builder: wires router, middleware, and state into an Axum app
//! and runs it until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use booking_core::config::{AppConfig, DatabaseConfig, StorageBackend};
use booking_core::error::AppError;
use booking_core::traits::{UserValidator, VehicleCoordinator};
use booking_database::{BookingStore, DatabasePool, MemoryBookingStore, PgBookingRepository};
use booking_integration::{HttpUserValidator, HttpVehicleCoordinator};
use booking_service::VehicleStatusDispatcher;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    build_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .layer(build_cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http())
}

/// Runs the booking server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting booking server...");
    let config = Arc::new(config);

    let (store, pool) = open_store(&config.database).await?;

    let users: Arc<dyn UserValidator> = Arc::new(HttpUserValidator::new(&config.services)?);
    let vehicles: Arc<dyn VehicleCoordinator> =
        Arc::new(HttpVehicleCoordinator::new(&config.services)?);
    info!(
        user_service = %config.services.user_service_url,
        vehicle_service = %config.services.vehicle_service_url,
        timeout_ms = config.services.timeout_ms,
        "Adjacent service clients ready"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (dispatcher, dispatch_task) = VehicleStatusDispatcher::spawn(
        Arc::clone(&vehicles),
        &config.dispatch,
        config.services.timeout(),
        shutdown_rx,
    );

    let state = AppState::new(Arc::clone(&config), store, users, vehicles, dispatcher);
    let app = build_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Booking server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    match tokio::time::timeout(grace, dispatch_task).await {
        Ok(Ok(())) => info!("Vehicle status dispatcher drained"),
        Ok(Err(e)) => warn!(error = %e, "Vehicle status dispatcher task failed"),
        Err(_) => warn!(
            grace_seconds = grace.as_secs(),
            "Vehicle status dispatcher did not drain before shutdown"
        ),
    }

    if let Some(pool) = pool {
        pool.close().await;
    }

    info!("Booking server stopped");
    Ok(())
}

/// Open the configured store. The pool is returned so it can be closed on
/// shutdown.
async fn open_store(
    config: &DatabaseConfig,
) -> Result<(Arc<dyn BookingStore>, Option<DatabasePool>), AppError> {
    match config.storage {
        StorageBackend::Postgres => {
            let pool = DatabasePool::connect(config).await?;
            let store = PgBookingRepository::new(pool.pool().clone());
            Ok((Arc::new(store), Some(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory booking store; bookings are lost on restart");
            Ok((Arc::new(MemoryBookingStore::new()), None))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
