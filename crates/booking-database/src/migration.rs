//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use booking_core::error::{AppError, ErrorKind};

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Applying booking schema migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to apply booking migrations: {e}"),
                e,
            )
        })?;

    info!("Booking schema is up to date");
    Ok(())
}
