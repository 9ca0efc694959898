//! User validation capability.

use async_trait::async_trait;

use crate::result::AppResult;

/// Confirms that a user exists and may make bookings.
///
/// Implementations return an error of kind
/// [`ErrorKind::InvalidUser`](crate::error::ErrorKind::InvalidUser) when the
/// user is unknown or not allowed to book, and
/// [`ErrorKind::ExternalService`](crate::error::ErrorKind::ExternalService)
/// when the answer could not be obtained.
#[async_trait]
pub trait UserValidator: Send + Sync + 'static {
    /// Validate the given user reference.
    async fn validate(&self, user_id: &str) -> AppResult<()>;
}
