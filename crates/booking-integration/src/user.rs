//! HTTP client for the user service.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use booking_core::config::ServicesConfig;
use booking_core::error::{AppError, ErrorKind};
use booking_core::result::AppResult;
use booking_core::traits::UserValidator;

use crate::client::{build_client, resource_url};

/// The only user status allowed to book.
const ACTIVE_STATUS: &str = "active";

#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(default)]
    status: String,
}

/// Validates users with `GET {base}/api/v1/users/{id}`.
#[derive(Debug, Clone)]
pub struct HttpUserValidator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserValidator {
    /// Create a validator for the configured user service.
    pub fn new(config: &ServicesConfig) -> AppResult<Self> {
        Ok(Self {
            client: build_client(config.timeout())?,
            base_url: config.user_service_url.clone(),
        })
    }

    /// Create a validator with a preconfigured client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl UserValidator for HttpUserValidator {
    async fn validate(&self, user_id: &str) -> AppResult<()> {
        let url = resource_url(&self.base_url, &["api", "v1", "users", user_id])?;
        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("User service request failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        debug!(user_id, status = %status, "User service responded");

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::invalid_user(format!("user {user_id} does not exist")));
        }
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "User service returned {status}"
            )));
        }

        let user: UserRecord = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Invalid user service response: {e}"),
                e,
            )
        })?;

        if user.status != ACTIVE_STATUS {
            return Err(AppError::invalid_user(format!(
                "user {user_id} is not active (status: {})",
                user.status
            )));
        }
        Ok(())
    }
}
