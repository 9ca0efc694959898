//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use booking_api::{AppState, build_app};
use booking_core::config::{AppConfig, StorageBackend};
use booking_database::MemoryBookingStore;
use booking_integration::{StaticUserValidator, StubVehicleCoordinator};
use booking_service::VehicleStatusDispatcher;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store behind the router, for forcing states
    pub store: MemoryBookingStore,
    /// User service stand-in
    pub users: StaticUserValidator,
    /// Vehicle service stand-in
    pub vehicles: StubVehicleCoordinator,
    /// Dispatcher handle shared with the router
    pub dispatcher: VehicleStatusDispatcher,
    shutdown: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl TestApp {
    /// Create a new test application over the in-memory store and stubs
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Like [`TestApp::new`], with `configure` applied to the configuration
    pub fn with_config(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.database.storage = StorageBackend::Memory;
        config.services.timeout_ms = 1000;
        configure(&mut config);
        let config = Arc::new(config);

        let store = MemoryBookingStore::new();
        let users = StaticUserValidator::new();
        let vehicles = StubVehicleCoordinator::new();

        let (shutdown, shutdown_rx) = watch::channel(false);
        let (dispatcher, worker) = VehicleStatusDispatcher::spawn(
            Arc::new(vehicles.clone()),
            &config.dispatch,
            Duration::from_secs(1),
            shutdown_rx,
        );

        let state = AppState::new(
            Arc::clone(&config),
            Arc::new(store.clone()),
            Arc::new(users.clone()),
            Arc::new(vehicles.clone()),
            dispatcher.clone(),
        );

        Self {
            router: build_app(state),
            store,
            users,
            vehicles,
            dispatcher,
            shutdown,
            worker,
        }
    }

    /// Stop the dispatcher and wait for every queued update to be delivered.
    pub async fn drain(self) -> StubVehicleCoordinator {
        self.shutdown.send(true).expect("signal dispatcher");
        self.worker.await.expect("dispatcher task");
        self.vehicles
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user_id: Option<&str>,
    ) -> TestResponse {
        let headers: Vec<(&str, &str)> = user_id.map(|id| ("X-User-ID", id)).into_iter().collect();
        self.request_with_headers(method, path, body, &headers).await
    }

    /// Make an HTTP request carrying extra headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a booking through the API and return its ID
    pub async fn create_booking(&self, user_id: &str, vehicle_id: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/v1/bookings",
                Some(booking_body(user_id, vehicle_id, Utc::now() - chrono::Duration::minutes(1))),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );

        response
            .body
            .get("id")
            .and_then(|v| v.as_str())
            .expect("No id in create response")
            .to_string()
    }

    /// Deliver the external confirmation for a booking
    pub async fn confirm(&self, id: &str) {
        let response = self
            .request(
                "POST",
                &format!("/api/v1/bookings/{id}/confirmation"),
                Some(json!({})),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::NO_CONTENT, "{:?}", response.body);
    }
}

/// JSON body for `POST /api/v1/bookings`
pub fn booking_body(user_id: &str, vehicle_id: &str, start_time: DateTime<Utc>) -> Value {
    json!({
        "user_id": user_id,
        "vehicle_id": vehicle_id,
        "start_time": start_time,
        "pickup_latitude": 40.7128,
        "pickup_longitude": -74.006,
        "pickup_address": "1 Centre St",
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when empty
    pub body: Value,
}

impl TestResponse {
    /// The `error` code of an error body
    pub fn error_code(&self) -> &str {
        self.body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }
}
