//! Booking lifecycle manager.
//!
//! Owns every status transition:
//!
//! ```text
//! pending --(confirmation)--> confirmed --(start)--> active --(complete)--> completed
//! {pending, confirmed, active} --(cancel)--> cancelled
//! ```
//!
//! Each mutating operation reads the booking to classify failures
//! precisely, then writes through [`BookingStore::transition`] guarded by
//! the expected prior status and owner. A guard miss means another writer
//! got there first and surfaces as `InvalidTransition`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use booking_core::error::AppError;
use booking_core::result::AppResult;
use booking_core::traits::{UserValidator, VehicleCoordinator};
use booking_core::types::{BookingId, VehicleStatus};
use booking_database::BookingStore;
use booking_entity::booking::{
    Booking, BookingPatch, BookingStatus, CompleteBooking, NewBooking, UpdateBooking,
};

use crate::dispatch::{StatusUpdate, VehicleStatusDispatcher};

/// External signal that a pending booking has been confirmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationEvent {
    /// The booking being confirmed.
    pub booking_id: BookingId,
    /// Opaque reference from the confirming system, kept for the log.
    #[serde(default)]
    pub reference: Option<String>,
}

/// Drives bookings through their lifecycle.
#[derive(Clone)]
pub struct BookingLifecycleManager {
    /// Booking persistence.
    store: Arc<dyn BookingStore>,
    /// User service capability.
    users: Arc<dyn UserValidator>,
    /// Vehicle service capability (availability only; status writes go
    /// through the dispatcher).
    vehicles: Arc<dyn VehicleCoordinator>,
    /// Best-effort vehicle status sink.
    dispatcher: VehicleStatusDispatcher,
    /// Upper bound for each precondition call.
    call_timeout: Duration,
}

impl BookingLifecycleManager {
    /// Creates a new lifecycle manager.
    pub fn new(
        store: Arc<dyn BookingStore>,
        users: Arc<dyn UserValidator>,
        vehicles: Arc<dyn VehicleCoordinator>,
        dispatcher: VehicleStatusDispatcher,
        call_timeout: Duration,
    ) -> Self {
        Self {
            store,
            users,
            vehicles,
            dispatcher,
            call_timeout,
        }
    }

    /// Create a `pending` booking once the user and vehicle checks pass.
    ///
    /// Nothing is written when any precondition fails.
    pub async fn create_booking(&self, input: NewBooking) -> AppResult<Booking> {
        input.ensure_valid()?;

        self.bounded("user service", self.users.validate(&input.user_id))
            .await?;

        let available = self
            .bounded(
                "vehicle service",
                self.vehicles
                    .is_available(&input.vehicle_id, input.start_time),
            )
            .await?;
        if !available {
            return Err(AppError::vehicle_unavailable(format!(
                "vehicle {} is not available at {}",
                input.vehicle_id, input.start_time
            )));
        }

        let booking = self
            .store
            .create(&Booking::from_new(input, Utc::now()))
            .await?;

        info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            vehicle_id = %booking.vehicle_id,
            start_time = %booking.start_time,
            "Booking created"
        );
        Ok(booking)
    }

    /// Fetch one booking.
    pub async fn get_booking(&self, id: BookingId) -> AppResult<Booking> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("booking {id} not found")))
    }

    /// Apply a planning update to a booking that has not finished.
    pub async fn update_booking(
        &self,
        id: BookingId,
        user_id: &str,
        input: UpdateBooking,
    ) -> AppResult<Booking> {
        input.ensure_valid()?;
        let booking = self.load_owned(id, user_id).await?;
        if booking.status.is_terminal() {
            return Err(AppError::invalid_transition(format!(
                "cannot update booking with status: {}",
                booking.status
            )));
        }

        let patch = input.into_patch();
        if patch.is_empty() {
            return Ok(booking);
        }

        let updated = self
            .guarded_write(&booking, Some(user_id), &BookingStatus::CANCELLABLE, &patch, "update")
            .await?;
        info!(booking_id = %id, "Booking updated");
        Ok(updated)
    }

    /// React to an external confirmation: `pending -> confirmed`.
    pub async fn confirm_booking(&self, event: ConfirmationEvent) -> AppResult<Booking> {
        let booking = self.get_booking(event.booking_id).await?;
        ensure_edge(&booking, BookingStatus::Confirmed, "confirm")?;

        let confirmed = self
            .advance(
                &booking,
                None,
                BookingStatus::Confirmed,
                BookingPatch::default(),
                "confirm",
            )
            .await?;

        info!(
            booking_id = %confirmed.id,
            reference = event.reference.as_deref().unwrap_or("-"),
            "Booking confirmed"
        );
        Ok(confirmed)
    }

    /// `confirmed -> active`, once the scheduled start has arrived.
    pub async fn start_booking(&self, id: BookingId, user_id: &str) -> AppResult<Booking> {
        let booking = self.load_owned(id, user_id).await?;
        ensure_edge(&booking, BookingStatus::Active, "start")?;
        if Utc::now() < booking.start_time {
            return Err(AppError::too_early(format!(
                "booking cannot be started before {}",
                booking.start_time
            )));
        }

        let started = self
            .advance(
                &booking,
                Some(user_id),
                BookingStatus::Active,
                BookingPatch::default(),
                "start",
            )
            .await?;

        info!(booking_id = %id, vehicle_id = %started.vehicle_id, "Booking started");
        self.notify_vehicle(&started, VehicleStatus::InUse);
        Ok(started)
    }

    /// `active -> completed`, recording the trip and its price.
    pub async fn complete_booking(
        &self,
        id: BookingId,
        user_id: &str,
        input: CompleteBooking,
    ) -> AppResult<Booking> {
        input.ensure_valid()?;
        let booking = self.load_owned(id, user_id).await?;
        ensure_edge(&booking, BookingStatus::Completed, "complete")?;

        let completed = self
            .advance(
                &booking,
                Some(user_id),
                BookingStatus::Completed,
                input.into_patch(Utc::now()),
                "complete",
            )
            .await?;

        info!(
            booking_id = %id,
            distance = ?completed.distance,
            duration = ?completed.duration,
            cost = ?completed.cost,
            "Booking completed"
        );
        self.notify_vehicle(&completed, VehicleStatus::Available);
        Ok(completed)
    }

    /// Cancel a booking that has not reached a terminal state.
    pub async fn cancel_booking(&self, id: BookingId, user_id: &str) -> AppResult<Booking> {
        let booking = self.load_owned(id, user_id).await?;
        ensure_edge(&booking, BookingStatus::Cancelled, "cancel")?;

        let cancelled = self
            .advance(
                &booking,
                Some(user_id),
                BookingStatus::Cancelled,
                BookingPatch::default(),
                "cancel",
            )
            .await?;

        info!(booking_id = %id, previous = %booking.status, "Booking cancelled");
        self.notify_vehicle(&cancelled, VehicleStatus::Available);
        Ok(cancelled)
    }

    async fn load_owned(&self, id: BookingId, user_id: &str) -> AppResult<Booking> {
        let booking = self.get_booking(id).await?;
        if !booking.is_owned_by(user_id) {
            return Err(AppError::unauthorized(format!(
                "booking {id} does not belong to user {user_id}"
            )));
        }
        Ok(booking)
    }

    async fn guarded_write(
        &self,
        booking: &Booking,
        owner: Option<&str>,
        from: &[BookingStatus],
        patch: &BookingPatch,
        action: &str,
    ) -> AppResult<Booking> {
        self.store
            .transition(booking.id, owner, from, patch)
            .await?
            .ok_or_else(|| {
                AppError::invalid_transition(format!(
                    "cannot {action} booking {}: status changed concurrently",
                    booking.id
                ))
            })
    }

    /// Write `patch` with its status set to `target`, guarded on every
    /// status that has an edge into `target`.
    async fn advance(
        &self,
        booking: &Booking,
        owner: Option<&str>,
        target: BookingStatus,
        mut patch: BookingPatch,
        action: &str,
    ) -> AppResult<Booking> {
        patch.status = Some(target);
        let from = BookingStatus::sources_of(target);
        self.guarded_write(booking, owner, &from, &patch, action).await
    }

    fn notify_vehicle(&self, booking: &Booking, status: VehicleStatus) {
        self.dispatcher
            .dispatch(StatusUpdate::new(booking.id, &booking.vehicle_id, status));
    }

    async fn bounded<T>(
        &self,
        service: &str,
        call: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| {
                AppError::external_service(format!(
                    "{service} did not answer within {} ms",
                    self.call_timeout.as_millis()
                ))
            })?
    }
}

fn ensure_edge(booking: &Booking, target: BookingStatus, action: &str) -> AppResult<()> {
    if booking.status.can_transition_to(target) {
        return Ok(());
    }
    Err(AppError::invalid_transition(format!(
        "cannot {action} booking with status: {}",
        booking.status
    )))
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;
    use tokio::sync::watch;

    use booking_core::config::DispatchConfig;
    use booking_core::error::ErrorKind;
    use booking_database::MemoryBookingStore;
    use booking_integration::{StaticUserValidator, StubVehicleCoordinator};

    use super::*;

    struct Harness {
        manager: BookingLifecycleManager,
        store: MemoryBookingStore,
        users: StaticUserValidator,
        vehicles: StubVehicleCoordinator,
        dispatcher: VehicleStatusDispatcher,
        shutdown: watch::Sender<bool>,
        worker: tokio::task::JoinHandle<()>,
    }

    impl Harness {
        fn new() -> Self {
            let store = MemoryBookingStore::new();
            let users = StaticUserValidator::new();
            let vehicles = StubVehicleCoordinator::new();
            let (shutdown, rx) = watch::channel(false);
            let (dispatcher, worker) = VehicleStatusDispatcher::spawn(
                Arc::new(vehicles.clone()),
                &DispatchConfig::default(),
                Duration::from_secs(1),
                rx,
            );
            let manager = BookingLifecycleManager::new(
                Arc::new(store.clone()),
                Arc::new(users.clone()),
                Arc::new(vehicles.clone()),
                dispatcher.clone(),
                Duration::from_secs(1),
            );
            Self {
                manager,
                store,
                users,
                vehicles,
                dispatcher,
                shutdown,
                worker,
            }
        }

        /// Stop the dispatcher and wait until queued updates are delivered.
        async fn drain(self) -> (StubVehicleCoordinator, VehicleStatusDispatcher) {
            self.shutdown.send(true).expect("signal");
            self.worker.await.expect("worker");
            (self.vehicles, self.dispatcher)
        }

        async fn booking_in(&self, status: BookingStatus) -> Booking {
            let booking = self
                .manager
                .create_booking(new_booking("u1", "v1"))
                .await
                .expect("create");
            if status == BookingStatus::Pending {
                return booking;
            }
            self.store
                .update(booking.id, &BookingPatch::status(status))
                .await
                .expect("force status")
        }
    }

    fn new_booking(user: &str, vehicle: &str) -> NewBooking {
        NewBooking {
            user_id: user.into(),
            vehicle_id: vehicle.into(),
            start_time: Utc::now() - ChronoDuration::minutes(1),
            pickup_latitude: 40.7128,
            pickup_longitude: -74.006,
            pickup_address: "1 Centre St".into(),
            dropoff_latitude: None,
            dropoff_longitude: None,
            dropoff_address: None,
        }
    }

    #[tokio::test]
    async fn test_create_persists_pending_booking() {
        let h = Harness::new();
        let booking = h
            .manager
            .create_booking(new_booking("u1", "v1"))
            .await
            .expect("create");

        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.cost.is_none() && booking.end_time.is_none());
        assert_eq!(h.manager.get_booking(booking.id).await.expect("get"), booking);

        let (vehicles, _) = h.drain().await;
        assert!(vehicles.status_calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_user_without_writing() {
        let h = Harness::new();
        h.users.reject("u1").await;

        let err = h
            .manager
            .create_booking(new_booking("u1", "v1"))
            .await
            .expect_err("invalid user");
        assert_eq!(err.kind, ErrorKind::InvalidUser);
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_rejects_unavailable_vehicle_without_writing() {
        let h = Harness::new();
        h.vehicles.mark_unavailable("v1").await;

        let err = h
            .manager
            .create_booking(new_booking("u1", "v1"))
            .await
            .expect_err("unavailable");
        assert_eq!(err.kind, ErrorKind::VehicleUnavailable);
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_surfaces_unreachable_user_service() {
        let h = Harness::new();
        h.users.set_unreachable(true);

        let err = h
            .manager
            .create_booking(new_booking("u1", "v1"))
            .await
            .expect_err("down");
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_coordinates() {
        let h = Harness::new();
        let mut input = new_booking("u1", "v1");
        input.pickup_longitude = 200.0;

        let err = h.manager.create_booking(input).await.expect_err("invalid");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_missing_booking() {
        let h = Harness::new();
        let err = h
            .manager
            .get_booking(BookingId::new())
            .await
            .expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_confirm_only_from_pending() {
        let h = Harness::new();
        let booking = h.booking_in(BookingStatus::Pending).await;
        let event = ConfirmationEvent {
            booking_id: booking.id,
            reference: Some("pay-1".into()),
        };

        let confirmed = h.manager.confirm_booking(event.clone()).await.expect("confirm");
        assert_eq!(confirmed.status, BookingStatus::Confirmed);

        let err = h.manager.confirm_booking(event).await.expect_err("twice");
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[tokio::test]
    async fn test_transitions_follow_state_machine() {
        let h = Harness::new();
        let targets = [
            BookingStatus::Confirmed,
            BookingStatus::Active,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ];
        for from in BookingStatus::ALL {
            for target in targets {
                let booking = h.booking_in(from).await;
                let result = match target {
                    BookingStatus::Confirmed => {
                        let event = ConfirmationEvent {
                            booking_id: booking.id,
                            reference: None,
                        };
                        h.manager.confirm_booking(event).await
                    }
                    BookingStatus::Active => h.manager.start_booking(booking.id, "u1").await,
                    BookingStatus::Completed => {
                        h.manager
                            .complete_booking(booking.id, "u1", CompleteBooking::default())
                            .await
                    }
                    _ => h.manager.cancel_booking(booking.id, "u1").await,
                };

                match result {
                    Ok(updated) => {
                        assert!(from.can_transition_to(target), "{from} -> {target}");
                        assert_eq!(updated.status, target);
                    }
                    Err(err) => {
                        assert!(!from.can_transition_to(target), "{from} -> {target}");
                        assert_eq!(err.kind, ErrorKind::InvalidTransition);
                        let stored = h.manager.get_booking(booking.id).await.expect("get");
                        assert_eq!(stored.status, from);
                    }
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_vehicle_service_times_out_without_writing() {
        let h = Harness::new();
        h.vehicles.delay_availability(Duration::from_secs(5)).await;

        let err = h
            .manager
            .create_booking(new_booking("u1", "v1"))
            .await
            .expect_err("timed out");

        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert!(err.message.contains("did not answer within 1000 ms"), "{}", err.message);
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_start_requires_confirmed() {
        let h = Harness::new();
        for status in [
            BookingStatus::Pending,
            BookingStatus::Active,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            let booking = h.booking_in(status).await;
            let err = h
                .manager
                .start_booking(booking.id, "u1")
                .await
                .expect_err("illegal start");
            assert_eq!(err.kind, ErrorKind::InvalidTransition, "from {status}");
        }
    }

    #[tokio::test]
    async fn test_start_before_scheduled_time_is_too_early() {
        let h = Harness::new();
        let mut input = new_booking("u1", "v1");
        input.start_time = Utc::now() + ChronoDuration::hours(1);
        let booking = h.manager.create_booking(input).await.expect("create");
        h.store
            .update(booking.id, &BookingPatch::status(BookingStatus::Confirmed))
            .await
            .expect("confirm");

        let err = h
            .manager
            .start_booking(booking.id, "u1")
            .await
            .expect_err("too early");
        assert_eq!(err.kind, ErrorKind::TooEarly);
        let stored = h.manager.get_booking(booking.id).await.expect("get");
        assert_eq!(stored.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_start_marks_vehicle_in_use() {
        let h = Harness::new();
        let booking = h.booking_in(BookingStatus::Confirmed).await;

        let started = h
            .manager
            .start_booking(booking.id, "u1")
            .await
            .expect("start");
        assert_eq!(started.status, BookingStatus::Active);

        let (vehicles, _) = h.drain().await;
        assert_eq!(vehicles.status_of("v1").await, Some(VehicleStatus::InUse));
    }

    #[tokio::test]
    async fn test_complete_prices_trip_and_frees_vehicle() {
        let h = Harness::new();
        let booking = h.booking_in(BookingStatus::Active).await;

        let completed = h
            .manager
            .complete_booking(
                booking.id,
                "u1",
                CompleteBooking {
                    dropoff_latitude: Some(40.73),
                    dropoff_longitude: Some(-73.99),
                    dropoff_address: Some("Union Sq".into()),
                    distance: Some(10.0),
                    duration: Some(20),
                },
            )
            .await
            .expect("complete");

        assert_eq!(completed.status, BookingStatus::Completed);
        assert_eq!(completed.cost, Some(20.0));
        assert!(completed.end_time.is_some());
        assert_eq!(completed.dropoff_address.as_deref(), Some("Union Sq"));

        let (vehicles, _) = h.drain().await;
        assert_eq!(
            vehicles.status_of("v1").await,
            Some(VehicleStatus::Available)
        );
    }

    #[tokio::test]
    async fn test_complete_requires_active() {
        let h = Harness::new();
        let booking = h.booking_in(BookingStatus::Confirmed).await;
        let err = h
            .manager
            .complete_booking(booking.id, "u1", CompleteBooking::default())
            .await
            .expect_err("not active");
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[tokio::test]
    async fn test_cancel_from_every_live_status() {
        let h = Harness::new();
        for status in BookingStatus::CANCELLABLE {
            let booking = h.booking_in(status).await;
            let cancelled = h
                .manager
                .cancel_booking(booking.id, "u1")
                .await
                .expect("cancel");
            assert_eq!(cancelled.status, BookingStatus::Cancelled);
        }
    }

    #[tokio::test]
    async fn test_cancel_terminal_booking_fails() {
        let h = Harness::new();
        for status in [BookingStatus::Completed, BookingStatus::Cancelled] {
            let booking = h.booking_in(status).await;
            let err = h
                .manager
                .cancel_booking(booking.id, "u1")
                .await
                .expect_err("terminal");
            assert_eq!(err.kind, ErrorKind::InvalidTransition);
        }
    }

    #[tokio::test]
    async fn test_ownership_is_checked_in_every_status() {
        let h = Harness::new();
        for status in BookingStatus::ALL {
            let booking = h.booking_in(status).await;

            let start = h.manager.start_booking(booking.id, "intruder").await;
            let complete = h
                .manager
                .complete_booking(booking.id, "intruder", CompleteBooking::default())
                .await;
            let cancel = h.manager.cancel_booking(booking.id, "intruder").await;
            let update = h
                .manager
                .update_booking(booking.id, "intruder", UpdateBooking::default())
                .await;

            for result in [start, complete, cancel, update] {
                assert_eq!(
                    result.expect_err("not owner").kind,
                    ErrorKind::Unauthorized,
                    "status {status}"
                );
            }
            let stored = h.manager.get_booking(booking.id).await.expect("get");
            assert_eq!(stored.status, status);
        }
    }

    #[tokio::test]
    async fn test_update_only_touches_dropoff_of_live_booking() {
        let h = Harness::new();
        let booking = h.booking_in(BookingStatus::Confirmed).await;

        let updated = h
            .manager
            .update_booking(
                booking.id,
                "u1",
                UpdateBooking {
                    dropoff_latitude: Some(40.75),
                    dropoff_longitude: Some(-73.98),
                    dropoff_address: Some("Grand Central".into()),
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.status, BookingStatus::Confirmed);
        assert_eq!(updated.dropoff_address.as_deref(), Some("Grand Central"));

        let done = h.booking_in(BookingStatus::Completed).await;
        let err = h
            .manager
            .update_booking(done.id, "u1", UpdateBooking::default())
            .await
            .expect_err("terminal");
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[tokio::test]
    async fn test_vehicle_failure_does_not_fail_transition() {
        let h = Harness::new();
        h.vehicles.fail_status_updates(true);
        let booking = h.booking_in(BookingStatus::Confirmed).await;

        let cancelled = h
            .manager
            .cancel_booking(booking.id, "u1")
            .await
            .expect("cancel despite vehicle failure");
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let (_, dispatcher) = h.drain().await;
        assert_eq!(dispatcher.metrics().failed, 1);
        assert_eq!(dispatcher.dead_letters().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_completion_succeeds_once() {
        let h = Harness::new();
        let booking = h.booking_in(BookingStatus::Active).await;

        let attempts = (0..2).map(|_| {
            let manager = h.manager.clone();
            tokio::spawn(async move {
                manager
                    .complete_booking(
                        booking.id,
                        "u1",
                        CompleteBooking {
                            distance: Some(5.0),
                            duration: Some(10),
                            ..CompleteBooking::default()
                        },
                    )
                    .await
            })
        });
        let results: Vec<AppResult<Booking>> = futures::future::join_all(attempts)
            .await
            .into_iter()
            .map(|r| r.expect("join"))
            .collect();

        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        let failure = results
            .into_iter()
            .find_map(|r| r.err())
            .expect("one failure");
        assert_eq!(failure.kind, ErrorKind::InvalidTransition);

        let stored = h.manager.get_booking(booking.id).await.expect("get");
        assert_eq!(stored.cost, Some(10.0));
    }

    #[tokio::test]
    async fn test_full_lifecycle_scenario() {
        let h = Harness::new();
        let booking = h
            .manager
            .create_booking(new_booking("u1", "v1"))
            .await
            .expect("create");
        h.manager
            .confirm_booking(ConfirmationEvent {
                booking_id: booking.id,
                reference: None,
            })
            .await
            .expect("confirm");
        h.manager
            .start_booking(booking.id, "u1")
            .await
            .expect("start");
        let completed = h
            .manager
            .complete_booking(
                booking.id,
                "u1",
                CompleteBooking {
                    distance: Some(10.0),
                    duration: Some(20),
                    ..CompleteBooking::default()
                },
            )
            .await
            .expect("complete");
        assert_eq!(completed.cost, Some(20.0));

        let err = h
            .manager
            .cancel_booking(booking.id, "u1")
            .await
            .expect_err("completed");
        assert_eq!(err.kind, ErrorKind::InvalidTransition);

        let (vehicles, _) = h.drain().await;
        assert_eq!(
            vehicles.status_calls().await,
            vec![
                ("v1".to_string(), VehicleStatus::InUse),
                ("v1".to_string(), VehicleStatus::Available),
            ]
        );
    }
}
