//! Best-effort delivery of vehicle status changes.
//!
//! Lifecycle transitions hand a [`StatusUpdate`] to the dispatcher and move
//! on. A single worker task forwards updates to the vehicle service; any
//! failure is logged, counted, and kept in a bounded dead-letter log. None
//! of this feeds back into the transition that produced the update.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use booking_core::config::DispatchConfig;
use booking_core::traits::VehicleCoordinator;
use booking_core::types::{BookingId, VehicleStatus};

/// A vehicle status change requested by a booking transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub booking_id: BookingId,
    pub vehicle_id: String,
    pub status: VehicleStatus,
}

impl StatusUpdate {
    pub fn new(
        booking_id: BookingId,
        vehicle_id: impl Into<String>,
        status: VehicleStatus,
    ) -> Self {
        Self {
            booking_id,
            vehicle_id: vehicle_id.into(),
            status,
        }
    }
}

/// An update that could not be delivered.
#[derive(Debug, Clone, Serialize)]
pub struct DeadLetter {
    pub update: StatusUpdate,
    pub reason: String,
    pub failed_at: DateTime<Utc>,
}

/// Delivery counters.
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Updates accepted onto the queue
    pub enqueued: AtomicU64,
    /// Updates the vehicle service acknowledged
    pub delivered: AtomicU64,
    /// Updates the vehicle service rejected or did not answer in time
    pub failed: AtomicU64,
    /// Updates never queued (queue full or worker stopped)
    pub dropped: AtomicU64,
}

impl DispatchMetrics {
    /// Get a snapshot of all counters
    pub fn snapshot(&self) -> DispatchSnapshot {
        DispatchSnapshot {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`DispatchMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSnapshot {
    pub enqueued: u64,
    pub delivered: u64,
    pub failed: u64,
    pub dropped: u64,
}

#[derive(Debug)]
struct DeadLetterLog {
    entries: Mutex<VecDeque<DeadLetter>>,
    capacity: usize,
}

impl DeadLetterLog {
    fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn record(&self, update: StatusUpdate, reason: String) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(DeadLetter {
            update,
            reason,
            failed_at: Utc::now(),
        });
    }

    fn entries(&self) -> Vec<DeadLetter> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}

/// Handle used by the lifecycle manager to request vehicle status changes.
#[derive(Debug, Clone)]
pub struct VehicleStatusDispatcher {
    tx: mpsc::Sender<StatusUpdate>,
    metrics: Arc<DispatchMetrics>,
    dead_letters: Arc<DeadLetterLog>,
}

/// The task that drains the dispatch queue.
pub struct DispatchWorker {
    rx: mpsc::Receiver<StatusUpdate>,
    coordinator: Arc<dyn VehicleCoordinator>,
    metrics: Arc<DispatchMetrics>,
    dead_letters: Arc<DeadLetterLog>,
    call_timeout: Duration,
}

impl VehicleStatusDispatcher {
    /// Create a dispatcher handle and the worker that serves it.
    pub fn new(
        coordinator: Arc<dyn VehicleCoordinator>,
        config: &DispatchConfig,
        call_timeout: Duration,
    ) -> (Self, DispatchWorker) {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let metrics = Arc::new(DispatchMetrics::default());
        let dead_letters = Arc::new(DeadLetterLog::new(config.dead_letter_capacity));

        let handle = Self {
            tx,
            metrics: Arc::clone(&metrics),
            dead_letters: Arc::clone(&dead_letters),
        };
        let worker = DispatchWorker {
            rx,
            coordinator,
            metrics,
            dead_letters,
            call_timeout,
        };
        (handle, worker)
    }

    /// Create a dispatcher and spawn its worker on the current runtime.
    pub fn spawn(
        coordinator: Arc<dyn VehicleCoordinator>,
        config: &DispatchConfig,
        call_timeout: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> (Self, JoinHandle<()>) {
        let (handle, worker) = Self::new(coordinator, config, call_timeout);
        let task = tokio::spawn(worker.run(shutdown));
        (handle, task)
    }

    /// Queue an update without waiting for delivery.
    pub fn dispatch(&self, update: StatusUpdate) {
        match self.tx.try_send(update) {
            Ok(()) => {
                self.metrics.enqueued.fetch_add(1, Ordering::Relaxed);
            }
            Err(mpsc::error::TrySendError::Full(update)) => {
                self.drop_update(update, "dispatch queue full");
            }
            Err(mpsc::error::TrySendError::Closed(update)) => {
                self.drop_update(update, "dispatcher stopped");
            }
        }
    }

    fn drop_update(&self, update: StatusUpdate, reason: &str) {
        warn!(
            booking_id = %update.booking_id,
            vehicle_id = %update.vehicle_id,
            status = %update.status,
            reason,
            "Vehicle status update dropped"
        );
        self.metrics.dropped.fetch_add(1, Ordering::Relaxed);
        self.dead_letters.record(update, reason.to_string());
    }

    /// Current delivery counters.
    pub fn metrics(&self) -> DispatchSnapshot {
        self.metrics.snapshot()
    }

    /// Undeliverable updates, oldest first.
    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.dead_letters.entries()
    }
}

impl DispatchWorker {
    /// Deliver queued updates until `shutdown` fires, then drain the queue.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("Vehicle status dispatcher started");

        loop {
            tokio::select! {
                biased;
                next = self.rx.recv() => match next {
                    Some(update) => self.deliver(update).await,
                    None => break,
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Vehicle status dispatcher received shutdown signal");
                        break;
                    }
                }
            }
        }

        self.rx.close();
        while let Some(update) = self.rx.recv().await {
            self.deliver(update).await;
        }

        info!(metrics = ?self.metrics.snapshot(), "Vehicle status dispatcher stopped");
    }

    async fn deliver(&self, update: StatusUpdate) {
        let call = self
            .coordinator
            .set_status(&update.vehicle_id, update.status);

        let reason = match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(())) => {
                self.metrics.delivered.fetch_add(1, Ordering::Relaxed);
                debug!(
                    booking_id = %update.booking_id,
                    vehicle_id = %update.vehicle_id,
                    status = %update.status,
                    "Vehicle status delivered"
                );
                return;
            }
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!(
                "vehicle service did not answer within {} ms",
                self.call_timeout.as_millis()
            ),
        };

        warn!(
            booking_id = %update.booking_id,
            vehicle_id = %update.vehicle_id,
            status = %update.status,
            reason = %reason,
            "Vehicle status update failed"
        );
        self.metrics.failed.fetch_add(1, Ordering::Relaxed);
        self.dead_letters.record(update, reason);
    }
}
