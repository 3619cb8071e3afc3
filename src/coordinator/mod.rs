// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic polling of a single switch.
//!
//! A [`PollCoordinator`] owns the one authoritative [`Snapshot`] for a
//! device. Every poll replaces the snapshot under a write lock and then
//! notifies subscribers synchronously, so all views observe the same record
//! before the refresh call returns.
//!
//! At most one poll is in flight per coordinator. A refresh requested while
//! another one runs waits for it and returns without a second network call.
//! A refresh requested while a relay command holds the device still polls
//! once the command is done.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mystrom_lib::coordinator::PollCoordinator;
//! use mystrom_lib::protocol::HttpClient;
//! use mystrom_lib::types::ScanInterval;
//!
//! # async fn example() -> mystrom_lib::Result<()> {
//! let client = HttpClient::new("192.168.1.100")?;
//! let coordinator = Arc::new(PollCoordinator::new(client, ScanInterval::new(10)?));
//!
//! // Mandatory: fails if the device is unreachable
//! coordinator.first_refresh().await?;
//!
//! // Poll every 10 seconds until the handle is dropped
//! let handle = coordinator.spawn();
//! # drop(handle);
//! # Ok(())
//! # }
//! ```

mod poll_task;

pub use poll_task::PollHandle;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::error::{Error, SetupError};
use crate::protocol::SwitchApi;
use crate::state::{Availability, DeviceState, PollOutcome, Snapshot};
use crate::subscription::{CallbackRegistry, Subscription};
use crate::types::{RelayCommand, ScanInterval};

/// Shared owner of the latest poll result for one switch.
#[derive(Debug)]
pub struct PollCoordinator<A: SwitchApi> {
    api: Arc<A>,
    interval: ScanInterval,
    snapshot: RwLock<Snapshot>,
    /// Held for the duration of a network poll or relay command.
    refresh_gate: Mutex<()>,
    /// Set while the gate is held by a poll rather than a command.
    polling: AtomicBool,
    callbacks: Arc<CallbackRegistry>,
}

impl<A: SwitchApi> PollCoordinator<A> {
    /// Creates a coordinator in the `Uninitialized` state.
    #[must_use]
    pub fn new(api: A, interval: ScanInterval) -> Self {
        Self::with_shared_api(Arc::new(api), interval)
    }

    /// Creates a coordinator around a client that is also used elsewhere.
    #[must_use]
    pub fn with_shared_api(api: Arc<A>, interval: ScanInterval) -> Self {
        Self {
            api,
            interval,
            snapshot: RwLock::new(Snapshot::uninitialized()),
            refresh_gate: Mutex::new(()),
            polling: AtomicBool::new(false),
            callbacks: Arc::new(CallbackRegistry::new()),
        }
    }

    /// Returns the client used for polling.
    #[must_use]
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Returns the configured polling period.
    #[must_use]
    pub fn interval(&self) -> ScanInterval {
        self.interval
    }

    /// Returns a consistent snapshot of the coordinator.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.read().clone()
    }

    /// Returns the last known device state.
    #[must_use]
    pub fn data(&self) -> Option<DeviceState> {
        self.snapshot.read().state().copied()
    }

    /// Whether the last poll succeeded.
    #[must_use]
    pub fn last_update_succeeded(&self) -> bool {
        self.snapshot.read().last_update_succeeded()
    }

    /// Registers a callback run after every poll.
    ///
    /// The callback stays registered until the returned guard is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&PollOutcome, &Snapshot) + Send + Sync + 'static,
    {
        let id = self.callbacks.on_update(callback);
        Subscription::new(id, &self.callbacks)
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Performs the mandatory first poll.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InitialRefresh`] wrapping the client error if the
    /// device cannot be polled. Unlike steady-state polling, this failure is
    /// propagated so setup can abort.
    pub async fn first_refresh(&self) -> Result<(), Error> {
        let _guard = self.refresh_gate.lock().await;
        let _polling = PollingFlag::raise(&self.polling);

        match self.api.get_state().await {
            Ok(state) => {
                self.apply(&PollOutcome::Success(state));
                Ok(())
            }
            Err(err) => {
                self.apply(&PollOutcome::Failure(err.to_string()));
                Err(SetupError::InitialRefresh(Box::new(err)).into())
            }
        }
    }

    /// Polls now unless a poll is already running.
    ///
    /// If another refresh is in flight this waits for it to finish and
    /// returns without issuing a request of its own. If a relay command is
    /// in flight this waits for it and then polls. Errors never reach the
    /// caller; they only flip [`last_update_succeeded`](Self::last_update_succeeded).
    pub async fn request_refresh(&self) {
        if let Ok(_guard) = self.refresh_gate.try_lock() {
            self.poll().await;
        } else if self.polling.load(Ordering::SeqCst) {
            tracing::debug!(host = %self.api.host(), "Refresh already in flight, coalescing");
            drop(self.refresh_gate.lock().await);
        } else {
            let _guard = self.refresh_gate.lock().await;
            self.poll().await;
        }
    }

    /// Sends a relay command without overlapping a poll.
    ///
    /// Waits for any poll in flight, then issues the command. Returns the
    /// client's best-effort result; nothing is refreshed here.
    pub async fn send_relay(&self, command: RelayCommand) -> bool {
        let _guard = self.refresh_gate.lock().await;
        match command {
            RelayCommand::On => self.api.turn_on().await,
            RelayCommand::Off => self.api.turn_off().await,
            RelayCommand::Toggle => self.api.toggle().await,
        }
    }

    /// Runs one poll. The caller must hold `refresh_gate`.
    async fn poll(&self) {
        let _polling = PollingFlag::raise(&self.polling);
        let outcome = match self.api.get_state().await {
            Ok(state) => PollOutcome::Success(state),
            Err(err) => {
                tracing::warn!(host = %self.api.host(), error = %err, "Poll failed");
                PollOutcome::Failure(err.to_string())
            }
        };
        self.apply(&outcome);
    }

    /// Replaces the snapshot and notifies subscribers.
    fn apply(&self, outcome: &PollOutcome) {
        let snapshot = {
            let mut current = self.snapshot.write();
            match outcome {
                PollOutcome::Success(state) => {
                    if current.availability == Availability::Unavailable {
                        tracing::info!(host = %self.api.host(), "Device available again");
                    }
                    *current = Snapshot {
                        state: Some(Arc::new(*state)),
                        availability: Availability::Available,
                        last_success_at: Some(Utc::now()),
                        last_error: None,
                    };
                }
                PollOutcome::Failure(reason) => {
                    if current.availability == Availability::Available {
                        current.availability = Availability::Unavailable;
                    }
                    current.last_error = Some(reason.clone());
                }
            }
            current.clone()
        };

        self.callbacks.dispatch(outcome, &snapshot);
    }
}

/// Marks the gate as held by a poll. Lowered on drop, including when the
/// poll future is cancelled.
struct PollingFlag<'a>(&'a AtomicBool);

impl<'a> PollingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for PollingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
