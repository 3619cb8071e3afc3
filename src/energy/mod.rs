// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Energy derived from power readings.
//!
//! The switch reports instantaneous power but no energy counter. An
//! [`EnergyTracker`] subscribes to a coordinator and folds every successful
//! poll into an [`EnergyAccumulator`].
//!
//! The total lives in memory only and starts from zero on every process
//! start. It is an estimate, not a metered reading.

mod accumulator;

pub use accumulator::EnergyAccumulator;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::coordinator::PollCoordinator;
use crate::protocol::SwitchApi;
use crate::state::PollOutcome;
use crate::subscription::Subscription;

/// Which elapsed time is used for each sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EnergyClock {
    /// Every sample counts as exactly one configured scan interval.
    ///
    /// Delayed or skipped polls make the total drift.
    #[default]
    ConfiguredInterval,
    /// Each sample uses the time measured since the previous sample.
    MeasuredElapsed,
}

#[derive(Debug)]
struct TrackerState {
    accumulator: EnergyAccumulator,
    last_sample_at: Instant,
}

/// Keeps an [`EnergyAccumulator`] in sync with a coordinator.
///
/// Failed polls are ignored. The tracker is seeded with the coordinator's
/// current power reading, if any, so attaching never adds energy by itself.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use mystrom_lib::coordinator::PollCoordinator;
/// use mystrom_lib::energy::{EnergyClock, EnergyTracker};
/// use mystrom_lib::protocol::HttpClient;
/// use mystrom_lib::types::ScanInterval;
///
/// # async fn example() -> mystrom_lib::Result<()> {
/// let coordinator = Arc::new(PollCoordinator::new(
///     HttpClient::new("192.168.1.100")?,
///     ScanInterval::default(),
/// ));
/// coordinator.first_refresh().await?;
///
/// let energy = EnergyTracker::attach(&coordinator, EnergyClock::ConfiguredInterval);
/// coordinator.request_refresh().await;
/// println!("{} kWh", energy.rounded_kwh());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EnergyTracker {
    state: Arc<Mutex<TrackerState>>,
    clock: EnergyClock,
    _subscription: Subscription,
}

impl EnergyTracker {
    /// Subscribes a new tracker to `coordinator`.
    pub fn attach<A: SwitchApi>(coordinator: &PollCoordinator<A>, clock: EnergyClock) -> Self {
        let seed = coordinator.data().map_or(0.0, |s| s.power());
        let state = Arc::new(Mutex::new(TrackerState {
            accumulator: EnergyAccumulator::seeded(seed),
            last_sample_at: Instant::now(),
        }));

        let interval = coordinator.interval().as_duration();
        let sink = Arc::clone(&state);
        let subscription = coordinator.subscribe(move |outcome, _| {
            if let PollOutcome::Success(device) = outcome {
                let mut tracker = sink.lock();
                let now = Instant::now();
                let elapsed = match clock {
                    EnergyClock::ConfiguredInterval => interval,
                    EnergyClock::MeasuredElapsed => now.duration_since(tracker.last_sample_at),
                };
                tracker.last_sample_at = now;
                let added = tracker.accumulator.integrate(device.power(), elapsed);
                tracing::trace!(
                    power = device.power(),
                    elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    added_kwh = added,
                    "Integrated power sample"
                );
            }
        });

        Self {
            state,
            clock,
            _subscription: subscription,
        }
    }

    /// Returns the clock this tracker integrates with.
    #[must_use]
    pub fn clock(&self) -> EnergyClock {
        self.clock
    }

    /// Returns a copy of the accumulator.
    #[must_use]
    pub fn accumulator(&self) -> EnergyAccumulator {
        self.state.lock().accumulator
    }

    /// Total energy in kWh at full precision.
    #[must_use]
    pub fn total_kwh(&self) -> f64 {
        self.state.lock().accumulator.total_kwh()
    }

    /// Total energy in kWh rounded to three decimals.
    #[must_use]
    pub fn rounded_kwh(&self) -> f64 {
        self.state.lock().accumulator.rounded_kwh()
    }

    /// Time since the last folded sample.
    #[must_use]
    pub fn since_last_sample(&self) -> Duration {
        self.state.lock().last_sample_at.elapsed()
    }
}
