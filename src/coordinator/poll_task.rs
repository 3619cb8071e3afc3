// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background timer driving a coordinator.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::PollCoordinator;
use crate::protocol::SwitchApi;

/// Handle to a running poll loop.
///
/// Dropping the handle or calling [`shutdown`](Self::shutdown) cancels the
/// timer. A request in flight at that moment is dropped and its result
/// discarded.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stops the poll loop.
    pub fn shutdown(self) {
        self.task.abort();
    }

    /// Returns `true` once the loop has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<A: SwitchApi> PollCoordinator<A> {
    /// Starts polling every [`interval`](Self::interval).
    ///
    /// The first tick fires one interval from now; the initial poll is
    /// [`first_refresh`](Self::first_refresh)'s job. Ticks that fall behind
    /// are delayed, not bunched. The loop holds only a weak reference and
    /// ends on its own once the coordinator is dropped.
    #[must_use = "dropping the handle stops polling"]
    pub fn spawn(self: &Arc<Self>) -> PollHandle {
        let period = self.interval.as_duration();
        let coordinator = Arc::downgrade(self);
        let host = self.api.host().to_string();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(coordinator) = coordinator.upgrade() else {
                    break;
                };
                coordinator.request_refresh().await;
            }

            tracing::debug!(host = %host, "Poll loop stopped");
        });

        tracing::debug!(host = %self.api.host(), interval = %self.interval, "Poll loop started");
        PollHandle { task }
    }
}
