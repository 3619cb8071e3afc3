// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinator availability and the shared snapshot handed to views.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::DeviceState;

/// Lifecycle state of a poll coordinator.
///
/// ```text
/// Uninitialized --(first refresh ok)--> Available <--> Unavailable
/// ```
///
/// `Unavailable` keeps the last known [`DeviceState`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    /// No poll has succeeded yet.
    Uninitialized,
    /// The last poll succeeded.
    Available,
    /// The last poll failed.
    Unavailable,
}

impl Availability {
    /// Returns `true` if views should render as available.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Result of one poll as seen by subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The device answered with a new state.
    Success(DeviceState),
    /// The poll failed; the message describes why.
    Failure(String),
}

impl PollOutcome {
    /// Returns `true` for [`PollOutcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// A consistent view of the coordinator at one point in time.
///
/// The state is shared behind an `Arc`, so every view that reads the same
/// snapshot sees the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub(crate) state: Option<Arc<DeviceState>>,
    pub(crate) availability: Availability,
    pub(crate) last_success_at: Option<DateTime<Utc>>,
    pub(crate) last_error: Option<String>,
}

impl Snapshot {
    pub(crate) fn uninitialized() -> Self {
        Self {
            state: None,
            availability: Availability::Uninitialized,
            last_success_at: None,
            last_error: None,
        }
    }

    /// The last known device state, stale if the last poll failed.
    #[must_use]
    pub fn state(&self) -> Option<&DeviceState> {
        self.state.as_deref()
    }

    /// Whether the last poll succeeded.
    #[must_use]
    pub fn last_update_succeeded(&self) -> bool {
        self.availability.is_available()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// When the last successful poll completed.
    #[must_use]
    pub fn last_success_at(&self) -> Option<DateTime<Utc>> {
        self.last_success_at
    }

    /// Why the last poll failed, if it did.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_snapshot_unavailable() {
        let snapshot = Snapshot::uninitialized();
        assert!(!snapshot.last_update_succeeded());
        assert!(snapshot.state().is_none());
        assert_eq!(snapshot.availability(), Availability::Uninitialized);
    }

    #[test]
    fn only_available_is_available() {
        assert!(Availability::Available.is_available());
        assert!(!Availability::Unavailable.is_available());
        assert!(!Availability::Uninitialized.is_available());
    }
}
