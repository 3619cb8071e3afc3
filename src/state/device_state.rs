// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized switch state.

use serde::Serialize;

/// One successful poll of a switch.
///
/// A `DeviceState` is produced once per successful poll and never mutated
/// afterwards; the coordinator replaces the whole value. Power is never
/// negative.
///
/// # Examples
///
/// ```
/// use mystrom_lib::state::DeviceState;
///
/// let state = DeviceState::new(42.5, true, 23.1);
/// assert!(state.relay());
/// assert_eq!(state.power(), 42.5);
///
/// // Small negative readings around zero load are clamped.
/// assert_eq!(DeviceState::new(-0.2, false, 20.0).power(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DeviceState {
    power: f64,
    relay: bool,
    temperature: f64,
}

impl DeviceState {
    /// Creates a new state record.
    #[must_use]
    pub fn new(power: f64, relay: bool, temperature: f64) -> Self {
        Self {
            power: power.max(0.0),
            relay,
            temperature,
        }
    }

    /// Current power draw in Watts.
    #[must_use]
    pub fn power(&self) -> f64 {
        self.power
    }

    /// Whether the relay is closed.
    #[must_use]
    pub fn relay(&self) -> bool {
        self.relay
    }

    /// Device temperature in degrees Celsius.
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}
