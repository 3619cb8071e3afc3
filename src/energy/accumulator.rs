// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Trapezoidal integration of power samples into energy.

use std::time::Duration;

const WATT_SECONDS_PER_KWH: f64 = 3_600_000.0;

/// Cumulative energy derived from successive power readings.
///
/// Each sample adds `(previous + current) / 2 * elapsed`. When both the
/// previous and the current sample are zero the sample is skipped, so an
/// idle device never accumulates rounding noise. The total never decreases.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use mystrom_lib::energy::EnergyAccumulator;
///
/// let mut energy = EnergyAccumulator::seeded(100.0);
/// energy.integrate(200.0, Duration::from_secs(30));
///
/// // 150 W for 30 s
/// assert!((energy.total_kwh() - 0.00125).abs() < 1e-12);
/// assert_eq!(energy.rounded_kwh(), 0.001);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyAccumulator {
    total_kwh: f64,
    last_power_seen: f64,
}

impl EnergyAccumulator {
    /// Creates an empty accumulator with no previous sample.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty accumulator whose previous sample is `power` Watts.
    #[must_use]
    pub fn seeded(power: f64) -> Self {
        Self {
            total_kwh: 0.0,
            last_power_seen: power.max(0.0),
        }
    }

    /// Folds one power sample in and returns the energy added, in kWh.
    pub fn integrate(&mut self, power: f64, elapsed: Duration) -> f64 {
        let power = power.max(0.0);
        let previous = std::mem::replace(&mut self.last_power_seen, power);

        if previous == 0.0 && power == 0.0 {
            return 0.0;
        }

        let increment = (previous + power) / 2.0 * elapsed.as_secs_f64() / WATT_SECONDS_PER_KWH;
        self.total_kwh += increment;
        increment
    }

    /// Total energy in kWh at full precision.
    #[must_use]
    pub fn total_kwh(&self) -> f64 {
        self.total_kwh
    }

    /// Total energy in kWh rounded to three decimals.
    #[must_use]
    pub fn rounded_kwh(&self) -> f64 {
        (self.total_kwh * 1000.0).round() / 1000.0
    }

    /// The most recent power sample in Watts.
    #[must_use]
    pub fn last_power_seen(&self) -> f64 {
        self.last_power_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THIRTY_SECONDS: Duration = Duration::from_secs(30);

    #[test]
    fn zero_power_is_idempotent() {
        let mut energy = EnergyAccumulator::new();
        for _ in 0..1000 {
            assert!(energy.integrate(0.0, THIRTY_SECONDS).abs() < f64::EPSILON);
        }
        assert!(energy.total_kwh().abs() < f64::EPSILON);
    }

    #[test]
    fn ramp_from_zero_accumulates() {
        let mut energy = EnergyAccumulator::new();
        let added = energy.integrate(100.0, THIRTY_SECONDS);
        // 50 W average for 30 s
        assert!((added - 50.0 * 30.0 / 3_600_000.0).abs() < 1e-15);
    }

    #[test]
    fn ramp_to_zero_accumulates() {
        let mut energy = EnergyAccumulator::seeded(100.0);
        let added = energy.integrate(0.0, THIRTY_SECONDS);
        assert!(added > 0.0);
        assert!(energy.last_power_seen().abs() < f64::EPSILON);
    }

    #[test]
    fn hundred_then_two_hundred() {
        let mut energy = EnergyAccumulator::new();
        energy.integrate(100.0, THIRTY_SECONDS);
        let before = energy.total_kwh();
        let added = energy.integrate(200.0, THIRTY_SECONDS);

        assert!((added - 0.00125).abs() < 1e-12);
        assert!((energy.total_kwh() - before - 0.00125).abs() < 1e-12);
    }

    #[test]
    fn rounding_keeps_full_precision_internally() {
        let mut energy = EnergyAccumulator::seeded(100.0);
        energy.integrate(200.0, THIRTY_SECONDS);
        assert!((energy.rounded_kwh() - 0.001).abs() < f64::EPSILON);
        assert!(energy.total_kwh() > energy.rounded_kwh());
    }

    #[test]
    fn total_never_decreases() {
        let mut energy = EnergyAccumulator::new();
        let mut previous = 0.0;
        for power in [5.0, 0.0, 0.0, 2300.0, 12.5, -1.0, 0.0] {
            energy.integrate(power, THIRTY_SECONDS);
            assert!(energy.total_kwh() >= previous);
            previous = energy.total_kwh();
        }
    }

    #[test]
    fn one_kilowatt_for_an_hour() {
        let mut energy = EnergyAccumulator::seeded(1000.0);
        energy.integrate(1000.0, Duration::from_secs(3600));
        assert!((energy.total_kwh() - 1.0).abs() < 1e-12);
    }
}
