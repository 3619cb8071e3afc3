// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polling period for a configured switch.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Seconds between two polls of the same device (5-300).
///
/// # Examples
///
/// ```
/// use mystrom_lib::types::ScanInterval;
///
/// let interval = ScanInterval::new(60).unwrap();
/// assert_eq!(interval.seconds(), 60);
/// assert_eq!(ScanInterval::default().seconds(), 30);
///
/// assert!(ScanInterval::new(4).is_err());
/// assert!(ScanInterval::new(301).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ScanInterval(u16);

impl ScanInterval {
    /// Shortest allowed interval.
    pub const MIN: Self = Self(5);

    /// Longest allowed interval.
    pub const MAX: Self = Self(300);

    /// Interval used when none is configured.
    pub const DEFAULT: Self = Self(30);

    /// Creates a new scan interval.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::ScanIntervalOutOfRange` if `seconds` is outside
    /// `[5, 300]`.
    pub fn new(seconds: u64) -> Result<Self, ValueError> {
        match u16::try_from(seconds) {
            Ok(s) if (Self::MIN.0..=Self::MAX.0).contains(&s) => Ok(Self(s)),
            _ => Err(ValueError::ScanIntervalOutOfRange {
                min: Self::MIN.0,
                max: Self::MAX.0,
                actual: seconds,
            }),
        }
    }

    /// Returns the interval in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u16 {
        self.0
    }

    /// Returns the interval as a `Duration`.
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }
}

impl Default for ScanInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ScanInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl TryFrom<u64> for ScanInterval {
    type Error = ValueError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScanInterval> for u64 {
    fn from(value: ScanInterval) -> Self {
        u64::from(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_interval_bounds_inclusive() {
        assert_eq!(ScanInterval::new(5).unwrap(), ScanInterval::MIN);
        assert_eq!(ScanInterval::new(300).unwrap(), ScanInterval::MAX);
    }

    #[test]
    fn scan_interval_out_of_range() {
        assert_eq!(
            ScanInterval::new(0),
            Err(ValueError::ScanIntervalOutOfRange {
                min: 5,
                max: 300,
                actual: 0
            })
        );
        assert!(ScanInterval::new(u64::from(u16::MAX) + 5).is_err());
    }

    #[test]
    fn scan_interval_duration() {
        assert_eq!(
            ScanInterval::DEFAULT.as_duration(),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn scan_interval_display() {
        assert_eq!(ScanInterval::new(45).unwrap().to_string(), "45s");
    }

    #[test]
    fn scan_interval_serde_validates() {
        let ok: ScanInterval = serde_json::from_str("120").unwrap();
        assert_eq!(ok.seconds(), 120);
        assert!(serde_json::from_str::<ScanInterval>("3").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "120");
    }
}
