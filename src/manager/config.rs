// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted configuration of one switch.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::protocol::HttpConfig;
use crate::types::ScanInterval;

/// What the host stores for a configured switch.
///
/// Deserialization rejects a blank host and an out-of-range interval, so a
/// stored entry that loads is always usable.
///
/// # Examples
///
/// ```
/// use mystrom_lib::manager::SwitchConfig;
/// use mystrom_lib::types::ScanInterval;
///
/// let config = SwitchConfig::new("192.168.1.30")
///     .with_scan_interval(ScanInterval::new(10).unwrap());
/// assert_eq!(config.scan_interval().seconds(), 10);
///
/// let stored: SwitchConfig =
///     serde_json::from_str(r#"{"host": "192.168.1.30"}"#).unwrap();
/// assert_eq!(stored.scan_interval(), ScanInterval::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSwitchConfig")]
pub struct SwitchConfig {
    host: String,
    scan_interval: ScanInterval,
}

#[derive(Deserialize)]
struct RawSwitchConfig {
    host: String,
    #[serde(default)]
    scan_interval: ScanInterval,
}

impl TryFrom<RawSwitchConfig> for SwitchConfig {
    type Error = ValueError;

    fn try_from(raw: RawSwitchConfig) -> Result<Self, Self::Error> {
        if raw.host.trim().is_empty() {
            return Err(ValueError::EmptyHost);
        }
        Ok(Self {
            host: raw.host,
            scan_interval: raw.scan_interval,
        })
    }
}

impl SwitchConfig {
    /// Creates a configuration with the default scan interval.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            scan_interval: ScanInterval::default(),
        }
    }

    /// Sets the polling period.
    #[must_use]
    pub fn with_scan_interval(mut self, scan_interval: ScanInterval) -> Self {
        self.scan_interval = scan_interval;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the polling period.
    #[must_use]
    pub fn scan_interval(&self) -> ScanInterval {
        self.scan_interval
    }

    /// HTTP settings for a client talking to this switch.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::new(self.host.clone())
    }
}
