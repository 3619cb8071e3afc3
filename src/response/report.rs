// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `/report` response parsing.

use serde::Deserialize;

use crate::state::DeviceState;

/// Raw body of `GET /report`.
///
/// Every field is optional; missing or `null` values fall back to
/// `power = 0.0`, `relay = false`, `temperature = 0.0` when converted into a
/// [`DeviceState`]. Fields the device adds on newer firmware are ignored.
///
/// # Examples
///
/// ```
/// use mystrom_lib::response::ReportResponse;
/// use mystrom_lib::state::DeviceState;
///
/// let json = r#"{"power": 18.3, "Ws": 18.1, "relay": true, "temperature": 22.4}"#;
/// let report: ReportResponse = serde_json::from_str(json).unwrap();
/// let state = DeviceState::from(report);
/// assert!(state.relay());
///
/// let sparse: ReportResponse = serde_json::from_str("{}").unwrap();
/// assert_eq!(DeviceState::from(sparse), DeviceState::default());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportResponse {
    /// Instantaneous power in Watts.
    #[serde(default)]
    pub power: Option<f64>,

    /// Relay state.
    #[serde(default)]
    pub relay: Option<bool>,

    /// Device temperature in degrees Celsius.
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl From<ReportResponse> for DeviceState {
    fn from(report: ReportResponse) -> Self {
        DeviceState::new(
            report.power.unwrap_or(0.0),
            report.relay.unwrap_or(false),
            report.temperature.unwrap_or(0.0),
        )
    }
}
