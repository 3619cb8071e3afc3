// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `/info` response parsing.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::types::MacAddress;

/// Device identity returned by `GET /info`.
///
/// Only the fields used during setup are typed; everything else the firmware
/// reports is kept in [`extra`](Self::extra).
///
/// # Examples
///
/// ```
/// use mystrom_lib::response::DeviceInfo;
///
/// let json = r#"{
///     "version": "3.82.60",
///     "mac": "A4CF120B9E01",
///     "type": 107,
///     "name": "Office",
///     "connected": true
/// }"#;
/// let info: DeviceInfo = serde_json::from_str(json).unwrap();
/// assert_eq!(info.mac.as_deref(), Some("A4CF120B9E01"));
/// assert_eq!(info.extra["connected"], true);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceInfo {
    /// Hardware address in compact form.
    #[serde(default)]
    pub mac: Option<String>,

    /// Firmware version.
    #[serde(default)]
    pub version: Option<String>,

    /// Device type code.
    #[serde(default, rename = "type")]
    pub device_type: Option<Value>,

    /// User-assigned device name.
    #[serde(default)]
    pub name: Option<String>,

    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceInfo {
    /// Returns the parsed MAC address, if present and well formed.
    #[must_use]
    pub fn mac_address(&self) -> Option<MacAddress> {
        self.mac.as_deref().and_then(|mac| mac.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_without_mac() {
        let info: DeviceInfo = serde_json::from_str(r#"{"version": "2.68"}"#).unwrap();
        assert!(info.mac.is_none());
        assert!(info.mac_address().is_none());
        assert_eq!(info.version.as_deref(), Some("2.68"));
    }

    #[test]
    fn info_mac_normalized() {
        let info: DeviceInfo = serde_json::from_str(r#"{"mac": "a4:cf:12:0b:9e:01"}"#).unwrap();
        assert_eq!(info.mac_address().unwrap().as_str(), "A4CF120B9E01");
    }

    #[test]
    fn info_type_may_be_string_or_number() {
        let numeric: DeviceInfo = serde_json::from_str(r#"{"type": 107}"#).unwrap();
        let text: DeviceInfo = serde_json::from_str(r#"{"type": "WS2"}"#).unwrap();
        assert_eq!(numeric.device_type, Some(Value::from(107)));
        assert_eq!(text.device_type, Some(Value::from("WS2")));
    }
}
