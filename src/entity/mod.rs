// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Views exposed to the home-automation host.
//!
//! Every configured switch yields four views: a [`SwitchView`] with relay
//! commands and three read-only sensors (power and temperature as
//! [`MeasurementSensor`]s, plus an [`EnergySensor`]). Each view holds a shared
//! reference to the device's coordinator and a subscription registered at
//! construction. After every poll the view renders an [`EntityState`] and
//! hands it to the host through a [`StateWriter`]. Dropping the view cancels
//! its subscription.

mod sensor;
mod switch;

pub use sensor::{
    EnergySensor, MeasurementSensor, Sensor, SensorDescription, SensorDeviceClass, StateClass,
};
pub use switch::SwitchView;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::manager::EntryId;

/// Integration domain used in device identifiers.
pub const DOMAIN: &str = "mystrom_switch";

/// Host hook that receives every rendered entity state.
pub type StateWriter = Arc<dyn Fn(&EntityState) + Send + Sync>;

/// Returns a writer that discards everything.
#[must_use]
pub fn discard_writer() -> StateWriter {
    Arc::new(|state: &EntityState| {
        tracing::trace!(unique_id = %state.unique_id, "Discarding entity state");
    })
}

/// The value part of a rendered entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum StateValue {
    /// Switch is on.
    On,
    /// Switch is off.
    Off,
    /// Numeric sensor reading.
    Number(f64),
    /// No reading has been received yet.
    Unknown,
}

/// One rendering of a view, as written to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityState {
    /// Stable id of the view.
    pub unique_id: String,
    /// Whether the last poll succeeded.
    pub available: bool,
    /// Current value.
    pub value: StateValue,
    /// Additional numeric attributes.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<&'static str, f64>,
}

/// Device-registry entry shared by all views of one switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRegistryInfo {
    /// `(domain, entry id)` pair identifying the device.
    pub identifiers: (String, String),
    /// Display name.
    pub name: String,
    /// Manufacturer.
    pub manufacturer: &'static str,
    /// Model.
    pub model: &'static str,
    /// Link to the device's own web UI.
    pub configuration_url: String,
}

impl DeviceRegistryInfo {
    /// Builds the registry entry for a configured switch.
    #[must_use]
    pub fn new(entry_id: EntryId, host: &str) -> Self {
        Self {
            identifiers: (DOMAIN.to_string(), entry_id.to_string()),
            name: "myStrom Switch".to_string(),
            manufacturer: "myStrom",
            model: "WiFi Switch",
            configuration_url: format!("http://{host}"),
        }
    }
}

/// Common behaviour of every view.
pub trait Entity {
    /// Stable id derived from the config entry.
    fn unique_id(&self) -> &str;

    /// Entity name; `None` means "use the device name".
    fn name(&self) -> Option<&str>;

    /// Device-registry entry this view belongs to.
    fn device_info(&self) -> &DeviceRegistryInfo;

    /// Whether the last poll succeeded.
    fn available(&self) -> bool;

    /// Renders the current state.
    fn state(&self) -> EntityState;
}

/// Builds a unique id as `<entry id>_<key>`.
pub(crate) fn unique_id(entry_id: EntryId, key: &str) -> String {
    format!("{entry_id}_{key}")
}
