// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only sensor views.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::coordinator::PollCoordinator;
use crate::energy::{EnergyClock, EnergyTracker};
use crate::manager::EntryId;
use crate::protocol::SwitchApi;
use crate::state::{DeviceState, Snapshot};
use crate::subscription::Subscription;

use super::{DeviceRegistryInfo, Entity, EntityState, StateValue, StateWriter, unique_id};

/// What kind of quantity a sensor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorDeviceClass {
    /// Instantaneous power.
    Power,
    /// Accumulated energy.
    Energy,
    /// Temperature.
    Temperature,
}

/// How the host should aggregate the values over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    /// A point-in-time reading.
    Measurement,
    /// A counter that only grows until reset.
    TotalIncreasing,
}

/// Static metadata of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensorDescription {
    /// Suffix of the unique id.
    pub key: &'static str,
    /// Entity name.
    pub name: &'static str,
    /// Quantity.
    pub device_class: SensorDeviceClass,
    /// Aggregation.
    pub state_class: StateClass,
    /// Unit of measurement.
    pub unit: &'static str,
    /// Suggested number of decimals when displaying.
    pub display_precision: u8,
}

impl SensorDescription {
    /// Power draw in Watts.
    pub const POWER: Self = Self {
        key: "power",
        name: "Power",
        device_class: SensorDeviceClass::Power,
        state_class: StateClass::Measurement,
        unit: "W",
        display_precision: 1,
    };

    /// Accumulated energy in kWh.
    pub const ENERGY: Self = Self {
        key: "energy",
        name: "Energy",
        device_class: SensorDeviceClass::Energy,
        state_class: StateClass::TotalIncreasing,
        unit: "kWh",
        display_precision: 2,
    };

    /// Device temperature in degrees Celsius.
    pub const TEMPERATURE: Self = Self {
        key: "temperature",
        name: "Temperature",
        device_class: SensorDeviceClass::Temperature,
        state_class: StateClass::Measurement,
        unit: "°C",
        display_precision: 1,
    };
}

/// Common behaviour of read-only views.
pub trait Sensor: Entity {
    /// Static metadata.
    fn description(&self) -> &SensorDescription;

    /// Current reading, `None` before the first successful poll.
    fn native_value(&self) -> Option<f64>;
}

fn render_number(unique_id: &str, snapshot: &Snapshot, value: Option<f64>) -> EntityState {
    EntityState {
        unique_id: unique_id.to_string(),
        available: snapshot.last_update_succeeded(),
        value: value.map_or(StateValue::Unknown, StateValue::Number),
        attributes: BTreeMap::new(),
    }
}

// ============================================================================
// Power / temperature
// ============================================================================

/// A sensor that projects one field of the latest [`DeviceState`].
#[derive(Debug)]
pub struct MeasurementSensor<A: SwitchApi> {
    coordinator: Arc<PollCoordinator<A>>,
    description: SensorDescription,
    read: fn(&DeviceState) -> f64,
    unique_id: String,
    device: DeviceRegistryInfo,
    _subscription: Subscription,
}

impl<A: SwitchApi> MeasurementSensor<A> {
    /// Power draw in Watts.
    pub fn power(
        coordinator: Arc<PollCoordinator<A>>,
        entry_id: EntryId,
        device: DeviceRegistryInfo,
        writer: StateWriter,
    ) -> Self {
        Self::new(
            coordinator,
            SensorDescription::POWER,
            DeviceState::power,
            entry_id,
            device,
            writer,
        )
    }

    /// Device temperature in degrees Celsius.
    pub fn temperature(
        coordinator: Arc<PollCoordinator<A>>,
        entry_id: EntryId,
        device: DeviceRegistryInfo,
        writer: StateWriter,
    ) -> Self {
        Self::new(
            coordinator,
            SensorDescription::TEMPERATURE,
            DeviceState::temperature,
            entry_id,
            device,
            writer,
        )
    }

    fn new(
        coordinator: Arc<PollCoordinator<A>>,
        description: SensorDescription,
        read: fn(&DeviceState) -> f64,
        entry_id: EntryId,
        device: DeviceRegistryInfo,
        writer: StateWriter,
    ) -> Self {
        let unique_id = unique_id(entry_id, description.key);

        let id = unique_id.clone();
        let subscription = coordinator.subscribe(move |_, snapshot| {
            writer(&render_number(&id, snapshot, snapshot.state().map(read)));
        });

        Self {
            coordinator,
            description,
            read,
            unique_id,
            device,
            _subscription: subscription,
        }
    }
}

impl<A: SwitchApi> Entity for MeasurementSensor<A> {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> Option<&str> {
        Some(self.description.name)
    }

    fn device_info(&self) -> &DeviceRegistryInfo {
        &self.device
    }

    fn available(&self) -> bool {
        self.coordinator.last_update_succeeded()
    }

    fn state(&self) -> EntityState {
        let snapshot = self.coordinator.snapshot();
        render_number(&self.unique_id, &snapshot, snapshot.state().map(self.read))
    }
}

impl<A: SwitchApi> Sensor for MeasurementSensor<A> {
    fn description(&self) -> &SensorDescription {
        &self.description
    }

    fn native_value(&self) -> Option<f64> {
        self.coordinator.data().as_ref().map(self.read)
    }
}

// ============================================================================
// Energy
// ============================================================================

/// Energy estimated from power readings, in kWh rounded to three decimals.
///
/// Starts from zero whenever the sensor is created.
#[derive(Debug)]
pub struct EnergySensor<A: SwitchApi> {
    coordinator: Arc<PollCoordinator<A>>,
    tracker: Arc<EnergyTracker>,
    unique_id: String,
    device: DeviceRegistryInfo,
    _subscription: Subscription,
}

impl<A: SwitchApi> EnergySensor<A> {
    /// Creates the sensor with its own [`EnergyTracker`].
    pub fn new(
        coordinator: Arc<PollCoordinator<A>>,
        clock: EnergyClock,
        entry_id: EntryId,
        device: DeviceRegistryInfo,
        writer: StateWriter,
    ) -> Self {
        // Registered first, so the tracker folds each poll in before the
        // sensor renders it.
        let tracker = Arc::new(EnergyTracker::attach(&coordinator, clock));
        let unique_id = unique_id(entry_id, SensorDescription::ENERGY.key);

        let id = unique_id.clone();
        let tracked = Arc::clone(&tracker);
        let subscription = coordinator.subscribe(move |_, snapshot| {
            let value = snapshot.state().map(|_| tracked.rounded_kwh());
            writer(&render_number(&id, snapshot, value));
        });

        Self {
            coordinator,
            tracker,
            unique_id,
            device,
            _subscription: subscription,
        }
    }

    /// The underlying tracker.
    #[must_use]
    pub fn tracker(&self) -> &EnergyTracker {
        &self.tracker
    }
}

impl<A: SwitchApi> Entity for EnergySensor<A> {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> Option<&str> {
        Some(SensorDescription::ENERGY.name)
    }

    fn device_info(&self) -> &DeviceRegistryInfo {
        &self.device
    }

    fn available(&self) -> bool {
        self.coordinator.last_update_succeeded()
    }

    fn state(&self) -> EntityState {
        render_number(&self.unique_id, &self.coordinator.snapshot(), self.native_value())
    }
}

impl<A: SwitchApi> Sensor for EnergySensor<A> {
    fn description(&self) -> &SensorDescription {
        &SensorDescription::ENERGY
    }

    fn native_value(&self) -> Option<f64> {
        self.coordinator
            .data()
            .map(|_| self.tracker.rounded_kwh())
    }
}
