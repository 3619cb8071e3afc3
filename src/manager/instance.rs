// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Everything that runs for one configured switch.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::coordinator::{PollCoordinator, PollHandle};
use crate::energy::EnergyClock;
use crate::entity::{
    DeviceRegistryInfo, EnergySensor, Entity, MeasurementSensor, StateWriter, SwitchView,
};
use crate::protocol::SwitchApi;

use super::{EntryId, ValidatedDevice};

/// A set-up switch: its coordinator, poll loop and four views.
///
/// The views keep their subscriptions for as long as the instance lives.
#[derive(Debug)]
pub struct IntegrationInstance<A: SwitchApi> {
    entry_id: EntryId,
    device: ValidatedDevice,
    coordinator: Arc<PollCoordinator<A>>,
    poll: Mutex<Option<PollHandle>>,
    switch: SwitchView<A>,
    power: MeasurementSensor<A>,
    temperature: MeasurementSensor<A>,
    energy: EnergySensor<A>,
}

impl<A: SwitchApi> IntegrationInstance<A> {
    /// Builds the views around a coordinator that already has data and
    /// starts its poll loop.
    pub(crate) fn start(
        entry_id: EntryId,
        device: ValidatedDevice,
        coordinator: Arc<PollCoordinator<A>>,
        clock: EnergyClock,
        writer: &StateWriter,
    ) -> Self {
        let registry = DeviceRegistryInfo::new(entry_id, device.config.host());

        let switch = SwitchView::new(
            Arc::clone(&coordinator),
            entry_id,
            registry.clone(),
            Arc::clone(writer),
        );
        let power = MeasurementSensor::power(
            Arc::clone(&coordinator),
            entry_id,
            registry.clone(),
            Arc::clone(writer),
        );
        let temperature = MeasurementSensor::temperature(
            Arc::clone(&coordinator),
            entry_id,
            registry.clone(),
            Arc::clone(writer),
        );
        let energy = EnergySensor::new(
            Arc::clone(&coordinator),
            clock,
            entry_id,
            registry,
            Arc::clone(writer),
        );

        // Initial render; later ones follow every poll
        writer(&switch.state());
        writer(&power.state());
        writer(&temperature.state());
        writer(&energy.state());

        let poll = coordinator.spawn();

        Self {
            entry_id,
            device,
            coordinator,
            poll: Mutex::new(Some(poll)),
            switch,
            power,
            temperature,
            energy,
        }
    }

    /// Returns the entry id.
    #[must_use]
    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    /// Returns the validated device this instance was built from.
    #[must_use]
    pub fn device(&self) -> &ValidatedDevice {
        &self.device
    }

    /// Returns the shared coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &Arc<PollCoordinator<A>> {
        &self.coordinator
    }

    /// Returns the relay view.
    #[must_use]
    pub fn switch(&self) -> &SwitchView<A> {
        &self.switch
    }

    /// Returns the power sensor.
    #[must_use]
    pub fn power(&self) -> &MeasurementSensor<A> {
        &self.power
    }

    /// Returns the temperature sensor.
    #[must_use]
    pub fn temperature(&self) -> &MeasurementSensor<A> {
        &self.temperature
    }

    /// Returns the energy sensor.
    #[must_use]
    pub fn energy(&self) -> &EnergySensor<A> {
        &self.energy
    }

    /// Whether the poll loop is still scheduled.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poll.lock().as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancels the poll loop. Idempotent.
    pub(crate) fn stop(&self) {
        if let Some(handle) = self.poll.lock().take() {
            handle.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex as SyncMutex;

    use super::*;
    use crate::entity::{EntityState, StateValue, discard_writer};
    use crate::manager::SwitchConfig;
    use crate::state::DeviceState;
    use crate::testing::FakeSwitch;
    use crate::types::ScanInterval;

    async fn ready_coordinator() -> Arc<PollCoordinator<FakeSwitch>> {
        let coordinator = Arc::new(PollCoordinator::new(
            FakeSwitch::new(DeviceState::new(60.0, true, 24.0)),
            ScanInterval::DEFAULT,
        ));
        coordinator.first_refresh().await.unwrap();
        coordinator
    }

    fn device() -> ValidatedDevice {
        ValidatedDevice {
            title: "myStrom Switch".to_string(),
            unique_id: "A4CF120B9E01".to_string(),
            config: SwitchConfig::new("fake-switch"),
        }
    }

    #[tokio::test]
    async fn start_renders_all_views_once() {
        let written = Arc::new(SyncMutex::new(Vec::<EntityState>::new()));
        let sink = Arc::clone(&written);
        let writer: StateWriter = Arc::new(move |state: &EntityState| sink.lock().push(state.clone()));
        let entry = EntryId::new();

        let instance = IntegrationInstance::start(
            entry,
            device(),
            ready_coordinator().await,
            EnergyClock::default(),
            &writer,
        );

        let written = written.lock();
        let ids: Vec<_> = written.iter().map(|s| s.unique_id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                format!("{entry}_switch"),
                format!("{entry}_power"),
                format!("{entry}_temperature"),
                format!("{entry}_energy"),
            ]
        );
        assert_eq!(written[0].value, StateValue::On);
        assert_eq!(written[1].value, StateValue::Number(60.0));
        assert_eq!(written[3].value, StateValue::Number(0.0));
        assert!(instance.is_polling());
    }

    #[tokio::test]
    async fn stop_cancels_polling_and_is_idempotent() {
        let coordinator = ready_coordinator().await;
        let instance = IntegrationInstance::start(
            EntryId::new(),
            device(),
            Arc::clone(&coordinator),
            EnergyClock::default(),
            &discard_writer(),
        );
        // Switch, power, temperature, energy tracker and energy sensor
        assert_eq!(coordinator.subscriber_count(), 5);

        instance.stop();
        instance.stop();
        assert!(!instance.is_polling());

        drop(instance);
        assert_eq!(coordinator.subscriber_count(), 0);
    }
}
