// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relay view with on/off/toggle commands.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::coordinator::PollCoordinator;
use crate::error::CommandFailure;
use crate::manager::EntryId;
use crate::protocol::SwitchApi;
use crate::state::Snapshot;
use crate::subscription::Subscription;
use crate::types::RelayCommand;

use super::{DeviceRegistryInfo, Entity, EntityState, StateValue, StateWriter, unique_id};

/// The relay of a switch, readable and commandable.
///
/// A command that the device accepts triggers an immediate refresh. A
/// command that fails leaves the coordinator untouched and does not refresh.
#[derive(Debug)]
pub struct SwitchView<A: SwitchApi> {
    coordinator: Arc<PollCoordinator<A>>,
    unique_id: String,
    device: DeviceRegistryInfo,
    _subscription: Subscription,
}

impl<A: SwitchApi> SwitchView<A> {
    /// Creates the view and subscribes it to `coordinator`.
    pub fn new(
        coordinator: Arc<PollCoordinator<A>>,
        entry_id: EntryId,
        device: DeviceRegistryInfo,
        writer: StateWriter,
    ) -> Self {
        let unique_id = unique_id(entry_id, "switch");

        let id = unique_id.clone();
        let subscription = coordinator.subscribe(move |_, snapshot| {
            writer(&render(&id, snapshot));
        });

        Self {
            coordinator,
            unique_id,
            device,
            _subscription: subscription,
        }
    }

    /// Whether the relay is closed; `false` before the first poll.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.coordinator.data().is_some_and(|s| s.relay())
    }

    /// Power and temperature from the last poll, if any.
    #[must_use]
    pub fn extra_state_attributes(&self) -> BTreeMap<&'static str, f64> {
        attributes(&self.coordinator.snapshot())
    }

    /// Closes the relay.
    ///
    /// # Errors
    ///
    /// Returns [`CommandFailure`] if the device did not accept the command.
    pub async fn turn_on(&self) -> Result<(), CommandFailure> {
        self.command(RelayCommand::On).await
    }

    /// Opens the relay.
    ///
    /// # Errors
    ///
    /// Returns [`CommandFailure`] if the device did not accept the command.
    pub async fn turn_off(&self) -> Result<(), CommandFailure> {
        self.command(RelayCommand::Off).await
    }

    /// Flips the relay.
    ///
    /// # Errors
    ///
    /// Returns [`CommandFailure`] if the device did not accept the command.
    pub async fn toggle(&self) -> Result<(), CommandFailure> {
        self.command(RelayCommand::Toggle).await
    }

    async fn command(&self, command: RelayCommand) -> Result<(), CommandFailure> {
        if !self.coordinator.send_relay(command).await {
            return Err(CommandFailure { command });
        }
        self.coordinator.request_refresh().await;
        Ok(())
    }
}

impl<A: SwitchApi> Entity for SwitchView<A> {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> Option<&str> {
        None
    }

    fn device_info(&self) -> &DeviceRegistryInfo {
        &self.device
    }

    fn available(&self) -> bool {
        self.coordinator.last_update_succeeded()
    }

    fn state(&self) -> EntityState {
        render(&self.unique_id, &self.coordinator.snapshot())
    }
}

fn attributes(snapshot: &Snapshot) -> BTreeMap<&'static str, f64> {
    snapshot
        .state()
        .map(|s| BTreeMap::from([("power", s.power()), ("temperature", s.temperature())]))
        .unwrap_or_default()
}

fn render(unique_id: &str, snapshot: &Snapshot) -> EntityState {
    let on = snapshot.state().is_some_and(|s| s.relay());
    EntityState {
        unique_id: unique_id.to_string(),
        available: snapshot.last_update_succeeded(),
        value: if on { StateValue::On } else { StateValue::Off },
        attributes: attributes(snapshot),
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::entity::discard_writer;
    use crate::state::DeviceState;
    use crate::testing::FakeSwitch;
    use crate::types::ScanInterval;

    async fn setup(relay: bool) -> (Arc<PollCoordinator<FakeSwitch>>, SwitchView<FakeSwitch>) {
        let coordinator = Arc::new(PollCoordinator::new(
            FakeSwitch::new(DeviceState::new(40.0, relay, 22.0)),
            ScanInterval::DEFAULT,
        ));
        coordinator.first_refresh().await.unwrap();
        let entry = EntryId::new();
        let view = SwitchView::new(
            Arc::clone(&coordinator),
            entry,
            DeviceRegistryInfo::new(entry, "fake-switch"),
            discard_writer(),
        );
        (coordinator, view)
    }

    #[tokio::test]
    async fn turn_on_refreshes_state() {
        let (coordinator, view) = setup(false).await;
        assert!(!view.is_on());

        view.turn_on().await.unwrap();

        assert!(view.is_on());
        assert_eq!(coordinator.api().polls(), 2);
    }

    #[tokio::test]
    async fn failed_command_does_not_refresh() {
        let (coordinator, view) = setup(false).await;
        coordinator.api().set_reachable(false);

        let err = view.turn_on().await.unwrap_err();

        assert_eq!(err.command, RelayCommand::On);
        assert_eq!(coordinator.api().polls(), 1);
        assert!(view.available());
        assert!(!view.is_on());
    }

    #[tokio::test]
    async fn toggle_and_turn_off() {
        let (_, view) = setup(true).await;
        view.toggle().await.unwrap();
        assert!(!view.is_on());
        view.toggle().await.unwrap();
        assert!(view.is_on());
        view.turn_off().await.unwrap();
        assert!(!view.is_on());
    }

    #[tokio::test]
    async fn attributes_expose_power_and_temperature() {
        let (_, view) = setup(true).await;
        let attributes = view.extra_state_attributes();
        assert!((attributes["power"] - 40.0).abs() < f64::EPSILON);
        assert!((attributes["temperature"] - 22.0).abs() < f64::EPSILON);
        assert!(view.name().is_none());
        assert!(view.unique_id().ends_with("_switch"));
    }

    #[tokio::test]
    async fn writer_receives_rendered_state() {
        let coordinator = Arc::new(PollCoordinator::new(
            FakeSwitch::new(DeviceState::new(0.0, true, 20.0)),
            ScanInterval::DEFAULT,
        ));
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&written);
        let entry = EntryId::new();
        let view = SwitchView::new(
            Arc::clone(&coordinator),
            entry,
            DeviceRegistryInfo::new(entry, "fake-switch"),
            Arc::new(move |state: &EntityState| sink.lock().push(state.clone())),
        );

        coordinator.first_refresh().await.unwrap();
        coordinator.api().set_reachable(false);
        coordinator.request_refresh().await;

        let written = written.lock();
        assert_eq!(written.len(), 2);
        assert!(written[0].available);
        assert_eq!(written[0].value, StateValue::On);
        assert!(!written[1].available);
        assert_eq!(written[1].value, StateValue::On);
        assert_eq!(written[1].unique_id, view.unique_id());
    }

    #[tokio::test]
    async fn dropping_view_unsubscribes() {
        let (coordinator, view) = setup(true).await;
        assert_eq!(coordinator.subscriber_count(), 1);
        drop(view);
        assert_eq!(coordinator.subscriber_count(), 0);
    }
}
