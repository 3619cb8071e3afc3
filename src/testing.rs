// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory switch used by unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::{ConnectivityError, Error};
use crate::protocol::SwitchApi;
use crate::response::DeviceInfo;
use crate::state::DeviceState;
use crate::types::RelayCommand;

/// Simulated switch whose reachability can be flipped at runtime.
pub(crate) struct FakeSwitch {
    state: Mutex<DeviceState>,
    reachable: AtomicBool,
    polls: AtomicUsize,
    commands: Mutex<Vec<RelayCommand>>,
}

impl FakeSwitch {
    pub(crate) fn new(state: DeviceState) -> Self {
        Self {
            state: Mutex::new(state),
            reachable: AtomicBool::new(true),
            polls: AtomicUsize::new(0),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub(crate) fn set_state(&self, state: DeviceState) {
        *self.state.lock() = state;
    }

    pub(crate) fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub(crate) fn commands(&self) -> Vec<RelayCommand> {
        self.commands.lock().clone()
    }
}

impl SwitchApi for FakeSwitch {
    async fn get_state(&self) -> Result<DeviceState, Error> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        // Suspend once, like a real request would.
        tokio::task::yield_now().await;
        if self.reachable.load(Ordering::SeqCst) {
            Ok(*self.state.lock())
        } else {
            Err(ConnectivityError::Timeout(10_000).into())
        }
    }

    async fn get_info(&self) -> Result<DeviceInfo, Error> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(DeviceInfo {
                mac: Some("A4CF120B9E01".to_string()),
                ..DeviceInfo::default()
            })
        } else {
            Err(ConnectivityError::Timeout(10_000).into())
        }
    }

    async fn send_relay(&self, command: RelayCommand) -> bool {
        tokio::task::yield_now().await;
        if !self.reachable.load(Ordering::SeqCst) {
            return false;
        }
        self.commands.lock().push(command);
        let mut state = self.state.lock();
        let relay = match command {
            RelayCommand::On => true,
            RelayCommand::Off => false,
            RelayCommand::Toggle => !state.relay(),
        };
        *state = DeviceState::new(state.power(), relay, state.temperature());
        true
    }

    fn host(&self) -> &str {
        "fake-switch"
    }
}
