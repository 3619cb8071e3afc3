// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol implementation for communicating with `myStrom` switches.
//!
//! The switch exposes four `GET` endpoints:
//!
//! | Path      | Params            | Purpose        |
//! |-----------|-------------------|----------------|
//! | `/report` | -                 | state poll     |
//! | `/relay`  | `state=1` / `0`   | set relay      |
//! | `/toggle` | -                 | toggle relay   |
//! | `/info`   | -                 | device identity|
//!
//! [`HttpClient`] talks to a real device. The coordinator and views only
//! depend on the [`SwitchApi`] trait.

mod http;

pub use http::{HttpClient, HttpConfig};

use std::future::Future;

use crate::error::Error;
use crate::response::DeviceInfo;
use crate::state::DeviceState;
use crate::types::RelayCommand;

/// Operations a switch client offers.
///
/// State and identity queries fail with a connectivity or protocol error.
/// Relay commands are best effort: they report `false` instead of failing.
/// No method retries; retry policy belongs to the caller.
pub trait SwitchApi: Send + Sync + 'static {
    /// Fetches and normalizes the current state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`] on network faults and timeouts and
    /// [`Error::Protocol`] on non-2xx status or malformed JSON.
    fn get_state(&self) -> impl Future<Output = Result<DeviceState, Error>> + Send;

    /// Fetches device identity.
    ///
    /// # Errors
    ///
    /// Same as [`get_state`](Self::get_state).
    fn get_info(&self) -> impl Future<Output = Result<DeviceInfo, Error>> + Send;

    /// Sends a relay command; returns `true` if the device accepted it.
    fn send_relay(&self, command: RelayCommand) -> impl Future<Output = bool> + Send;

    /// Closes the relay.
    fn turn_on(&self) -> impl Future<Output = bool> + Send {
        self.send_relay(RelayCommand::On)
    }

    /// Opens the relay.
    fn turn_off(&self) -> impl Future<Output = bool> + Send {
        self.send_relay(RelayCommand::Off)
    }

    /// Flips the relay.
    fn toggle(&self) -> impl Future<Output = bool> + Send {
        self.send_relay(RelayCommand::Toggle)
    }

    /// Returns `true` iff [`get_state`](Self::get_state) succeeds.
    fn test_connection(&self) -> impl Future<Output = bool> + Send {
        async move { self.get_state().await.is_ok() }
    }

    /// The host this client talks to.
    fn host(&self) -> &str;
}
