// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for `myStrom` switch control.
//!
//! # Types
//!
//! - [`RelayCommand`] - On/Off/Toggle commands for the relay
//! - [`ScanInterval`] - Polling period (5-300 seconds)
//! - [`MacAddress`] - Normalized hardware address

mod mac;
mod relay;
mod scan_interval;

pub use mac::MacAddress;
pub use relay::RelayCommand;
pub use scan_interval::ScanInterval;
