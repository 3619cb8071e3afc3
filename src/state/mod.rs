// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! [`DeviceState`] is the normalized result of one successful poll.
//! [`Snapshot`] pairs the latest state with the coordinator's
//! [`Availability`], and [`PollOutcome`] is what subscribers are told after
//! every poll.
//!
//! # Examples
//!
//! ```
//! use mystrom_lib::state::{DeviceState, PollOutcome};
//!
//! let outcome = PollOutcome::Success(DeviceState::new(12.0, true, 24.5));
//! assert!(outcome.is_success());
//! ```

mod availability;
mod device_state;

pub use availability::{Availability, PollOutcome, Snapshot};
pub use device_state::DeviceState;
