// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lifecycle of configured switches.
//!
//! A switch goes through three steps:
//!
//! 1. **Validation**: [`validate_device`], [`discovered_via_zeroconf`] or
//!    [`discovered_via_dhcp`] turn user input or a discovery announcement into
//!    a [`ValidatedDevice`] with a stable unique id.
//! 2. **Setup**: [`IntegrationManager::setup_entry`] creates the client and
//!    coordinator, runs the first poll, builds the views and starts polling.
//! 3. **Unload**: [`IntegrationManager::unload_entry`] cancels polling and
//!    drops the views.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mystrom_lib::entity::EntityState;
//! use mystrom_lib::manager::{IntegrationManager, discovered_via_dhcp};
//!
//! # async fn example() -> mystrom_lib::Result<()> {
//! let manager = IntegrationManager::new(Arc::new(|state: &EntityState| {
//!     println!("{} -> {:?}", state.unique_id, state.value);
//! }));
//!
//! let device = discovered_via_dhcp("192.168.1.30", "a4:cf:12:0b:9e:01").await?;
//! if !manager.is_configured(&device.unique_id).await {
//!     manager.setup_entry(device).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod entry_id;
mod instance;
mod integration_manager;
mod setup;

pub use config::SwitchConfig;
pub use entry_id::EntryId;
pub use instance::IntegrationInstance;
pub use integration_manager::IntegrationManager;
pub use setup::{
    DEFAULT_TITLE, ValidatedDevice, discovered_via_dhcp, discovered_via_zeroconf, validate_device,
    validate_with,
};
