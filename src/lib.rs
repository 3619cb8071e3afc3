// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `myStrom` Lib - A Rust library to monitor and control `myStrom` WiFi Switches.
//!
//! The switch is a smart plug with a local HTTP API. This library polls it
//! periodically, shares each result with a set of views, derives an energy
//! estimate from the power readings and forwards relay commands.
//!
//! # Building Blocks
//!
//! - [`protocol`]: the HTTP client ([`HttpClient`]) and the [`SwitchApi`]
//!   trait the rest of the crate is written against
//! - [`coordinator`]: one [`PollCoordinator`] per device owns the latest
//!   [`Snapshot`] and notifies subscribers after every poll
//! - [`energy`]: trapezoidal integration of power into kWh
//! - [`entity`]: the switch view and the power, energy and temperature sensors
//! - [`manager`]: setup validation, discovery and the [`IntegrationManager`]
//!
//! # Quick Start
//!
//! ## Polling a single switch
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mystrom_lib::{HttpClient, PollCoordinator, ScanInterval};
//!
//! #[tokio::main]
//! async fn main() -> mystrom_lib::Result<()> {
//!     let client = HttpClient::new("192.168.1.30")?;
//!     let coordinator = Arc::new(PollCoordinator::new(client, ScanInterval::new(10)?));
//!     coordinator.first_refresh().await?;
//!
//!     let _subscription = coordinator.subscribe(|_, snapshot| {
//!         if let Some(state) = snapshot.state() {
//!             println!("{} W, relay {}", state.power(), state.relay());
//!         }
//!     });
//!     let _poll = coordinator.spawn();
//!
//!     tokio::signal::ctrl_c().await.ok();
//!     Ok(())
//! }
//! ```
//!
//! ## Managing switches with views
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mystrom_lib::entity::EntityState;
//! use mystrom_lib::manager::{IntegrationManager, SwitchConfig, validate_device};
//!
//! #[tokio::main]
//! async fn main() -> mystrom_lib::Result<()> {
//!     let manager = IntegrationManager::new(Arc::new(|state: &EntityState| {
//!         println!("{}: {:?}", state.unique_id, state.value);
//!     }));
//!
//!     let device = validate_device(SwitchConfig::new("192.168.1.30")).await?;
//!     let entry_id = manager.setup_entry(device).await?;
//!
//!     if let Some(instance) = manager.instance(entry_id).await {
//!         instance.switch().toggle().await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! Diagnostics go through [`tracing`](https://docs.rs/tracing). The library
//! never installs a subscriber.

pub mod coordinator;
pub mod energy;
pub mod entity;
pub mod error;
pub mod manager;
pub mod protocol;
pub mod response;
pub mod state;
pub mod subscription;
pub mod types;

#[cfg(test)]
mod testing;

pub use coordinator::{PollCoordinator, PollHandle};
pub use energy::{EnergyAccumulator, EnergyClock, EnergyTracker};
pub use entity::{EnergySensor, Entity, EntityState, MeasurementSensor, Sensor, StateValue, SwitchView};
pub use error::{
    CommandFailure, ConnectivityError, Error, ProtocolError, Result, SetupError, ValueError,
};
pub use manager::{EntryId, IntegrationManager, SwitchConfig, ValidatedDevice};
pub use protocol::{HttpClient, HttpConfig, SwitchApi};
pub use response::{DeviceInfo, ReportResponse};
pub use state::{Availability, DeviceState, PollOutcome, Snapshot};
pub use subscription::{CallbackRegistry, Subscription, SubscriptionId};
pub use types::{MacAddress, RelayCommand, ScanInterval};
