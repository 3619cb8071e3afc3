// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for poll updates.
//!
//! A [`PollCoordinator`](crate::coordinator::PollCoordinator) notifies its
//! subscribers synchronously after every poll. Views and the energy tracker
//! hold a [`Subscription`] guard for as long as they live; dropping it
//! unsubscribes.
//!
//! # Usage
//!
//! ```no_run
//! use mystrom_lib::coordinator::PollCoordinator;
//! use mystrom_lib::protocol::HttpClient;
//! use mystrom_lib::types::ScanInterval;
//!
//! # async fn example() -> mystrom_lib::Result<()> {
//! let client = HttpClient::new("192.168.1.100")?;
//! let coordinator = PollCoordinator::new(client, ScanInterval::default());
//!
//! let subscription = coordinator.subscribe(|outcome, snapshot| {
//!     println!("{outcome:?}, available: {}", snapshot.last_update_succeeded());
//! });
//!
//! coordinator.first_refresh().await?;
//!
//! // Later, stop listening
//! drop(subscription);
//! # Ok(())
//! # }
//! ```

mod callback;

pub use callback::{CallbackRegistry, Subscription, SubscriptionId};
