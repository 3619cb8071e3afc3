// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of configured switches.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::coordinator::PollCoordinator;
use crate::energy::EnergyClock;
use crate::entity::{StateWriter, discard_writer};
use crate::error::{Error, SetupError};
use crate::protocol::{HttpClient, HttpConfig};

use super::{EntryId, IntegrationInstance, ValidatedDevice};

/// Owns one [`IntegrationInstance`] per configured switch.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use mystrom_lib::entity::EntityState;
/// use mystrom_lib::manager::{IntegrationManager, SwitchConfig, validate_device};
///
/// #[tokio::main]
/// async fn main() -> mystrom_lib::Result<()> {
///     let manager = IntegrationManager::new(Arc::new(|state: &EntityState| println!("{state:?}")));
///
///     let device = validate_device(SwitchConfig::new("192.168.1.30")).await?;
///     let entry_id = manager.setup_entry(device).await?;
///
///     // ... later
///     manager.unload_entry(entry_id).await;
///     Ok(())
/// }
/// ```
pub struct IntegrationManager {
    entries: RwLock<HashMap<EntryId, Arc<IntegrationInstance<HttpClient>>>>,
    writer: StateWriter,
    energy_clock: EnergyClock,
    timeout: Duration,
}

impl IntegrationManager {
    /// Creates an empty manager whose views render into `writer`.
    #[must_use]
    pub fn new(writer: StateWriter) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            writer,
            energy_clock: EnergyClock::default(),
            timeout: HttpConfig::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the clock used by energy sensors of entries set up afterwards.
    #[must_use]
    pub fn with_energy_clock(mut self, clock: EnergyClock) -> Self {
        self.energy_clock = clock;
        self
    }

    /// Sets the per-request HTTP timeout of entries set up afterwards.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets up a validated switch and starts polling it.
    ///
    /// Runs the mandatory first poll before any view is created. Nothing is
    /// registered if it fails.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::AlreadyConfigured`] if an entry with the same
    /// unique id exists, or [`SetupError::InitialRefresh`] if the first poll
    /// fails.
    pub async fn setup_entry(&self, device: ValidatedDevice) -> Result<EntryId, Error> {
        self.ensure_unique(&device.unique_id).await?;

        let client = device
            .config
            .http_config()
            .with_timeout(self.timeout)
            .into_client()?;
        let coordinator = Arc::new(PollCoordinator::new(client, device.config.scan_interval()));

        if let Err(err) = coordinator.first_refresh().await {
            tracing::warn!(host = %device.config.host(), error = %err, "Setup failed");
            return Err(err);
        }

        let mut entries = self.entries.write().await;
        // Another setup for the same device may have finished meanwhile
        if entries.values().any(|i| i.device().unique_id == device.unique_id) {
            return Err(SetupError::AlreadyConfigured {
                unique_id: device.unique_id,
            }
            .into());
        }

        let entry_id = EntryId::new();
        tracing::info!(
            entry_id = %entry_id,
            host = %device.config.host(),
            unique_id = %device.unique_id,
            interval = %device.config.scan_interval(),
            "Switch set up"
        );
        let instance =
            IntegrationInstance::start(entry_id, device, coordinator, self.energy_clock, &self.writer);
        entries.insert(entry_id, Arc::new(instance));

        Ok(entry_id)
    }

    /// Stops polling and drops the entry's views.
    ///
    /// Returns `false` if the entry is unknown.
    pub async fn unload_entry(&self, entry_id: EntryId) -> bool {
        let Some(instance) = self.entries.write().await.remove(&entry_id) else {
            return false;
        };
        instance.stop();
        tracing::info!(entry_id = %entry_id, host = %instance.device().config.host(), "Switch unloaded");
        true
    }

    /// Stops every entry.
    pub async fn unload_all(&self) {
        let drained: Vec<_> = self.entries.write().await.drain().collect();
        for (entry_id, instance) in drained {
            instance.stop();
            tracing::info!(entry_id = %entry_id, "Switch unloaded");
        }
    }

    /// Returns the instance for `entry_id`.
    pub async fn instance(&self, entry_id: EntryId) -> Option<Arc<IntegrationInstance<HttpClient>>> {
        self.entries.read().await.get(&entry_id).cloned()
    }

    /// Returns all configured entry ids.
    pub async fn entry_ids(&self) -> Vec<EntryId> {
        self.entries.read().await.keys().copied().collect()
    }

    /// Returns the number of configured entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if nothing is configured.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Whether a switch with `unique_id` is configured.
    pub async fn is_configured(&self, unique_id: &str) -> bool {
        self.entries
            .read()
            .await
            .values()
            .any(|i| i.device().unique_id == unique_id)
    }

    async fn ensure_unique(&self, unique_id: &str) -> Result<(), Error> {
        if self.is_configured(unique_id).await {
            tracing::debug!(unique_id = %unique_id, "Rejecting duplicate entry");
            return Err(SetupError::AlreadyConfigured {
                unique_id: unique_id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for IntegrationManager {
    fn default() -> Self {
        Self::new(discard_writer())
    }
}

impl std::fmt::Debug for IntegrationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrationManager")
            .field("energy_clock", &self.energy_clock)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
