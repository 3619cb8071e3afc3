// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation of user-entered and discovered switches.
//!
//! Every path ends in a [`ValidatedDevice`] that the
//! [`IntegrationManager`](super::IntegrationManager) can set up. The unique
//! id is the device's MAC address when it can be learned, otherwise the
//! host with dots replaced by underscores.

use crate::error::{Error, SetupError};
use crate::protocol::SwitchApi;
use crate::types::MacAddress;

use super::SwitchConfig;

/// Title given to every entry.
pub const DEFAULT_TITLE: &str = "myStrom Switch";

/// A switch that passed validation and can be set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDevice {
    /// Display title of the entry.
    pub title: String,
    /// Stable id used to reject duplicates.
    pub unique_id: String,
    /// Configuration to persist.
    pub config: SwitchConfig,
}

impl ValidatedDevice {
    fn new(unique_id: String, config: SwitchConfig) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            unique_id,
            config,
        }
    }
}

/// Checks a user-entered configuration against the real device.
///
/// # Errors
///
/// Returns [`SetupError::CannotConnect`] if `/report` cannot be read, or
/// [`ValueError::EmptyHost`](crate::error::ValueError::EmptyHost) for a
/// blank host.
///
/// # Examples
///
/// ```no_run
/// use mystrom_lib::manager::{SwitchConfig, validate_device};
///
/// # async fn example() -> mystrom_lib::Result<()> {
/// let device = validate_device(SwitchConfig::new("192.168.1.30")).await?;
/// println!("{} ({})", device.title, device.unique_id);
/// # Ok(())
/// # }
/// ```
pub async fn validate_device(config: SwitchConfig) -> Result<ValidatedDevice, Error> {
    let client = config.http_config().into_client()?;
    validate_with(&client, config).await
}

/// Same as [`validate_device`] with a caller-supplied client.
///
/// # Errors
///
/// Returns [`SetupError::CannotConnect`] if the connection test fails.
pub async fn validate_with<A: SwitchApi>(
    api: &A,
    config: SwitchConfig,
) -> Result<ValidatedDevice, Error> {
    if !api.test_connection().await {
        tracing::warn!(host = %config.host(), "Connection test failed");
        return Err(SetupError::CannotConnect {
            host: config.host().to_string(),
        }
        .into());
    }

    let unique_id = identify(api, config.host()).await;
    Ok(ValidatedDevice::new(unique_id, config))
}

/// Handles a switch announced over zeroconf.
///
/// Reachability is not required; an unreachable device gets the host-based
/// unique id.
///
/// # Errors
///
/// Returns [`ValueError::EmptyHost`](crate::error::ValueError::EmptyHost) for
/// a blank host.
pub async fn discovered_via_zeroconf(host: &str) -> Result<ValidatedDevice, Error> {
    let config = SwitchConfig::new(host);
    let client = config.http_config().into_client()?;
    let unique_id = identify(&client, host).await;
    tracing::debug!(host = %host, unique_id = %unique_id, "Discovered via zeroconf");
    Ok(ValidatedDevice::new(unique_id, config))
}

/// Handles a switch seen in a DHCP lease.
///
/// The MAC from the lease becomes the unique id.
///
/// # Errors
///
/// Returns [`ValueError::InvalidMac`](crate::error::ValueError::InvalidMac)
/// for a malformed address and [`SetupError::CannotConnect`] if the device
/// does not answer.
pub async fn discovered_via_dhcp(ip: &str, mac: &str) -> Result<ValidatedDevice, Error> {
    let mac: MacAddress = mac.parse()?;
    let config = SwitchConfig::new(ip);
    let client = config.http_config().into_client()?;

    if !client.test_connection().await {
        return Err(SetupError::CannotConnect {
            host: ip.to_string(),
        }
        .into());
    }

    tracing::debug!(host = %ip, mac = %mac, "Discovered via DHCP");
    Ok(ValidatedDevice::new(mac.to_string(), config))
}

/// MAC from `/info`, or the host with `.` replaced by `_`.
async fn identify<A: SwitchApi>(api: &A, host: &str) -> String {
    match api.get_info().await {
        Ok(info) => info
            .mac_address()
            .map_or_else(|| host_unique_id(host), |mac| mac.to_string()),
        Err(err) => {
            tracing::debug!(host = %host, error = %err, "No device info, using host as unique id");
            host_unique_id(host)
        }
    }
}

fn host_unique_id(host: &str) -> String {
    host.replace('.', "_")
}
