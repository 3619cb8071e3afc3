// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `myStrom` library.
//!
//! Failures are split by where they come from: the network
//! ([`ConnectivityError`]), the device's answer ([`ProtocolError`]), invalid
//! configuration values ([`ValueError`]) and the integration setup
//! lifecycle ([`SetupError`]). Best-effort relay commands never produce an
//! error from the client; a switch view reports a rejected command as
//! [`CommandFailure`].

use thiserror::Error;

use crate::types::RelayCommand;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The device could not be reached.
    #[error("connectivity error: {0}")]
    Connectivity(#[from] ConnectivityError),

    /// The device answered, but not with something usable.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A configuration value was rejected.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Setting up an integration instance failed.
    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    /// A relay command did not go through.
    #[error(transparent)]
    Command(#[from] CommandFailure),
}

/// Network-level failures: timeouts, DNS, refused connections.
#[derive(Debug, Error)]
pub enum ConnectivityError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The request could not be sent or the connection dropped, including
    /// while the body was being read.
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The configured host does not form a valid URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// The device responded but the response was unusable.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Non-2xx HTTP status.
    #[error("unexpected HTTP status {code}")]
    Status {
        /// The status code returned by the device.
        code: u16,
    },

    /// The body is not the JSON document we expected.
    #[error("malformed JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The scan interval is outside the allowed range.
    #[error("scan interval {actual}s is out of range [{min}, {max}]")]
    ScanIntervalOutOfRange {
        /// Minimum allowed seconds.
        min: u16,
        /// Maximum allowed seconds.
        max: u16,
        /// The value that was provided.
        actual: u64,
    },

    /// The host is empty.
    #[error("host must not be empty")]
    EmptyHost,

    /// A MAC address could not be parsed.
    #[error("invalid MAC address: {0}")]
    InvalidMac(String),
}

/// Errors raised while setting up an integration instance.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The device did not answer the connection test.
    #[error("cannot connect to device at {host}")]
    CannotConnect {
        /// The host that was tried.
        host: String,
    },

    /// A device with the same unique id is already configured.
    #[error("device {unique_id} is already configured")]
    AlreadyConfigured {
        /// The duplicate unique id.
        unique_id: String,
    },

    /// The mandatory first poll failed.
    #[error("initial refresh failed: {0}")]
    InitialRefresh(#[source] Box<Error>),
}

/// A best-effort relay command reported failure; no state change occurred.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("relay command {command} failed")]
pub struct CommandFailure {
    /// The command that failed.
    pub command: RelayCommand,
}

impl Error {
    /// Returns `true` if this error comes from the network layer.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }

    /// Returns `true` if this error comes from a malformed device response.
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}

impl From<reqwest::Error> for ConnectivityError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::InvalidAddress(err.to_string());
        }
        Self::Request(err)
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::ScanIntervalOutOfRange {
            min: 5,
            max: 300,
            actual: 2,
        };
        assert_eq!(err.to_string(), "scan interval 2s is out of range [5, 300]");
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::EmptyHost.into();
        assert!(matches!(err, Error::Value(ValueError::EmptyHost)));
        assert!(!err.is_connectivity());
    }

    #[test]
    fn protocol_status_display() {
        let err = ProtocolError::Status { code: 503 };
        assert_eq!(err.to_string(), "unexpected HTTP status 503");
        assert!(Error::from(err).is_protocol());
    }

    #[test]
    fn command_failure_display() {
        let err = CommandFailure {
            command: RelayCommand::Toggle,
        };
        assert_eq!(err.to_string(), "relay command toggle failed");
    }

    #[test]
    fn setup_error_wraps_cause() {
        let cause = Error::Connectivity(ConnectivityError::Timeout(10_000));
        let err = SetupError::InitialRefresh(Box::new(cause));
        assert_eq!(
            err.to_string(),
            "initial refresh failed: connectivity error: request timed out after 10000 ms"
        );
    }
}
