// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for `myStrom` switches.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{ConnectivityError, Error, ProtocolError, ValueError};
use crate::protocol::SwitchApi;
use crate::response::{DeviceInfo, ReportResponse};
use crate::state::DeviceState;
use crate::types::RelayCommand;

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for an HTTP connection to a switch.
///
/// # Examples
///
/// ```
/// use mystrom_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.100");
/// assert_eq!(config.base_url(), "http://192.168.1.100");
///
/// let config = HttpConfig::new("192.168.1.100")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://192.168.1.100:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the switch. A `host:port`
    ///   pair or a full `http://` URL is also accepted.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            return host.to_string();
        }
        if self.port == Self::DEFAULT_PORT {
            format!("http://{host}")
        } else {
            format!("http://{host}:{}", self.port)
        }
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::EmptyHost`] for a blank host, or a connectivity
    /// error if the underlying client cannot be built.
    pub fn into_client(self) -> Result<HttpClient, Error> {
        if self.host.trim().is_empty() {
            return Err(ValueError::EmptyHost.into());
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ConnectivityError::from)?;

        Ok(HttpClient {
            base_url: self.base_url(),
            host: self.host,
            client,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for a single `myStrom` switch.
///
/// # Examples
///
/// ```no_run
/// use mystrom_lib::protocol::{HttpClient, SwitchApi};
///
/// # async fn example() -> mystrom_lib::Result<()> {
/// let client = HttpClient::new("192.168.1.100")?;
/// let state = client.get_state().await?;
/// println!("{} W", state.power());
///
/// if !client.toggle().await {
///     eprintln!("toggle failed");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    host: String,
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client with the default port and timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, Error> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    fn connectivity(&self, err: reqwest::Error) -> ConnectivityError {
        if err.is_timeout() {
            ConnectivityError::Timeout(self.timeout_ms())
        } else {
            ConnectivityError::from(err)
        }
    }

    /// Issues a `GET` and checks the status code.
    async fn get(
        &self,
        path: &str,
        query: Option<(&str, &str)>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.url(path);
        tracing::debug!(url = %url, ?query, "Sending HTTP request");

        let mut request = self.client.get(&url);
        if let Some(pair) = query {
            request = request.query(&[pair]);
        }

        let response = request.send().await.map_err(|e| self.connectivity(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                code: status.as_u16(),
            }
            .into());
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self.get(path, None).await?;
        // No content decoding is enabled, so a failed read is always the
        // transport, even though reqwest tags it as a decode error.
        let body = response
            .text()
            .await
            .map_err(|e| Error::from(self.connectivity(e)))?;

        tracing::debug!(body = %body, "Received HTTP response");

        serde_json::from_str(&body).map_err(|e| ProtocolError::Json(e).into())
    }
}

impl SwitchApi for HttpClient {
    async fn get_state(&self) -> Result<DeviceState, Error> {
        match self.get_json::<ReportResponse>("/report").await {
            Ok(report) => Ok(report.into()),
            Err(err) => {
                tracing::debug!(host = %self.host, error = %err, "Error fetching switch state");
                Err(err)
            }
        }
    }

    async fn get_info(&self) -> Result<DeviceInfo, Error> {
        match self.get_json::<DeviceInfo>("/info").await {
            Ok(info) => Ok(info),
            Err(err) => {
                tracing::error!(host = %self.host, error = %err, "Error fetching switch info");
                Err(err)
            }
        }
    }

    async fn send_relay(&self, command: RelayCommand) -> bool {
        match self.get(command.path(), command.query()).await {
            Ok(_) => {
                tracing::debug!(host = %self.host, %command, "Relay command accepted");
                true
            }
            Err(err) => {
                tracing::error!(
                    host = %self.host,
                    %command,
                    error = %err,
                    "Error sending relay command"
                );
                false
            }
        }
    }

    fn host(&self) -> &str {
        &self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("192.168.1.100");
        assert_eq!(config.host(), "192.168.1.100");
        assert_eq!(config.port(), 80);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn http_config_base_url_custom_port() {
        let config = HttpConfig::new("192.168.1.100").with_port(8080);
        assert_eq!(config.base_url(), "http://192.168.1.100:8080");
    }

    #[test]
    fn http_config_base_url_keeps_scheme() {
        let config = HttpConfig::new("http://127.0.0.1:4321/");
        assert_eq!(config.base_url(), "http://127.0.0.1:4321");
    }

    #[test]
    fn http_config_host_port_pair() {
        let config = HttpConfig::new("127.0.0.1:4321");
        assert_eq!(config.base_url(), "http://127.0.0.1:4321");
    }

    #[test]
    fn empty_host_rejected() {
        let result = HttpConfig::new("  ").into_client();
        assert!(matches!(result, Err(Error::Value(ValueError::EmptyHost))));
    }

    #[test]
    fn client_urls() {
        let client = HttpClient::new("192.168.1.100").unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.100");
        assert_eq!(client.url("/report"), "http://192.168.1.100/report");
        assert_eq!(client.host(), "192.168.1.100");
    }

    #[test]
    fn timeout_reported_in_ms() {
        let client = HttpConfig::new("10.0.0.2")
            .with_timeout(Duration::from_millis(2500))
            .into_client()
            .unwrap();
        assert_eq!(client.timeout_ms(), 2500);
    }
}
