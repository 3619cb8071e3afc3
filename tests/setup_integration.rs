// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setup validation, discovery and entry lifecycle.

use std::time::Duration;

use mystrom_lib::error::{Error, SetupError};
use mystrom_lib::manager::{
    DEFAULT_TITLE, IntegrationManager, SwitchConfig, ValidatedDevice, discovered_via_dhcp,
    discovered_via_zeroconf, validate_device,
};
use mystrom_lib::types::ScanInterval;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UNREACHABLE: &str = "127.0.0.1:1";

async fn mock_switch(mac: Option<&str>) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "power": 12.0,
            "relay": true,
            "temperature": 20.0
        })))
        .mount(&mock_server)
        .await;

    let info = match mac {
        Some(mac) => ResponseTemplate::new(200).set_body_json(serde_json::json!({"mac": mac})),
        None => ResponseTemplate::new(404),
    };
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(info)
        .mount(&mock_server)
        .await;

    mock_server
}

// ============================================================================
// Validation
// ============================================================================

mod validation {
    use super::*;

    #[tokio::test]
    async fn uses_mac_from_info() {
        let mock_server = mock_switch(Some("A4CF120B9E01")).await;

        let device = validate_device(
            SwitchConfig::new(mock_server.uri()).with_scan_interval(ScanInterval::new(15).unwrap()),
        )
        .await
        .unwrap();

        assert_eq!(device.title, DEFAULT_TITLE);
        assert_eq!(device.unique_id, "A4CF120B9E01");
        assert_eq!(device.config.scan_interval().seconds(), 15);
    }

    #[tokio::test]
    async fn falls_back_to_host_without_info() {
        let mock_server = mock_switch(None).await;

        let device = validate_device(SwitchConfig::new(mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(device.unique_id, mock_server.uri().replace('.', "_"));
    }

    #[tokio::test]
    async fn unreachable_host_cannot_connect() {
        let err = validate_device(SwitchConfig::new(UNREACHABLE))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Setup(SetupError::CannotConnect { ref host }) if host == UNREACHABLE
        ));
    }
}

// ============================================================================
// Discovery
// ============================================================================

mod discovery {
    use super::*;

    #[tokio::test]
    async fn dhcp_normalizes_mac() {
        let mock_server = mock_switch(None).await;

        let device = discovered_via_dhcp(&mock_server.uri(), "a4:cf:12:0b:9e:01")
            .await
            .unwrap();

        assert_eq!(device.unique_id, "A4CF120B9E01");
        assert_eq!(device.config.scan_interval(), ScanInterval::default());
    }

    #[tokio::test]
    async fn dhcp_requires_reachable_device() {
        let err = discovered_via_dhcp(UNREACHABLE, "a4:cf:12:0b:9e:01")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Setup(SetupError::CannotConnect { .. })));
    }

    #[tokio::test]
    async fn zeroconf_reads_mac() {
        let mock_server = mock_switch(Some("A4CF120B9E01")).await;

        let device = discovered_via_zeroconf(&mock_server.uri()).await.unwrap();

        assert_eq!(device.unique_id, "A4CF120B9E01");
    }

    #[tokio::test]
    async fn zeroconf_tolerates_unreachable_device() {
        let device = discovered_via_zeroconf(UNREACHABLE).await.unwrap();
        assert_eq!(device.unique_id, "127_0_0_1:1");
    }
}

// ============================================================================
// Entry lifecycle
// ============================================================================

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn setup_and_unload() {
        let mock_server = mock_switch(Some("A4CF120B9E01")).await;
        let manager = IntegrationManager::default();

        let device = validate_device(SwitchConfig::new(mock_server.uri()))
            .await
            .unwrap();
        let entry_id = manager.setup_entry(device).await.unwrap();

        assert_eq!(manager.entry_ids().await, vec![entry_id]);
        assert!(manager.is_configured("A4CF120B9E01").await);

        let instance = manager.instance(entry_id).await.unwrap();
        assert!(instance.is_polling());
        assert!(instance.switch().is_on());

        assert!(manager.unload_entry(entry_id).await);
        assert!(!instance.is_polling());
        assert!(manager.is_empty().await);
        assert!(manager.instance(entry_id).await.is_none());
    }

    #[tokio::test]
    async fn duplicate_unique_id_is_rejected() {
        let mock_server = mock_switch(Some("A4CF120B9E01")).await;
        let manager = IntegrationManager::default();

        let device = validate_device(SwitchConfig::new(mock_server.uri()))
            .await
            .unwrap();
        manager.setup_entry(device.clone()).await.unwrap();

        let err = manager.setup_entry(device).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Setup(SetupError::AlreadyConfigured { ref unique_id }) if unique_id == "A4CF120B9E01"
        ));
        assert_eq!(manager.len().await, 1);
        manager.unload_all().await;
        assert!(manager.is_empty().await);
    }

    #[tokio::test]
    async fn failed_first_refresh_registers_nothing() {
        let manager = IntegrationManager::default().with_timeout(Duration::from_millis(500));
        let device = ValidatedDevice {
            title: DEFAULT_TITLE.to_string(),
            unique_id: "127_0_0_1:1".to_string(),
            config: SwitchConfig::new(UNREACHABLE),
        };

        let err = manager.setup_entry(device).await.unwrap_err();

        assert!(matches!(err, Error::Setup(SetupError::InitialRefresh(_))));
        assert!(manager.is_empty().await);
    }
}
