// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wifi component: station and access point settings.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::request::{SetConfigResponse, rpc_request};

/// Wi-Fi status.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WifiStatus {
    /// Station IP address, `Some(None)` when disconnected.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub sta_ip: Option<Option<String>>,
    /// `disconnected`, `connecting`, `connected` or `got ip`.
    pub status: Option<String>,
    /// SSID of the joined network, `Some(None)` when disconnected.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub ssid: Option<Option<String>>,
    /// Signal strength in dBm.
    pub rssi: Option<i32>,
    /// Clients connected to the device's access point.
    pub ap_client_count: Option<u32>,
}

/// Wi-Fi configuration.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WifiConfig {
    /// Access point settings.
    pub ap: Option<WifiApConfig>,
    /// Primary station settings.
    pub sta: Option<WifiStationConfig>,
    /// Fallback station settings.
    pub sta1: Option<WifiStationConfig>,
    /// Roaming between the two stations.
    pub roam: Option<WifiRoamConfig>,
}

/// Access point settings.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WifiApConfig {
    /// Network name. Read-only on most devices.
    pub ssid: Option<String>,
    /// Password. Write-only.
    pub pass: Option<String>,
    /// True if no password is required.
    pub is_open: Option<bool>,
    /// Whether the access point is on.
    pub enable: Option<bool>,
    /// Range extender mode.
    pub range_extender: Option<RangeExtender>,
}

/// Range extender toggle.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeExtender {
    /// Whether the extender is on.
    pub enable: Option<bool>,
}

/// Station settings.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WifiStationConfig {
    /// Network to join.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub ssid: Option<Option<String>>,
    /// Password. Write-only.
    pub pass: Option<String>,
    /// True if the network is open.
    pub is_open: Option<bool>,
    /// Whether this station is used.
    pub enable: Option<bool>,
    /// `dhcp` or `static`.
    pub ipv4mode: Option<String>,
    /// Static IP address.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub ip: Option<Option<String>>,
    /// Static netmask.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub netmask: Option<Option<String>>,
    /// Static gateway.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub gw: Option<Option<String>>,
    /// Static DNS server.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub nameserver: Option<Option<String>>,
}

/// Roaming settings.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WifiRoamConfig {
    /// RSSI in dBm below which the device looks for a better AP.
    pub rssi_thr: Option<f64>,
    /// Scan interval in seconds, `0` disables roaming.
    pub interval: Option<f64>,
}

/// `Wifi.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WifiGetStatus {}

/// `Wifi.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WifiGetConfig {}

/// `Wifi.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WifiSetConfig {
    /// New configuration.
    pub config: WifiConfig,
}

rpc_request! {
    WifiGetStatus => "Wifi.GetStatus", WifiStatus;
    WifiGetConfig => "Wifi.GetConfig", WifiConfig;
    WifiSetConfig => "Wifi.SetConfig", SetConfigResponse;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RpcRequest;

    #[test]
    fn connected_status() {
        let status = WifiGetStatus::parse_response(
            r#"{"sta_ip":"192.168.33.5","status":"got ip","ssid":"Home","rssi":-62}"#,
        )
        .unwrap();
        assert_eq!(status.status.as_deref(), Some("got ip"));
        assert_eq!(status.rssi, Some(-62));
    }

    #[test]
    fn disconnected_status_with_null_ip() {
        let status: WifiStatus =
            serde_json::from_str(r#"{"sta_ip":null,"status":"disconnected"}"#).unwrap();
        assert_eq!(status.sta_ip, Some(None));
        assert_eq!(status.ssid, None);
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            r#"{"sta_ip":null,"status":"disconnected"}"#
        );
    }

    #[test]
    fn missing_status_stays_missing() {
        let status: WifiStatus = serde_json::from_str(r#"{"sta_ip":"10.0.0.2"}"#).unwrap();
        assert!(status.status.is_none());
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            r#"{"sta_ip":"10.0.0.2"}"#
        );
    }
}
