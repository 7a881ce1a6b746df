// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sys component: device-wide settings and system counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::request::{SetConfigResponse, rpc_request};

/// Device-wide configuration.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysConfig {
    /// Device identity and naming.
    pub device: Option<SysDeviceConfig>,
    /// Time zone and coordinates.
    pub location: Option<SysLocationConfig>,
    /// Debug log sinks.
    pub debug: Option<SysDebugConfig>,
    /// Opaque data stored for the web UI.
    pub ui_data: Option<Value>,
    /// RPC over UDP.
    pub rpc_udp: Option<SysRpcUdpConfig>,
    /// Time server.
    pub sntp: Option<SysSntpConfig>,
    /// Configuration revision. Read-only.
    pub cfg_rev: Option<u64>,
}

/// Device identity settings.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysDeviceConfig {
    /// User-assigned device name, `Some(None)` when unset.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    /// Eco mode.
    pub eco_mode: Option<bool>,
    /// MAC address. Read-only.
    pub mac: Option<String>,
    /// Firmware build id. Read-only.
    pub fw_id: Option<String>,
    /// Active profile on multi-profile devices.
    pub profile: Option<String>,
    /// Whether the device is visible to discovery.
    pub discoverable: Option<bool>,
    /// Installed add-on type.
    pub addon_type: Option<String>,
}

/// Location settings.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysLocationConfig {
    /// IANA time zone, e.g. `Europe/Sofia`.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub tz: Option<Option<String>>,
    /// Latitude in degrees.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub lat: Option<Option<f64>>,
    /// Longitude in degrees.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub lon: Option<Option<f64>>,
}

/// Debug log sinks.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysDebugConfig {
    /// Log over MQTT.
    pub mqtt: Option<EnableFlag>,
    /// Log over WebSocket.
    pub websocket: Option<EnableFlag>,
    /// Log over UDP.
    pub udp: Option<SysDebugUdp>,
    /// Log level.
    pub level: Option<i32>,
    /// File log level (undocumented shape).
    pub file_level: Option<Value>,
}

/// A sink that can only be turned on or off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnableFlag {
    /// Whether the sink is on.
    pub enable: bool,
}

/// UDP log sink.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysDebugUdp {
    /// `host:port` to send to, `Some(None)` when disabled.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub addr: Option<Option<String>>,
}

/// RPC over UDP.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysRpcUdpConfig {
    /// Destination for outgoing notifications.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub dst_addr: Option<Option<String>>,
    /// Port to listen on, `Some(None)` when disabled.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub listen_port: Option<Option<u16>>,
}

/// Time server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysSntpConfig {
    /// Server host name.
    pub server: String,
}

/// System status.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysStatus {
    /// MAC address.
    pub mac: String,
    /// True if a change needs a reboot.
    pub restart_required: Option<bool>,
    /// Local time as `HH:MM`, `Some(None)` until synced.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub time: Option<Option<String>>,
    /// Unix time, `Some(None)` until synced.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub unixtime: Option<Option<i64>>,
    /// Seconds since boot.
    pub uptime: Option<f64>,
    /// Total RAM in bytes.
    pub ram_size: Option<u64>,
    /// Free RAM in bytes.
    pub ram_free: Option<u64>,
    /// File system size in bytes.
    pub fs_size: Option<u64>,
    /// Free file system space in bytes.
    pub fs_free: Option<u64>,
    /// Configuration revision.
    pub cfg_rev: Option<u64>,
    /// Key-value store revision.
    pub kvs_rev: Option<u64>,
    /// Schedules revision.
    pub schedule_rev: Option<u64>,
    /// Webhooks revision.
    pub webhook_rev: Option<u64>,
    /// Pending firmware updates.
    pub available_updates: Option<AvailableUpdates>,
    /// Boot reason on battery devices.
    pub wakeup_reason: Option<WakeUpReason>,
    /// Keep-alive period in seconds on battery devices.
    pub wakeup_period: Option<f64>,
    /// Present and true in safe mode.
    pub safe_mode: Option<bool>,
    /// Undocumented reset reason code.
    pub reset_reason: Option<i32>,
}

impl SysStatus {
    /// Returns the device clock as UTC, if synced.
    #[must_use]
    pub fn device_time(&self) -> Option<DateTime<Utc>> {
        self.unixtime.flatten().and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Firmware versions newer than the running one.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableUpdates {
    /// New stable version.
    pub stable: Option<FirmwareVersion>,
    /// New beta version.
    pub beta: Option<FirmwareVersion>,
}

/// A firmware version offer.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareVersion {
    /// Version string.
    pub version: String,
    /// Build id, when reported.
    pub build_id: Option<String>,
}

/// Why a battery device woke up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeUpReason {
    /// Boot type: `poweron`, `software_restart`, `deepsleep_wake`, ...
    pub boot: String,
    /// Cause: `button`, `usb`, `periodic`, `status_update`, ...
    pub cause: String,
}

/// `Sys.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SysGetConfig {}

/// `Sys.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SysSetConfig {
    /// New configuration.
    pub config: SysConfig,
}

/// `Sys.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SysGetStatus {}

rpc_request! {
    SysGetConfig => "Sys.GetConfig", SysConfig;
    SysSetConfig => "Sys.SetConfig", SetConfigResponse;
    SysGetStatus => "Sys.GetStatus", SysStatus;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RpcRequest;

    #[test]
    fn minimal_status() {
        let status: SysStatus = serde_json::from_str(r#"{"mac":"AA"}"#).unwrap();
        assert_eq!(status.mac, "AA");
        assert_eq!(status.uptime, None);
        assert!(status.device_time().is_none());
    }

    #[test]
    fn full_status() {
        let status = SysGetStatus::parse_response(
            r#"{"mac":"A8032AB12345","restart_required":false,"time":"16:06","unixtime":1654513590,
                "uptime":2155,"ram_size":246056,"ram_free":147112,"fs_size":458752,"fs_free":135168,
                "cfg_rev":9,"kvs_rev":0,"schedule_rev":0,"webhook_rev":0,
                "available_updates":{"beta":{"version":"0.11.0-beta1"}}}"#,
        )
        .unwrap();
        assert_eq!(status.cfg_rev, Some(9));
        assert_eq!(
            status
                .available_updates
                .as_ref()
                .unwrap()
                .beta
                .as_ref()
                .unwrap()
                .version,
            "0.11.0-beta1"
        );
        assert_eq!(status.device_time().unwrap().timestamp(), 1_654_513_590);
    }

    #[test]
    fn set_config_location_only() {
        let request = SysSetConfig {
            config: SysConfig {
                location: Some(SysLocationConfig {
                    tz: Some(Some("Europe/Sofia".to_string())),
                    ..SysLocationConfig::default()
                }),
                ..SysConfig::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"config": {"location": {"tz": "Europe/Sofia"}}})
        );
    }

    #[test]
    fn empty_params() {
        assert_eq!(serde_json::to_string(&SysGetStatus {}).unwrap(), "{}");
    }
}
