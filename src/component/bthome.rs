// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BTHome: Bluetooth sensors bridged by the device.
//!
//! The `BTHome` service manages paired devices and the sensors derived from
//! their advertised objects. Each paired device becomes a `bthomedevice:N`
//! component and each sensor a `bthomesensor:N` component. Their ids start
//! at 200.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use super::unix_time;
use crate::request::{EmptyResponse, SetConfigResponse, rpc_request};
use crate::types::ComponentKey;

/// UI metadata stored with a BTHome component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiMeta {
    /// Web UI settings.
    #[serde(default)]
    pub ui: UiMetaIcon,
}

/// Icon shown in the web UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiMetaIcon {
    /// Icon URL or name, `None` for the default icon.
    pub icon: Option<String>,
}

/// Configuration of a paired BTHome device.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtHomeDeviceConfig {
    /// Instance id.
    pub id: Option<u32>,
    /// User-assigned name.
    pub name: Option<String>,
    /// Bluetooth MAC address.
    pub addr: Option<String>,
    /// AES key for encrypted advertisements, hex encoded.
    pub key: Option<String>,
    /// UI metadata.
    pub meta: Option<UiMeta>,
}

/// Status of a paired BTHome device.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BtHomeDeviceStatus {
    /// Instance id.
    pub id: u32,
    /// Signal strength of the last advertisement in dBm.
    pub rssi: Option<f64>,
    /// Battery level in percent.
    pub battery: Option<f64>,
    /// Id of the last received packet.
    pub packet_id: Option<u32>,
    /// Unix timestamp of the last advertisement.
    pub last_update_ts: Option<f64>,
    /// Active error conditions.
    pub errors: Option<Vec<String>>,
}

impl BtHomeDeviceStatus {
    /// Returns [`last_update_ts`](Self::last_update_ts) as a UTC time.
    #[must_use]
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update_ts.and_then(unix_time)
    }
}

/// Configuration of a BTHome sensor.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtHomeSensorConfig {
    /// Instance id.
    pub id: Option<u32>,
    /// User-assigned name.
    pub name: Option<String>,
    /// BTHome object id the sensor reads.
    pub obj_id: Option<u32>,
    /// Index among objects with the same id.
    pub idx: Option<u32>,
    /// Bluetooth MAC address of the source device.
    pub addr: Option<String>,
    /// UI metadata.
    pub meta: Option<UiMeta>,
}

/// Status of a BTHome sensor.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BtHomeSensorStatus {
    /// Instance id.
    pub id: u32,
    /// Last value; a number or boolean depending on the object.
    pub value: Option<Value>,
    /// Unix timestamp of the last update.
    pub last_update_ts: Option<f64>,
}

/// `BTHome.AddDevice`
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeAddDevice {
    /// Requested id; the device picks one when `None`.
    pub id: Option<u32>,
    /// Device configuration; `addr` is required.
    pub config: BtHomeDeviceConfig,
}

/// `BTHome.AddSensor`
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeAddSensor {
    /// Requested id; the device picks one when `None`.
    pub id: Option<u32>,
    /// Sensor configuration; `addr`, `obj_id` and `idx` are required.
    pub config: BtHomeSensorConfig,
}

/// Result of `BTHome.AddDevice` and `BTHome.AddSensor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAdded {
    /// Key of the new component, e.g. `bthomesensor:200`.
    pub key: ComponentKey,
}

/// `BTHome.DeleteDevice`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeDeleteDevice {
    /// Instance id.
    pub id: u32,
}

/// `BTHome.DeleteSensor`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeDeleteSensor {
    /// Instance id.
    pub id: u32,
}

/// `BTHome.StartDiscovery`
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeStartDiscovery {
    /// Scan duration in seconds.
    pub duration: Option<u32>,
}

/// `BTHome.GetObjectInfos`
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeGetObjectInfos {
    /// Index of the first object to return.
    pub offset: Option<u32>,
}

/// One page of `BTHome.GetObjectInfos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtHomeObjectInfos {
    /// Object descriptions.
    #[serde(default)]
    pub objects: Vec<BtHomeObjectInfo>,
    /// Index of the first object in this page.
    #[serde(default)]
    pub offset: u32,
    /// Number of objects in this page.
    #[serde(default)]
    pub count: u32,
    /// Total number of known object ids.
    #[serde(default)]
    pub total: u32,
}

/// Description of a BTHome object id.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtHomeObjectInfo {
    /// Object id.
    pub obj_id: u32,
    /// Object name, e.g. `temperature`.
    pub obj_name: Option<String>,
    /// `sensor` or `binary_sensor`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Unit of measurement.
    pub unit: Option<String>,
}

/// `BTHomeDevice.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeDeviceGetConfig {
    /// Instance id.
    pub id: u32,
}

/// `BTHomeDevice.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeDeviceSetConfig {
    /// Instance id.
    pub id: u32,
    /// New configuration.
    pub config: BtHomeDeviceConfig,
}

/// `BTHomeDevice.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeDeviceGetStatus {
    /// Instance id.
    pub id: u32,
}

/// `BTHomeDevice.GetKnownObjects`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeDeviceGetKnownObjects {
    /// Instance id.
    pub id: u32,
}

/// Result of `BTHomeDevice.GetKnownObjects`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtHomeKnownObjects {
    /// Instance id.
    pub id: u32,
    /// Objects seen in the device's advertisements.
    #[serde(default)]
    pub objects: Vec<BtHomeKnownObject>,
}

/// An object advertised by a BTHome device.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtHomeKnownObject {
    /// Object id.
    pub obj_id: u32,
    /// Index among objects with the same id.
    pub idx: u32,
    /// Sensor component bound to the object, if any.
    pub component: Option<ComponentKey>,
}

/// `BTHomeSensor.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeSensorGetConfig {
    /// Instance id.
    pub id: u32,
}

/// `BTHomeSensor.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeSensorSetConfig {
    /// Instance id.
    pub id: u32,
    /// New configuration.
    pub config: BtHomeSensorConfig,
}

/// `BTHomeSensor.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BtHomeSensorGetStatus {
    /// Instance id.
    pub id: u32,
}

rpc_request! {
    BtHomeAddDevice => "BTHome.AddDevice", ComponentAdded;
    BtHomeAddSensor => "BTHome.AddSensor", ComponentAdded;
    BtHomeDeleteDevice => "BTHome.DeleteDevice", EmptyResponse;
    BtHomeDeleteSensor => "BTHome.DeleteSensor", EmptyResponse;
    BtHomeStartDiscovery => "BTHome.StartDiscovery", EmptyResponse;
    BtHomeGetObjectInfos => "BTHome.GetObjectInfos", BtHomeObjectInfos;
    BtHomeDeviceGetConfig => "BTHomeDevice.GetConfig", BtHomeDeviceConfig;
    BtHomeDeviceSetConfig => "BTHomeDevice.SetConfig", SetConfigResponse;
    BtHomeDeviceGetStatus => "BTHomeDevice.GetStatus", BtHomeDeviceStatus;
    BtHomeDeviceGetKnownObjects => "BTHomeDevice.GetKnownObjects", BtHomeKnownObjects;
    BtHomeSensorGetConfig => "BTHomeSensor.GetConfig", BtHomeSensorConfig;
    BtHomeSensorSetConfig => "BTHomeSensor.SetConfig", SetConfigResponse;
    BtHomeSensorGetStatus => "BTHomeSensor.GetStatus", BtHomeSensorStatus;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RpcRequest;
    use serde_json::json;

    #[test]
    fn object_infos_and_discovery_are_distinct_methods() {
        assert_eq!(BtHomeGetObjectInfos::METHOD, "BTHome.GetObjectInfos");
        assert_eq!(BtHomeStartDiscovery::METHOD, "BTHome.StartDiscovery");
    }

    #[test]
    fn add_sensor_returns_component_key() {
        let added = BtHomeAddSensor::parse_response(r#"{"key":"bthomesensor:201"}"#).unwrap();
        assert_eq!(added.key.component(), "bthomesensor");
        assert_eq!(added.key.id(), Some(201));
    }

    #[test]
    fn add_device_without_id() {
        let add = BtHomeAddDevice {
            id: None,
            config: BtHomeDeviceConfig {
                addr: Some("3c:2e:f5:71:d5:2a".to_string()),
                ..BtHomeDeviceConfig::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&add).unwrap(),
            json!({"config": {"addr": "3c:2e:f5:71:d5:2a"}})
        );
    }

    #[test]
    fn known_objects_with_and_without_component() {
        let known = BtHomeDeviceGetKnownObjects::parse_response(
            r#"{"id":200,"objects":[{"obj_id":1,"idx":0,"component":"bthomesensor:200"},{"obj_id":69,"idx":0,"component":null}]}"#,
        )
        .unwrap();
        assert_eq!(known.objects.len(), 2);
        assert!(known.objects[0].component.is_some());
        assert!(known.objects[1].component.is_none());
    }

    #[test]
    fn sensor_value_is_untyped() {
        let status: BtHomeSensorStatus =
            serde_json::from_str(r#"{"id":200,"value":true,"last_update_ts":1700000000}"#)
                .unwrap();
        assert_eq!(status.value, Some(json!(true)));

        let device: BtHomeDeviceStatus = serde_json::from_str(
            r#"{"id":200,"rssi":-60,"battery":92,"packet_id":17,"last_update_ts":1700000000}"#,
        )
        .unwrap();
        assert_eq!(device.last_update().unwrap().timestamp(), 1_700_000_000);
    }
}
