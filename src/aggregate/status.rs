// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::RawComponents;
use crate::component::{
    BleStatus, CloudStatus, CoverStatus, DevicePowerStatus, EthStatus, HumidityStatus,
    InputStatus, LightStatus, MqttStatus, SwitchStatus, SysStatus, TemperatureStatus, WifiStatus,
    unix_time,
};
use crate::error::ParseError;

component_aggregate! {
    /// Status of every component on a device, as returned by
    /// `Shelly.GetStatus`.
    pub struct DeviceStatus {
        singletons {
            /// `sys`
            "sys" => system: SysStatus,
            /// `wifi`
            "wifi" => wifi: WifiStatus,
            /// `eth`
            "eth" => ethernet: EthStatus,
            /// `ble`
            "ble" => ble: BleStatus,
            /// `cloud`
            "cloud" => cloud: CloudStatus,
            /// `mqtt`
            "mqtt" => mqtt: MqttStatus,
        }
        collections {
            /// `input:N`
            "input" => inputs: InputStatus,
            /// `cover:N`
            "cover" => covers: CoverStatus,
            /// `switch:N`
            "switch" => switches: SwitchStatus,
            /// `light:N`
            "light" => lights: LightStatus,
            /// `devicepower:N`
            "devicepower" => device_powers: DevicePowerStatus,
            /// `humidity:N`
            "humidity" => humidities: HumidityStatus,
            /// `temperature:N`
            "temperature" => temperatures: TemperatureStatus,
        }
    }
}

/// Parameters of a `NotifyStatus` or `NotifyFullStatus` notification.
///
/// `NotifyFullStatus` carries every component; `NotifyStatus` only the
/// components that changed, each with only the changed fields. Use
/// [`status`](Self::status) for full documents and
/// [`component`](Self::component) for deltas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifyStatus {
    /// Unix timestamp of the change.
    pub ts: f64,
    /// Component entries keyed as in [`DeviceStatus`].
    #[serde(flatten)]
    pub components: RawComponents,
}

impl NotifyStatus {
    /// Returns [`ts`](Self::ts) as a UTC time.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        unix_time(self.ts)
    }

    /// Decodes the entries into a [`DeviceStatus`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Component`] for the first malformed entry.
    pub fn status(&self) -> Result<DeviceStatus, ParseError> {
        DeviceStatus::from_components(&self.components)
    }

    /// Decodes the entry stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Component`] if the entry does not match `T`.
    pub fn component<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ParseError> {
        super::decode_singleton(&self.components, key)
    }
}
