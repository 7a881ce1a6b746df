// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::component::{
    BleConfig, CloudConfig, CoverConfig, EthConfig, HumidityConfig, InputConfig, LightConfig,
    MqttConfig, SwitchConfig, SysConfig, TemperatureConfig, WifiConfig,
};

component_aggregate! {
    /// Configuration of every component on a device, as returned by
    /// `Shelly.GetConfig`.
    ///
    /// DevicePower has no configuration and is not listed.
    pub struct DeviceConfig {
        singletons {
            /// `sys`
            "sys" => system: SysConfig,
            /// `wifi`
            "wifi" => wifi: WifiConfig,
            /// `eth`
            "eth" => ethernet: EthConfig,
            /// `ble`
            "ble" => ble: BleConfig,
            /// `cloud`
            "cloud" => cloud: CloudConfig,
            /// `mqtt`
            "mqtt" => mqtt: MqttConfig,
        }
        collections {
            /// `input:N`
            "input" => inputs: InputConfig,
            /// `cover:N`
            "cover" => covers: CoverConfig,
            /// `switch:N`
            "switch" => switches: SwitchConfig,
            /// `light:N`
            "light" => lights: LightConfig,
            /// `humidity:N`
            "humidity" => humidities: HumidityConfig,
            /// `temperature:N`
            "temperature" => temperatures: TemperatureConfig,
        }
    }
}
