// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BLE component: Bluetooth radio settings.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::request::{SetConfigResponse, rpc_request};

/// Bluetooth status. The device reports an empty object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BleStatus {}

/// Bluetooth configuration.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BleConfig {
    /// Whether the radio is on.
    pub enable: Option<bool>,
    /// RPC over BLE.
    pub rpc: Option<BleRpcConfig>,
    /// Passive scanning for BLE advertisements (BTHome).
    pub observer: Option<BleObserverConfig>,
}

/// RPC over BLE.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BleRpcConfig {
    /// Whether the RPC service is on.
    pub enable: Option<bool>,
}

/// Passive BLE observer.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BleObserverConfig {
    /// Whether the observer is on.
    pub enable: Option<bool>,
}

/// `BLE.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BleGetStatus {}

/// `BLE.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BleGetConfig {}

/// `BLE.SetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BleSetConfig {
    /// New configuration.
    pub config: BleConfig,
}

rpc_request! {
    BleGetStatus => "BLE.GetStatus", BleStatus;
    BleGetConfig => "BLE.GetConfig", BleConfig;
    BleSetConfig => "BLE.SetConfig", SetConfigResponse;
}
