// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DevicePower component: battery and external supply of battery devices.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::request::rpc_request;

/// Power supply status.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevicePowerStatus {
    /// Instance id.
    pub id: u32,
    /// Battery readings.
    pub battery: Option<BatteryStatus>,
    /// External supply.
    pub external: Option<ExternalPower>,
    /// Active error conditions.
    pub errors: Option<Vec<String>>,
}

/// Battery readings.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Battery voltage, `Some(None)` when no reading is available.
    #[serde(
        rename = "V",
        default,
        with = "::serde_with::rust::double_option"
    )]
    pub voltage: Option<Option<f64>>,
    /// Charge in percent, `Some(None)` when no reading is available.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub percent: Option<Option<f64>>,
}

/// External supply presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPower {
    /// True if an external supply is connected.
    pub present: bool,
}

/// `DevicePower.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DevicePowerGetStatus {
    /// Instance id.
    pub id: u32,
}

rpc_request! {
    DevicePowerGetStatus => "DevicePower.GetStatus", DevicePowerStatus;
}
