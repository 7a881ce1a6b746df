// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature component: standalone and add-on temperature sensors.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::request::{SetConfigResponse, rpc_request};

/// Temperature sensor configuration.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureConfig {
    /// Instance id.
    pub id: u32,
    /// User-assigned name, `Some(None)` when unset.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    /// Change in °C that triggers a report.
    #[serde(rename = "report_thr_C")]
    pub report_thr_c: Option<f64>,
    /// Calibration offset in °C.
    #[serde(rename = "offset_C")]
    pub offset_c: Option<f64>,
}

/// Temperature reading.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStatus {
    /// Instance id.
    pub id: u32,
    /// Degrees Celsius, `Some(None)` when the sensor has no reading.
    #[serde(
        rename = "tC",
        default,
        with = "::serde_with::rust::double_option"
    )]
    pub celsius: Option<Option<f64>>,
    /// Degrees Fahrenheit, `Some(None)` when the sensor has no reading.
    #[serde(
        rename = "tF",
        default,
        with = "::serde_with::rust::double_option"
    )]
    pub fahrenheit: Option<Option<f64>>,
    /// Active error conditions.
    pub errors: Option<Vec<String>>,
}

/// `Temperature.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TemperatureGetConfig {
    /// Instance id.
    pub id: u32,
}

/// `Temperature.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemperatureSetConfig {
    /// Instance id.
    pub id: u32,
    /// New configuration.
    pub config: TemperatureConfig,
}

/// `Temperature.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TemperatureGetStatus {
    /// Instance id.
    pub id: u32,
}

rpc_request! {
    TemperatureGetConfig => "Temperature.GetConfig", TemperatureConfig;
    TemperatureSetConfig => "Temperature.SetConfig", SetConfigResponse;
    TemperatureGetStatus => "Temperature.GetStatus", TemperatureStatus;
}
