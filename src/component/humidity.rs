// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Humidity component.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::request::{SetConfigResponse, rpc_request};

/// Humidity sensor configuration.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumidityConfig {
    /// Instance id.
    pub id: u32,
    /// User-assigned name, `Some(None)` when unset.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    /// Change in percent that triggers a report.
    pub report_thr: Option<f64>,
    /// Calibration offset in percent.
    pub offset: Option<f64>,
}

/// Humidity reading.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumidityStatus {
    /// Instance id.
    pub id: u32,
    /// Relative humidity in percent, `Some(None)` on sensor error.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub rh: Option<Option<f64>>,
    /// Active error conditions.
    pub errors: Option<Vec<String>>,
}

/// `Humidity.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HumidityGetConfig {
    /// Instance id.
    pub id: u32,
}

/// `Humidity.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HumiditySetConfig {
    /// Instance id.
    pub id: u32,
    /// New configuration.
    pub config: HumidityConfig,
}

/// `Humidity.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HumidityGetStatus {
    /// Instance id.
    pub id: u32,
}

rpc_request! {
    HumidityGetConfig => "Humidity.GetConfig", HumidityConfig;
    HumiditySetConfig => "Humidity.SetConfig", SetConfigResponse;
    HumidityGetStatus => "Humidity.GetStatus", HumidityStatus;
}
