// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch component: relay outputs, optionally with power metering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{EnergyCounters, TemperatureReading, unix_time};
use crate::request::{SetConfigResponse, rpc_request};

/// Configuration of a switch instance.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Instance id.
    pub id: u32,
    /// User-assigned name, `Some(None)` when unset.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    /// Mode of the associated input: `momentary`, `follow`, `flip`,
    /// `detached`, `cycle` or `activate`.
    pub in_mode: Option<String>,
    /// Output state on power-on: `off`, `on`, `restore_last`, `match_input`.
    pub initial_state: Option<String>,
    /// Whether "automatic ON" is enabled.
    pub auto_on: Option<bool>,
    /// Seconds until the output switches back on.
    pub auto_on_delay: Option<f64>,
    /// Whether "automatic OFF" is enabled.
    pub auto_off: Option<bool>,
    /// Seconds until the output switches back off.
    pub auto_off_delay: Option<f64>,
    /// Restore output after a voltage error clears.
    pub autorecover_voltage_errors: Option<bool>,
    /// Input controlling this switch (Pro1/Pro1PM only).
    pub input_id: Option<u32>,
    /// Overpower threshold in watts.
    pub power_limit: Option<f64>,
    /// Overvoltage threshold in volts.
    pub voltage_limit: Option<f64>,
    /// Undervoltage threshold in volts.
    pub undervoltage_limit: Option<f64>,
    /// Overcurrent threshold in amperes.
    pub current_limit: Option<f64>,
}

/// Status of a switch instance.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchStatus {
    /// Instance id.
    pub id: u32,
    /// Source of the last command (`init`, `WS_in`, `http`, ...).
    pub source: Option<String>,
    /// True if the output is on.
    pub output: Option<bool>,
    /// Unix time the running timer started.
    pub timer_started_at: Option<f64>,
    /// Duration of the running timer in seconds.
    pub timer_duration: Option<f64>,
    /// Active power in watts.
    pub apower: Option<f64>,
    /// Voltage in volts.
    pub voltage: Option<f64>,
    /// Current in amperes.
    pub current: Option<f64>,
    /// Power factor.
    pub pf: Option<f64>,
    /// Network frequency in hertz.
    pub freq: Option<f64>,
    /// Active energy counters.
    pub aenergy: Option<EnergyCounters>,
    /// Returned active energy counters.
    pub ret_aenergy: Option<EnergyCounters>,
    /// Relay temperature.
    pub temperature: Option<TemperatureReading>,
    /// Active error conditions (`overtemp`, `overpower`, ...).
    pub errors: Option<Vec<String>>,
}

impl SwitchStatus {
    /// Returns when the running timer started, if one is running.
    #[must_use]
    pub fn timer_started(&self) -> Option<DateTime<Utc>> {
        self.timer_started_at.and_then(unix_time)
    }
}

/// Result of `Switch.Set` and `Switch.Toggle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasOnResponse {
    /// True if the output was on before the call.
    pub was_on: bool,
}

/// `Switch.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SwitchGetConfig {
    /// Instance id.
    pub id: u32,
}

/// `Switch.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwitchSetConfig {
    /// Instance id.
    pub id: u32,
    /// New configuration; omitted fields are left unchanged.
    pub config: SwitchConfig,
}

/// `Switch.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SwitchGetStatus {
    /// Instance id.
    pub id: u32,
}

/// `Switch.Set`
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SwitchSet {
    /// Instance id.
    pub id: u32,
    /// Target output state.
    pub on: bool,
    /// Flip back after this many seconds.
    pub toggle_after: Option<f64>,
}

impl SwitchSet {
    /// Creates a request that switches output `id` on or off.
    #[must_use]
    pub fn new(id: u32, on: bool) -> Self {
        Self {
            id,
            on,
            toggle_after: None,
        }
    }

    /// Flips the output back after `seconds`.
    #[must_use]
    pub fn with_toggle_after(mut self, seconds: f64) -> Self {
        self.toggle_after = Some(seconds);
        self
    }
}

/// `Switch.Toggle`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SwitchToggle {
    /// Instance id.
    pub id: u32,
}

rpc_request! {
    SwitchGetConfig => "Switch.GetConfig", SwitchConfig;
    SwitchSetConfig => "Switch.SetConfig", SetConfigResponse;
    SwitchGetStatus => "Switch.GetStatus", SwitchStatus;
    SwitchSet => "Switch.Set", WasOnResponse;
    SwitchToggle => "Switch.Toggle", WasOnResponse;
}
