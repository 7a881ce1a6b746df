// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cover component: roller shutters and blinds driven by two outputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{EnergyCounters, TemperatureReading, unix_time};
use crate::request::{EmptyResponse, SetConfigResponse, rpc_request};

/// Configuration of a cover instance.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverConfig {
    /// Instance id.
    pub id: u32,
    /// User-assigned name, `Some(None)` when unset.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    /// Input mode: `single`, `dual` or `detached`.
    ///
    /// In `single` mode input 0 cycles open/stop/close/stop and input 1 is
    /// free for a safety switch. In `dual` mode input 0 opens and input 1
    /// closes.
    pub in_mode: Option<String>,
    /// Target on power-on: `open`, `closed` or `stopped`.
    pub initial_state: Option<String>,
    /// Overpower threshold in watts.
    pub power_limit: Option<f64>,
    /// Overvoltage threshold in volts.
    pub voltage_limit: Option<f64>,
    /// Undervoltage threshold in volts.
    pub undervoltage_limit: Option<f64>,
    /// Overcurrent threshold in amperes.
    pub current_limit: Option<f64>,
    /// Motor idle detection.
    pub motor: Option<CoverMotorConfig>,
    /// Seconds after which an opening move stops.
    pub max_time_open: Option<f64>,
    /// Seconds after which a closing move stops.
    pub max_time_close: Option<f64>,
    /// Swap the roles of the two inputs.
    pub swap_inputs: Option<bool>,
    /// Reverse motor rotation (needs a reboot).
    pub invert_directions: Option<bool>,
    /// Obstruction detection settings.
    pub obstruction_detection: Option<CoverObstructionDetection>,
    /// Safety switch settings (only with `in_mode = single`).
    pub safety_switch: Option<CoverSafetySwitch>,
}

/// Motor idle detection for AC motors.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverMotorConfig {
    /// Power in watts below which the motor is considered stopped.
    pub idle_power_thr: Option<f64>,
    /// Seconds in idle state before it is confirmed.
    pub idle_confirm_period: Option<f64>,
}

/// Obstruction detection safety feature.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverObstructionDetection {
    /// Whether detection is on.
    pub enable: Option<bool>,
    /// Monitored direction: `open`, `close` or `both`.
    pub direction: Option<String>,
    /// Recovery action: `stop` or `reverse`.
    pub action: Option<String>,
    /// Power in watts that indicates an obstruction. Overwritten by
    /// calibration.
    pub power_thr: Option<f64>,
    /// Seconds after the move starts before detection is active.
    pub holdoff: Option<f64>,
}

/// Safety switch feature.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverSafetySwitch {
    /// Whether the safety switch is on.
    pub enable: Option<bool>,
    /// Monitored direction: `open`, `close` or `both`.
    pub direction: Option<String>,
    /// Recovery action: `stop`, `reverse` or `pause`.
    pub action: Option<String>,
    /// Direction allowed while engaged: `reverse`, or `None` for no movement.
    pub allowed_move: Option<String>,
}

/// Status of a cover instance.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverStatus {
    /// Instance id.
    pub id: u32,
    /// Source of the last command.
    pub source: Option<String>,
    /// `open`, `closed`, `opening`, `closing`, `stopped` or `calibrating`.
    pub state: Option<String>,
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
    /// Position in percent, 0 is fully closed. Only when calibrated.
    pub current_pos: Option<f64>,
    /// Target position in percent while moving to a position.
    pub target_pos: Option<f64>,
    /// Seconds until the move stops regardless of completion.
    pub move_timeout: Option<f64>,
    /// Unix time the current move started.
    pub move_started_at: Option<f64>,
    /// True if calibrated and arbitrary positions can be requested.
    pub pos_control: Option<bool>,
    /// Direction of the last move: `open` or `close`.
    pub last_direction: Option<String>,
    /// Temperature of the output stage.
    pub temperature: Option<TemperatureReading>,
    /// Active error conditions.
    pub errors: Option<Vec<String>>,
}

impl CoverStatus {
    /// Returns when the current move started.
    #[must_use]
    pub fn move_started(&self) -> Option<DateTime<Utc>> {
        self.move_started_at.and_then(unix_time)
    }
}

/// Result of `Cover.ResetCounters`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverCounters {
    /// Counter values before the reset.
    pub aenergy: Option<EnergyCounters>,
}

/// `Cover.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverGetConfig {
    /// Instance id.
    pub id: u32,
}

/// `Cover.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverSetConfig {
    /// Instance id.
    pub id: u32,
    /// New configuration.
    pub config: CoverConfig,
}

/// `Cover.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverGetStatus {
    /// Instance id.
    pub id: u32,
}

/// `Cover.Open`
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CoverOpen {
    /// Instance id.
    pub id: u32,
    /// Seconds to move; full open if absent.
    pub duration: Option<f64>,
}

/// `Cover.Close`
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CoverClose {
    /// Instance id.
    pub id: u32,
    /// Seconds to move; full close if absent.
    pub duration: Option<f64>,
}

/// `Cover.Stop`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverStop {
    /// Instance id.
    pub id: u32,
}

/// `Cover.GoToPosition`
///
/// Exactly one of `pos` and `rel` must be set; use [`CoverGoToPosition::absolute`]
/// or [`CoverGoToPosition::relative`].
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CoverGoToPosition {
    /// Instance id.
    pub id: u32,
    /// Target position in percent, `0..=100`.
    pub pos: Option<f64>,
    /// Relative move in percent, `-100..=100`, capped at the end stops.
    pub rel: Option<f64>,
}

impl CoverGoToPosition {
    /// Moves to an absolute position.
    #[must_use]
    pub fn absolute(id: u32, pos: f64) -> Self {
        Self {
            id,
            pos: Some(pos),
            rel: None,
        }
    }

    /// Moves relative to the current position.
    #[must_use]
    pub fn relative(id: u32, rel: f64) -> Self {
        Self {
            id,
            pos: None,
            rel: Some(rel),
        }
    }
}

/// `Cover.Calibrate`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverCalibrate {
    /// Instance id.
    pub id: u32,
}

/// `Cover.ResetCounters`
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverResetCounters {
    /// Instance id.
    pub id: u32,
    /// Counters to reset, e.g. `["aenergy"]`; all if absent.
    #[serde(rename = "type")]
    pub counters: Option<Vec<String>>,
}

rpc_request! {
    CoverGetConfig => "Cover.GetConfig", CoverConfig;
    CoverSetConfig => "Cover.SetConfig", SetConfigResponse;
    CoverGetStatus => "Cover.GetStatus", CoverStatus;
    CoverOpen => "Cover.Open", EmptyResponse;
    CoverClose => "Cover.Close", EmptyResponse;
    CoverStop => "Cover.Stop", EmptyResponse;
    CoverGoToPosition => "Cover.GoToPosition", EmptyResponse;
    CoverCalibrate => "Cover.Calibrate", EmptyResponse;
    CoverResetCounters => "Cover.ResetCounters", CoverCounters;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RpcRequest;

    #[test]
    fn go_to_position_variants() {
        assert_eq!(
            serde_json::to_value(CoverGoToPosition::absolute(0, 40.0)).unwrap(),
            serde_json::json!({"id": 0, "pos": 40.0})
        );
        assert_eq!(
            serde_json::to_value(CoverGoToPosition::relative(0, -10.0)).unwrap(),
            serde_json::json!({"id": 0, "rel": -10.0})
        );
    }

    #[test]
    fn moving_status() {
        let status = CoverGetStatus::parse_response(
            r#"{"id":0,"source":"http","state":"opening","apower":85.3,"current_pos":12,
                "target_pos":100,"move_timeout":30,"move_started_at":1654511972.5,
                "pos_control":true,"last_direction":"open"}"#,
        )
        .unwrap();
        assert_eq!(status.state.as_deref(), Some("opening"));
        assert_eq!(status.current_pos, Some(12.0));
        assert_eq!(status.move_started().unwrap().timestamp(), 1_654_511_972);
    }

    #[test]
    fn reset_counters_type_field() {
        let request = CoverResetCounters {
            id: 1,
            counters: Some(vec!["aenergy".to_string()]),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"id": 1, "type": ["aenergy"]})
        );
    }

    #[test]
    fn stop_accepts_null_result() {
        assert_eq!(CoverStop::parse_response("null").unwrap(), EmptyResponse {});
    }
}
