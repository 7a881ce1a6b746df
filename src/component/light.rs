// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light component: dimmable white outputs.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::TemperatureReading;
use crate::request::{EmptyResponse, SetConfigResponse, rpc_request};

/// Configuration of a light instance.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    /// Instance id.
    pub id: u32,
    /// User-assigned name, `Some(None)` when unset.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    /// Mode of the associated input: `follow`, `flip`, `activate`, `detached`
    /// or `dim`.
    pub in_mode: Option<String>,
    /// Output state on power-on.
    pub initial_state: Option<String>,
    /// Whether "automatic ON" is enabled.
    pub auto_on: Option<bool>,
    /// Seconds until the light switches back on.
    pub auto_on_delay: Option<f64>,
    /// Whether "automatic OFF" is enabled.
    pub auto_off: Option<bool>,
    /// Seconds until the light switches back off.
    pub auto_off_delay: Option<f64>,
    /// Default transition in seconds.
    pub transition_duration: Option<f64>,
    /// Brightness used when toggling on from zero.
    pub min_brightness_on_toggle: Option<f64>,
    /// Night mode settings.
    pub night_mode: Option<LightNightMode>,
    /// Dimming speed for button control, `1..=5`.
    pub button_fade_rate: Option<f64>,
    /// Presets applied by button gestures.
    pub button_presets: Option<LightButtonPresets>,
    /// Brightness range the output is mapped into.
    pub range_map: Option<Vec<f64>>,
}

/// Night mode: caps brightness during the given time windows.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightNightMode {
    /// Whether night mode is on.
    pub enable: Option<bool>,
    /// Brightness in percent while active.
    pub brightness: Option<f64>,
    /// Windows as `HH:MM` pairs.
    pub active_between: Option<Vec<String>>,
}

/// Presets triggered by button gestures.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightButtonPresets {
    /// Double-push preset.
    pub button_doublepush: Option<LightDoublePushPreset>,
}

/// Brightness applied on a double push.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightDoublePushPreset {
    /// Brightness in percent.
    pub brightness: Option<f64>,
}

/// Status of a light instance.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightStatus {
    /// Instance id.
    pub id: u32,
    /// Source of the last command.
    pub source: Option<String>,
    /// True if the light is on.
    pub output: Option<bool>,
    /// Brightness in percent.
    pub brightness: Option<f64>,
    /// Unix time the running timer started.
    pub timer_started_at: Option<f64>,
    /// Duration of the running timer in seconds.
    pub timer_duration: Option<f64>,
    /// Transition in progress.
    pub transition: Option<LightTransition>,
    /// Output stage temperature.
    pub temperature: Option<TemperatureReading>,
}

/// A running brightness transition.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightTransition {
    /// State at the end of the transition.
    pub target: Option<LightTransitionTarget>,
    /// Unix time the transition started.
    pub started_at: Option<f64>,
    /// Total duration in seconds.
    pub duration: Option<f64>,
}

/// Target of a running transition.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightTransitionTarget {
    /// Target output state.
    pub output: bool,
    /// Target brightness in percent.
    pub brightness: Option<f64>,
}

/// `Light.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LightGetConfig {
    /// Instance id.
    pub id: u32,
}

/// `Light.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LightSetConfig {
    /// Instance id.
    pub id: u32,
    /// New configuration.
    pub config: LightConfig,
}

/// `Light.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LightGetStatus {
    /// Instance id.
    pub id: u32,
}

/// `Light.Set`
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LightSet {
    /// Instance id.
    pub id: u32,
    /// Target output state.
    pub on: Option<bool>,
    /// Brightness in percent.
    pub brightness: Option<f64>,
    /// Transition time in seconds.
    pub transition_duration: Option<f64>,
    /// Flip back after this many seconds.
    pub toggle_after: Option<f64>,
}

/// `Light.Toggle`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LightToggle {
    /// Instance id.
    pub id: u32,
}

rpc_request! {
    LightGetConfig => "Light.GetConfig", LightConfig;
    LightSetConfig => "Light.SetConfig", SetConfigResponse;
    LightGetStatus => "Light.GetStatus", LightStatus;
    LightSet => "Light.Set", EmptyResponse;
    LightToggle => "Light.Toggle", EmptyResponse;
}
