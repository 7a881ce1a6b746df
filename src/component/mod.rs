// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-component schemas and requests.
//!
//! Each Shelly component type has its own module with the status and
//! configuration structs the device reports, and one request struct per RPC
//! method. Requests implement [`RpcRequest`](crate::RpcRequest).
//!
//! | Component | Status | Config | Methods |
//! |-----------|--------|--------|---------|
//! | Switch | [`SwitchStatus`] | [`SwitchConfig`] | Get/SetConfig, GetStatus, Set, Toggle |
//! | Cover | [`CoverStatus`] | [`CoverConfig`] | Get/SetConfig, GetStatus, Open, Close, Stop, GoToPosition, Calibrate, ResetCounters |
//! | Light | [`LightStatus`] | [`LightConfig`] | Get/SetConfig, GetStatus, Set, Toggle |
//! | Input | [`InputStatus`] | [`InputConfig`] | Get/SetConfig, GetStatus, CheckExpression |
//! | Sys | [`SysStatus`] | [`SysConfig`] | Get/SetConfig, GetStatus |
//! | Wifi | [`WifiStatus`] | [`WifiConfig`] | Get/SetConfig, GetStatus |
//! | Eth | [`EthStatus`] | [`EthConfig`] | Get/SetConfig, GetStatus |
//! | BLE | [`BleStatus`] | [`BleConfig`] | Get/SetConfig, GetStatus |
//! | Cloud | [`CloudStatus`] | [`CloudConfig`] | Get/SetConfig, GetStatus |
//! | MQTT | [`MqttStatus`] | [`MqttConfig`] | Get/SetConfig, GetStatus |
//! | DevicePower | [`DevicePowerStatus`] | - | GetStatus |
//! | Humidity | [`HumidityStatus`] | [`HumidityConfig`] | Get/SetConfig, GetStatus |
//! | Temperature | [`TemperatureStatus`] | [`TemperatureConfig`] | Get/SetConfig, GetStatus |
//! | Script | [`ScriptStatus`] | [`ScriptConfig`] | Create, PutCode, Eval, Start, Stop, List, Delete, Get/SetConfig, GetStatus |
//! | Schedule | - | [`Schedule`] | Create, Update, Delete, DeleteAll, List |
//! | BTHome | - | - | AddDevice, DeleteDevice, AddSensor, DeleteSensor, StartDiscovery, GetObjectInfos |
//! | BTHomeDevice | [`BtHomeDeviceStatus`] | [`BtHomeDeviceConfig`] | Get/SetConfig, GetStatus, GetKnownObjects |
//! | BTHomeSensor | [`BtHomeSensorStatus`] | [`BtHomeSensorConfig`] | Get/SetConfig, GetStatus |

mod ble;
mod bthome;
mod cloud;
mod cover;
mod devicepower;
mod eth;
mod humidity;
mod input;
mod light;
mod mqtt;
mod schedule;
mod script;
mod switch;
mod sys;
mod temperature;
mod wifi;

pub use ble::{BleConfig, BleGetConfig, BleGetStatus, BleObserverConfig, BleRpcConfig, BleSetConfig, BleStatus};
pub use bthome::{
    BtHomeAddDevice, BtHomeAddSensor, BtHomeDeleteDevice, BtHomeDeleteSensor,
    BtHomeDeviceConfig, BtHomeDeviceGetConfig, BtHomeDeviceGetKnownObjects,
    BtHomeDeviceGetStatus, BtHomeDeviceSetConfig, BtHomeDeviceStatus, BtHomeGetObjectInfos,
    BtHomeKnownObject, BtHomeKnownObjects, BtHomeObjectInfo, BtHomeObjectInfos,
    BtHomeSensorConfig, BtHomeSensorGetConfig, BtHomeSensorGetStatus, BtHomeSensorSetConfig,
    BtHomeSensorStatus, BtHomeStartDiscovery, ComponentAdded, UiMeta, UiMetaIcon,
};
pub use cloud::{CloudConfig, CloudGetConfig, CloudGetStatus, CloudSetConfig, CloudStatus};
pub use cover::{
    CoverCalibrate, CoverClose, CoverConfig, CoverCounters, CoverGetConfig, CoverGetStatus,
    CoverGoToPosition, CoverMotorConfig, CoverObstructionDetection, CoverOpen,
    CoverResetCounters, CoverSafetySwitch, CoverSetConfig, CoverStatus, CoverStop,
};
pub use devicepower::{BatteryStatus, DevicePowerGetStatus, DevicePowerStatus, ExternalPower};
pub use eth::{EthConfig, EthGetConfig, EthGetStatus, EthSetConfig, EthStatus};
pub use humidity::{
    HumidityConfig, HumidityGetConfig, HumidityGetStatus, HumiditySetConfig, HumidityStatus,
};
pub use input::{
    ExpressionResult, InputCheckExpression, InputCheckExpressionResponse, InputConfig,
    InputGetConfig, InputGetStatus, InputSetConfig, InputStatus, InputXPercent,
};
pub use light::{
    LightButtonPresets, LightConfig, LightDoublePushPreset, LightGetConfig, LightGetStatus,
    LightNightMode, LightSet, LightSetConfig, LightStatus, LightToggle, LightTransition,
    LightTransitionTarget,
};
pub use mqtt::{MqttConfig, MqttGetConfig, MqttGetStatus, MqttSetConfig, MqttStatus, SslCa};
pub use schedule::{
    Schedule, ScheduleCall, ScheduleCreate, ScheduleCreated, ScheduleDelete, ScheduleDeleteAll,
    ScheduleList, ScheduleListResponse, ScheduleRevision, ScheduleUpdate,
};
pub use script::{
    ScriptConfig, ScriptCreate, ScriptCreated, ScriptDelete, ScriptEval, ScriptEvalResponse,
    ScriptGetConfig, ScriptGetStatus, ScriptList, ScriptListEntry, ScriptListResponse,
    ScriptPutCode, ScriptPutCodeResponse, ScriptSetConfig, ScriptStart, ScriptStatus, ScriptStop,
    WasRunningResponse,
};
pub use switch::{
    SwitchConfig, SwitchGetConfig, SwitchGetStatus, SwitchSet, SwitchSetConfig, SwitchStatus,
    SwitchToggle, WasOnResponse,
};
pub use sys::{
    AvailableUpdates, EnableFlag, FirmwareVersion, SysConfig, SysDebugConfig, SysDebugUdp,
    SysDeviceConfig, SysGetConfig, SysGetStatus, SysLocationConfig, SysRpcUdpConfig, SysSetConfig,
    SysSntpConfig, SysStatus, WakeUpReason,
};
pub use temperature::{
    TemperatureConfig, TemperatureGetConfig, TemperatureGetStatus, TemperatureSetConfig,
    TemperatureStatus,
};
pub use wifi::{
    RangeExtender, WifiApConfig, WifiConfig, WifiGetConfig, WifiGetStatus, WifiRoamConfig,
    WifiSetConfig, WifiStationConfig, WifiStatus,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Active energy counters reported by metering outputs.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyCounters {
    /// Total energy in watt-hours.
    pub total: f64,
    /// Energy per minute in milliwatt-hours for the last three minutes,
    /// most recent first.
    pub by_minute: Option<Vec<f64>>,
    /// Unix timestamp of the first second of the last minute.
    pub minute_ts: Option<f64>,
}

impl EnergyCounters {
    /// Returns [`minute_ts`](Self::minute_ts) as a UTC time.
    #[must_use]
    pub fn minute_start(&self) -> Option<DateTime<Utc>> {
        self.minute_ts.and_then(unix_time)
    }
}

/// Internal temperature of an output stage.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    /// Degrees Celsius, `Some(None)` when out of range.
    #[serde(
        rename = "tC",
        default,
        with = "::serde_with::rust::double_option"
    )]
    pub celsius: Option<Option<f64>>,
    /// Degrees Fahrenheit, `Some(None)` when out of range.
    #[serde(
        rename = "tF",
        default,
        with = "::serde_with::rust::double_option"
    )]
    pub fahrenheit: Option<Option<f64>>,
}

/// Converts a fractional Unix timestamp to a UTC time.
///
/// Returns `None` for values outside chrono's range or non-finite input.
#[must_use]
pub fn unix_time(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    // Safe: range checked by chrono below, sub-second part is < 1e9
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (secs, nanos) = {
        let secs = ts.floor();
        ((secs as i64), ((ts - secs) * 1e9) as u32)
    };
    DateTime::from_timestamp(secs, nanos)
}
