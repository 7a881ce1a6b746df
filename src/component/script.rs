// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Script component: on-device JavaScript.
//!
//! Script ids are assigned by the device starting at 1. Large programs are
//! uploaded in pieces with [`ScriptPutCode`]; see
//! [`Client::upload_lines`](crate::Client::upload_lines).

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::request::{EmptyResponse, SetConfigResponse, rpc_request};

/// Script configuration.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Script id.
    pub id: u32,
    /// Script name.
    pub name: Option<String>,
    /// Run on boot.
    pub enable: Option<bool>,
}

/// Script status.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStatus {
    /// Script id.
    pub id: u32,
    /// True while running.
    #[serde(default)]
    pub running: bool,
    /// Memory used in bytes, while running.
    pub mem_used: Option<u64>,
    /// Peak memory in bytes, while running.
    pub mem_peak: Option<u64>,
    /// Free memory in bytes, while running.
    pub mem_free: Option<u64>,
    /// Failure reasons: `crashed`, `syntax_error`, `out_of_memory`, ...
    pub errors: Option<Vec<String>>,
}

/// `Script.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptGetConfig {
    /// Script id.
    pub id: u32,
}

/// `Script.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptSetConfig {
    /// Script id.
    pub id: u32,
    /// New configuration.
    pub config: ScriptConfig,
}

/// `Script.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptGetStatus {
    /// Script id.
    pub id: u32,
}

/// `Script.Create`
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptCreate {
    /// Name of the new script.
    pub name: Option<String>,
}

/// Result of `Script.Create`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptCreated {
    /// Id of the new script.
    pub id: u32,
}

/// `Script.PutCode`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptPutCode {
    /// Script id.
    pub id: u32,
    /// Code to store.
    pub code: String,
    /// Append to the stored code instead of replacing it.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub append: bool,
}

/// Result of `Script.PutCode`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPutCodeResponse {
    /// Total code length in bytes after the call.
    pub len: u64,
}

/// `Script.Eval`: evaluates an expression in a running script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptEval {
    /// Script id.
    pub id: u32,
    /// Expression to evaluate.
    pub code: String,
}

/// Result of `Script.Eval`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEvalResponse {
    /// Stringified result.
    pub result: String,
}

/// `Script.Start`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptStart {
    /// Script id.
    pub id: u32,
}

/// `Script.Stop`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptStop {
    /// Script id.
    pub id: u32,
}

/// Result of `Script.Start` and `Script.Stop`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasRunningResponse {
    /// True if the script was running before the call.
    pub was_running: bool,
}

/// `Script.List`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptList {}

/// One script in a `Script.List` result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptListEntry {
    /// Script id.
    pub id: u32,
    /// Script name.
    pub name: String,
    /// Run on boot.
    pub enable: bool,
    /// True while running.
    pub running: bool,
}

/// Result of `Script.List`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptListResponse {
    /// All scripts on the device.
    #[serde(default)]
    pub scripts: Vec<ScriptListEntry>,
}

/// `Script.Delete`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptDelete {
    /// Script id.
    pub id: u32,
}

rpc_request! {
    ScriptGetConfig => "Script.GetConfig", ScriptConfig;
    ScriptSetConfig => "Script.SetConfig", SetConfigResponse;
    ScriptGetStatus => "Script.GetStatus", ScriptStatus;
    ScriptCreate => "Script.Create", ScriptCreated;
    ScriptPutCode => "Script.PutCode", ScriptPutCodeResponse;
    ScriptEval => "Script.Eval", ScriptEvalResponse;
    ScriptStart => "Script.Start", WasRunningResponse;
    ScriptStop => "Script.Stop", WasRunningResponse;
    ScriptList => "Script.List", ScriptListResponse;
    ScriptDelete => "Script.Delete", EmptyResponse;
}
