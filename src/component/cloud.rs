// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud component: connection to the Shelly cloud.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::request::{SetConfigResponse, rpc_request};

/// Cloud connection status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudStatus {
    /// True if connected.
    pub connected: bool,
}

/// Cloud configuration.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Whether the cloud connection is on.
    pub enable: bool,
    /// Cloud server host.
    pub server: Option<String>,
}

/// `Cloud.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CloudGetStatus {}

/// `Cloud.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CloudGetConfig {}

/// `Cloud.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CloudSetConfig {
    /// New configuration.
    pub config: CloudConfig,
}

rpc_request! {
    CloudGetStatus => "Cloud.GetStatus", CloudStatus;
    CloudGetConfig => "Cloud.GetConfig", CloudConfig;
    CloudSetConfig => "Cloud.SetConfig", SetConfigResponse;
}
