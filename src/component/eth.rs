// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Eth component: wired network on Pro devices.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::request::{SetConfigResponse, rpc_request};

/// Ethernet status.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthStatus {
    /// IP address, `Some(None)` without a link.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub ip: Option<Option<String>>,
}

/// Ethernet configuration.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthConfig {
    /// Whether the interface is on.
    pub enable: Option<bool>,
    /// `dhcp` or `static`.
    pub ipv4mode: Option<String>,
    /// Static IP address.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub ip: Option<Option<String>>,
    /// Static netmask.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub netmask: Option<Option<String>>,
    /// Static gateway.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub gw: Option<Option<String>>,
    /// Static DNS server.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub nameserver: Option<Option<String>>,
}

/// `Eth.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EthGetStatus {}

/// `Eth.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EthGetConfig {}

/// `Eth.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EthSetConfig {
    /// New configuration.
    pub config: EthConfig,
}

rpc_request! {
    EthGetStatus => "Eth.GetStatus", EthStatus;
    EthGetConfig => "Eth.GetConfig", EthConfig;
    EthSetConfig => "Eth.SetConfig", SetConfigResponse;
}
