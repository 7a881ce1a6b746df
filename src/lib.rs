// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `shelly_rpc` - a typed client for the Shelly Gen2 JSON-RPC API.
//!
//! Every RPC method of a Shelly Gen2 device is a request struct implementing
//! [`RpcRequest`]: it serializes to the method's `params` and names the type
//! its `result` decodes into. A [`Client`] sends requests over any
//! [`Transport`](protocol::Transport) and returns typed results.
//!
//! # Supported Features
//!
//! - **Component requests**: Switch, Cover, Light, Input, Sys, Wi-Fi,
//!   Ethernet, BLE, Cloud, MQTT, DevicePower, Humidity, Temperature, Script,
//!   Schedule and BTHome (see [`component`])
//! - **Whole-device documents**: `Shelly.GetStatus` and `Shelly.GetConfig`
//!   decoded into [`DeviceStatus`] and [`DeviceConfig`]
//! - **Component inventory**: every page of `Shelly.GetComponents` via
//!   [`Client::get_all_components`]
//! - **Transports**: HTTP (`http` feature) and MQTT (`mqtt` feature)
//!
//! # Quick Start
//!
//! ## HTTP
//!
//! ```no_run
//! use shelly_rpc::Client;
//! use shelly_rpc::component::SwitchToggle;
//! use shelly_rpc::protocol::HttpTransport;
//!
//! #[tokio::main]
//! async fn main() -> shelly_rpc::Result<()> {
//!     let client = Client::new(HttpTransport::new("192.168.1.50")?);
//!
//!     let info = client.get_device_info(false).await?;
//!     println!("{} running {}", info.model, info.ver);
//!
//!     client.call(&SwitchToggle { id: 0 }).await?;
//!
//!     let status = client.get_status().await?;
//!     println!("{} switches", status.switches.len());
//!     Ok(())
//! }
//! ```
//!
//! ## MQTT
//!
//! ```no_run
//! use shelly_rpc::Client;
//! use shelly_rpc::protocol::MqttTransportBuilder;
//!
//! #[tokio::main]
//! async fn main() -> shelly_rpc::Result<()> {
//!     let transport = MqttTransportBuilder::new()
//!         .broker("mqtt://192.168.1.10:1883")
//!         .device_id("shellyplus1-a8032ab1c2d3")
//!         .credentials("user", "secret")
//!         .build()
//!         .await?;
//!     // Replies come back on `<source>/rpc`; the transport stamps its own source.
//!     let client = Client::new(transport);
//!
//!     let config = client.get_config().await?;
//!     if let Some(sys) = config.system {
//!         println!("{:?}", sys.device.and_then(|d| d.name).flatten());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! [`Error`] separates transport failures, device error objects (with a
//! classified [`RpcErrorCode`](types::RpcErrorCode)) and results that did
//! not decode; [`Error::kind`] gives the coarse category.

pub mod aggregate;
mod client;
pub mod component;
pub mod error;
pub mod protocol;
pub mod request;
pub mod shelly;
pub mod types;

pub use aggregate::{DeviceConfig, DeviceStatus, NotifyStatus};
pub use client::{Client, ClientConfig, DEFAULT_SOURCE};
pub use error::{Error, ErrorKind, ParseError, ProtocolError, Result, RpcError};
pub use request::{EmptyResponse, RpcRequest, SetConfigResponse};
pub use shelly::{ComponentEntry, ComponentInventory, ComponentPage, GetComponents};
pub use types::{ComponentKey, RpcErrorCode};
