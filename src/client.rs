// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed RPC client.
//!
//! [`Client`] wraps a [`Transport`] and turns typed requests into frames and
//! frames back into typed results. It keeps no state between calls and never
//! retries; timeouts belong to the transport and cancellation to the caller
//! (dropping the returned future abandons the call).

use serde_json::value::RawValue;

use crate::aggregate::{DeviceConfig, DeviceStatus};
use crate::error::{Error, Result};
use crate::protocol::{JSON_RPC_VERSION, RequestFrame, Transport};
use crate::request::RpcRequest;
use crate::shelly::{
    ComponentInventory, DeviceInfo, GetComponents, GetConfig, GetDeviceInfo, GetStatus,
};

/// Default frame `src` of a [`Client`].
pub const DEFAULT_SOURCE: &str = "shelly-rpc";

/// Settings stamped on every request frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    source: String,
    jsonrpc: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            jsonrpc: JSON_RPC_VERSION.to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `src` field, which the device uses to address replies and
    /// notifications.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the `jsonrpc` protocol version string.
    #[must_use]
    pub fn with_jsonrpc(mut self, version: impl Into<String>) -> Self {
        self.jsonrpc = version.into();
        self
    }

    /// Returns the frame source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the protocol version string.
    #[must_use]
    pub fn jsonrpc(&self) -> &str {
        &self.jsonrpc
    }
}

/// A Shelly Gen2 RPC client over any [`Transport`].
///
/// # Examples
///
/// ```no_run
/// use shelly_rpc::Client;
/// use shelly_rpc::component::SwitchSet;
/// use shelly_rpc::protocol::HttpTransport;
///
/// # async fn example() -> shelly_rpc::Result<()> {
/// let client = Client::new(HttpTransport::new("192.168.1.50")?);
///
/// let reply = client.call(&SwitchSet::new(0, true)).await?;
/// println!("was on: {}", reply.was_on);
///
/// let status = client.get_status().await?;
/// for switch in &status.switches {
///     println!("switch:{} output={:?}", switch.id, switch.output);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> Client<T> {
    /// Creates a client with the default [`ClientConfig`].
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    /// Creates a client with an explicit configuration.
    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a request and decodes its result.
    ///
    /// # Errors
    ///
    /// - [`Error::Encode`] if the request does not serialize
    /// - [`Error::Protocol`] if the transport fails
    /// - [`Error::Rpc`] if the device returns an error object
    /// - [`Error::Parse`] if the result does not match `R::Response`
    pub async fn call<R: RpcRequest>(&self, request: &R) -> Result<R::Response> {
        let params = serde_json::to_value(request).map_err(|source| Error::Encode {
            method: R::METHOD,
            source,
        })?;
        let frame = RequestFrame::new(
            self.config.jsonrpc.as_str(),
            self.config.source.as_str(),
            R::METHOD,
            params,
        );

        tracing::debug!(method = R::METHOD, id = %frame.id, "Sending RPC request");
        let response = self.transport.call(&frame).await?;

        let result = response.into_result().inspect_err(|err| {
            tracing::debug!(method = R::METHOD, code = err.code.code(), "Device returned error");
        })?;
        let raw = result.as_deref().map_or("null", RawValue::get);
        tracing::trace!(method = R::METHOD, result = raw, "Received RPC result");

        R::parse_response(raw).map_err(|source| Error::Parse {
            method: R::METHOD,
            source,
        })
    }

    /// Fetches the status of every component (`Shelly.GetStatus`).
    ///
    /// # Errors
    ///
    /// As [`call`](Self::call).
    pub async fn get_status(&self) -> Result<DeviceStatus> {
        self.call(&GetStatus {}).await
    }

    /// Fetches the configuration of every component (`Shelly.GetConfig`).
    ///
    /// # Errors
    ///
    /// As [`call`](Self::call).
    pub async fn get_config(&self) -> Result<DeviceConfig> {
        self.call(&GetConfig {}).await
    }

    /// Fetches the device identity (`Shelly.GetDeviceInfo`).
    ///
    /// # Errors
    ///
    /// As [`call`](Self::call).
    pub async fn get_device_info(&self, ident: bool) -> Result<DeviceInfo> {
        self.call(&GetDeviceInfo {
            ident: ident.then_some(true),
        })
        .await
    }

    /// Walks every page of `Shelly.GetComponents`.
    ///
    /// Pages are requested one after another with `offset` set to the number
    /// of components received so far, until that number reaches the `total`
    /// reported by the device or a page comes back empty. `total` and
    /// `cfg_rev` are taken from the last page; components added or removed
    /// between pages are not detected. The `offset` of `request` is ignored.
    ///
    /// # Errors
    ///
    /// Returns the first page error; no partial inventory is returned.
    pub async fn get_all_components(&self, request: &GetComponents) -> Result<ComponentInventory> {
        let mut inventory = ComponentInventory::default();
        let mut total: u32 = 1;
        let mut have: u32 = 0;

        while have < total {
            let page = self
                .call(&request.clone().with_offset(have))
                .await?;
            let received = page.components.len();
            tracing::debug!(offset = have, received, total = page.total, "Received component page");

            total = page.total;
            inventory.cfg_rev = page.cfg_rev;
            inventory.components.extend(page.components);

            if received == 0 {
                if have < total {
                    tracing::debug!(have, total, "Device returned an empty page before total");
                }
                break;
            }
            have = have.saturating_add(u32::try_from(received).unwrap_or(u32::MAX));
        }

        inventory.total = total;
        Ok(inventory)
    }

    /// Uploads multi-line text one line per request.
    ///
    /// The device limits the size of a single request, so scripts and PEM
    /// files are sent in pieces. `make` builds the request for each line
    /// (newline included) and receives `append = false` for the first line
    /// and `true` for the rest. Empty text sends one empty, non-appending
    /// request. Returns the result of the last request.
    ///
    /// ```no_run
    /// # use shelly_rpc::{Client, protocol::Transport};
    /// use shelly_rpc::component::ScriptPutCode;
    ///
    /// # async fn example(client: Client<impl Transport>) -> shelly_rpc::Result<()> {
    /// let code = "let n = 0;\nprint(n);\n";
    /// let stored = client
    ///     .upload_lines(code, |code, append| ScriptPutCode { id: 1, code, append })
    ///     .await?;
    /// println!("{} bytes stored", stored.len);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Stops at the first failing request and returns its error; lines
    /// already sent stay on the device.
    pub async fn upload_lines<R, F>(&self, text: &str, mut make: F) -> Result<R::Response>
    where
        R: RpcRequest,
        F: FnMut(String, bool) -> R,
    {
        let mut lines = text.split_inclusive('\n');
        let first = lines.next().unwrap_or_default();
        let mut last = self.call(&make(first.to_string(), false)).await?;
        let mut sent = 1_usize;

        for line in lines {
            last = self.call(&make(line.to_string(), true)).await?;
            sent += 1;
        }

        tracing::debug!(method = R::METHOD, requests = sent, "Upload complete");
        Ok(last)
    }
}
