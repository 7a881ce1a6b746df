// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire framing and transports for Shelly Gen2 devices.
//!
//! A transport moves one [`RequestFrame`] to the device and hands back the
//! matching [`ResponseFrame`]. It does not look inside `params` or `result`;
//! that is the job of [`Client`](crate::Client).
//!
//! # Transports
//!
//! - [`HttpTransport`]: `POST http://<host>/rpc` (feature `http`)
//! - [`MqttTransport`]: request on `<device>/rpc`, reply on `<src>/rpc`
//!   (feature `mqtt`)
//!
//! Any other carrier (WebSocket, a test double) can be plugged in by
//! implementing [`Transport`].

mod envelope;
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "mqtt")]
mod mqtt;

pub use envelope::{ErrorObject, JSON_RPC_VERSION, RequestFrame, ResponseFrame};
#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};
#[cfg(feature = "mqtt")]
pub use mqtt::{MqttTransport, MqttTransportBuilder};

use std::sync::Arc;

use crate::error::ProtocolError;

/// Carrier for JSON-RPC frames.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a request frame and waits for the device's response frame.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the frame cannot be delivered, no reply
    /// arrives in time, or the reply is not a JSON-RPC frame.
    async fn call(&self, request: &RequestFrame) -> Result<ResponseFrame, ProtocolError>;
}

impl<T: Transport> Transport for &T {
    async fn call(&self, request: &RequestFrame) -> Result<ResponseFrame, ProtocolError> {
        (**self).call(request).await
    }
}

impl<T: Transport> Transport for Arc<T> {
    async fn call(&self, request: &RequestFrame) -> Result<ResponseFrame, ProtocolError> {
        (**self).call(request).await
    }
}
