// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `shelly_rpc` library.
//!
//! Failures fall into four groups that callers usually want to tell apart:
//!
//! - the transport could not complete the call ([`ProtocolError`]),
//! - the device answered with an error object ([`RpcError`]),
//! - the device answered but the result did not have the expected shape
//!   ([`ParseError`], optionally scoped to one component key),
//! - the request itself could not be serialized.
//!
//! [`Error::kind`] collapses these into an [`ErrorKind`] for quick matching.

use thiserror::Error;

use crate::types::RpcErrorCode;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed to deliver the request or receive a response.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The device rejected the call.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The result of a call could not be decoded into the expected type.
    #[error("failed to decode {method} response: {source}")]
    Parse {
        /// RPC method whose result failed to decode.
        method: &'static str,
        /// Underlying decode failure.
        #[source]
        source: ParseError,
    },

    /// The request parameters could not be serialized.
    #[error("failed to encode {method} request: {source}")]
    Encode {
        /// RPC method whose parameters failed to encode.
        method: &'static str,
        /// Underlying serialization failure.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Returns the broad category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Protocol(ProtocolError::MalformedFrame(_) | ProtocolError::FrameEncoding(_))
            | Self::Parse { .. }
            | Self::Encode { .. } => ErrorKind::Malformed,
            Self::Protocol(_) => ErrorKind::Transport,
            Self::Rpc(_) => ErrorKind::Rpc,
        }
    }

    /// Returns the RPC error code if the device rejected the call.
    #[must_use]
    pub fn rpc_code(&self) -> Option<RpcErrorCode> {
        match self {
            Self::Rpc(err) => Some(err.code),
            _ => None,
        }
    }
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The call never completed (network, timeout, closed connection).
    Transport,
    /// The device returned an error status.
    Rpc,
    /// Bytes on the wire did not match the expected shape.
    Malformed,
}

/// An error object returned by the device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct RpcError {
    /// Classified error code.
    pub code: RpcErrorCode,
    /// Message supplied by the device.
    pub message: String,
}

impl RpcError {
    /// Creates an RPC error from a raw code and message.
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code: RpcErrorCode::from(code),
            message: message.into(),
        }
    }
}

/// Errors raised by transports.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// MQTT client failed.
    #[cfg(feature = "mqtt")]
    #[error("MQTT error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The device requires authentication.
    #[error("authentication required")]
    AuthenticationRequired,

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),

    /// The response frame was not a valid JSON-RPC envelope.
    #[error("malformed response frame: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    /// The request frame could not be serialized for the wire.
    #[error("failed to encode request frame: {0}")]
    FrameEncoding(#[source] serde_json::Error),
}

/// Errors raised while decoding a result body.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body was not valid JSON or did not match the target type.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// One entry of a flat status/config object failed to decode.
    #[error("malformed component `{key}`: {source}")]
    Component {
        /// The offending key, e.g. `sys` or `switch:1`.
        key: String,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// A component key did not follow the `<type>[:<id>]` format.
    #[error("invalid component key: {0}")]
    InvalidKey(String),
}

impl ParseError {
    /// Returns the component key this error is scoped to, if any.
    #[must_use]
    pub fn component_key(&self) -> Option<&str> {
        match self {
            Self::Component { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
