// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error codes returned in RPC error objects.

use std::fmt;

/// Error code carried by a Shelly RPC error object.
///
/// Well-known codes are classified; any other value is preserved verbatim in
/// [`RpcErrorCode::Other`].
///
/// # Examples
///
/// ```
/// use shelly_rpc::types::RpcErrorCode;
///
/// let code = RpcErrorCode::from(-105);
/// assert_eq!(code, RpcErrorCode::UnknownComponentId);
/// assert_eq!(code.code(), -105);
///
/// let odd = RpcErrorCode::from(-42);
/// assert_eq!(odd, RpcErrorCode::Other(-42));
/// assert_eq!(odd.code(), -42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcErrorCode {
    /// `-103`: invalid or missing arguments.
    InvalidArgument,
    /// `-104`: the request timed out on the device.
    DeadlineExceeded,
    /// `-105`: the component id is not present on the device
    /// (e.g. `switch:2` on a single-switch device). Not officially documented.
    UnknownComponentId,
    /// `-108`: the response payload was too large to handle.
    ResourceExhausted,
    /// `-109`: a precondition for the action is not satisfied, e.g. switching
    /// on during an overpower condition or while a reboot is pending.
    FailedPrecondition,
    /// `-114`: generic "other error conditions".
    Unavailable,
    /// `-10`: name not resolved.
    NameNotResolved,
    /// `-11`: sending data to the remote peer failed.
    SendFailed,
    /// `-12`: header parse error.
    HeaderParseError,
    /// `-13`: unsupported encoding.
    UnsupportedEncoding,
    /// `-14`: response too big to fit into a frame.
    ResponseTooBig,
    /// `-15`: the request body could not be parsed.
    BodyParseError,
    /// `-16`: connection closed prematurely.
    ConnectionClosedPrematurely,
    /// `-17`: too many redirects.
    TooManyRedirects,
    /// `-18`: HTTP error response.
    HttpErrorResponse,
    /// `404`: no handler for the method. Seen on devices, not documented.
    NoHandler,
    /// Any code not listed above.
    Other(i32),
}

impl RpcErrorCode {
    /// Returns the numeric code as sent by the device.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidArgument => -103,
            Self::DeadlineExceeded => -104,
            Self::UnknownComponentId => -105,
            Self::ResourceExhausted => -108,
            Self::FailedPrecondition => -109,
            Self::Unavailable => -114,
            Self::NameNotResolved => -10,
            Self::SendFailed => -11,
            Self::HeaderParseError => -12,
            Self::UnsupportedEncoding => -13,
            Self::ResponseTooBig => -14,
            Self::BodyParseError => -15,
            Self::ConnectionClosedPrematurely => -16,
            Self::TooManyRedirects => -17,
            Self::HttpErrorResponse => -18,
            Self::NoHandler => 404,
            Self::Other(code) => *code,
        }
    }

    /// Returns a short human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid or missing arguments",
            Self::DeadlineExceeded => "deadline exceeded",
            Self::UnknownComponentId => "unknown component ID",
            Self::ResourceExhausted => "resource exhausted",
            Self::FailedPrecondition => "failed precondition",
            Self::Unavailable => "unavailable",
            Self::NameNotResolved => "name not resolved",
            Self::SendFailed => "sending data to remote peer failed",
            Self::HeaderParseError => "header parse error",
            Self::UnsupportedEncoding => "unsupported encoding",
            Self::ResponseTooBig => "response too big",
            Self::BodyParseError => "body parse error",
            Self::ConnectionClosedPrematurely => "connection closed prematurely",
            Self::TooManyRedirects => "too many redirects",
            Self::HttpErrorResponse => "http error response",
            Self::NoHandler => "no handler for request",
            Self::Other(_) => "unrecognized error",
        }
    }

    /// Returns true if the code is one of the network-layer codes (`-10..=-18`).
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self.code(), -18..=-10)
    }
}

impl From<i32> for RpcErrorCode {
    fn from(code: i32) -> Self {
        match code {
            -103 => Self::InvalidArgument,
            -104 => Self::DeadlineExceeded,
            -105 => Self::UnknownComponentId,
            -108 => Self::ResourceExhausted,
            -109 => Self::FailedPrecondition,
            -114 => Self::Unavailable,
            -10 => Self::NameNotResolved,
            -11 => Self::SendFailed,
            -12 => Self::HeaderParseError,
            -13 => Self::UnsupportedEncoding,
            -14 => Self::ResponseTooBig,
            -15 => Self::BodyParseError,
            -16 => Self::ConnectionClosedPrematurely,
            -17 => Self::TooManyRedirects,
            -18 => Self::HttpErrorResponse,
            404 => Self::NoHandler,
            other => Self::Other(other),
        }
    }
}

impl From<RpcErrorCode> for i32 {
    fn from(code: RpcErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for RpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rpc error: {} ({})", self.description(), self.code())
    }
}
