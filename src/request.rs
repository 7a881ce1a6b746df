// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed RPC requests.
//!
//! Every Shelly method is modelled as a request struct that serializes to the
//! method's `params` object and names the type its `result` decodes into.
//!
//! # Examples
//!
//! ```
//! use shelly_rpc::RpcRequest;
//! use shelly_rpc::component::{SwitchSet, WasOnResponse};
//!
//! let set = SwitchSet::new(0, true);
//! assert_eq!(SwitchSet::METHOD, "Switch.Set");
//! assert_eq!(
//!     serde_json::to_value(&set).unwrap(),
//!     serde_json::json!({"id": 0, "on": true})
//! );
//!
//! let reply = SwitchSet::parse_response(r#"{"was_on":false}"#).unwrap();
//! assert_eq!(reply, WasOnResponse { was_on: false });
//! ```

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseError;

/// A request that can be sent with [`Client::call`](crate::Client::call).
pub trait RpcRequest: Serialize {
    /// Method name, e.g. `Switch.GetStatus`.
    const METHOD: &'static str;

    /// Type the `result` member decodes into.
    type Response: DeserializeOwned;

    /// Decodes a raw `result` body.
    ///
    /// The default decodes with `serde_json`. Requests whose result needs
    /// schema-driven decoding override this.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `raw` does not match `Self::Response`.
    fn parse_response(raw: &str) -> Result<Self::Response, ParseError> {
        serde_json::from_str(raw).map_err(ParseError::Json)
    }
}

/// Implements [`RpcRequest`] for a list of `Request => "Method", Response;`
/// triples.
macro_rules! rpc_request {
    ($($request:ty => $method:literal, $response:ty;)+) => {
        $(
            impl $crate::request::RpcRequest for $request {
                const METHOD: &'static str = $method;
                type Response = $response;
            }
        )+
    };
}

pub(crate) use rpc_request;

/// Result of methods that return nothing useful (`null` or `{}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmptyResponse {}

impl<'de> Deserialize<'de> for EmptyResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Self {})
    }
}

/// Result of every `<Component>.SetConfig` method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetConfigResponse {
    /// True if the device must reboot for the change to take effect.
    #[serde(default)]
    pub restart_required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_response_accepts_anything() {
        for raw in ["null", "{}", r#"{"foo":1}"#, "true", "[]"] {
            let parsed: EmptyResponse = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, EmptyResponse {});
        }
    }

    #[test]
    fn set_config_response_defaults() {
        let parsed: SetConfigResponse = serde_json::from_str("{}").unwrap();
        assert!(!parsed.restart_required);

        let parsed: SetConfigResponse =
            serde_json::from_str(r#"{"restart_required":true}"#).unwrap();
        assert!(parsed.restart_required);
    }
}
