// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON-RPC frames exchanged with Shelly devices.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::value::RawValue;
use uuid::Uuid;

use crate::error::RpcError;

/// Default JSON-RPC protocol version.
pub const JSON_RPC_VERSION: &str = "2.0";

/// Outbound request frame.
///
/// ```json
/// {"jsonrpc":"2.0","id":"<uuid>","src":"shelly-rpc","method":"Switch.Set","params":{"id":0,"on":true}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestFrame {
    /// Protocol version, normally `"2.0"`.
    pub jsonrpc: String,
    /// Correlation id echoed by the device.
    pub id: String,
    /// Name of the caller. MQTT devices reply on `<src>/rpc`.
    pub src: String,
    /// Method name, e.g. `Shelly.GetStatus`.
    pub method: String,
    /// Method parameters.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

impl RequestFrame {
    /// Creates a frame with a fresh random id.
    #[must_use]
    pub fn new(
        jsonrpc: impl Into<String>,
        src: impl Into<String>,
        method: impl Into<String>,
        params: Value,
    ) -> Self {
        Self {
            jsonrpc: jsonrpc.into(),
            id: Uuid::new_v4().to_string(),
            src: src.into(),
            method: method.into(),
            params,
        }
    }

    /// Replaces the correlation id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replaces the source name.
    #[must_use]
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = src.into();
        self
    }
}

/// Error object carried in a response frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Numeric error code.
    pub code: i32,
    /// Device supplied message.
    #[serde(default)]
    pub message: String,
}

/// Inbound response frame.
///
/// Exactly one of `result` or `error` is expected, but neither is enforced:
/// an error object with code `0` is treated as success and a missing result
/// decodes as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseFrame {
    /// Correlation id copied from the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Device id of the responder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Echo of the request `src`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst: Option<String>,
    /// Undecoded result body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Box<RawValue>>,
    /// Error object, if the call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

impl ResponseFrame {
    /// Builds a successful frame around an already encoded result.
    ///
    /// # Errors
    ///
    /// Returns error if `result` is not valid JSON.
    pub fn success(id: impl Into<String>, result: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: Some(Value::String(id.into())),
            result: Some(RawValue::from_string(result.to_string())?),
            ..Self::default()
        })
    }

    /// Builds an error frame.
    #[must_use]
    pub fn failure(id: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            id: Some(Value::String(id.into())),
            error: Some(ErrorObject {
                code,
                message: message.into(),
            }),
            ..Self::default()
        }
    }

    /// Returns the correlation id as a string, if present.
    ///
    /// Numeric ids are rendered in decimal.
    #[must_use]
    pub fn id_str(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns the raw result body, or `null` if the frame carries none.
    #[must_use]
    pub fn result_str(&self) -> &str {
        self.result.as_deref().map_or("null", RawValue::get)
    }

    /// Splits the frame into its result or the device error.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] if the frame carries an error object with a
    /// non-zero code.
    pub fn into_result(self) -> Result<Option<Box<RawValue>>, RpcError> {
        match self.error {
            Some(err) if err.code != 0 => Err(RpcError::new(err.code, err.message)),
            _ => Ok(self.result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RpcErrorCode;

    #[test]
    fn request_frame_wire_format() {
        let frame = RequestFrame::new(
            JSON_RPC_VERSION,
            "me",
            "Switch.Set",
            serde_json::json!({"id": 0, "on": true}),
        )
        .with_id("abc");
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": "abc",
                "src": "me",
                "method": "Switch.Set",
                "params": {"id": 0, "on": true}
            })
        );
    }

    #[test]
    fn request_frame_ids_are_unique() {
        let a = RequestFrame::new("2.0", "me", "Shelly.GetStatus", Value::Null);
        let b = RequestFrame::new("2.0", "me", "Shelly.GetStatus", Value::Null);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn null_params_omitted() {
        let frame = RequestFrame::new("2.0", "me", "Shelly.Reboot", Value::Null).with_id("1");
        let json = serde_json::to_string(&frame).unwrap();
        assert!(!json.contains("params"));
    }

    #[test]
    fn response_with_result() {
        let frame: ResponseFrame = serde_json::from_str(
            r#"{"id":"abc","src":"shellyplus1-a8032ab12345","dst":"me","result":{"was_on":false}}"#,
        )
        .unwrap();
        assert_eq!(frame.id_str().as_deref(), Some("abc"));
        assert_eq!(frame.dst.as_deref(), Some("me"));
        assert_eq!(frame.result_str(), r#"{"was_on":false}"#);
        assert!(frame.into_result().unwrap().is_some());
    }

    #[test]
    fn response_with_error() {
        let frame: ResponseFrame = serde_json::from_str(
            r#"{"id":7,"src":"dev","error":{"code":-105,"message":"Argument 'id', value 2 not found!"}}"#,
        )
        .unwrap();
        assert_eq!(frame.id_str().as_deref(), Some("7"));
        let err = frame.into_result().unwrap_err();
        assert_eq!(err.code, RpcErrorCode::UnknownComponentId);
        assert_eq!(err.message, "Argument 'id', value 2 not found!");
    }

    #[test]
    fn zero_error_code_is_success() {
        let frame: ResponseFrame =
            serde_json::from_str(r#"{"id":"x","error":{"code":0,"message":""},"result":{}}"#)
                .unwrap();
        assert!(frame.into_result().is_ok());
    }

    #[test]
    fn missing_result_reads_as_null() {
        let frame: ResponseFrame = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert_eq!(frame.result_str(), "null");
    }

    #[test]
    fn helper_constructors() {
        let ok = ResponseFrame::success("1", r#"{"a":1}"#).unwrap();
        assert_eq!(ok.result_str(), r#"{"a":1}"#);

        let err = ResponseFrame::failure("1", -103, "bad");
        assert_eq!(
            err.into_result().unwrap_err().code,
            RpcErrorCode::InvalidArgument
        );
    }
}
