// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input component: switches, buttons and analog inputs.

use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::skip_serializing_none;

use crate::request::{SetConfigResponse, rpc_request};

/// Configuration of an input instance.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Instance id.
    pub id: u32,
    /// User-assigned name, `Some(None)` when unset.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    /// `switch`, `button` or `analog`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Whether the input is enabled.
    pub enable: Option<bool>,
    /// Invert the logical state.
    pub invert: Option<bool>,
    /// Allow factory reset by toggling the input.
    pub factory_reset: Option<bool>,
    /// Analog report threshold in percent.
    pub report_thr: Option<f64>,
    /// Analog range mapping.
    pub range_map: Option<Vec<f64>>,
    /// Transformation of the analog value.
    pub xpercent: Option<InputXPercent>,
}

/// Analog value transformation.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputXPercent {
    /// JavaScript expression applied to `x`.
    pub expr: Option<String>,
    /// Unit of the transformed value.
    pub unit: Option<String>,
}

/// Status of an input instance.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputStatus {
    /// Instance id.
    pub id: u32,
    /// Logical state for `switch` inputs, `Some(None)` for buttons.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub state: Option<Option<bool>>,
    /// Analog value in percent.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub percent: Option<Option<f64>>,
    /// Transformed analog value.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub xpercent: Option<Option<f64>>,
    /// Active error conditions.
    pub errors: Option<Vec<String>>,
}

/// `Input.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InputGetConfig {
    /// Instance id.
    pub id: u32,
}

/// `Input.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputSetConfig {
    /// Instance id.
    pub id: u32,
    /// New configuration.
    pub config: InputConfig,
}

/// `Input.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InputGetStatus {
    /// Instance id.
    pub id: u32,
}

/// `Input.CheckExpression`: evaluates an `xpercent` expression on the device.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputCheckExpression {
    /// Expression to evaluate.
    pub expr: String,
    /// Sample inputs; `None` entries are sent as `null`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Option<f64>>,
}

/// Result of `Input.CheckExpression`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputCheckExpressionResponse {
    /// One entry per sample input.
    #[serde(default)]
    pub results: Vec<ExpressionResult>,
}

/// One evaluated sample.
///
/// On the wire this is a positional array `[input, output, error?]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpressionResult {
    /// The input sample.
    pub input: Option<f64>,
    /// The evaluated output.
    pub output: Option<f64>,
    /// Evaluation error, if any.
    pub error: Option<String>,
}

impl<'de> Deserialize<'de> for ExpressionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResultVisitor;

        impl<'de> Visitor<'de> for ResultVisitor {
            type Value = ExpressionResult;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an [input, output, error] array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let input = seq.next_element::<Option<f64>>()?.flatten();
                let output = seq.next_element::<Option<f64>>()?.flatten();
                let error = seq.next_element::<Option<String>>()?.flatten();
                while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
                Ok(ExpressionResult {
                    input,
                    output,
                    error,
                })
            }
        }

        deserializer.deserialize_seq(ResultVisitor)
    }
}

rpc_request! {
    InputGetConfig => "Input.GetConfig", InputConfig;
    InputSetConfig => "Input.SetConfig", SetConfigResponse;
    InputGetStatus => "Input.GetStatus", InputStatus;
    InputCheckExpression => "Input.CheckExpression", InputCheckExpressionResponse;
}
