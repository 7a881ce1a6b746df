// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MQTT component: the device's own MQTT client.
//!
//! Several string settings distinguish three states on `SetConfig`: absent
//! (leave unchanged), `null` (clear) and a value. They are modelled as
//! `Option<Option<String>>`; `ssl_ca` uses [`SslCa`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::skip_serializing_none;

use crate::request::{SetConfigResponse, rpc_request};

/// TLS mode of the device's MQTT connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SslCa {
    /// Plain TCP (`null` on the wire).
    Disabled,
    /// TLS without server verification (`"*"`).
    NoVerify,
    /// TLS verified against the built-in CA bundle (`"ca.pem"`).
    DefaultCa,
    /// TLS verified against the CA uploaded with `Shelly.PutUserCA`
    /// (`"user_ca.pem"`).
    UserCa,
}

impl SslCa {
    /// Returns the wire value, `None` for [`SslCa::Disabled`].
    #[must_use]
    pub const fn as_wire(&self) -> Option<&'static str> {
        match self {
            Self::Disabled => None,
            Self::NoVerify => Some("*"),
            Self::DefaultCa => Some("ca.pem"),
            Self::UserCa => Some("user_ca.pem"),
        }
    }
}

impl Serialize for SslCa {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_wire() {
            Some(value) => serializer.serialize_str(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for SslCa {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None => Ok(Self::Disabled),
            Some("*") => Ok(Self::NoVerify),
            Some("ca.pem") => Ok(Self::DefaultCa),
            Some("user_ca.pem") => Ok(Self::UserCa),
            Some(other) => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(other),
                &"null, \"*\", \"ca.pem\" or \"user_ca.pem\"",
            )),
        }
    }
}

/// Deserializes a present field, keeping `null` as a value of `T`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// MQTT configuration.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqttConfig {
    /// Whether MQTT is on.
    pub enable: Option<bool>,
    /// Broker `host:port`.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub server: Option<Option<String>>,
    /// Client id; the device id when cleared.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub client_id: Option<Option<String>>,
    /// Broker user name.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub user: Option<Option<String>>,
    /// Broker password. Write-only.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub pass: Option<Option<String>>,
    /// TLS mode; `None` leaves it unchanged.
    #[serde(default, deserialize_with = "present")]
    pub ssl_ca: Option<SslCa>,
    /// Topic prefix; the device id when cleared.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub topic_prefix: Option<Option<String>>,
    /// Publish RPC notifications on `<prefix>/events/rpc`.
    pub rpc_ntf: Option<bool>,
    /// Publish status notifications on `<prefix>/status/<component>`.
    pub status_ntf: Option<bool>,
    /// Authenticate with the uploaded client certificate.
    pub use_client_cert: Option<bool>,
    /// Accept commands on the legacy control topics.
    pub enable_control: Option<bool>,
}

/// MQTT connection status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqttStatus {
    /// True if connected to the broker.
    pub connected: bool,
}

/// `MQTT.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MqttGetStatus {}

/// `MQTT.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MqttGetConfig {}

/// `MQTT.SetConfig`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MqttSetConfig {
    /// New configuration.
    pub config: MqttConfig,
}

rpc_request! {
    MqttGetStatus => "MQTT.GetStatus", MqttStatus;
    MqttGetConfig => "MQTT.GetConfig", MqttConfig;
    MqttSetConfig => "MQTT.SetConfig", SetConfigResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssl_ca_three_states_on_the_wire() {
        let unchanged = MqttConfig::default();
        assert_eq!(serde_json::to_string(&unchanged).unwrap(), "{}");

        let disabled = MqttConfig {
            ssl_ca: Some(SslCa::Disabled),
            ..MqttConfig::default()
        };
        assert_eq!(
            serde_json::to_string(&disabled).unwrap(),
            r#"{"ssl_ca":null}"#
        );

        let user_ca = MqttConfig {
            ssl_ca: Some(SslCa::UserCa),
            ..MqttConfig::default()
        };
        assert_eq!(
            serde_json::to_string(&user_ca).unwrap(),
            r#"{"ssl_ca":"user_ca.pem"}"#
        );
    }

    #[test]
    fn ssl_ca_decodes_null_as_disabled() {
        let config: MqttConfig = serde_json::from_str(r#"{"ssl_ca":null}"#).unwrap();
        assert_eq!(config.ssl_ca, Some(SslCa::Disabled));

        let config: MqttConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.ssl_ca, None);

        assert!(serde_json::from_str::<MqttConfig>(r#"{"ssl_ca":"mine.pem"}"#).is_err());
    }

    #[test]
    fn null_versus_absent_strings() {
        let config: MqttConfig = serde_json::from_str(
            r#"{"enable":true,"server":"broker:1883","client_id":null,"user":"u"}"#,
        )
        .unwrap();
        assert_eq!(config.enable, Some(true));
        assert_eq!(config.server, Some(Some("broker:1883".to_string())));
        assert_eq!(config.client_id, Some(None));
        assert_eq!(config.topic_prefix, None);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"enable": true, "server": "broker:1883", "client_id": null, "user": "u"})
        );
    }

    #[test]
    fn uses_enable_key() {
        let config: MqttConfig = serde_json::from_str(r#"{"enable":false}"#).unwrap();
        assert_eq!(config.enable, Some(false));
    }
}
