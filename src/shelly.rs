// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `Shelly` service: device-wide methods.
//!
//! Besides identity, firmware and maintenance methods, this service exposes
//! the two whole-device documents ([`GetStatus`], [`GetConfig`]) and the
//! paginated component inventory ([`GetComponents`]).

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::aggregate::{DeviceConfig, DeviceStatus};
use crate::component::AvailableUpdates;
use crate::error::ParseError;
use crate::request::{EmptyResponse, RpcRequest, rpc_request};
use crate::types::ComponentKey;

/// `Shelly.GetStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GetStatus {}

impl RpcRequest for GetStatus {
    const METHOD: &'static str = "Shelly.GetStatus";
    type Response = DeviceStatus;

    fn parse_response(raw: &str) -> Result<DeviceStatus, ParseError> {
        DeviceStatus::from_slice(raw.as_bytes())
    }
}

/// `Shelly.GetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GetConfig {}

impl RpcRequest for GetConfig {
    const METHOD: &'static str = "Shelly.GetConfig";
    type Response = DeviceConfig;

    fn parse_response(raw: &str) -> Result<DeviceConfig, ParseError> {
        DeviceConfig::from_slice(raw.as_bytes())
    }
}

/// `Shelly.GetDeviceInfo`
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GetDeviceInfo {
    /// Include the identity fields `key`, `batch` and `fw_sbits`.
    pub ident: Option<bool>,
}

/// Device identity.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device id, e.g. `shellyplus1pm-a8032ab12345`.
    pub id: String,
    /// MAC address.
    pub mac: String,
    /// Model SKU.
    pub model: String,
    /// Device generation.
    #[serde(rename = "gen")]
    pub generation: u32,
    /// Firmware build id.
    pub fw_id: String,
    /// Firmware version.
    pub ver: String,
    /// Application name.
    pub app: String,
    /// Active profile on multi-profile devices.
    pub profile: Option<String>,
    /// True if authentication is enabled.
    #[serde(default)]
    pub auth_en: bool,
    /// Authentication realm, `None` when disabled.
    pub auth_domain: Option<String>,
    /// Whether the device is visible to discovery.
    pub discoverable: Option<bool>,
    /// Cloud key, only with `ident`.
    pub key: Option<String>,
    /// Manufacturing batch, only with `ident`.
    pub batch: Option<String>,
    /// Firmware security bits, only with `ident`.
    pub fw_sbits: Option<String>,
}

/// `Shelly.GetComponents`: one page of the component inventory.
///
/// Use [`Client::get_all_components`](crate::Client::get_all_components) to
/// walk every page.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetComponents {
    /// Index of the first component to return.
    pub offset: Option<u32>,
    /// Sections to include per component: `status`, `config`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    /// Only return dynamically created components.
    pub dynamic_only: Option<bool>,
}

impl GetComponents {
    /// Creates a request for keys only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Includes each component's status.
    #[must_use]
    pub fn with_status(mut self) -> Self {
        self.include.push("status".to_string());
        self
    }

    /// Includes each component's configuration.
    #[must_use]
    pub fn with_config(mut self) -> Self {
        self.include.push("config".to_string());
        self
    }

    /// Restricts the listing to dynamic components.
    #[must_use]
    pub fn dynamic_only(mut self) -> Self {
        self.dynamic_only = Some(true);
        self
    }

    /// Sets the page offset.
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// One page returned by `Shelly.GetComponents`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentPage {
    /// Components in this page.
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
    /// Configuration revision.
    pub cfg_rev: Option<u64>,
    /// Index of the first component in this page.
    #[serde(default)]
    pub offset: u32,
    /// Total number of components on the device.
    #[serde(default)]
    pub total: u32,
}

/// One component in a [`ComponentPage`].
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Component key, e.g. `switch:0`.
    pub key: String,
    /// Status, if requested.
    pub status: Option<Value>,
    /// Configuration, if requested.
    pub config: Option<Value>,
}

impl ComponentEntry {
    /// Parses [`key`](Self::key).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidKey`] if the key is malformed.
    pub fn component_key(&self) -> Result<ComponentKey, ParseError> {
        self.key.parse()
    }

    /// Decodes the status section, if present.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Component`] naming this entry's key if the
    /// status does not match `T`.
    pub fn status_as<T: DeserializeOwned>(&self) -> Result<Option<T>, ParseError> {
        self.decode_section(self.status.as_ref())
    }

    /// Decodes the configuration section, if present.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Component`] naming this entry's key if the
    /// configuration does not match `T`.
    pub fn config_as<T: DeserializeOwned>(&self) -> Result<Option<T>, ParseError> {
        self.decode_section(self.config.as_ref())
    }

    fn decode_section<T: DeserializeOwned>(
        &self,
        section: Option<&Value>,
    ) -> Result<Option<T>, ParseError> {
        section
            .map(|value| {
                T::deserialize(value).map_err(|source| ParseError::Component {
                    key: self.key.clone(),
                    source,
                })
            })
            .transpose()
    }
}

/// Every component collected across all `Shelly.GetComponents` pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentInventory {
    /// Components in page order.
    pub components: Vec<ComponentEntry>,
    /// `total` reported by the last page.
    pub total: u32,
    /// `cfg_rev` reported by the last page.
    pub cfg_rev: Option<u64>,
}

impl ComponentInventory {
    /// Returns the entry with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ComponentEntry> {
        self.components.iter().find(|entry| entry.key == key)
    }

    /// Returns the keys in page order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|entry| entry.key.as_str())
    }
}

/// `Shelly.ListMethods`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListMethods {}

/// Result of `Shelly.ListMethods`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodList {
    /// Method names the device accepts.
    #[serde(default)]
    pub methods: Vec<String>,
}

/// `Shelly.CheckForUpdate`; the result lists the newer versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckForUpdate {}

/// `Shelly.Update`
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Update {
    /// `stable` or `beta`.
    pub stage: Option<String>,
    /// Firmware image URL; overrides `stage`.
    pub url: Option<String>,
}

/// `Shelly.FactoryReset`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactoryReset {}

/// `Shelly.ResetWiFiConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetWiFiConfig {}

/// `Shelly.Reboot`
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Reboot {
    /// Delay before rebooting in milliseconds.
    pub delay_ms: Option<u32>,
}

/// `Shelly.ListProfiles`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListProfiles {}

/// Result of `Shelly.ListProfiles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileList {
    /// Components created by each profile.
    #[serde(default)]
    pub profiles: HashMap<String, Vec<ProfileComponent>>,
}

/// A component type and count in a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileComponent {
    /// Component type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Number of instances.
    pub count: u32,
}

/// `Shelly.SetProfile`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetProfile {
    /// Profile to switch to.
    pub profile: String,
}

/// Result of `Shelly.SetProfile`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetProfileResponse {
    /// Profile active before the call.
    pub profile_was: Option<String>,
}

/// `Shelly.ListTimezones`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListTimezones {}

/// Result of `Shelly.ListTimezones`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneList {
    /// IANA time zone names.
    #[serde(default)]
    pub timezones: Vec<String>,
}

/// `Shelly.DetectLocation`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetectLocation {}

/// Result of `Shelly.DetectLocation`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedLocation {
    /// IANA time zone.
    pub tz: Option<String>,
    /// Latitude.
    pub lat: Option<f64>,
    /// Longitude.
    pub lon: Option<f64>,
}

/// Declares a PEM upload method: `data: None` removes the stored file.
macro_rules! pem_upload {
    ($($(#[$meta:meta])* $name:ident => $method:literal;)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
            pub struct $name {
                /// PEM text, or one chunk of it; `None` removes the file.
                pub data: Option<String>,
                /// Append to the chunks sent so far.
                #[serde(skip_serializing_if = "std::ops::Not::not")]
                pub append: bool,
            }

            impl $name {
                /// Creates one chunk of an upload.
                #[must_use]
                pub fn chunk(data: impl Into<String>, append: bool) -> Self {
                    Self {
                        data: Some(data.into()),
                        append,
                    }
                }

                /// Creates a request that removes the stored file.
                #[must_use]
                pub fn remove() -> Self {
                    Self::default()
                }
            }

            rpc_request! {
                $name => $method, UploadResponse;
            }
        )+
    };
}

pem_upload! {
    /// `Shelly.PutUserCA`: CA bundle used when MQTT `ssl_ca` is `user_ca.pem`.
    PutUserCa => "Shelly.PutUserCA";
    /// `Shelly.PutTLSClientCert`
    PutTlsClientCert => "Shelly.PutTLSClientCert";
    /// `Shelly.PutTLSClientKey`
    PutTlsClientKey => "Shelly.PutTLSClientKey";
}

/// Result of the PEM upload methods.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Bytes stored so far.
    pub len: Option<u64>,
}

rpc_request! {
    GetDeviceInfo => "Shelly.GetDeviceInfo", DeviceInfo;
    GetComponents => "Shelly.GetComponents", ComponentPage;
    ListMethods => "Shelly.ListMethods", MethodList;
    CheckForUpdate => "Shelly.CheckForUpdate", AvailableUpdates;
    Update => "Shelly.Update", EmptyResponse;
    FactoryReset => "Shelly.FactoryReset", EmptyResponse;
    ResetWiFiConfig => "Shelly.ResetWiFiConfig", EmptyResponse;
    Reboot => "Shelly.Reboot", EmptyResponse;
    ListProfiles => "Shelly.ListProfiles", ProfileList;
    SetProfile => "Shelly.SetProfile", SetProfileResponse;
    ListTimezones => "Shelly.ListTimezones", TimezoneList;
    DetectLocation => "Shelly.DetectLocation", DetectedLocation;
}
