// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-device status and configuration documents.
//!
//! `Shelly.GetStatus` and `Shelly.GetConfig` return one flat JSON object whose
//! keys name components: singletons appear under their type (`sys`, `wifi`)
//! and repeating components under `<type>:<id>` (`switch:0`, `cover:1`).
//! [`DeviceStatus`] and [`DeviceConfig`] regroup those entries into typed
//! fields.
//!
//! Decoding happens in two phases. The object is first read into
//! [`RawComponents`], a map of undecoded values. Each registered key is then
//! decoded into its target type:
//!
//! - a singleton key that is absent (or `null`) leaves its field `None`;
//! - a collection is filled by looking up `<prefix>:0`, `<prefix>:1`, ... in
//!   order and stops at the first index that is missing;
//! - keys that are not registered are ignored.
//!
//! The first entry that fails to decode aborts the whole document with a
//! [`ParseError::Component`] naming the key.
//!
//! # Examples
//!
//! ```
//! use shelly_rpc::DeviceStatus;
//!
//! let json = br#"{
//!     "switch:0": {"id": 0, "output": true},
//!     "switch:1": {"id": 1, "output": false},
//!     "sys": {"mac": "AA"}
//! }"#;
//! let status = DeviceStatus::from_slice(json).unwrap();
//!
//! assert_eq!(status.switches.len(), 2);
//! assert_eq!(status.system.unwrap().mac, "AA");
//! assert!(status.wifi.is_none());
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ParseError;

/// A flat status or configuration object with its values not yet decoded.
pub type RawComponents = HashMap<String, Value>;

/// Declares a device aggregate: its struct, key registry, decoder and
/// flat serializer.
macro_rules! component_aggregate {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            singletons {
                $( $(#[$s_meta:meta])* $s_key:literal => $s_field:ident: $s_ty:ty, )*
            }
            collections {
                $( $(#[$c_meta:meta])* $c_prefix:literal => $c_field:ident: $c_ty:ty, )*
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( $(#[$s_meta])* pub $s_field: Option<$s_ty>, )*
            $( $(#[$c_meta])* pub $c_field: Vec<$c_ty>, )*
        }

        impl $name {
            /// Keys of the components that appear at most once.
            pub const SINGLETON_KEYS: &'static [&'static str] = &[$($s_key),*];

            /// Prefixes of the components that appear as `<prefix>:<id>`.
            pub const COLLECTION_PREFIXES: &'static [&'static str] = &[$($c_prefix),*];

            /// Decodes the registered components out of a raw object.
            ///
            /// # Errors
            ///
            /// Returns [`ParseError::Component`](crate::error::ParseError::Component)
            /// for the first entry that does not match its type.
            pub fn from_components(
                raw: &$crate::aggregate::RawComponents,
            ) -> Result<Self, $crate::error::ParseError> {
                Ok(Self {
                    $( $s_field: $crate::aggregate::decode_singleton(raw, $s_key)?, )*
                    $( $c_field: $crate::aggregate::decode_collection(raw, $c_prefix)?, )*
                })
            }

            /// Decodes a JSON object.
            ///
            /// # Errors
            ///
            /// Returns [`ParseError::Json`](crate::error::ParseError::Json) if
            /// `bytes` is not a JSON object, otherwise as
            /// [`from_components`](Self::from_components).
            pub fn from_slice(bytes: &[u8]) -> Result<Self, $crate::error::ParseError> {
                let raw: $crate::aggregate::RawComponents = ::serde_json::from_slice(bytes)?;
                Self::from_components(&raw)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use ::serde::ser::SerializeMap;

                let mut map = serializer.serialize_map(None)?;
                $(
                    if let Some(value) = &self.$s_field {
                        map.serialize_entry($s_key, value)?;
                    }
                )*
                $(
                    for (index, value) in self.$c_field.iter().enumerate() {
                        map.serialize_entry(&format!("{}:{index}", $c_prefix), value)?;
                    }
                )*
                map.end()
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <$crate::aggregate::RawComponents as ::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                Self::from_components(&raw).map_err(::serde::de::Error::custom)
            }
        }
    };
}

mod config;
mod status;

pub use config::DeviceConfig;
pub use status::{DeviceStatus, NotifyStatus};

/// Decodes the singleton stored under `key`.
pub(crate) fn decode_singleton<T: DeserializeOwned>(
    raw: &RawComponents,
    key: &str,
) -> Result<Option<T>, ParseError> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|source| ParseError::Component {
                key: key.to_string(),
                source,
            }),
    }
}

/// Decodes `<prefix>:0`, `<prefix>:1`, ... up to the first missing index.
pub(crate) fn decode_collection<T: DeserializeOwned>(
    raw: &RawComponents,
    prefix: &str,
) -> Result<Vec<T>, ParseError> {
    let mut items = Vec::new();
    for index in 0_u32.. {
        let key = format!("{prefix}:{index}");
        let Some(value) = raw.get(&key).filter(|value| !value.is_null()) else {
            break;
        };
        let item = T::deserialize(value).map_err(|source| ParseError::Component { key, source })?;
        items.push(item);
    }

    let present = raw.keys().filter(|key| is_instance_of(key, prefix)).count();
    if present > items.len() {
        tracing::debug!(
            prefix,
            decoded = items.len(),
            present,
            "Skipped components after a gap in instance ids"
        );
    }

    Ok(items)
}

fn is_instance_of(key: &str, prefix: &str) -> bool {
    key.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(':'))
        .is_some_and(|id| id.parse::<u32>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{SwitchStatus, SysStatus};
    use serde_json::json;

    fn raw(value: Value) -> RawComponents {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn singleton_absent_or_null() {
        let components = raw(json!({"sys": null}));
        let sys: Option<SysStatus> = decode_singleton(&components, "sys").unwrap();
        assert!(sys.is_none());
        let wifi: Option<SysStatus> = decode_singleton(&components, "wifi").unwrap();
        assert!(wifi.is_none());
    }

    #[test]
    fn singleton_error_names_key() {
        let components = raw(json!({"sys": {"mac": 42}}));
        let err = decode_singleton::<SysStatus>(&components, "sys").unwrap_err();
        assert_eq!(err.component_key(), Some("sys"));
    }

    #[test]
    fn collection_in_index_order() {
        let components = raw(json!({
            "switch:2": {"id": 2},
            "switch:0": {"id": 0},
            "switch:1": {"id": 1},
        }));
        let switches: Vec<SwitchStatus> = decode_collection(&components, "switch").unwrap();
        let ids: Vec<u32> = switches.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn collection_stops_at_first_gap() {
        let components = raw(json!({"switch:0": {"id": 0}, "switch:2": {"id": 2}}));
        let switches: Vec<SwitchStatus> = decode_collection(&components, "switch").unwrap();
        assert_eq!(switches.len(), 1);
        assert_eq!(switches[0].id, 0);
    }

    #[test]
    fn collection_without_zero_is_empty() {
        let components = raw(json!({"switch:1": {"id": 1}}));
        let switches: Vec<SwitchStatus> = decode_collection(&components, "switch").unwrap();
        assert!(switches.is_empty());
    }

    #[test]
    fn null_entry_is_a_gap() {
        let components = raw(json!({
            "switch:0": {"id": 0},
            "switch:1": null,
            "switch:2": {"id": 2},
        }));
        let switches: Vec<SwitchStatus> = decode_collection(&components, "switch").unwrap();
        assert_eq!(switches.len(), 1);
        assert_eq!(switches[0].id, 0);

        let leading = raw(json!({"switch:0": null, "switch:1": {"id": 1}}));
        let switches: Vec<SwitchStatus> = decode_collection(&leading, "switch").unwrap();
        assert!(switches.is_empty());
    }

    #[test]
    fn collection_error_names_indexed_key() {
        let components = raw(json!({"switch:0": {"id": 0}, "switch:1": {"id": "one"}}));
        let err = decode_collection::<SwitchStatus>(&components, "switch").unwrap_err();
        assert_eq!(err.component_key(), Some("switch:1"));
    }

    #[test]
    fn instance_key_matching() {
        assert!(is_instance_of("switch:0", "switch"));
        assert!(is_instance_of("switch:12", "switch"));
        assert!(!is_instance_of("switch", "switch"));
        assert!(!is_instance_of("switchx:0", "switch"));
        assert!(!is_instance_of("switch:a", "switch"));
    }
}
