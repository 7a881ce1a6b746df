// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component keys of the form `<type>` or `<type>:<id>`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Address of a component on a device.
///
/// Singleton components (`sys`, `wifi`, `cloud`, ...) are addressed by their
/// type alone; repeating components carry a numeric instance id
/// (`switch:0`, `bthomesensor:200`).
///
/// # Examples
///
/// ```
/// use shelly_rpc::types::ComponentKey;
///
/// let key: ComponentKey = "switch:1".parse().unwrap();
/// assert_eq!(key.component(), "switch");
/// assert_eq!(key.id(), Some(1));
/// assert_eq!(key.to_string(), "switch:1");
///
/// let sys: ComponentKey = "sys".parse().unwrap();
/// assert_eq!(sys.id(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey {
    component: String,
    id: Option<u32>,
}

impl ComponentKey {
    /// Creates a key for a singleton component.
    #[must_use]
    pub fn singleton(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            id: None,
        }
    }

    /// Creates a key for one instance of a repeating component.
    #[must_use]
    pub fn indexed(component: impl Into<String>, id: u32) -> Self {
        Self {
            component: component.into(),
            id: Some(id),
        }
    }

    /// Returns the component type, e.g. `switch`.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the instance id, if any.
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.id
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}:{id}", self.component),
            None => f.write_str(&self.component),
        }
    }
}

impl FromStr for ComponentKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (component, id) = match s.split_once(':') {
            Some((component, id)) => {
                let id = id
                    .parse::<u32>()
                    .map_err(|_| ParseError::InvalidKey(s.to_string()))?;
                (component, Some(id))
            }
            None => (s, None),
        };
        if component.is_empty() {
            return Err(ParseError::InvalidKey(s.to_string()));
        }
        Ok(Self {
            component: component.to_string(),
            id,
        })
    }
}

impl Serialize for ComponentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ComponentKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_indexed() {
        let key: ComponentKey = "bthomesensor:200".parse().unwrap();
        assert_eq!(key, ComponentKey::indexed("bthomesensor", 200));
    }

    #[test]
    fn parse_singleton() {
        let key: ComponentKey = "wifi".parse().unwrap();
        assert_eq!(key, ComponentKey::singleton("wifi"));
        assert_eq!(key.to_string(), "wifi");
    }

    #[test]
    fn reject_bad_id() {
        assert!(matches!(
            "switch:x".parse::<ComponentKey>(),
            Err(ParseError::InvalidKey(_))
        ));
        assert!(":1".parse::<ComponentKey>().is_err());
        assert!("switch:-1".parse::<ComponentKey>().is_err());
    }

    #[test]
    fn serde_as_string() {
        let key: ComponentKey = serde_json::from_str(r#""cover:0""#).unwrap();
        assert_eq!(key.id(), Some(0));
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""cover:0""#);
    }
}
