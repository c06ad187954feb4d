//! Callback configuration.
//!
//! A [`Configuration`] is a flat, immutable map of named settings as handed
//! over by the host. Typed accessors treat a value of the wrong JSON type as
//! unset, so validation reports it as missing instead of panicking.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::RoomColor;
use crate::error::ConfigurationError;
use crate::fields;

/// Maximum room identifier length, in characters.
pub const MAX_ROOM_LENGTH: usize = 100;

/// Default API endpoint used when no base URL override is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://api.hipchat.com";

/// Placeholder shown instead of the API token in [`Configuration::masked`].
pub const MASKED_SECRET: &str = "****";

/// Recognized configuration keys.
pub mod keys {
    pub const API_TOKEN: &str = "api_token";
    pub const ROOM: &str = "room";
    pub const COLOR: &str = "color";
    pub const NOTIFY: &str = "notify";
    pub const MESSAGE_TEMPLATE: &str = "message_template";
    pub const API_BASE_URL: &str = "api_base_url";
}

/// Flat map of named settings.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    values: BTreeMap<String, Value>,
}

impl Configuration {
    pub fn new(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }

    /// Build a configuration from `(key, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Return a copy where every field the caller left unset carries its
    /// declared default.
    pub fn with_defaults(&self) -> Self {
        let mut values = self.values.clone();
        for field in fields::requested_configuration() {
            let unset = match values.get(field.key) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };
            let has_default =
                !field.default_value.is_null() && field.default_value.as_str() != Some("");
            if unset && has_default {
                values.insert(field.key.to_string(), field.default_value.clone());
            }
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    /// Whether `key` holds a non-empty string.
    pub fn string_is_set(&self, key: &str) -> bool {
        self.string(key).is_some_and(|s| !s.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The configuration with the API token replaced by [`MASKED_SECRET`].
    ///
    /// Every other entry, known or not, is passed through unchanged. The token
    /// is masked whenever the key is present, whatever its value.
    pub fn masked(&self) -> BTreeMap<String, Value> {
        self.values
            .iter()
            .map(|(key, value)| {
                let value = if key == keys::API_TOKEN {
                    Value::String(MASKED_SECRET.to_string())
                } else {
                    value.clone()
                };
                (key.clone(), value)
            })
            .collect()
    }

    /// Check the configuration, reporting the first violation found.
    ///
    /// Checks run in a fixed order: mandatory `api_token`, `room` and
    /// `message_template`, then the room length, then the color.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for field in [keys::API_TOKEN, keys::ROOM, keys::MESSAGE_TEMPLATE] {
            if !self.string_is_set(field) {
                return Err(ConfigurationError::Missing { field });
            }
        }

        let length = self.string(keys::ROOM).map_or(0, |room| room.chars().count());
        if length > MAX_ROOM_LENGTH {
            return Err(ConfigurationError::RoomTooLong { length });
        }

        if let Some(color) = self.string(keys::COLOR).filter(|c| !c.is_empty())
            && RoomColor::parse(color).is_none()
        {
            return Err(ConfigurationError::InvalidColor {
                value: color.to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.masked()).finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
