//! Descriptors of the configuration fields the callback asks its host for.
//!
//! Hosts render these into a form; the callback itself only reads the
//! resulting [`Configuration`](crate::Configuration).

use serde::Serialize;
use serde_json::{Value, json};

use crate::color::RoomColor;
use crate::config::{DEFAULT_API_BASE_URL, keys};
use crate::template::DEFAULT_MESSAGE_TEMPLATE;

/// Kind of input a configuration field expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Boolean,
    Dropdown { values: Vec<&'static str> },
}

/// A single requested configuration field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationField {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub field_type: FieldType,
    pub default_value: Value,
    pub description: &'static str,
    pub optional: bool,
}

impl ConfigurationField {
    fn text(
        key: &'static str,
        label: &'static str,
        default: &str,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            field_type: FieldType::Text,
            default_value: json!(default),
            description,
            optional: false,
        }
    }

    fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Fields requested from the host, in display order.
pub fn requested_configuration() -> Vec<ConfigurationField> {
    vec![
        ConfigurationField::text(keys::API_TOKEN, "Room Token", "", "HipChat room token"),
        ConfigurationField::text(keys::ROOM, "Room", "", "ID or name of HipChat room"),
        ConfigurationField {
            key: keys::COLOR,
            label: "Color",
            field_type: FieldType::Dropdown {
                values: RoomColor::names(),
            },
            default_value: json!(RoomColor::default().as_str()),
            description: "Background color for message",
            optional: true,
        },
        ConfigurationField {
            key: keys::NOTIFY,
            label: "Notify",
            field_type: FieldType::Boolean,
            default_value: json!(true),
            description: "Whether this message should trigger a user notification.",
            optional: true,
        },
        ConfigurationField::text(
            keys::MESSAGE_TEMPLATE,
            "Message Template",
            DEFAULT_MESSAGE_TEMPLATE,
            "The message to be sent is templatized.\n\
             Use <name> to input the stream name.\n\
             Use <description> to input the alert description.",
        ),
        ConfigurationField::text(
            keys::API_BASE_URL,
            "HipChat API URL",
            DEFAULT_API_BASE_URL,
            "Specify different API URL for self hosted HipChat",
        )
        .optional(),
    ]
}
