//! Alert data in, room notification out.

use serde::{Deserialize, Serialize};

use crate::color::RoomColor;
use crate::template;

/// Wire value of `message_format`; messages are always sent as plain text.
pub const MESSAGE_FORMAT_TEXT: &str = "text";

/// Per-alert data supplied by the host for one send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertContext {
    /// Title of the stream the alert condition is attached to.
    pub stream_title: String,
    /// Human-readable description of the check result.
    pub result_description: String,
}

impl AlertContext {
    pub fn new(stream_title: impl Into<String>, result_description: impl Into<String>) -> Self {
        Self {
            stream_title: stream_title.into(),
            result_description: result_description.into(),
        }
    }
}

/// JSON body of `POST /v2/room/{room}/notification`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomNotification {
    pub message: String,
    pub notify: bool,
    pub message_format: String,
    pub color: RoomColor,
}

impl RoomNotification {
    pub fn new(message: impl Into<String>, color: RoomColor, notify: bool) -> Self {
        Self {
            message: message.into(),
            notify,
            message_format: MESSAGE_FORMAT_TEXT.to_string(),
            color,
        }
    }

    /// Render `message_template` for `alert` and wrap it in a notification.
    pub fn render(
        message_template: &str,
        alert: &AlertContext,
        color: RoomColor,
        notify: bool,
    ) -> Self {
        let message = template::render(
            message_template,
            &alert.stream_title,
            &alert.result_description,
        );
        Self::new(message, color, notify)
    }
}
