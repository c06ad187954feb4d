//! HipChat room notifications for triggered alert conditions.
//!
//! The host builds a [`Configuration`], validates it once through
//! [`HipChatAlarmCallback::check_configuration`], then hands every triggered
//! alert to [`HipChatAlarmCallback::send`], which performs a single
//! `POST /v2/room/{room}/notification` and succeeds only on `204 No Content`.
//!
//! ```no_run
//! use hipchat_notify::{AlertContext, Configuration, HipChatAlarmCallback};
//!
//! # async fn run() -> hipchat_notify::Result<()> {
//! let callback = HipChatAlarmCallback::initialize(Configuration::from_pairs([
//!     ("api_token", "room-token"),
//!     ("room", "ops"),
//!     ("message_template", "Stream <name> alert: <description>"),
//! ]))?;
//! callback.check_configuration()?;
//! callback
//!     .send(&AlertContext::new("Errors", "5 matches in the last minute"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod color;
pub mod config;
pub mod error;
pub mod fields;
pub mod http;
pub mod notification;
pub mod sender;
pub mod template;

pub use callback::HipChatAlarmCallback;
pub use color::RoomColor;
pub use config::Configuration;
pub use error::{ConfigurationError, DeliveryError, Error, Result};
pub use fields::{ConfigurationField, FieldType};
pub use notification::{AlertContext, RoomNotification};
pub use sender::NotificationSender;
