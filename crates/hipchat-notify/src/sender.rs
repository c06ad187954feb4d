//! Delivery of room notifications to the HipChat v2 API.
//!
//! One call to [`NotificationSender::send`] issues exactly one
//! `POST {base}/v2/room/{room}/notification`. Only `204 No Content` counts as
//! delivered; nothing is retried.

use std::fmt;

use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use tracing::{debug, warn};
use url::Url;

use crate::color::RoomColor;
use crate::config::{Configuration, DEFAULT_API_BASE_URL, MASKED_SECRET, keys};
use crate::error::{ConfigurationError, DeliveryError, Result};
use crate::http;
use crate::notification::{AlertContext, RoomNotification};

/// Upper bound on how much of an unexpected response body is logged.
pub const MAX_ERROR_BODY_BYTES: usize = 1024;

/// Sends room notifications for one validated configuration.
///
/// Immutable once built, so a single sender can serve concurrent sends.
#[derive(Clone)]
pub struct NotificationSender {
    api_token: String,
    room: String,
    color: RoomColor,
    notify: bool,
    message_template: String,
    api_base_url: String,
    client: Client,
}

impl NotificationSender {
    /// Validate `config` and build a sender with a default HTTP client.
    pub fn new(config: &Configuration) -> Result<Self> {
        let client = http::default_client()?;
        Ok(Self::with_client(config, client)?)
    }

    /// Validate `config` and build a sender on top of `client`.
    ///
    /// Use this to bound requests with a timeout or to share a connection
    /// pool with the host.
    pub fn with_client(
        config: &Configuration,
        client: Client,
    ) -> std::result::Result<Self, ConfigurationError> {
        config.validate()?;

        let string = |key: &str| config.string(key).unwrap_or_default().to_string();
        let color = config
            .string(keys::COLOR)
            .and_then(RoomColor::parse)
            .unwrap_or_default();
        let api_base_url = config
            .string(keys::API_BASE_URL)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_token: string(keys::API_TOKEN),
            room: string(keys::ROOM),
            color,
            notify: config.boolean(keys::NOTIFY).unwrap_or(true),
            message_template: string(keys::MESSAGE_TEMPLATE),
            api_base_url,
            client,
        })
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Target endpoint, with the room percent-encoded as a single path segment.
    ///
    /// The API path is appended to the base URL's own path. A base with a
    /// query or fragment, and a room the URL parser would collapse as a dot
    /// segment (`.` or `..`), are rejected instead of silently retargeting
    /// the request.
    pub fn notification_url(&self) -> std::result::Result<Url, DeliveryError> {
        let unusable = |reason| DeliveryError::UnusableUrl {
            url: self.api_base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.api_base_url).map_err(|source| {
            DeliveryError::InvalidUrl {
                url: self.api_base_url.clone(),
                source,
            }
        })?;
        if url.cannot_be_a_base() {
            return Err(unusable("base URL cannot carry a path"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(unusable("base URL must not carry a query or fragment"));
        }

        let path = format!(
            "{}/v2/room/{}/notification",
            url.path().trim_end_matches('/'),
            urlencoding::encode(&self.room)
        );
        url.set_path(&path);
        if url.path() != path {
            return Err(unusable("room cannot be used as a URL path segment"));
        }
        Ok(url)
    }

    /// Build the notification body for `alert`.
    pub fn build_notification(&self, alert: &AlertContext) -> RoomNotification {
        // See https://www.hipchat.com/docs/apiv2/method/send_room_notification
        RoomNotification::render(&self.message_template, alert, self.color, self.notify)
    }

    /// Deliver a notification for `alert`.
    pub async fn send(&self, alert: &AlertContext) -> std::result::Result<(), DeliveryError> {
        let url = self.notification_url()?;
        let body = serde_json::to_vec(&self.build_notification(alert))?;

        debug!(room = %self.room, %url, "Sending HipChat room notification");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| {
                warn!(room = %self.room, error = %source, "HipChat request failed");
                DeliveryError::Request { source }
            })?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = read_error_body(response).await;
            warn!(room = %self.room, %status, %body, "Unexpected HipChat response");
            return Err(DeliveryError::UnexpectedStatus { status });
        }

        debug!(room = %self.room, "HipChat notification sent");
        Ok(())
    }
}

/// Read at most [`MAX_ERROR_BODY_BYTES`] of a failed response for logging.
///
/// A body that cannot be read is logged and cut short; it never changes the
/// outcome of the send.
async fn read_error_body(mut response: reqwest::Response) -> String {
    let mut body = Vec::new();
    while body.len() < MAX_ERROR_BODY_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let take = chunk.len().min(MAX_ERROR_BODY_BYTES - body.len());
                body.extend_from_slice(&chunk[..take]);
            }
            Ok(None) => break,
            Err(e) => {
                debug!(error = %e, "Could not read HipChat error response body");
                break;
            }
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}

impl fmt::Debug for NotificationSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationSender")
            .field("api_token", &MASKED_SECRET)
            .field("room", &self.room)
            .field("color", &self.color)
            .field("notify", &self.notify)
            .field("message_template", &self.message_template)
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}
