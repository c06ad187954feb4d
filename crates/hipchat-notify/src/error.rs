//! Error types for configuration validation and notification delivery.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::MAX_ROOM_LENGTH;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// A configuration value violates one of the callback's constraints.
///
/// The `Display` output is meant to be shown verbatim to whoever edits the
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("{field} is mandatory and must not be empty.")]
    Missing { field: &'static str },

    #[error("room must be less than {} characters long.", MAX_ROOM_LENGTH)]
    RoomTooLong { length: usize },

    #[error("color is not a valid color.")]
    InvalidColor { value: String },
}

impl ConfigurationError {
    /// Name of the configuration key that caused the failure.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field } => field,
            Self::RoomTooLong { .. } => crate::config::keys::ROOM,
            Self::InvalidColor { .. } => crate::config::keys::COLOR,
        }
    }
}

/// A single notification attempt failed.
///
/// Every variant is terminal for the alert that produced it.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("error while constructing URL of HipChat API `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot build HipChat API URL from `{url}`: {reason}")]
    UnusableUrl { url: String, reason: &'static str },

    #[error("could not serialize room notification: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("could not POST notification to HipChat API: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP response status {status}")]
    UnexpectedStatus { status: StatusCode },
}

impl DeliveryError {
    /// HTTP status code of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status } => Some(status.as_u16()),
            Self::Request { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the failure happened before any response was received.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            Self::Request { source } if source.is_connect() || source.is_timeout() || source.is_request()
        )
    }
}

/// Umbrella error for hosts that drive both validation and delivery.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
