//! Host-facing alarm callback.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::config::Configuration;
use crate::error::{ConfigurationError, DeliveryError, Result};
use crate::fields::{self, ConfigurationField};
use crate::http;
use crate::notification::AlertContext;
use crate::sender::NotificationSender;

/// HipChat alarm callback.
///
/// The host initializes it with a configuration, checks that configuration
/// once, then calls [`send`](Self::send) for every triggered alert.
#[derive(Clone)]
pub struct HipChatAlarmCallback {
    configuration: Configuration,
    client: Client,
}

impl HipChatAlarmCallback {
    pub const NAME: &'static str = "HipChat alarm callback";

    /// Keep `configuration` for later checks and sends. Nothing is validated
    /// here; call [`check_configuration`](Self::check_configuration).
    ///
    /// Fails only when the default HTTP client cannot be built.
    pub fn initialize(configuration: Configuration) -> Result<Self> {
        Ok(Self::with_client(configuration, http::default_client()?))
    }

    pub fn with_client(configuration: Configuration, client: Client) -> Self {
        Self {
            configuration,
            client,
        }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn check_configuration(&self) -> std::result::Result<(), ConfigurationError> {
        self.configuration.validate()
    }

    /// The configuration with the API token masked.
    pub fn attributes(&self) -> BTreeMap<String, Value> {
        self.configuration.masked()
    }

    /// Fields this callback expects the host to collect.
    pub fn requested_configuration() -> Vec<ConfigurationField> {
        fields::requested_configuration()
    }

    /// Notify the configured room about `alert`.
    ///
    /// A configuration that does not pass
    /// [`check_configuration`](Self::check_configuration) fails with
    /// [`DeliveryError::Configuration`] before any request is made.
    pub async fn send(&self, alert: &AlertContext) -> std::result::Result<(), DeliveryError> {
        let sender = NotificationSender::with_client(&self.configuration, self.client.clone())?;
        sender.send(alert).await?;
        info!(
            room = sender.room(),
            stream = %alert.stream_title,
            "Alert delivered to HipChat"
        );
        Ok(())
    }
}

impl fmt::Debug for HipChatAlarmCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HipChatAlarmCallback")
            .field("configuration", &self.configuration)
            .finish_non_exhaustive()
    }
}
