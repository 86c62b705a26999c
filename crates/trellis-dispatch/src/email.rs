//! HTTP client for the transactional email provider.
//!
//! Sends the rendered notification through the provider's JSON API with
//! bearer authentication. Transport failures and non-success responses are
//! categorized into [`ChannelError`] for the dispatch coordinator.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn, Instrument};

use crate::error::{ChannelError, Result};

/// Configuration for the email delivery client.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Base URL of the provider API.
    pub api_base: String,
    /// Bearer token for the provider API.
    pub api_key: String,
    /// Timeout for HTTP requests.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.resend.com".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: "Trellis-Lead-Relay/1.0".to_string(),
        }
    }
}

/// An outbound notification email.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    /// Sender display name and address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Reply-to address, set only when the submitter supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Provider acknowledgement for an accepted email.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailReceipt {
    /// Provider-assigned message identifier.
    pub id: Option<String>,
}

/// Client for the email provider API.
#[derive(Debug, Clone)]
pub struct EmailClient {
    client: reqwest::Client,
    config: EmailConfig,
}

impl EmailClient {
    /// Creates a new email client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::Configuration` when the API key is blank or
    /// the HTTP client cannot be built.
    pub fn new(config: EmailConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ChannelError::configuration("email API key is empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ChannelError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Sends one notification email.
    ///
    /// # Errors
    ///
    /// Returns categorized channel errors:
    /// - `Network` for connection failures
    /// - `Timeout` for request timeouts
    /// - `Provider` for non-success responses, carrying the response body
    pub async fn send(&self, email: &OutboundEmail) -> Result<EmailReceipt> {
        let span = tracing::info_span!("email_send", recipients = email.to.len());

        async move {
            let url = format!("{}/emails", self.config.api_base.trim_end_matches('/'));

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .json(email)
                .send()
                .await
                .map_err(|e| self.categorize_transport_error(&e))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "Email provider rejected request");
                return Err(ChannelError::provider(status.as_u16(), body));
            }

            let receipt = response.json::<EmailReceipt>().await.unwrap_or_default();
            debug!(message_id = receipt.id.as_deref().unwrap_or("unknown"), "Email accepted");
            Ok(receipt)
        }
        .instrument(span)
        .await
    }

    fn categorize_transport_error(&self, error: &reqwest::Error) -> ChannelError {
        if error.is_timeout() {
            return ChannelError::timeout(self.config.timeout.as_secs());
        }
        if error.is_connect() {
            return ChannelError::network(format!("connection failed: {error}"));
        }
        ChannelError::network(error.to_string())
    }
}
