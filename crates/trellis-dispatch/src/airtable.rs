//! HTTP client for the Airtable records API.
//!
//! Appends one record per submission to a per-deployment base and table,
//! bearer-token authenticated. The record's field mapping is built by the
//! dispatch coordinator; this client only owns the wire exchange.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn, Instrument};

use crate::error::{ChannelError, Result};

/// Configuration for the Airtable client.
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    /// Base URL of the Airtable API.
    pub api_base: String,
    /// Bearer token.
    pub token: String,
    /// Base identifier, e.g. `appXXXXXXXXXXXXXX`.
    pub base_id: String,
    /// Table identifier, e.g. `tblXXXXXXXXXXXXXX`.
    pub table_id: String,
    /// Timeout for HTTP requests.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.airtable.com".to_string(),
            token: String::new(),
            base_id: String::new(),
            table_id: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: "Trellis-Lead-Relay/1.0".to_string(),
        }
    }
}

/// Provider acknowledgement for an appended record.
#[derive(Debug, Clone, Default)]
pub struct RecordReceipt {
    /// Airtable-assigned record identifier.
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    records: Vec<CreatedRecord>,
}

#[derive(Debug, Deserialize)]
struct CreatedRecord {
    id: Option<String>,
}

/// Client for the Airtable records API.
#[derive(Debug, Clone)]
pub struct AirtableClient {
    client: reqwest::Client,
    config: AirtableConfig,
}

impl AirtableClient {
    /// Creates a new Airtable client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::Configuration` when the token, base id, or
    /// table id is blank, or the HTTP client cannot be built.
    pub fn new(config: AirtableConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(ChannelError::configuration("Airtable token is empty"));
        }
        if config.base_id.trim().is_empty() || config.table_id.trim().is_empty() {
            return Err(ChannelError::configuration("Airtable base or table id is empty"));
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

    /// Appends one record with the given field mapping.
    ///
    /// # Errors
    ///
    /// Returns categorized channel errors; non-2xx responses carry the
    /// response body as error detail.
    pub async fn append(&self, fields: &Map<String, Value>) -> Result<RecordReceipt> {
        let span = tracing::info_span!(
            "airtable_append",
            base_id = %self.config.base_id,
            table_id = %self.config.table_id,
        );

        async move {
            let url = format!(
                "{}/v0/{}/{}",
                self.config.api_base.trim_end_matches('/'),
                self.config.base_id,
                self.config.table_id,
            );
            let body = serde_json::json!({ "records": [{ "fields": fields }] });

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.config.token)
                .json(&body)
                .send()
                .await
                .map_err(|e| self.categorize_transport_error(&e))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "Airtable rejected record");
                return Err(ChannelError::provider(status.as_u16(), body));
            }

            let parsed = response.json::<RecordsResponse>().await.unwrap_or(RecordsResponse {
                records: Vec::new(),
            });
            let id = parsed.records.into_iter().next().and_then(|record| record.id);
            debug!(record_id = id.as_deref().unwrap_or("unknown"), "Record appended");
            Ok(RecordReceipt { id })
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
