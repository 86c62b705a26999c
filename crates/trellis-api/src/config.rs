//! Configuration management for the Trellis lead-form relay.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use trellis_dispatch::{AirtableConfig, EmailConfig, SenderIdentity};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// Provider credentials have no built-in defaults and must be supplied by
/// the environment; `load` fails fast when any of them is blank. All
/// values are read once at startup and treated as immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Outbound channels
    /// HTTP timeout for downstream provider calls in seconds.
    ///
    /// Environment variable: `DELIVERY_TIMEOUT_SECONDS`
    #[serde(default = "default_delivery_timeout", alias = "DELIVERY_TIMEOUT_SECONDS")]
    pub delivery_timeout_seconds: u64,

    // Email provider
    /// Email provider API key.
    ///
    /// Environment variable: `RESEND_API_KEY`
    #[serde(default, alias = "RESEND_API_KEY")]
    pub resend_api_key: String,
    /// Email provider API base URL.
    ///
    /// Environment variable: `RESEND_API_BASE`
    #[serde(default = "default_resend_api_base", alias = "RESEND_API_BASE")]
    pub resend_api_base: String,
    /// Sender display name and address for notifications.
    ///
    /// Environment variable: `FROM_EMAIL`
    #[serde(default = "default_from_email", alias = "FROM_EMAIL")]
    pub from_email: String,
    /// Comma-separated notification recipient list.
    ///
    /// Environment variable: `RECIPIENTS`
    #[serde(default = "default_recipients", alias = "RECIPIENTS")]
    pub recipients: String,

    // Airtable
    /// Airtable personal access token.
    ///
    /// Environment variable: `AIRTABLE_TOKEN`
    #[serde(default, alias = "AIRTABLE_TOKEN")]
    pub airtable_token: String,
    /// Airtable base identifier.
    ///
    /// Environment variable: `AIRTABLE_BASE_ID`
    #[serde(default, alias = "AIRTABLE_BASE_ID")]
    pub airtable_base_id: String,
    /// Airtable table identifier.
    ///
    /// Environment variable: `AIRTABLE_TABLE_ID`
    #[serde(default, alias = "AIRTABLE_TABLE_ID")]
    pub airtable_table_id: String,
    /// Airtable API base URL.
    ///
    /// Environment variable: `AIRTABLE_API_BASE`
    #[serde(default = "default_airtable_api_base", alias = "AIRTABLE_API_BASE")]
    pub airtable_api_base: String,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    ///
    /// # Errors
    ///
    /// Fails when extraction fails or validation rejects the merged
    /// values (blank credentials, empty recipient list, port 0).
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Converts to the email client's configuration.
    pub fn to_email_config(&self) -> EmailConfig {
        EmailConfig {
            api_base: self.resend_api_base.clone(),
            api_key: self.resend_api_key.clone(),
            timeout: Duration::from_secs(self.delivery_timeout_seconds),
            ..EmailConfig::default()
        }
    }

    /// Converts to the Airtable client's configuration.
    pub fn to_airtable_config(&self) -> AirtableConfig {
        AirtableConfig {
            api_base: self.airtable_api_base.clone(),
            token: self.airtable_token.clone(),
            base_id: self.airtable_base_id.clone(),
            table_id: self.airtable_table_id.clone(),
            timeout: Duration::from_secs(self.delivery_timeout_seconds),
            ..AirtableConfig::default()
        }
    }

    /// Builds the fixed sender identity for notifications.
    pub fn sender_identity(&self) -> SenderIdentity {
        SenderIdentity { from: self.from_email.clone(), recipients: self.recipient_list() }
    }

    /// Parses the comma-separated recipient list, dropping blank entries.
    pub fn recipient_list(&self) -> Vec<String> {
        self.recipients
            .split(',')
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.resend_api_key.trim().is_empty() {
            anyhow::bail!("RESEND_API_KEY must be set");
        }

        if self.airtable_token.trim().is_empty() {
            anyhow::bail!("AIRTABLE_TOKEN must be set");
        }

        if self.airtable_base_id.trim().is_empty() {
            anyhow::bail!("AIRTABLE_BASE_ID must be set");
        }

        if self.airtable_table_id.trim().is_empty() {
            anyhow::bail!("AIRTABLE_TABLE_ID must be set");
        }

        if self.from_email.trim().is_empty() {
            anyhow::bail!("FROM_EMAIL must not be blank");
        }

        if self.recipient_list().is_empty() {
            anyhow::bail!("RECIPIENTS must contain at least one address");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            delivery_timeout_seconds: default_delivery_timeout(),
            resend_api_key: String::new(),
            resend_api_base: default_resend_api_base(),
            from_email: default_from_email(),
            recipients: default_recipients(),
            airtable_token: String::new(),
            airtable_base_id: String::new(),
            airtable_table_id: String::new(),
            airtable_api_base: default_airtable_api_base(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_delivery_timeout() -> u64 {
    30
}

fn default_resend_api_base() -> String {
    "https://api.resend.com".to_string()
}

fn default_airtable_api_base() -> String {
    "https://api.airtable.com".to_string()
}

fn default_from_email() -> String {
    "Landscapes Unlimited <noreply@webleadsnow.com>".to_string()
}

fn default_recipients() -> String {
    [
        "rafael@jrcopier.com",
        "jeffp@landscapesunlimitedmn.com",
        "pmurphy@landscapesunlimitedmn.com",
        "monica@landscapesunlimitedmn.com",
        "casey@landscapesunlimitedmn.com",
        "info@landscapesunlimitedmn.com",
        "design@mmcreate.com",
    ]
    .join(",")
}

fn default_log_level() -> String {
    "info".to_string()
}
