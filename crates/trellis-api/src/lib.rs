//! Trellis HTTP API.
//!
//! Wires configuration, the dispatch coordinator, and the axum router
//! together. The state handed to handlers is built once at startup from
//! immutable configuration; nothing here is ambient or global.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use anyhow::Context;
use trellis_core::{Clock, LabelSet, RealClock};
use trellis_dispatch::{AirtableClient, Dispatcher, EmailClient};

pub mod config;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use server::{create_router, start_server};

/// Shared application state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Two-channel dispatch coordinator.
    pub dispatcher: Arc<Dispatcher>,
    /// Clock used for health timestamps; the dispatcher holds its own
    /// handle for submission times.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Builds production state from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when either downstream client rejects its
    /// configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(RealClock))
    }

    /// Builds state with an injected clock, for deterministic tests.
    ///
    /// # Errors
    ///
    /// Returns an error when either downstream client rejects its
    /// configuration.
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let email = EmailClient::new(config.to_email_config())
            .context("failed to build email client")?;
        let airtable = AirtableClient::new(config.to_airtable_config())
            .context("failed to build Airtable client")?;

        let dispatcher = Dispatcher::new(
            email,
            airtable,
            config.sender_identity(),
            LabelSet::new(),
            clock.clone(),
        );

        Ok(Self { dispatcher: Arc::new(dispatcher), clock })
    }
}
