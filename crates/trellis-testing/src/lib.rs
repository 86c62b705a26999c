//! Test infrastructure and utilities for deterministic testing.
//!
//! Provides a complete test environment with mock servers standing in for
//! both downstream providers, a pinned clock, configuration wired to the
//! mocks, and helpers to spawn the real router on an ephemeral port.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use chrono::{TimeZone, Utc};
use trellis_api::{create_router, AppState, Config};
use trellis_core::TestClock;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

pub mod fixtures;

pub use fixtures::FormBuilder;
pub use trellis_core::Clock;

/// Test environment with mock providers for integration testing.
///
/// Provides:
/// - A wiremock server per downstream channel (email, Airtable)
/// - A deterministic clock pinned to a known instant
/// - Configuration pointing every outbound call at the mocks
/// - A spawner for the real axum router on an ephemeral port
pub struct TestEnv {
    /// Mock server standing in for the email provider.
    pub email_mock: MockServer,
    /// Mock server standing in for the Airtable API.
    pub airtable_mock: MockServer,
    /// Deterministic clock; submission timestamps derive from it.
    pub clock: TestClock,
}

impl TestEnv {
    /// Pinned submission instant: 2025-06-15 12:30:45 US Central (CDT).
    pub const SUBMITTED_AT: &'static str = "6/15/2025, 12:30:45 PM";

    /// Creates a fresh environment with both mock providers running.
    pub async fn new() -> Self {
        let email_mock = MockServer::start().await;
        let airtable_mock = MockServer::start().await;
        let clock = TestClock::fixed(Utc.with_ymd_and_hms(2025, 6, 15, 17, 30, 45).unwrap());

        Self { email_mock, airtable_mock, clock }
    }

    /// Builds configuration wired to the mock providers.
    pub fn config(&self) -> Config {
        Config {
            resend_api_key: "re_test_key".to_string(),
            resend_api_base: self.email_mock.uri(),
            airtable_token: "pat_test_token".to_string(),
            airtable_base_id: "appTEST".to_string(),
            airtable_table_id: "tblTEST".to_string(),
            airtable_api_base: self.airtable_mock.uri(),
            ..Config::default()
        }
    }

    /// Builds application state with the pinned clock.
    pub fn app_state(&self) -> AppState {
        AppState::with_clock(&self.config(), Arc::new(self.clock.clone()))
            .expect("test state should build")
    }

    /// Spawns the real router on an ephemeral port and returns its address.
    pub async fn spawn_server(&self) -> SocketAddr {
        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let app = create_router(self.app_state(), Duration::from_secs(30));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        addr
    }

    /// Mounts a succeeding email-provider mock.
    pub async fn mock_email_success(&self) {
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/emails"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "msg_test_1"})),
            )
            .mount(&self.email_mock)
            .await;
    }

    /// Mounts a failing email-provider mock with the given status.
    pub async fn mock_email_failure(&self, status: u16) {
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/emails"))
            .respond_with(ResponseTemplate::new(status).set_body_string("provider error"))
            .mount(&self.email_mock)
            .await;
    }

    /// Mounts a succeeding Airtable mock.
    pub async fn mock_airtable_success(&self) {
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/v0/appTEST/tblTEST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "records": [{"id": "rec_test_1"}]
            })))
            .mount(&self.airtable_mock)
            .await;
    }

    /// Mounts a failing Airtable mock with the given status.
    pub async fn mock_airtable_failure(&self, status: u16) {
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/v0/appTEST/tblTEST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("airtable error"))
            .mount(&self.airtable_mock)
            .await;
    }
}
