//! Form submission integration tests.
//!
//! Spawns the real router against mock providers and verifies the
//! endpoint's response contract: success when at least one channel
//! succeeds, server error only when both fail, and no downstream call at
//! all for an envelope without form data.

use std::net::SocketAddr;

use trellis_testing::{FormBuilder, TestEnv};

async fn post_json(addr: SocketAddr, body: &serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/api/send-form"))
        .json(body)
        .send()
        .await
        .expect("Request should complete")
}

#[tokio::test]
async fn both_channels_succeeding_returns_full_success() {
    // Arrange
    let env = TestEnv::new().await;
    env.mock_email_success().await;
    env.mock_airtable_success().await;
    let addr = env.spawn_server().await;

    // Act
    let response = post_json(addr, &FormBuilder::complete().into_envelope()).await;

    // Assert
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body, serde_json::json!({"success": true, "email": true, "airtable": true}));
}

#[tokio::test]
async fn email_failure_still_succeeds_through_airtable() {
    // Arrange
    let env = TestEnv::new().await;
    env.mock_email_failure(500).await;
    env.mock_airtable_success().await;
    let addr = env.spawn_server().await;

    // Act
    let response = post_json(addr, &FormBuilder::complete().into_envelope()).await;

    // Assert
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body, serde_json::json!({"success": true, "email": false, "airtable": true}));
}

#[tokio::test]
async fn airtable_failure_still_succeeds_through_email() {
    // Arrange
    let env = TestEnv::new().await;
    env.mock_email_success().await;
    env.mock_airtable_failure(422).await;
    let addr = env.spawn_server().await;

    // Act
    let response = post_json(addr, &FormBuilder::complete().into_envelope()).await;

    // Assert
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body, serde_json::json!({"success": true, "email": true, "airtable": false}));
}

#[tokio::test]
async fn both_channels_failing_returns_server_error() {
    // Arrange
    let env = TestEnv::new().await;
    env.mock_email_failure(500).await;
    env.mock_airtable_failure(503).await;
    let addr = env.spawn_server().await;

    // Act
    let response = post_json(addr, &FormBuilder::complete().into_envelope()).await;

    // Assert
    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body, serde_json::json!({"error": "Both email and Airtable failed"}));
}

#[tokio::test]
async fn missing_form_data_is_rejected_without_any_dispatch() {
    // Arrange
    let env = TestEnv::new().await;
    env.mock_email_success().await;
    env.mock_airtable_success().await;
    let addr = env.spawn_server().await;

    // Act - envelope without the formData key
    let response = post_json(addr, &serde_json::json!({"other": 1})).await;

    // Assert
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body, serde_json::json!({"error": "Missing form data"}));

    let email_hits = env.email_mock.received_requests().await.unwrap_or_default();
    let airtable_hits = env.airtable_mock.received_requests().await.unwrap_or_default();
    assert!(email_hits.is_empty(), "Email provider must not be called");
    assert!(airtable_hits.is_empty(), "Airtable must not be called");
}

#[tokio::test]
async fn empty_submission_still_dispatches_to_both_channels() {
    // Arrange
    let env = TestEnv::new().await;
    env.mock_email_success().await;
    env.mock_airtable_success().await;
    let addr = env.spawn_server().await;

    // Act - formData present but with every field absent
    let response = post_json(addr, &FormBuilder::new().into_envelope()).await;

    // Assert
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["email"], true);
    assert_eq!(body["airtable"], true);
}

#[tokio::test]
async fn email_request_carries_subject_recipients_and_reply_to() {
    // Arrange
    let env = TestEnv::new().await;
    env.mock_email_success().await;
    env.mock_airtable_success().await;
    let addr = env.spawn_server().await;

    // Act
    post_json(addr, &FormBuilder::complete().into_envelope()).await;

    // Assert - inspect what actually reached the provider
    let requests = env.email_mock.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);

    let wire: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("wire body should be JSON");
    assert_eq!(wire["subject"], "New Client Form: Dana Whitfield \u{2014} 55401");
    assert_eq!(wire["reply_to"], "dana@example.com");
    assert_eq!(wire["to"].as_array().expect("recipient list").len(), 7);
    let html = wire["html"].as_str().expect("html body");
    assert!(html.contains("Dana Whitfield"));
    assert!(html.contains(TestEnv::SUBMITTED_AT));
}

#[tokio::test]
async fn reply_to_is_omitted_when_submitter_gave_no_email() {
    // Arrange
    let env = TestEnv::new().await;
    env.mock_email_success().await;
    env.mock_airtable_success().await;
    let addr = env.spawn_server().await;

    // Act
    post_json(addr, &FormBuilder::complete().without_email().into_envelope()).await;

    // Assert
    let requests = env.email_mock.received_requests().await.expect("requests recorded");
    let wire: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("wire body should be JSON");
    assert!(wire.get("reply_to").is_none());
}

#[tokio::test]
async fn airtable_record_carries_the_fixed_field_mapping() {
    // Arrange
    let env = TestEnv::new().await;
    env.mock_email_success().await;
    env.mock_airtable_success().await;
    let addr = env.spawn_server().await;

    // Act - bare-string service selection, as the form sends for one box
    post_json(addr, &FormBuilder::complete().single_service("mowing").into_envelope()).await;

    // Assert
    let requests = env.airtable_mock.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);

    let wire: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("wire body should be JSON");
    let fields = &wire["records"][0]["fields"];
    assert_eq!(fields["Name"], "Dana Whitfield");
    assert_eq!(fields["ZIP Code"], "55401");
    assert_eq!(fields["Address"], "4211 Elm St, Minneapolis, MN");
    assert_eq!(fields["Yard Size"], "12,000 sq ft");
    assert_eq!(fields["Services"], "Lawn Care & Mowing");
    assert_eq!(fields["Financing Interest"], "Yes");
    assert_eq!(fields["Submitted At"], TestEnv::SUBMITTED_AT);
}
