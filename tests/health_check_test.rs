//! Health check integration tests.
//!
//! Verifies the probe endpoints and the middleware stack on the real
//! server.

use trellis_testing::TestEnv;

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    // Arrange
    let env = TestEnv::new().await;
    let addr = env.spawn_server().await;

    // Act
    let response =
        reqwest::get(format!("http://{addr}/health")).await.expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn liveness_endpoint_responds() {
    // Arrange
    let env = TestEnv::new().await;
    let addr = env.spawn_server().await;

    // Act
    let response =
        reqwest::get(format!("http://{addr}/live")).await.expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["status"], "alive");
    assert_eq!(body["service"], "trellis-api");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    // Arrange
    let env = TestEnv::new().await;
    let addr = env.spawn_server().await;

    // Act
    let response =
        reqwest::get(format!("http://{addr}/health")).await.expect("Request should complete");

    // Assert
    let request_id = response
        .headers()
        .get("X-Request-Id")
        .expect("X-Request-Id header should be present")
        .to_str()
        .expect("header should be valid UTF-8");
    assert!(!request_id.is_empty());
}
