//! Lead-form submission handler.
//!
//! Accepts the public form's JSON envelope, dispatches to both outbound
//! channels, and reports the aggregate outcome: success when at least one
//! channel succeeded, server error only when both failed.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use trellis_core::FormSubmission;

use crate::AppState;

/// Request envelope for form submission.
#[derive(Debug, Deserialize)]
pub struct SendFormRequest {
    /// The submitted form payload; absent when the client posted an
    /// envelope without it.
    #[serde(rename = "formData")]
    pub form_data: Option<FormSubmission>,
}

/// Response for an accepted submission.
#[derive(Debug, Serialize)]
pub struct SendFormResponse {
    /// Always true: at least one channel succeeded.
    pub success: bool,
    /// Whether the notification email was accepted.
    pub email: bool,
    /// Whether the Airtable record was appended.
    pub airtable: bool,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

/// Handles a lead-form submission.
///
/// Dispatches the submission to the email and record channels
/// concurrently and waits for both to settle.
///
/// # Errors
///
/// Returns appropriate HTTP status codes:
/// - 400: envelope lacks `formData`; no downstream call is attempted
/// - 500: both channels failed, or the handler itself crashed
#[instrument(
    name = "send_form",
    skip(state, request),
    fields(has_form = request.form_data.is_some())
)]
pub async fn send_form(
    State(state): State<AppState>,
    Json(request): Json<SendFormRequest>,
) -> Response {
    let Some(form) = request.form_data else {
        warn!("Submission envelope lacks formData");
        return error_response(StatusCode::BAD_REQUEST, "Missing form data");
    };

    // Dispatch runs in its own task so a panic maps to the generic 500.
    let dispatcher = state.dispatcher.clone();
    let outcome = tokio::spawn(async move { dispatcher.dispatch(&form).await }).await;

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Submission handling crashed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        },
    };

    if report.total_failure() {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Both email and Airtable failed",
        );
    }

    let response = SendFormResponse {
        success: true,
        email: report.email_delivered(),
        airtable: report.record_appended(),
    };
    info!(email = response.email, airtable = response.airtable, "Submission dispatched");

    (StatusCode::OK, Json(response)).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse { error: message.to_string() })).into_response()
}
