//! Two-channel dispatch coordination.
//!
//! For each submission the coordinator builds the notification email and
//! the tabular record from the same normalized data, issues both provider
//! calls concurrently, and captures each outcome independently. A failure
//! on one channel never aborts or masks the other; the caller decides the
//! aggregate response from the pair of outcomes.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info, instrument};
use trellis_core::{
    central_timestamp, render_notification, Clock, FormSubmission, LabelSet, NormalizedForm,
};

use crate::{
    airtable::{AirtableClient, RecordReceipt},
    email::{EmailClient, EmailReceipt, OutboundEmail},
    error::ChannelError,
};

/// Fixed sender identity for notification emails.
#[derive(Debug, Clone)]
pub struct SenderIdentity {
    /// Sender display name and address.
    pub from: String,
    /// Fixed internal recipient list.
    pub recipients: Vec<String>,
}

/// Outcome pair for one dispatched submission.
///
/// Each channel resolves to its own result; the pair only meets here,
/// after both have settled.
#[derive(Debug)]
pub struct DispatchReport {
    /// Email channel outcome.
    pub email: Result<EmailReceipt, ChannelError>,
    /// Tabular record channel outcome.
    pub airtable: Result<RecordReceipt, ChannelError>,
}

impl DispatchReport {
    /// Whether the notification email was accepted.
    pub fn email_delivered(&self) -> bool {
        self.email.is_ok()
    }

    /// Whether the record was appended.
    pub fn record_appended(&self) -> bool {
        self.airtable.is_ok()
    }

    /// Whether at least one channel succeeded.
    pub fn any_succeeded(&self) -> bool {
        self.email_delivered() || self.record_appended()
    }

    /// Whether both channels failed.
    pub fn total_failure(&self) -> bool {
        !self.any_succeeded()
    }
}

/// Coordinates the two outbound channels for each submission.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    email: EmailClient,
    airtable: AirtableClient,
    sender: SenderIdentity,
    labels: LabelSet,
    clock: Arc<dyn Clock>,
}

impl Dispatcher {
    /// Creates a dispatcher from its injected collaborators.
    pub fn new(
        email: EmailClient,
        airtable: AirtableClient,
        sender: SenderIdentity,
        labels: LabelSet,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { email, airtable, sender, labels, clock }
    }

    /// Dispatches one submission to both channels and reports both
    /// outcomes.
    ///
    /// The two calls run concurrently and the coordinator waits for both
    /// to settle regardless of individual failure. Nothing is retried or
    /// persisted for replay.
    #[instrument(name = "dispatch_submission", skip(self, form))]
    pub async fn dispatch(&self, form: &FormSubmission) -> DispatchReport {
        let normalized = NormalizedForm::from_submission(form, &self.labels);
        let submitted_at = central_timestamp(self.clock.now_utc());

        let message = self.build_email(form, &normalized, &submitted_at);
        let fields = build_record_fields(form, &normalized, &submitted_at);

        let (email, airtable) =
            tokio::join!(self.email.send(&message), self.airtable.append(&fields));

        match &email {
            Ok(receipt) => {
                info!(message_id = receipt.id.as_deref().unwrap_or("unknown"), "Email sent");
            },
            Err(e) => error!(error = %e, "Email channel failed"),
        }
        match &airtable {
            Ok(receipt) => {
                info!(record_id = receipt.id.as_deref().unwrap_or("unknown"), "Record created");
            },
            Err(e) => error!(error = %e, "Airtable channel failed"),
        }

        DispatchReport { email, airtable }
    }

    fn build_email(
        &self,
        form: &FormSubmission,
        normalized: &NormalizedForm,
        submitted_at: &str,
    ) -> OutboundEmail {
        let reply_to = form
            .email
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(str::to_string);

        OutboundEmail {
            from: self.sender.from.clone(),
            to: self.sender.recipients.clone(),
            subject: build_subject(normalized, form),
            html: render_notification(form, normalized, submitted_at),
            reply_to,
        }
    }
}

/// Builds the notification subject line.
///
/// Falls back to `Unknown` and `No ZIP` so the subject always carries
/// both slots.
fn build_subject(normalized: &NormalizedForm, form: &FormSubmission) -> String {
    let name = if normalized.full_name.is_empty() { "Unknown" } else { &normalized.full_name };
    let zip = form.zip_code.as_deref().map(str::trim).unwrap_or("");
    let zip = if zip.is_empty() { "No ZIP" } else { zip };
    format!("New Client Form: {name} \u{2014} {zip}")
}

/// Builds the tabular record's field mapping.
///
/// Reuses the normalized display values; the budget column intentionally
/// carries the raw submitted string rather than the formatted amount.
fn build_record_fields(
    form: &FormSubmission,
    normalized: &NormalizedForm,
    submitted_at: &str,
) -> Map<String, Value> {
    let text = |field: &Option<String>| -> Value {
        Value::String(field.as_deref().map(str::trim).unwrap_or("").to_string())
    };

    let mut fields = Map::new();
    fields.insert("Name".to_string(), Value::String(normalized.full_name.clone()));
    fields.insert("Email".to_string(), text(&form.email));
    fields.insert("Phone".to_string(), text(&form.phone));
    fields.insert("ZIP Code".to_string(), text(&form.zip_code));
    fields.insert("Address".to_string(), Value::String(normalized.street_address.clone()));
    fields.insert("Project Type".to_string(), Value::String(normalized.project_type.clone()));
    fields.insert("Project Description".to_string(), text(&form.project_description));
    fields.insert("Yard Size".to_string(), Value::String(normalized.yard_size.clone()));
    fields.insert("Timeline".to_string(), Value::String(normalized.timeline.clone()));
    fields.insert("Budget".to_string(), text(&form.budget));
    fields.insert("Services".to_string(), Value::String(normalized.service_labels.join(", ")));
    fields.insert(
        "Financing Interest".to_string(),
        Value::String(if normalized.financing { "Yes" } else { "No" }.to_string()),
    );
    fields.insert("Referral Source".to_string(), Value::String(normalized.referral_source.clone()));
    fields.insert("Additional Comments".to_string(), text(&form.additional_comments));
    fields.insert("Submitted At".to_string(), Value::String(submitted_at.to_string()));
    fields
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use trellis_core::{ServiceSelection, TestClock};
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{airtable::AirtableConfig, email::EmailConfig};

    fn complete_form() -> FormSubmission {
        FormSubmission {
            first_name: Some("Dana".into()),
            last_name: Some("Whitfield".into()),
            email: Some("dana@example.com".into()),
            phone: Some("612-555-0134".into()),
            address: Some("4211 Elm St".into()),
            city: Some("Minneapolis".into()),
            state: Some("MN".into()),
            zip_code: Some("55401".into()),
            project_type: Some("renovation".into()),
            project_description: Some("Full backyard redesign".into()),
            yard_size: Some("12000".into()),
            timeline: Some("soon".into()),
            budget: Some("25000".into()),
            services: Some(ServiceSelection::Many(vec!["landscape".into(), "mowing".into()])),
            financing_info: Some("yes".into()),
            referral_source: Some("search".into()),
            additional_comments: Some("Gate code is 4411".into()),
        }
    }

    fn test_dispatcher(email_base: String, airtable_base: String) -> Dispatcher {
        let email = EmailClient::new(EmailConfig {
            api_base: email_base,
            api_key: "test-key".to_string(),
            ..EmailConfig::default()
        })
        .expect("email client should build");

        let airtable = AirtableClient::new(AirtableConfig {
            api_base: airtable_base,
            token: "test-token".to_string(),
            base_id: "appTEST".to_string(),
            table_id: "tblTEST".to_string(),
            ..AirtableConfig::default()
        })
        .expect("airtable client should build");

        let sender = SenderIdentity {
            from: "Landscapes Unlimited <noreply@webleadsnow.com>".to_string(),
            recipients: vec!["office@example.com".to_string(), "sales@example.com".to_string()],
        };

        let clock = TestClock::fixed(Utc.with_ymd_and_hms(2025, 6, 15, 17, 30, 45).unwrap());

        Dispatcher::new(email, airtable, sender, LabelSet::new(), Arc::new(clock))
    }

    fn normalized(form: &FormSubmission) -> NormalizedForm {
        NormalizedForm::from_submission(form, &LabelSet::new())
    }

    #[test]
    fn subject_includes_name_and_zip() {
        let form = complete_form();
        assert_eq!(
            build_subject(&normalized(&form), &form),
            "New Client Form: Dana Whitfield \u{2014} 55401"
        );
    }

    #[test]
    fn subject_falls_back_for_missing_name_and_zip() {
        let form = FormSubmission::default();
        assert_eq!(
            build_subject(&normalized(&form), &form),
            "New Client Form: Unknown \u{2014} No ZIP"
        );
    }

    #[test]
    fn record_fields_follow_the_fixed_mapping() {
        let form = complete_form();
        let fields = build_record_fields(&form, &normalized(&form), "6/15/2025, 12:30:45 PM");

        assert_eq!(fields["Name"], "Dana Whitfield");
        assert_eq!(fields["Email"], "dana@example.com");
        assert_eq!(fields["ZIP Code"], "55401");
        // Record address omits the zip; it has its own column.
        assert_eq!(fields["Address"], "4211 Elm St, Minneapolis, MN");
        assert_eq!(fields["Project Type"], "Landscape Renovation");
        assert_eq!(fields["Yard Size"], "12,000 sq ft");
        assert_eq!(fields["Timeline"], "Soon (1-3 months)");
        // Budget carries the raw submitted string.
        assert_eq!(fields["Budget"], "25000");
        assert_eq!(fields["Services"], "Landscape Design, Lawn Care & Mowing");
        assert_eq!(fields["Financing Interest"], "Yes");
        assert_eq!(fields["Referral Source"], "Search Engine");
        assert_eq!(fields["Additional Comments"], "Gate code is 4411");
        assert_eq!(fields["Submitted At"], "6/15/2025, 12:30:45 PM");
        assert_eq!(fields.len(), 15);
    }

    #[test]
    fn record_fields_for_empty_submission_are_empty_strings() {
        let form = FormSubmission::default();
        let fields = build_record_fields(&form, &normalized(&form), "6/15/2025, 12:30:45 PM");

        assert_eq!(fields["Name"], "");
        assert_eq!(fields["Services"], "");
        assert_eq!(fields["Financing Interest"], "No");
        assert_eq!(fields.len(), 15);
    }

    #[test]
    fn reply_to_set_only_when_submitter_gave_an_address() {
        let dispatcher = test_dispatcher("http://email".into(), "http://airtable".into());

        let form = complete_form();
        let message = dispatcher.build_email(&form, &normalized(&form), "now");
        assert_eq!(message.reply_to.as_deref(), Some("dana@example.com"));

        let anonymous = FormSubmission::default();
        let message = dispatcher.build_email(&anonymous, &normalized(&anonymous), "now");
        assert!(message.reply_to.is_none());

        let blank = FormSubmission { email: Some("   ".into()), ..FormSubmission::default() };
        let message = dispatcher.build_email(&blank, &normalized(&blank), "now");
        assert!(message.reply_to.is_none());
    }

    #[tokio::test]
    async fn both_channels_succeeding_yields_full_success() {
        let email_mock = MockServer::start().await;
        let airtable_mock = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/emails"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "msg_1"})),
            )
            .expect(1)
            .mount(&email_mock)
            .await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/v0/appTEST/tblTEST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "records": [{"id": "rec_1"}]
            })))
            .expect(1)
            .mount(&airtable_mock)
            .await;

        let dispatcher = test_dispatcher(email_mock.uri(), airtable_mock.uri());
        let report = dispatcher.dispatch(&complete_form()).await;

        assert!(report.email_delivered());
        assert!(report.record_appended());
        assert!(report.any_succeeded());
        assert!(!report.total_failure());
    }

    #[tokio::test]
    async fn email_failure_does_not_prevent_record_append() {
        let email_mock = MockServer::start().await;
        let airtable_mock = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("provider down"))
            .mount(&email_mock)
            .await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "records": [{"id": "rec_1"}]
            })))
            .expect(1)
            .mount(&airtable_mock)
            .await;

        let dispatcher = test_dispatcher(email_mock.uri(), airtable_mock.uri());
        let report = dispatcher.dispatch(&complete_form()).await;

        assert!(!report.email_delivered());
        assert!(report.record_appended());
        assert!(report.any_succeeded());
    }

    #[tokio::test]
    async fn record_failure_does_not_prevent_email_delivery() {
        let email_mock = MockServer::start().await;
        let airtable_mock = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "msg_1"})),
            )
            .expect(1)
            .mount(&email_mock)
            .await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("bad field"))
            .mount(&airtable_mock)
            .await;

        let dispatcher = test_dispatcher(email_mock.uri(), airtable_mock.uri());
        let report = dispatcher.dispatch(&complete_form()).await;

        assert!(report.email_delivered());
        assert!(!report.record_appended());
        assert!(report.any_succeeded());
    }

    #[tokio::test]
    async fn both_channels_failing_is_total_failure() {
        let email_mock = MockServer::start().await;
        let airtable_mock = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&email_mock)
            .await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&airtable_mock)
            .await;

        let dispatcher = test_dispatcher(email_mock.uri(), airtable_mock.uri());
        let report = dispatcher.dispatch(&complete_form()).await;

        assert!(report.total_failure());
        assert!(!report.any_succeeded());
    }

    #[tokio::test]
    async fn empty_submission_still_attempts_both_channels() {
        let email_mock = MockServer::start().await;
        let airtable_mock = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "msg_1"})),
            )
            .expect(1)
            .mount(&email_mock)
            .await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "records": [{"id": "rec_1"}]
            })))
            .expect(1)
            .mount(&airtable_mock)
            .await;

        let dispatcher = test_dispatcher(email_mock.uri(), airtable_mock.uri());
        let report = dispatcher.dispatch(&FormSubmission::default()).await;

        assert!(report.any_succeeded());
    }
}
