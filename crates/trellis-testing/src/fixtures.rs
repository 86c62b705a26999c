//! Test data builders for form submissions.
//!
//! Builder pattern over [`FormSubmission`] with a fully-populated default
//! sample, plus helpers to wrap a form in the wire envelope the endpoint
//! expects.

use serde_json::{json, Value};
use trellis_core::{FormSubmission, ServiceSelection};

/// Builder for test form submissions.
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    form: FormSubmission,
}

impl FormBuilder {
    /// Creates a builder with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with a fully-populated, realistic submission.
    pub fn complete() -> Self {
        Self {
            form: FormSubmission {
                first_name: Some("Dana".to_string()),
                last_name: Some("Whitfield".to_string()),
                email: Some("dana@example.com".to_string()),
                phone: Some("612-555-0134".to_string()),
                address: Some("4211 Elm St".to_string()),
                city: Some("Minneapolis".to_string()),
                state: Some("MN".to_string()),
                zip_code: Some("55401".to_string()),
                project_type: Some("renovation".to_string()),
                project_description: Some("Full backyard redesign".to_string()),
                yard_size: Some("12000".to_string()),
                timeline: Some("soon".to_string()),
                budget: Some("25000".to_string()),
                services: Some(ServiceSelection::Many(vec![
                    "landscape".to_string(),
                    "lighting".to_string(),
                ])),
                financing_info: Some("yes".to_string()),
                referral_source: Some("search".to_string()),
                additional_comments: Some("Gate code is 4411".to_string()),
            },
        }
    }

    /// Sets the submitter's name.
    pub fn name(mut self, first: &str, last: &str) -> Self {
        self.form.first_name = Some(first.to_string());
        self.form.last_name = Some(last.to_string());
        self
    }

    /// Sets the submitter's email.
    pub fn email(mut self, email: &str) -> Self {
        self.form.email = Some(email.to_string());
        self
    }

    /// Clears the submitter's email.
    pub fn without_email(mut self) -> Self {
        self.form.email = None;
        self
    }

    /// Sets the zip code.
    pub fn zip_code(mut self, zip: &str) -> Self {
        self.form.zip_code = Some(zip.to_string());
        self
    }

    /// Sets the service selection as a list.
    pub fn services(mut self, ids: &[&str]) -> Self {
        self.form.services =
            Some(ServiceSelection::Many(ids.iter().map(|id| (*id).to_string()).collect()));
        self
    }

    /// Sets the service selection as a bare string, as the form sends when
    /// a single box is checked.
    pub fn single_service(mut self, id: &str) -> Self {
        self.form.services = Some(ServiceSelection::One(id.to_string()));
        self
    }

    /// Sets the additional comments.
    pub fn comments(mut self, comments: &str) -> Self {
        self.form.additional_comments = Some(comments.to_string());
        self
    }

    /// Returns the built submission.
    pub fn build(self) -> FormSubmission {
        self.form
    }

    /// Wraps the built submission in the `{"formData": ...}` envelope.
    pub fn into_envelope(self) -> Value {
        json!({ "formData": serde_json::to_value(self.form).expect("form should serialize") })
    }
}
