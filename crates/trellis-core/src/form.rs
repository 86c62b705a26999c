//! Untrusted form submission model.
//!
//! Every field is modeled as present-or-absent; no field is required by
//! contract. Wire names are the public form's camelCase keys. Absent keys
//! and explicit nulls both deserialize to `None`; whitespace and empty
//! strings are handled downstream by normalization, not here.

use serde::{Deserialize, Serialize};

/// A raw lead-generation form submission as posted by the public site.
///
/// Deserialization never rejects a submission for missing fields. The
/// normalizer is responsible for degrading gracefully when values are
/// absent or malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    /// Submitter's first name.
    pub first_name: Option<String>,
    /// Submitter's last name.
    pub last_name: Option<String>,
    /// Contact email; when present it becomes the notification reply-to.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State.
    pub state: Option<String>,
    /// ZIP code; also surfaces in the notification subject line.
    pub zip_code: Option<String>,
    /// Project type identifier (mapped through the label dictionary).
    pub project_type: Option<String>,
    /// Free-text project description.
    pub project_description: Option<String>,
    /// Yard size as a numeric string, e.g. `"12000"`.
    pub yard_size: Option<String>,
    /// Timeline identifier (mapped through the label dictionary).
    pub timeline: Option<String>,
    /// Budget as a numeric string.
    pub budget: Option<String>,
    /// Requested service identifiers; the form sends a bare string when a
    /// single box is checked and a list otherwise.
    pub services: Option<ServiceSelection>,
    /// Financing interest flag; the form sends the literal string `"yes"`.
    pub financing_info: Option<String>,
    /// Referral source identifier (mapped through the label dictionary).
    pub referral_source: Option<String>,
    /// Free-text additional comments.
    pub additional_comments: Option<String>,
}

impl FormSubmission {
    /// Returns the requested service identifiers in submission order.
    ///
    /// A bare string and a single-element list are equivalent.
    pub fn service_ids(&self) -> Vec<&str> {
        self.services.as_ref().map(ServiceSelection::ids).unwrap_or_default()
    }
}

/// One-or-many service selection as sent by the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceSelection {
    /// A single checked service, sent as a bare string.
    One(String),
    /// Multiple checked services.
    Many(Vec<String>),
}

impl ServiceSelection {
    /// Returns the selected identifiers in order.
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Self::One(id) => vec![id.as_str()],
            Self::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }
}
