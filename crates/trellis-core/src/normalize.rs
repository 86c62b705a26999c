//! Total normalization from raw-optional input to display-ready fields.
//!
//! Every function here is pure and never fails: absent or malformed values
//! degrade to empty strings, not errors. The same normalized output feeds
//! both the HTML notification and the tabular record.

use crate::{form::FormSubmission, labels::LabelSet};

/// Canonical display fields derived from one [`FormSubmission`].
///
/// All string fields are present-with-placeholder: an empty string means
/// the submitter left the field blank (or supplied something unparsable,
/// for the numeric fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedForm {
    /// `first last`, trimmed; empty when both parts are absent.
    pub full_name: String,
    /// Comma-joined street, city, and state with empty parts omitted.
    pub street_address: String,
    /// Same as [`street_address`](Self::street_address) plus the zip code.
    pub full_address: String,
    /// Service display labels in submission order; unmapped identifiers
    /// pass through verbatim.
    pub service_labels: Vec<String>,
    /// Project type display label.
    pub project_type: String,
    /// Timeline display label.
    pub timeline: String,
    /// Referral source display label.
    pub referral_source: String,
    /// Thousands-separated yard size with ` sq ft` suffix, e.g.
    /// `12,000 sq ft`; empty when absent or unparsable.
    pub yard_size: String,
    /// Thousands-separated budget with `$` prefix; empty when absent or
    /// unparsable.
    pub budget: String,
    /// Whether the submitter asked about financing.
    pub financing: bool,
}

impl NormalizedForm {
    /// Normalizes a raw submission against the given label dictionaries.
    pub fn from_submission(form: &FormSubmission, labels: &LabelSet) -> Self {
        let street = text(&form.address);
        let city = text(&form.city);
        let state = text(&form.state);
        let zip = text(&form.zip_code);

        Self {
            full_name: format!("{} {}", text(&form.first_name), text(&form.last_name))
                .trim()
                .to_string(),
            street_address: join_nonempty(&[street, city, state]),
            full_address: join_nonempty(&[street, city, state, zip]),
            service_labels: form.service_ids().into_iter().map(|id| labels.service(id)).collect(),
            project_type: mapped(&form.project_type, |id| labels.project_type(id)),
            timeline: mapped(&form.timeline, |id| labels.timeline(id)),
            referral_source: mapped(&form.referral_source, |id| labels.referral(id)),
            yard_size: format_thousands(text(&form.yard_size))
                .map(|n| format!("{n} sq ft"))
                .unwrap_or_default(),
            budget: format_thousands(text(&form.budget))
                .map(|n| format!("${n}"))
                .unwrap_or_default(),
            financing: text(&form.financing_info) == "yes",
        }
    }
}

/// Renders a numeric string with comma thousands separators.
///
/// Accepts whatever parses as a finite number; keeps up to three fraction
/// digits with trailing zeros trimmed. Returns `None` for empty or
/// unparsable input so callers can substitute their own placeholder.
pub fn format_thousands(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or("")
}

fn join_nonempty(parts: &[&str]) -> String {
    parts.iter().filter(|part| !part.is_empty()).copied().collect::<Vec<_>>().join(", ")
}

fn mapped(field: &Option<String>, lookup: impl Fn(&str) -> String) -> String {
    let raw = text(field);
    if raw.is_empty() {
        String::new()
    } else {
        lookup(raw)
    }
}
