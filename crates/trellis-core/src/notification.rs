//! HTML notification rendering.
//!
//! Produces the self-contained document sent as the email body: inline
//! styles only, no external references, four fixed sections. A field row
//! renders only when it has a value; the Additional Comments section is
//! omitted entirely when empty. Output is deterministic given the same
//! submission and timestamp string.

use crate::{form::FormSubmission, normalize::NormalizedForm};

const HEADING_STYLE: &str = "color:#1c4e18;font-size:16px;border-bottom:2px solid #31761f;padding-bottom:6px;margin-bottom:12px;";
const TABLE_STYLE: &str = "width:100%;border-collapse:collapse;margin-bottom:24px;";

/// Renders the notification document for one submission.
///
/// `submitted_at` is the pre-rendered Central-time submission timestamp;
/// the caller owns the clock so rendering stays pure.
pub fn render_notification(
    form: &FormSubmission,
    normalized: &NormalizedForm,
    submitted_at: &str,
) -> String {
    let contact_rows = [
        row("Name", &normalized.full_name),
        row("Email", trimmed(&form.email)),
        row("Phone", trimmed(&form.phone)),
        row("Address", &normalized.full_address),
        row("Referral Source", or_dash(&normalized.referral_source)),
    ]
    .concat();

    let project_rows = [
        row("Project Type", or_dash(&normalized.project_type)),
        row("Description", trimmed(&form.project_description)),
        row("Yard Size", or_dash(&normalized.yard_size)),
        row("Timeline", or_dash(&normalized.timeline)),
        row("Budget", or_dash(&normalized.budget)),
        row("Financing Interest", if normalized.financing { "\u{2705} Yes" } else { "No" }),
    ]
    .concat();

    let services_section = if normalized.service_labels.is_empty() {
        r#"<p style="color:#718096;margin-bottom:24px;">None selected</p>"#.to_string()
    } else {
        let items: String = normalized
            .service_labels
            .iter()
            .map(|label| format!(r#"<li style="margin-bottom:4px;">{}</li>"#, escape_html(label)))
            .collect();
        format!(r#"<ul style="padding-left:20px;margin-bottom:24px;">{items}</ul>"#)
    };

    let comments = trimmed(&form.additional_comments);
    let comments_section = if comments.is_empty() {
        String::new()
    } else {
        format!(
            r#"<h2 style="{HEADING_STYLE}">Additional Comments</h2><p style="background:#f7fafc;padding:12px;border-radius:6px;border-left:4px solid #31761f;margin-bottom:24px;">{}</p>"#,
            escape_html(comments)
        )
    };

    format!(
        r#"
  <div style="font-family:'Segoe UI',Tahoma,Geneva,Verdana,sans-serif;max-width:600px;margin:0 auto;background:#ffffff;border-radius:8px;overflow:hidden;box-shadow:0 4px 12px rgba(0,0,0,0.1);">
    <div style="background:linear-gradient(135deg,#1c4e18,#31761f);padding:24px;text-align:center;">
      <h1 style="color:#ffffff;margin:0;font-size:22px;">New Client Form Submission</h1>
      <p style="color:#d4edda;margin:8px 0 0;">Landscapes Unlimited</p>
    </div>

    <div style="padding:24px;">
      <h2 style="{HEADING_STYLE}">Contact Information</h2>
      <table style="{TABLE_STYLE}">{contact_rows}</table>

      <h2 style="{HEADING_STYLE}">Project Details</h2>
      <table style="{TABLE_STYLE}">{project_rows}</table>

      <h2 style="{HEADING_STYLE}">Services Requested</h2>
      {services_section}

      {comments_section}
    </div>

    <div style="background:#f7fafc;padding:16px;text-align:center;font-size:12px;color:#718096;">
      Submitted on {submitted_at} CT
    </div>
  </div>"#
    )
}

fn row(label: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!(
        r#"<tr>
           <td style="padding:8px 12px;font-weight:600;color:#1c4e18;width:40%;border-bottom:1px solid #e2e8f0;">{label}</td>
           <td style="padding:8px 12px;border-bottom:1px solid #e2e8f0;">{}</td>
         </tr>"#,
        escape_html(value)
    )
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "\u{2014}"
    } else {
        value
    }
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or("")
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
