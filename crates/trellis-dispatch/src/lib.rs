//! Outbound dispatch for lead-form submissions.
//!
//! This crate owns the two downstream channels — the transactional email
//! provider and the Airtable records API — and the coordinator that fans a
//! submission out to both concurrently. Channels settle independently:
//! one failing never aborts the other, and the pair of outcomes is handed
//! back for the caller to aggregate.
//!
//! There is deliberately no queue, no retry, and no persistence of failed
//! attempts here; a failed channel is logged and reported, nothing more.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use trellis_core::{FormSubmission, LabelSet, RealClock};
//! use trellis_dispatch::{
//!     AirtableClient, AirtableConfig, Dispatcher, EmailClient, EmailConfig, SenderIdentity,
//! };
//!
//! # async fn example(form: FormSubmission) -> trellis_dispatch::Result<()> {
//! let email = EmailClient::new(EmailConfig {
//!     api_key: "re_xxx".to_string(),
//!     ..EmailConfig::default()
//! })?;
//! let airtable = AirtableClient::new(AirtableConfig {
//!     token: "pat_xxx".to_string(),
//!     base_id: "appXXX".to_string(),
//!     table_id: "tblXXX".to_string(),
//!     ..AirtableConfig::default()
//! })?;
//! let sender = SenderIdentity {
//!     from: "Acme <noreply@acme.test>".to_string(),
//!     recipients: vec!["office@acme.test".to_string()],
//! };
//!
//! let dispatcher =
//!     Dispatcher::new(email, airtable, sender, LabelSet::new(), Arc::new(RealClock));
//! let report = dispatcher.dispatch(&form).await;
//! println!("email ok: {}", report.email_delivered());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod airtable;
pub mod coordinator;
pub mod email;
pub mod error;

pub use airtable::{AirtableClient, AirtableConfig, RecordReceipt};
pub use coordinator::{DispatchReport, Dispatcher, SenderIdentity};
pub use email::{EmailClient, EmailConfig, EmailReceipt, OutboundEmail};
pub use error::{ChannelError, Result};
