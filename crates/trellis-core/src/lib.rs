//! Core domain types and pure transformation logic.
//!
//! Provides the untrusted form submission model, the fixed label
//! dictionaries, total normalization from raw-optional input to
//! display-ready fields, and the HTML notification renderer. All other
//! crates depend on these foundational types; nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod form;
pub mod labels;
pub mod normalize;
pub mod notification;
pub mod time;

pub use form::{FormSubmission, ServiceSelection};
pub use labels::LabelSet;
pub use normalize::NormalizedForm;
pub use notification::render_notification;
pub use time::{central_timestamp, Clock, RealClock, TestClock};
