//! HTTP request handlers for the Trellis API.
//!
//! Handlers follow a consistent pattern:
//! - Input validation with early-return error responses
//! - Tracing for observability
//! - Standardized JSON error bodies
//!
//! # Handler Organization
//!
//! - `send_form` - Lead-form submission endpoint
//! - `health` - Health and liveness probes
//!
//! # Error Handling
//!
//! A submission missing its `formData` payload is rejected with 400 before
//! any downstream call. Channel failures are aggregated, never surfaced
//! individually as errors: the response reports per-channel booleans and
//! the status code only reflects the pair. Anything unexpected maps to a
//! generic 500 with detail kept in server logs.

pub mod health;
pub mod send_form;

pub use health::{health_check, liveness_check};
pub use send_form::send_form;
