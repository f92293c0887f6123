//! Request middleware.
//!
//! [`Trace`] assigns every request a trace identifier, echoes it in the
//! `trace-id` response header and scopes it for error payloads and logs.

pub mod trace;

pub use trace::Trace;
