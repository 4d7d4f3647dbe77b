//! Validation of untyped form input
//!
//! Validation failure is never an error value: the schema returns the
//! [`ActionState`](crate::core::state::ActionState) the form re-renders with.

pub mod schema;
pub mod validators;

pub use schema::{FormIntent, validate_invoice_form};
