//! Invoice form schema
//!
//! Turns a [`FormSubmission`] into an [`InvoiceInput`], or into the
//! [`ActionState`] the form re-renders with. Every field is checked so the
//! user sees all problems at once.

use super::validators::{minor_units_above, one_of, required_text};
use crate::core::form::FormSubmission;
use crate::core::invoice::{InvoiceInput, InvoiceStatus};
use crate::core::state::{ActionState, FieldErrors};

pub const CUSTOMER_FIELD: &str = "customerId";
pub const AMOUNT_FIELD: &str = "amount";
pub const STATUS_FIELD: &str = "status";

pub const CUSTOMER_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status.";

/// Which action is validating; selects the summary message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormIntent {
    Create,
    Update,
}

impl FormIntent {
    pub fn failure_message(&self) -> &'static str {
        match self {
            FormIntent::Create => "Missing Fields. Failed to Create Invoice.",
            // Wording is what the dashboard has always shown.
            FormIntent::Update => "Missing Fields. Field to Update Invoice.",
        }
    }
}

/// Validate the mutable invoice fields of a submission
///
/// `id` and `date` are never read from the form: the store assigns the id
/// and the create action stamps the date.
pub fn validate_invoice_form(
    form: &FormSubmission,
    intent: FormIntent,
) -> Result<InvoiceInput, ActionState> {
    let customer = required_text(CUSTOMER_MESSAGE)(form.get(CUSTOMER_FIELD));
    let amount = minor_units_above(0, AMOUNT_MESSAGE)(form.get(AMOUNT_FIELD));
    let status = one_of::<InvoiceStatus>(STATUS_MESSAGE)(form.get(STATUS_FIELD));

    match (customer, amount, status) {
        (Ok(customer_id), Ok(amount_minor), Ok(status)) => Ok(InvoiceInput {
            customer_id,
            amount_minor,
            status,
        }),
        (customer, amount, status) => {
            let mut errors = FieldErrors::default();
            if let Err(msg) = customer {
                errors.push(CUSTOMER_FIELD, msg);
            }
            if let Err(msg) = amount {
                errors.push(AMOUNT_FIELD, msg);
            }
            if let Err(msg) = status {
                errors.push(STATUS_FIELD, msg);
            }
            tracing::debug!(
                fields = errors.field_count(),
                ?intent,
                "invoice form rejected"
            );
            Err(ActionState::with_errors(errors, intent.failure_message()))
        }
    }
}
