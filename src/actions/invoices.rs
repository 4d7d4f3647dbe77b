//! Invoice form actions
//!
//! Each action is validate → one store statement → revalidate the listing →
//! redirect. Create and update are fail-open: a store failure is logged and
//! the action still revalidates and redirects, so the user is sent back to a
//! listing that may not contain their change. Delete propagates store
//! failures instead.

use crate::core::cache::{CacheInvalidator, INVOICES_PATH};
use crate::core::error::ActionError;
use crate::core::form::FormSubmission;
use crate::core::invoice::{InvoiceChanges, NewInvoice};
use crate::core::service::InvoiceStore;
use crate::core::state::{ActionOutcome, ActionState};
use crate::core::validation::{FormIntent, validate_invoice_form};
use std::sync::Arc;

/// Form actions over an injected store and cache
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn CacheInvalidator>,
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>, cache: Arc<dyn CacheInvalidator>) -> Self {
        Self { store, cache }
    }

    pub fn store(&self) -> &Arc<dyn InvoiceStore> {
        &self.store
    }

    /// Create an invoice from a form submission
    ///
    /// The date is always today's UTC date; a submitted `date` is ignored.
    pub async fn create_invoice(
        &self,
        _prev_state: &ActionState,
        form: &FormSubmission,
    ) -> ActionOutcome {
        let input = match validate_invoice_form(form, FormIntent::Create) {
            Ok(input) => input,
            Err(state) => return ActionOutcome::State(state),
        };

        let invoice = NewInvoice::from_input(&input);
        let date = invoice.date.clone();
        match self.store.create(invoice).await {
            Ok(id) => tracing::info!(invoice_id = %id, %date, "invoice created"),
            // Fail-open: the redirect below happens regardless.
            Err(e) => tracing::error!(error = %e, "failed to create invoice"),
        }

        self.cache.revalidate_path(INVOICES_PATH);
        ActionOutcome::redirect(INVOICES_PATH)
    }

    /// Overwrite customer, amount and status of invoice `id`
    ///
    /// An unknown id matches no row and still redirects.
    pub async fn update_invoice(
        &self,
        id: &str,
        _prev_state: &ActionState,
        form: &FormSubmission,
    ) -> ActionOutcome {
        let input = match validate_invoice_form(form, FormIntent::Update) {
            Ok(input) => input,
            Err(state) => return ActionOutcome::State(state),
        };

        match self.store.update(id, InvoiceChanges::from(&input)).await {
            Ok(()) => tracing::info!(invoice_id = id, "invoice updated"),
            // Fail-open: the redirect below happens regardless.
            Err(e) => tracing::error!(invoice_id = id, error = %e, "failed to update invoice"),
        }

        self.cache.revalidate_path(INVOICES_PATH);
        ActionOutcome::redirect(INVOICES_PATH)
    }

    /// Hard-delete invoice `id`
    ///
    /// Store failures propagate and skip revalidation. No redirect.
    pub async fn delete_invoice(&self, id: &str) -> Result<(), ActionError> {
        self.store.delete(id).await?;
        tracing::info!(invoice_id = id, "invoice deleted");

        self.cache.revalidate_path(INVOICES_PATH);
        Ok(())
    }
}
