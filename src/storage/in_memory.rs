//! In-memory implementation of InvoiceStore for testing and development

use crate::core::error::PersistError;
use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use crate::core::service::InvoiceStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

/// In-memory invoice store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// [`fail_next`](Self::fail_next) makes the next operation fail, so the
/// actions' failure paths can be exercised without a database.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
    injected_failure: Arc<Mutex<Option<PersistError>>>,
}

impl InMemoryInvoiceStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store operation return `error`
    pub fn fail_next(&self, error: PersistError) {
        if let Ok(mut slot) = self.injected_failure.lock() {
            *slot = Some(error);
        }
    }

    /// Fetch a single invoice by id
    pub fn get(&self, id: &str) -> Option<Invoice> {
        self.invoices
            .read()
            .ok()
            .and_then(|invoices| invoices.get(id).cloned())
    }

    pub fn len(&self) -> usize {
        self.invoices.read().map(|i| i.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn take_failure(&self) -> Result<(), PersistError> {
        let mut slot = self
            .injected_failure
            .lock()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?;
        match slot.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn create(&self, invoice: NewInvoice) -> Result<String, PersistError> {
        self.take_failure()?;

        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        invoices.insert(
            id.clone(),
            Invoice {
                id: id.clone(),
                customer_id: invoice.customer_id,
                amount: invoice.amount_minor,
                status: invoice.status,
                date: invoice.date,
            },
        );

        Ok(id)
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), PersistError> {
        self.take_failure()?;

        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?;

        // Unknown ids match no row.
        if let Some(invoice) = invoices.get_mut(id) {
            invoice.customer_id = changes.customer_id;
            invoice.amount = changes.amount_minor;
            invoice.status = changes.status;
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), PersistError> {
        self.take_failure()?;

        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?;

        invoices.remove(id);

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Invoice>, PersistError> {
        self.take_failure()?;

        let invoices = self
            .invoices
            .read()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?;

        let mut all: Vec<Invoice> = invoices.values().cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}
