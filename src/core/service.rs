//! Persistence gateway for invoices

use crate::core::error::PersistError;
use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use async_trait::async_trait;

/// Store for invoice rows
///
/// Each write is a single statement with no transaction and no existence
/// check: updating or deleting an unknown id affects nothing and is not an
/// error. Concurrent writes to the same row are last-write-wins.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a row; the store generates and returns its id
    async fn create(&self, invoice: NewInvoice) -> Result<String, PersistError>;

    /// Overwrite customer, amount and status of the row with `id`
    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), PersistError>;

    /// Hard-delete the row with `id`
    async fn delete(&self, id: &str) -> Result<(), PersistError>;

    /// All invoices, most recent date first
    async fn list(&self) -> Result<Vec<Invoice>, PersistError>;
}
