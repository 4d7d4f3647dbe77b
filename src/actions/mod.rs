//! Server actions invoked by dashboard forms

pub mod auth;
pub mod invoices;

pub use auth::authenticate;
pub use invoices::InvoiceActions;
