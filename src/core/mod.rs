//! Core types and traits: invoices, form validation, persistence, caching and sign-in

pub mod auth;
pub mod cache;
pub mod error;
pub mod form;
pub mod invoice;
pub mod service;
pub mod state;
pub mod validation;

pub use auth::{AuthErrorKind, IdentityProvider, SignInError, StaticCredentialsProvider};
pub use cache::{CacheInvalidator, INVOICES_PATH, NoopInvalidator, ViewCache};
pub use error::{ActionError, ConfigError, PersistError};
pub use form::FormSubmission;
pub use invoice::{Invoice, InvoiceChanges, InvoiceInput, InvoiceStatus, NewInvoice};
pub use service::InvoiceStore;
pub use state::{ActionOutcome, ActionState, FieldErrors};
