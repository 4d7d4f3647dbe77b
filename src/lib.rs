//! # Dashboard actions
//!
//! Server-side form actions for an invoices dashboard.
//!
//! ## Features
//!
//! - **Form Validation**: Untyped form fields are coerced and checked; every
//!   invalid field is reported at once, never as an error value
//! - **Invoice Persistence**: Create, update and hard-delete through an
//!   injected [`InvoiceStore`](core::service::InvoiceStore) (in-memory or PostgreSQL)
//! - **Minor Units**: Amounts are stored as integer cents
//! - **View Revalidation**: Every mutation marks `/dashboard/invoices` stale
//! - **Redirect Outcomes**: Actions return [`ActionOutcome::Redirect`](core::state::ActionOutcome)
//!   instead of jumping out of the caller
//! - **Credential Sign-in**: Provider failures mapped to the strings the form shows
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let store = Arc::new(InMemoryInvoiceStore::new());
//! let actions = InvoiceActions::new(store, Arc::new(ViewCache::new()));
//!
//! let form = FormSubmission::new()
//!     .with("customerId", "3958dc9e-712f-4377-85e9-fec4b6a6442a")
//!     .with("amount", "49.99")
//!     .with("status", "pending");
//!
//! match actions.create_invoice(&ActionState::default(), &form).await {
//!     ActionOutcome::Redirect(path) => println!("go to {path}"),
//!     ActionOutcome::State(state) => println!("fix: {:?}", state.errors),
//! }
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        auth::{
            AuthErrorKind, CREDENTIALS_STRATEGY, Credentials, IdentityProvider, SignInError,
            StaticCredentialsProvider,
        },
        cache::{CacheInvalidator, INVOICES_PATH, NoopInvalidator, ViewCache},
        error::{ActionError, ConfigError, PersistError},
        form::FormSubmission,
        invoice::{Invoice, InvoiceChanges, InvoiceInput, InvoiceStatus, NewInvoice},
        service::InvoiceStore,
        state::{ActionOutcome, ActionState, FieldErrors},
        validation::{FormIntent, validate_invoice_form},
    };

    // === Actions ===
    pub use crate::actions::{InvoiceActions, authenticate};

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Config ===
    pub use crate::config::{DashboardConfig, SslMode};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
