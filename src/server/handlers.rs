//! HTTP handlers for the dashboard form actions
//!
//! Handlers only adapt HTTP to the actions: forms arrive urlencoded, a
//! redirect outcome becomes `303 See Other`, a rejected form becomes `422`
//! with the serialized [`ActionState`].

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::actions::{InvoiceActions, authenticate};
use crate::core::auth::IdentityProvider;
use crate::core::cache::{INVOICES_PATH, ViewCache};
use crate::core::error::{ActionError, PersistError};
use crate::core::form::FormSubmission;
use crate::core::state::{ActionOutcome, ActionState};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub actions: InvoiceActions,
    pub views: ViewCache,
    pub identity: Arc<dyn IdentityProvider>,
}

/// POST /dashboard/invoices/create
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<FormSubmission>,
) -> ActionOutcome {
    state
        .actions
        .create_invoice(&ActionState::default(), &form)
        .await
}

/// POST /dashboard/invoices/{id}/edit
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<FormSubmission>,
) -> ActionOutcome {
    state
        .actions
        .update_invoice(&id, &ActionState::default(), &form)
        .await
}

/// POST /dashboard/invoices/{id}/delete
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ActionError> {
    state.actions.delete_invoice(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /dashboard/invoices
///
/// Served from the view cache until a mutation revalidates it.
pub async fn list_invoices(State(state): State<AppState>) -> Result<Json<Value>, ActionError> {
    let store = state.actions.store().clone();
    let body = state
        .views
        .get_or_render(INVOICES_PATH, move || async move {
            let invoices = store.list().await?;
            let rows: Vec<Value> = invoices
                .iter()
                .map(|invoice| {
                    json!({
                        "id": invoice.id,
                        "customerId": invoice.customer_id,
                        "amount": invoice.amount,
                        "amountMajor": invoice.amount_major(),
                        "status": invoice.status,
                        "date": invoice.date,
                    })
                })
                .collect();
            Ok::<_, PersistError>(json!({
                "invoices": rows,
                "count": invoices.len(),
            }))
        })
        .await?;
    Ok(Json(body))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<FormSubmission>,
) -> Result<Response, ActionError> {
    match authenticate(state.identity.as_ref(), None, &form).await {
        Ok(None) => Ok(StatusCode::NO_CONTENT.into_response()),
        Ok(Some(message)) => {
            Ok((StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response())
        }
        Err(err) => Err(ActionError::Fatal(err)),
    }
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
