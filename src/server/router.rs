//! Router for the dashboard routes

use super::handlers::{
    AppState, create_invoice, delete_invoice, health_check, list_invoices, login, update_invoice,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the dashboard routes
///
/// - GET /health - Health check
/// - GET /dashboard/invoices - Cached invoice listing
/// - POST /dashboard/invoices/create - Create action
/// - POST /dashboard/invoices/{id}/edit - Update action
/// - POST /dashboard/invoices/{id}/delete - Delete action
/// - POST /login - Credentials sign-in
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/dashboard/invoices", get(list_invoices))
        .route("/dashboard/invoices/create", post(create_invoice))
        .route("/dashboard/invoices/{id}/edit", post(update_invoice))
        .route("/dashboard/invoices/{id}/delete", post(delete_invoice))
        .route("/login", post(login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
