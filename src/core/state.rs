//! Action results: form state and the terminal outcome of an action

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};

/// Field name → ordered error messages, keyed by the form's field names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customer_id: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amount: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,
}

impl FieldErrors {
    /// Append a message for a form field; unknown field names are ignored
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        let bucket = match field {
            "customerId" => &mut self.customer_id,
            "amount" => &mut self.amount,
            "status" => &mut self.status,
            other => {
                tracing::debug!(field = other, "dropping error for unknown form field");
                return;
            }
        };
        bucket.push(message.into());
    }

    /// Messages recorded for a form field
    pub fn get(&self, field: &str) -> &[String] {
        match field {
            "customerId" => &self.customer_id,
            "amount" => &self.amount,
            "status" => &self.status,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.customer_id.is_empty() && self.amount.is_empty() && self.status.is_empty()
    }

    /// Number of fields carrying at least one error
    pub fn field_count(&self) -> usize {
        [&self.customer_id, &self.amount, &self.status]
            .iter()
            .filter(|v| !v.is_empty())
            .count()
    }
}

/// State handed back to the form after a rejected submission
///
/// Mirrors what the form renders inline: per-field messages plus an optional
/// summary line. A fresh form starts from `ActionState::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionState {
    pub fn with_errors(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors,
            message: Some(message.into()),
        }
    }
}

/// Terminal outcome of a form action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Submission rejected; re-render the form with this state
    State(ActionState),
    /// Mutation attempted; navigate to this path, nothing else runs
    Redirect(String),
}

impl ActionOutcome {
    pub fn redirect(path: impl Into<String>) -> Self {
        ActionOutcome::Redirect(path.into())
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            ActionOutcome::Redirect(path) => Some(path),
            ActionOutcome::State(_) => None,
        }
    }

    pub fn state(&self) -> Option<&ActionState> {
        match self {
            ActionOutcome::State(state) => Some(state),
            ActionOutcome::Redirect(_) => None,
        }
    }
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect(path) => Redirect::to(&path).into_response(),
            ActionOutcome::State(state) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(state)).into_response()
            }
        }
    }
}
