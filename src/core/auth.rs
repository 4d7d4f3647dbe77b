//! Credential sign-in
//!
//! Credential checking belongs to an [`IdentityProvider`]. The provider
//! reports failures as a closed [`SignInError`]: a recognized
//! [`AuthErrorKind`] or an unrecognized error that callers must re-raise.

use crate::core::form::FormSubmission;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use validator::Validate;

/// Name of the email/password sign-in strategy
pub const CREDENTIALS_STRATEGY: &str = "credentials";

/// Recognized authentication failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    /// Credentials were rejected
    CredentialsSignin,
    /// The provider's authorize callback failed
    CallbackRouteError,
    /// Sign-in refused by policy
    AccessDenied,
    /// The identity provider is misconfigured
    Configuration,
    /// No provider is registered for the requested strategy
    InvalidProvider,
    /// Request was missing its CSRF token
    MissingCsrf,
}

impl AuthErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorKind::CredentialsSignin => "CredentialsSignin",
            AuthErrorKind::CallbackRouteError => "CallbackRouteError",
            AuthErrorKind::AccessDenied => "AccessDenied",
            AuthErrorKind::Configuration => "Configuration",
            AuthErrorKind::InvalidProvider => "InvalidProvider",
            AuthErrorKind::MissingCsrf => "MissingCSRF",
        }
    }
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by an identity provider
#[derive(Debug, Error)]
pub enum SignInError {
    /// A failure the provider classifies
    #[error("authentication failed: {0}")]
    Auth(AuthErrorKind),

    /// Anything else; not for the sign-in form to interpret
    #[error(transparent)]
    Unrecognized(anyhow::Error),
}

impl SignInError {
    pub fn kind(&self) -> Option<AuthErrorKind> {
        match self {
            SignInError::Auth(kind) => Some(*kind),
            SignInError::Unrecognized(_) => None,
        }
    }
}

impl From<AuthErrorKind> for SignInError {
    fn from(kind: AuthErrorKind) -> Self {
        SignInError::Auth(kind)
    }
}

/// External identity verification
///
/// On success the provider establishes the session itself; nothing is
/// returned to the caller.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, strategy: &str, form: &FormSubmission) -> Result<(), SignInError>;
}

/// Email/password pair read from a sign-in form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

impl Credentials {
    /// Parse and validate the `email` and `password` fields
    pub fn from_form(form: &FormSubmission) -> Option<Self> {
        let credentials = Credentials {
            email: form.get("email")?.to_string(),
            password: form.get("password")?.to_string(),
        };
        match credentials.validate() {
            Ok(()) => Some(credentials),
            Err(errors) => {
                tracing::debug!(%errors, "credentials failed validation");
                None
            }
        }
    }
}

#[derive(Debug, Clone)]
struct DirectoryUser {
    name: String,
    password: String,
}

/// Development identity provider backed by an in-memory user directory
///
/// Handles the `credentials` strategy only. Passwords are compared as
/// given; this provider is for local development and tests.
#[derive(Clone, Default)]
pub struct StaticCredentialsProvider {
    users: Arc<HashMap<String, DirectoryUser>>,
    sessions: Arc<RwLock<HashSet<String>>>,
}

impl StaticCredentialsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user (builder-style)
    pub fn with_user(
        mut self,
        email: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.users).insert(
            email.into(),
            DirectoryUser {
                name: name.into(),
                password: password.into(),
            },
        );
        self
    }

    /// Whether `email` has an established session
    pub fn is_signed_in(&self, email: &str) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains(email))
            .unwrap_or(false)
    }
}

#[async_trait]
impl IdentityProvider for StaticCredentialsProvider {
    async fn sign_in(&self, strategy: &str, form: &FormSubmission) -> Result<(), SignInError> {
        if strategy != CREDENTIALS_STRATEGY {
            return Err(AuthErrorKind::InvalidProvider.into());
        }

        let credentials = Credentials::from_form(form).ok_or(AuthErrorKind::CredentialsSignin)?;

        let user = self
            .users
            .get(&credentials.email)
            .filter(|user| user.password == credentials.password)
            .ok_or(AuthErrorKind::CredentialsSignin)?;

        self.sessions
            .write()
            .map_err(|e| SignInError::Unrecognized(anyhow::anyhow!("session store poisoned: {}", e)))?
            .insert(credentials.email.clone());

        tracing::info!(email = %credentials.email, name = %user.name, "user signed in");
        Ok(())
    }
}
