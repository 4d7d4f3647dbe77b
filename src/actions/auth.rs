//! Sign-in action

use crate::core::auth::{AuthErrorKind, CREDENTIALS_STRATEGY, IdentityProvider, SignInError};
use crate::core::form::FormSubmission;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

/// Sign in with the credentials strategy
///
/// - `Ok(None)`: signed in; the provider owns the session
/// - `Ok(Some(message))`: rejected, show `message` on the form
/// - `Err(e)`: the provider's unrecognized error, returned unchanged
pub async fn authenticate(
    provider: &dyn IdentityProvider,
    _prev_state: Option<&str>,
    form: &FormSubmission,
) -> anyhow::Result<Option<&'static str>> {
    match provider.sign_in(CREDENTIALS_STRATEGY, form).await {
        Ok(()) => Ok(None),
        Err(SignInError::Auth(kind)) => {
            tracing::info!(error_type = %kind, "sign-in rejected");
            Ok(Some(rejection_message(kind)))
        }
        Err(SignInError::Unrecognized(err)) => Err(err),
    }
}

/// Display string for a recognized failure
pub fn rejection_message(kind: AuthErrorKind) -> &'static str {
    match kind {
        AuthErrorKind::CredentialsSignin => INVALID_CREDENTIALS,
        _ => SOMETHING_WENT_WRONG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct Unreachable;

    impl std::fmt::Display for Unreachable {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("identity backend unreachable")
        }
    }

    impl std::error::Error for Unreachable {}

    /// Provider with a fixed answer
    enum Scripted {
        Accept,
        Reject(AuthErrorKind),
        Crash,
    }

    #[async_trait]
    impl IdentityProvider for Scripted {
        async fn sign_in(&self, strategy: &str, _form: &FormSubmission) -> Result<(), SignInError> {
            assert_eq!(strategy, CREDENTIALS_STRATEGY);
            match self {
                Scripted::Accept => Ok(()),
                Scripted::Reject(kind) => Err(SignInError::Auth(*kind)),
                Scripted::Crash => Err(SignInError::Unrecognized(Unreachable.into())),
            }
        }
    }

    #[tokio::test]
    async fn test_success_returns_nothing() {
        let result = authenticate(&Scripted::Accept, None, &FormSubmission::new()).await;
        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn test_credentials_signin_maps_to_invalid_credentials() {
        let provider = Scripted::Reject(AuthErrorKind::CredentialsSignin);
        let result = authenticate(&provider, None, &FormSubmission::new()).await;
        assert_eq!(result.unwrap(), Some("Invalid credentials."));
    }

    #[tokio::test]
    async fn test_other_kinds_map_to_something_went_wrong() {
        for kind in [
            AuthErrorKind::CallbackRouteError,
            AuthErrorKind::AccessDenied,
            AuthErrorKind::Configuration,
            AuthErrorKind::InvalidProvider,
            AuthErrorKind::MissingCsrf,
        ] {
            let result = authenticate(&Scripted::Reject(kind), Some("previous"), &FormSubmission::new())
                .await;
            assert_eq!(result.unwrap(), Some("Something went wrong."), "{kind}");
        }
    }

    #[tokio::test]
    async fn test_unrecognized_error_propagates_unchanged() {
        let err = authenticate(&Scripted::Crash, None, &FormSubmission::new())
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<Unreachable>().is_some());
        assert_eq!(err.to_string(), "identity backend unreachable");
    }
}
