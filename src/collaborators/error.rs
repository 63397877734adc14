//! Error types for the external collaborators.

use thiserror::Error;

/// Errors returned by an [`AuthStore`](super::AuthStore).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// The session could not be ended; the user may still be signed in.
    #[error("Logout failed: {0}")]
    LogoutFailed(String),

    /// The authentication backend could not be reached.
    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

impl From<String> for AuthError {
    fn from(msg: String) -> Self {
        AuthError::Unavailable(msg)
    }
}

/// Errors returned by a [`SubscriptionService`](super::SubscriptionService).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubscriptionError {
    /// The service refused the address.
    #[error("Subscription rejected: {0}")]
    Rejected(String),

    /// The service could not be reached.
    #[error("Subscription service unavailable: {0}")]
    Unavailable(String),
}

impl From<String> for SubscriptionError {
    fn from(msg: String) -> Self {
        SubscriptionError::Unavailable(msg)
    }
}
