//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The backend rejected the credentials. Carries its message.
    #[error("{0}")]
    InvalidCredentials(String),

    /// No valid session is stored.
    #[error("please log in first")]
    SessionNotFound,

    /// The backend no longer accepts the stored token.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// Insufficient permissions.
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// A required form field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] shop_store::StoreError),

    /// Request error.
    #[error(transparent)]
    Fetch(#[from] shop_data::FetchError),

    /// The backend answered with something other than a token and user.
    #[error("unexpected auth response: {0}")]
    UnexpectedResponse(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials(_) | AuthError::SessionNotFound | AuthError::SessionExpired
        )
    }

    /// Check if this is a permission error.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, AuthError::InsufficientPermissions)
    }
}
