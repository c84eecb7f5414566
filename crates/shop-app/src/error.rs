//! Application error taxonomy.

use crate::view::View;
use shop_auth::AuthError;
use shop_commerce::CommerceError;
use shop_data::FetchError;
use shop_store::StoreError;
use thiserror::Error;

/// Errors surfaced to the front end.
///
/// All of them are recoverable; nothing is retried automatically.
#[derive(Error, Debug)]
pub enum AppError {
    /// No response from the backend.
    #[error("{0}. Please check your connection.")]
    Network(String),

    /// The backend answered with a non-success status. `message` is the
    /// server's own message, or the status text.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The backend answered 2xx with a body we could not read.
    #[error("unexpected response from server: {0}")]
    UnexpectedResponse(String),

    /// Persisted data was malformed and has been removed.
    #[error("stored data was invalid and has been cleared: {0}")]
    CorruptState(String),

    /// A form or argument failed validation. Nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// Checkout was attempted with an empty cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The action needs a signed-in user.
    #[error("Please login to continue")]
    LoginRequired,

    /// The signed-in user lacks the role for this action.
    #[error("You do not have permission to do that")]
    PermissionDenied,

    /// Payment was attempted without a usable staged order.
    #[error("Cannot proceed with payment: order details are missing")]
    NoPendingOrder,

    /// The staged order read back differently from what was written.
    #[error("Could not save your order for payment, please try again")]
    StagingVerificationFailed,

    /// Login or registration was refused.
    #[error("{0}")]
    InvalidCredentials(String),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// Where the front end should send the user after this error, if
    /// anywhere.
    pub fn redirect(&self) -> Option<View> {
        match self {
            AppError::LoginRequired => Some(View::Login),
            _ => None,
        }
    }

    /// Status code of a server rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status, message } => AppError::Server { status, message },
            FetchError::RequestError(m) | FetchError::InvalidUrl(m) => AppError::Network(m),
            FetchError::Timeout => AppError::Network("Request timed out".to_string()),
            FetchError::ParseError(m) | FetchError::JsonError(m) => AppError::UnexpectedResponse(m),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::SessionNotFound | AuthError::SessionExpired => AppError::LoginRequired,
            AuthError::InsufficientPermissions => AppError::PermissionDenied,
            AuthError::InvalidCredentials(m) => AppError::InvalidCredentials(m),
            AuthError::MissingField(field) => AppError::Validation(format!("{} is required", field)),
            AuthError::Store(e) => AppError::Store(e),
            AuthError::Fetch(e) => e.into(),
            AuthError::UnexpectedResponse(m) => AppError::UnexpectedResponse(m),
        }
    }
}

impl From<CommerceError> for AppError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::EmptyCart => AppError::EmptyCart,
            other => AppError::Validation(other.to_string()),
        }
    }
}
