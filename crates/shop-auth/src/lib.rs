//! Authentication for the storefront client.
//!
//! The backend issues a bearer token and a user profile on login or
//! registration. Both are kept in the store; a session only counts as
//! valid while both are present and the profile parses.

mod credentials;
mod error;
mod session;
mod user;

pub use credentials::{AuthClient, AuthResponse, LoginRequest, RegisterRequest};
pub use error::AuthError;
pub use session::{Session, SessionReader};
pub use user::{Role, UserProfile};
