//! Login, registration and logout.

use crate::session::{Session, SessionReader};
use crate::user::UserProfile;
use crate::AuthError;
use serde::{Deserialize, Serialize};
use shop_data::FetchClient;

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn validate(&self) -> Result<(), AuthError> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), AuthError> {
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("name", &self.name)?;
        require("address", &self.address)?;
        require("city", &self.city)?;
        require("postal code", &self.postal_code)?;
        require("country", &self.country)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(())
    }
}

/// What the auth endpoints answer, after any `data` envelope is removed.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl AuthResponse {
    /// Turn the answer into a session, if it is a successful one.
    pub fn into_session(self) -> Result<Session, AuthError> {
        if self.success == Some(false) {
            return Err(AuthError::InvalidCredentials(
                self.message.unwrap_or_else(|| "Invalid credentials".to_string()),
            ));
        }
        match (self.token.filter(|t| !t.trim().is_empty()), self.user) {
            (Some(token), Some(user)) => Ok(Session::new(token, user)),
            (None, _) => Err(AuthError::UnexpectedResponse("missing token".to_string())),
            (_, None) => Err(AuthError::UnexpectedResponse("missing user".to_string())),
        }
    }
}

/// Talks to the auth endpoints and keeps the resulting session.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: FetchClient,
    sessions: SessionReader,
}

impl AuthClient {
    pub fn new(client: FetchClient, sessions: SessionReader) -> Self {
        Self { client, sessions }
    }

    /// Log in and store the session.
    pub fn login(&self, request: &LoginRequest) -> Result<Session, AuthError> {
        request.validate()?;
        let session = self.submit(LOGIN_PATH, request)?;
        tracing::info!(email = %session.user.email, "logged in");
        Ok(session)
    }

    /// Register a new account and store the session.
    pub fn register(&self, request: &RegisterRequest) -> Result<Session, AuthError> {
        request.validate()?;
        let session = self.submit(REGISTER_PATH, request)?;
        tracing::info!(email = %session.user.email, "registered");
        Ok(session)
    }

    /// Remove the stored session.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// The session reader this client writes to.
    pub fn sessions(&self) -> &SessionReader {
        &self.sessions
    }

    fn submit<T: Serialize>(&self, path: &str, body: &T) -> Result<Session, AuthError> {
        let response = self.client.post(path).json(body)?.send()?;

        if response.is_client_error() {
            let message = response
                .server_message()
                .unwrap_or_else(|| response.status_text().to_string());
            return Err(AuthError::InvalidCredentials(message));
        }

        let answer: AuthResponse = response.error_for_status()?.json_data()?;
        let session = answer.into_session()?;
        self.sessions.save(&session)?;
        Ok(session)
    }
}
