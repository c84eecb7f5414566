//! Stored session.

use crate::user::{Role, UserProfile};
use crate::AuthError;
use shop_store::{keys, Store};

/// A bearer token plus the profile it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token sent with authenticated requests.
    pub token: String,
    /// The signed-in user.
    pub user: UserProfile,
}

impl Session {
    /// Create a new session.
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Check if the session belongs to an administrator.
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    /// Require at least the given role.
    pub fn require_role(&self, role: Role) -> Result<(), AuthError> {
        if self.user.role.has_permission(role) {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions)
        }
    }
}

/// Reads and writes the session kept under the `token` and `user` keys.
///
/// A session is valid only when both keys are present and the profile
/// parses. A profile that fails to parse invalidates both keys; a profile
/// left without a token is removed.
#[derive(Debug, Clone)]
pub struct SessionReader {
    store: Store,
}

impl SessionReader {
    /// Create a reader over a store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The stored token, if any. Blank tokens count as absent.
    pub fn token(&self) -> Result<Option<String>, AuthError> {
        Ok(self
            .store
            .get_raw(keys::TOKEN)?
            .filter(|t| !t.trim().is_empty()))
    }

    /// Read the current session.
    pub fn current(&self) -> Result<Option<Session>, AuthError> {
        let token = self.token()?;
        let user = self.store.get_raw(keys::USER)?;

        match (token, user) {
            (Some(token), Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => Ok(Some(Session { token, user })),
                Err(e) => {
                    tracing::warn!(error = %e, "stored user profile is unreadable, clearing session");
                    self.clear()?;
                    Ok(None)
                }
            },
            (None, Some(_)) => {
                tracing::debug!("user profile without token, removing");
                self.store.delete(keys::USER)?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Read the current session, failing if there is none.
    pub fn require(&self) -> Result<Session, AuthError> {
        self.current()?.ok_or(AuthError::SessionNotFound)
    }

    /// Read the current session, failing unless it is an administrator's.
    pub fn require_admin(&self) -> Result<Session, AuthError> {
        let session = self.require()?;
        session.require_role(Role::Admin)?;
        Ok(session)
    }

    /// Persist a session.
    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        self.store.set_raw(keys::TOKEN, &session.token)?;
        self.store.set_json(keys::USER, &session.user)?;
        Ok(())
    }

    /// Drop the token only, keeping the profile for display.
    ///
    /// Used when the backend rejects the token; the next [`current`] call
    /// then removes the orphaned profile.
    ///
    /// [`current`]: SessionReader::current
    pub fn invalidate_token(&self) -> Result<(), AuthError> {
        self.store.delete(keys::TOKEN)?;
        Ok(())
    }

    /// Remove token and profile.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.store.delete_all([keys::TOKEN, keys::USER])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_store::MemoryStore;

    fn reader_with(entries: &[(&str, &str)]) -> (SessionReader, Store) {
        let store = Store::new(MemoryStore::with_entries(entries.iter().copied()));
        (SessionReader::new(store.clone()), store)
    }

    const ADA: &str = r#"{"name": "Ada", "email": "ada@example.com", "role": "admin"}"#;

    #[test]
    fn test_valid_session() {
        let (reader, _) = reader_with(&[(keys::TOKEN, "tok"), (keys::USER, ADA)]);
        let session = reader.current().unwrap().unwrap();
        assert_eq!(session.token, "tok");
        assert!(session.is_admin());
    }

    #[test]
    fn test_missing_user_is_anonymous() {
        let (reader, store) = reader_with(&[(keys::TOKEN, "tok")]);
        assert!(reader.current().unwrap().is_none());
        // token is left alone
        assert!(store.exists(keys::TOKEN).unwrap());
    }

    #[test]
    fn test_missing_token_removes_user() {
        let (reader, store) = reader_with(&[(keys::USER, ADA)]);
        assert!(reader.current().unwrap().is_none());
        assert!(!store.exists(keys::USER).unwrap());
    }

    #[test]
    fn test_blank_token_is_absent() {
        let (reader, _) = reader_with(&[(keys::TOKEN, "  "), (keys::USER, ADA)]);
        assert!(reader.current().unwrap().is_none());
        assert!(reader.token().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_user_clears_both() {
        let (reader, store) = reader_with(&[(keys::TOKEN, "tok"), (keys::USER, "{oops")]);
        assert!(reader.current().unwrap().is_none());
        assert!(!store.exists(keys::TOKEN).unwrap());
        assert!(!store.exists(keys::USER).unwrap());
    }

    #[test]
    fn test_require() {
        let (reader, _) = reader_with(&[]);
        assert!(matches!(reader.require(), Err(AuthError::SessionNotFound)));
    }

    #[test]
    fn test_require_admin() {
        let customer = r#"{"name": "Bob", "email": "bob@example.com", "role": "user"}"#;
        let (reader, _) = reader_with(&[(keys::TOKEN, "tok"), (keys::USER, customer)]);
        assert!(matches!(
            reader.require_admin(),
            Err(AuthError::InsufficientPermissions)
        ));

        let (reader, _) = reader_with(&[(keys::TOKEN, "tok"), (keys::USER, ADA)]);
        assert!(reader.require_admin().is_ok());
    }

    #[test]
    fn test_save_then_clear() {
        let (reader, store) = reader_with(&[]);
        let session = Session::new("tok", UserProfile::new("Bob", "bob@example.com", Role::Customer));
        reader.save(&session).unwrap();
        assert_eq!(reader.current().unwrap(), Some(session));

        reader.clear().unwrap();
        assert!(!store.exists(keys::TOKEN).unwrap());
        assert!(!store.exists(keys::USER).unwrap());
    }
}
