//! User types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shop_commerce::ids::UserId;
use std::str::FromStr;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Regular customer.
    #[default]
    Customer,
    /// Store administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "user",
            Role::Admin => "admin",
        }
    }

    /// Check if this role has at least the given permission level.
    pub fn has_permission(&self, required: Role) -> bool {
        self.level() >= required.level()
    }

    /// Get permission level (higher = more permissions).
    pub fn level(&self) -> u8 {
        match self {
            Role::Customer => 0,
            Role::Admin => 1,
        }
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    /// Only the exact string `admin` grants admin; anything else is a
    /// customer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "admin" => Role::Admin,
            _ => Role::Customer,
        })
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.map(|s| Role::from_str(&s).unwrap_or_default())
            .unwrap_or_default())
    }
}

/// Profile of the signed-in user, as returned by the auth endpoints and
/// kept under the `user` storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Backend identifier, when the backend sends one.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    pub email: String,
    /// Authorization role.
    #[serde(default)]
    pub role: Role,
}

impl UserProfile {
    /// Create a profile.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Check if the user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Get display name, falling back to the email.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}
