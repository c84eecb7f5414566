//! Backend identifiers.
//!
//! The backend assigns every identifier, so these are opaque strings on the
//! client. Keeping them as distinct types stops a `ProductId` being passed
//! where an `OrderId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident) => {
        /// A backend-assigned identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(UserId);

impl OrderId {
    /// Length of the short reference shown in order listings.
    pub const SHORT_REF_LEN: usize = 8;

    /// The last eight characters of the id, e.g. `#a1b2c3d4`.
    pub fn short_ref(&self) -> &str {
        let chars = self.0.chars().count();
        if chars <= Self::SHORT_REF_LEN {
            return &self.0;
        }
        let start = self
            .0
            .char_indices()
            .nth(chars - Self::SHORT_REF_LEN)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.0[start..]
    }
}
