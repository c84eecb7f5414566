//! Key-value persistence for the storefront client.
//!
//! Everything the client remembers between runs lives under four keys:
//! the auth token, the user profile, the cart snapshot and the staged
//! order. Values are whole JSON documents; a write replaces the previous
//! value entirely.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_store::{keys, MemoryStore, Store};
//!
//! let store = Store::new(MemoryStore::new());
//!
//! // Store a value
//! store.set_json(keys::CART, &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = store.get_json(keys::CART)?;
//!
//! // Delete a value
//! store.delete(keys::CART)?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::{KeyValueStore, Store};
pub use memory::MemoryStore;

/// Storage keys used by the client.
pub mod keys {
    /// Bearer token of the signed-in user.
    pub const TOKEN: &str = "token";
    /// Profile of the signed-in user.
    pub const USER: &str = "user";
    /// Cart line snapshot.
    pub const CART: &str = "cart";
    /// Order staged between checkout and payment.
    pub const PENDING_ORDER: &str = "pendingOrder";

    /// Every key the client writes.
    pub const ALL: [&str; 4] = [TOKEN, USER, CART, PENDING_ORDER];
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{keys, FileStore, KeyValueStore, MemoryStore, Store, StoreError};
}
