//! Cart and checkout failures.

use crate::ids::ProductId;
use thiserror::Error;

/// Why a cart or staging operation was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product has no stock left.
    #[error("Product is out of stock: {0}")]
    OutOfStock(ProductId),

    /// Cart has no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// The staged order could not be encoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
