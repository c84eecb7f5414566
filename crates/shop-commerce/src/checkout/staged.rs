//! Staged order: the cart snapshot held between checkout and payment.

use crate::cart::{Cart, CartLine};
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A cart snapshot plus its total, written at checkout and consumed by the
/// payment step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StagedOrder {
    /// Lines as they were at checkout.
    pub items: Vec<CartLine>,
    /// Total at checkout.
    pub total: Money,
}

/// Why a stored staged order could not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StagedOrderError {
    /// Nothing is staged.
    #[error("no staged order")]
    Absent,

    /// The stored value is not JSON.
    #[error("staged order is not valid JSON: {0}")]
    Unparsable(String),

    /// The stored value parsed but has the wrong shape.
    #[error("staged order is malformed: {0}")]
    Invalid(String),
}

impl StagedOrder {
    /// Stage the current cart contents.
    pub fn from_cart(cart: &Cart) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(Self {
            items: cart.lines().to_vec(),
            total: cart.total_price()?,
        })
    }

    /// Serialize to the stored representation.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored staged order, checking its shape before trusting it.
    ///
    /// `None`, and the literal strings `null` and `undefined`, count as
    /// absent. Otherwise the value must be an object with an `items` array
    /// of positive-quantity lines and a numeric `total`.
    pub fn parse(raw: Option<&str>) -> Result<Self, StagedOrderError> {
        let raw = match raw.map(str::trim) {
            None | Some("") | Some("null") | Some("undefined") => {
                return Err(StagedOrderError::Absent)
            }
            Some(raw) => raw,
        };

        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| StagedOrderError::Unparsable(e.to_string()))?;

        let object = value
            .as_object()
            .ok_or_else(|| StagedOrderError::Invalid("expected an object".to_string()))?;

        let items = object
            .get("items")
            .filter(|v| v.is_array())
            .ok_or_else(|| StagedOrderError::Invalid("missing items list".to_string()))?;

        let total = object
            .get("total")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| StagedOrderError::Invalid("missing numeric total".to_string()))?;

        let total = Money::from_decimal(total)
            .ok_or_else(|| StagedOrderError::Invalid("total out of range".to_string()))?;

        let items: Vec<CartLine> = serde_json::from_value(items.clone())
            .map_err(|e| StagedOrderError::Invalid(format!("bad item: {}", e)))?;

        if let Some(line) = items.iter().find(|l| l.quantity <= 0) {
            return Err(StagedOrderError::Invalid(format!(
                "item {} has quantity {}",
                line.product.id, line.quantity
            )));
        }

        Ok(Self { items, total })
    }

    /// Total item count across lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }
}
