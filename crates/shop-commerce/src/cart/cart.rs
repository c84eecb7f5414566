//! Cart and cart line types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Lines are kept in insertion order and there is at most one line per
/// product id. Serializes as the bare line array, which is the snapshot
/// format kept under the `cart` storage key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from a line snapshot.
    ///
    /// Lines sharing a product id are merged and lines with a non-positive
    /// quantity are dropped, so a hand-edited snapshot still yields a valid
    /// cart.
    pub fn from_lines(snapshot: Vec<CartLine>) -> Self {
        let mut lines: Vec<CartLine> = Vec::with_capacity(snapshot.len());
        for line in snapshot.into_iter().filter(|l| l.quantity > 0) {
            match lines.iter_mut().find(|l| l.product.id == line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => lines.push(line),
            }
        }
        Self { lines }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line or appends a new one with quantity 1.
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> Result<i64, CommerceError> {
        if !product.can_add_to_cart() {
            return Err(CommerceError::OutOfStock(product.id.clone()));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(1)
                .ok_or(CommerceError::Overflow)?;
            return Ok(existing.quantity);
        }

        self.lines.push(CartLine::new(product.clone(), 1)?);
        Ok(1)
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product.id != product_id);
        self.lines.len() < len_before
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Unknown products are a
    /// no-op. Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        match self.lines.iter_mut().find(|l| &l.product.id == product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total item count (sum of quantities).
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of `unit price * quantity` across all lines.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.lines
            .iter()
            .try_fold(Money::zero(), |acc, line| {
                acc.try_add(&line.line_total()?).ok_or(CommerceError::Overflow)
            })
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// Consume the cart, returning its lines.
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Cart::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

/// A product snapshot plus a positive quantity.
///
/// Serialized flat: the product's own fields with `quantity` alongside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product as it was when added.
    #[serde(flatten)]
    pub product: Product,
    /// Units of this product.
    pub quantity: i64,
}

impl CartLine {
    /// Create a new line. Quantity must be positive.
    pub fn new(product: Product, quantity: i64) -> Result<Self, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        Ok(Self { product, quantity })
    }

    /// Unit price captured in the snapshot.
    pub fn unit_price(&self) -> Money {
        self.product.price
    }

    /// `unit price * quantity`.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::new(cents), 5)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&product("a", 1000)).unwrap(), 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        let p = product("a", 1000);
        cart.add(&p).unwrap();
        assert_eq!(cart.add(&p).unwrap(), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_add_out_of_stock_rejected() {
        let mut cart = Cart::new();
        let mut p = product("a", 1000);
        p.stock = 0;
        assert_eq!(cart.add(&p), Err(CommerceError::OutOfStock(p.id.clone())));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000)).unwrap();
        assert!(cart.remove(&ProductId::new("a")));
        assert!(cart.is_empty());
        assert!(!cart.remove(&ProductId::new("a")));
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000)).unwrap();
        assert!(cart.set_quantity(&ProductId::new("a"), 5));
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000)).unwrap();
        assert!(cart.set_quantity(&ProductId::new("a"), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000)).unwrap();
        let before = cart.clone();
        assert!(!cart.set_quantity(&ProductId::new("zzz"), 3));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_price() {
        let mut cart = Cart::new();
        let a = product("a", 1000);
        cart.add(&a).unwrap();
        cart.add(&a).unwrap();
        cart.add(&product("b", 550)).unwrap();

        let total = cart.total_price().unwrap();
        assert_eq!(total.amount_cents, 2550);
        assert_eq!(total.display(), "$25.50");
    }

    #[test]
    fn test_snapshot_is_flat_line_array() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000)).unwrap();

        let json: serde_json::Value = serde_json::to_value(&cart).unwrap();
        let line = &json.as_array().unwrap()[0];
        assert_eq!(line["_id"], "a");
        assert_eq!(line["quantity"], 1);
        assert_eq!(line["price"], 10.0);

        let reloaded: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(reloaded, cart);
    }

    #[test]
    fn test_from_lines_merges_duplicates() {
        let lines = vec![
            CartLine { product: product("a", 100), quantity: 1 },
            CartLine { product: product("b", 100), quantity: 0 },
            CartLine { product: product("a", 100), quantity: 2 },
        ];
        let cart = Cart::from_lines(lines);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_mixed_operations_keep_ids_unique() {
        let mut cart = Cart::new();
        let ids = ["a", "b", "c"];
        for step in 0..60_i64 {
            let id = ids[(step % 3) as usize];
            match step % 5 {
                0 | 1 => {
                    cart.add(&product(id, 100)).unwrap();
                }
                2 => {
                    cart.set_quantity(&ProductId::new(id), step % 4);
                }
                3 => {
                    cart.remove(&ProductId::new(id));
                }
                _ => {
                    cart.set_quantity(&ProductId::new(id), -1);
                }
            }

            let mut seen: Vec<&ProductId> = cart.lines().iter().map(|l| &l.product.id).collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), cart.len());
            assert_eq!(
                cart.total_items(),
                cart.lines().iter().map(|l| l.quantity).sum::<i64>()
            );
            assert!(cart.lines().iter().all(|l| l.quantity > 0));
        }
    }
}
