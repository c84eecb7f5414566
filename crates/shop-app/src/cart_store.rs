//! The active cart, mirrored to storage on every change.

use crate::AppError;
use shop_commerce::cart::{Cart, CartLine};
use shop_commerce::catalog::Product;
use shop_commerce::{Money, ProductId};
use shop_store::{keys, Store};

/// Owns the cart and keeps the `cart` key in step with it.
///
/// Hydrates once on [`open`](CartStore::open); from then on every mutation
/// writes the full snapshot back before returning.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    store: Store,
}

impl CartStore {
    /// Load the cart from storage.
    ///
    /// A missing or unreadable snapshot yields an empty cart. An unreadable
    /// one is left in place and overwritten by the next mutation.
    pub fn open(store: Store) -> Self {
        let cart = match store.get_json::<Cart>(keys::CART) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "stored cart is unreadable, starting empty");
                Cart::new()
            }
        };
        tracing::debug!(lines = cart.len(), "cart hydrated");
        Self { cart, store }
    }

    /// Add one unit of a product. Out-of-stock products are refused
    /// without touching the cart.
    pub fn add(&mut self, product: &Product) -> Result<i64, AppError> {
        let quantity = self.cart.add(product)?;
        self.persist()?;
        Ok(quantity)
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<bool, AppError> {
        let removed = self.cart.remove(product_id);
        self.persist()?;
        Ok(removed)
    }

    /// Set a line's quantity; zero or less removes it, unknown ids are
    /// ignored. Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Result<bool, AppError> {
        let changed = self.cart.set_quantity(product_id, quantity);
        self.persist()?;
        Ok(changed)
    }

    /// Empty the cart and delete the snapshot.
    pub fn clear(&mut self) -> Result<(), AppError> {
        self.cart.clear();
        self.store.delete(keys::CART)?;
        Ok(())
    }

    pub fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> Result<Money, AppError> {
        Ok(self.cart.total_price()?)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn persist(&self) -> Result<(), AppError> {
        self.store.set_json(keys::CART, &self.cart)?;
        Ok(())
    }
}
