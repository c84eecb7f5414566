//! Checkout: stage the cart for payment.

use crate::cart_store::CartStore;
use crate::view::View;
use crate::AppError;
use shop_auth::SessionReader;
use shop_commerce::checkout::StagedOrder;
use shop_store::{keys, Store};

/// Turns the cart into a staged order under the `pendingOrder` key.
#[derive(Debug, Clone)]
pub struct CheckoutCoordinator {
    store: Store,
    sessions: SessionReader,
}

impl CheckoutCoordinator {
    pub fn new(store: Store, sessions: SessionReader) -> Self {
        Self { store, sessions }
    }

    /// Stage the cart and return the view to go to next.
    ///
    /// Fails without writing anything when the cart is empty or nobody is
    /// signed in. The staged order is read back after writing and must
    /// match byte for byte.
    pub fn checkout(&self, cart: &CartStore) -> Result<View, AppError> {
        if cart.is_empty() {
            return Err(AppError::EmptyCart);
        }
        if self.sessions.current()?.is_none() {
            return Err(AppError::LoginRequired);
        }

        let staged = StagedOrder::from_cart(cart.cart())?;
        let json = staged.to_json()?;
        if StagedOrder::parse(Some(&json)).is_err() {
            return Err(AppError::Validation("order data is invalid".to_string()));
        }

        self.store.set_raw(keys::PENDING_ORDER, &json)?;
        let read_back = self.store.get_raw(keys::PENDING_ORDER)?;
        if read_back.as_deref() != Some(json.as_str()) {
            tracing::warn!("staged order read back differently, discarding");
            self.store.delete(keys::PENDING_ORDER)?;
            return Err(AppError::StagingVerificationFailed);
        }

        tracing::info!(
            items = staged.item_count(),
            total = %staged.total,
            "order staged for payment"
        );
        Ok(View::Payment)
    }
}
