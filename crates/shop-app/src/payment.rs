//! Payment: turn the staged order into a backend order.

use crate::api::OrdersApi;
use crate::cart_store::CartStore;
use crate::view::View;
use crate::AppError;
use shop_auth::SessionReader;
use shop_commerce::checkout::{
    NewOrder, Order, PaymentDetails, StagedOrder, StagedOrderError,
};
use shop_store::{keys, Store};
use std::time::Duration;

/// Pause standing in for card processing.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// What the payment view found under `pendingOrder`.
#[derive(Debug, Clone, PartialEq)]
pub enum StagedOrderLoad {
    /// Nothing staged; payment is disabled.
    NoOrder,
    /// Something was staged but could not be used. It has been deleted.
    InvalidOrder(String),
    /// A usable staged order.
    Ready(StagedOrder),
}

impl StagedOrderLoad {
    pub fn order(&self) -> Option<&StagedOrder> {
        match self {
            StagedOrderLoad::Ready(order) => Some(order),
            _ => None,
        }
    }

    /// Whether the payment form should be enabled.
    pub fn can_pay(&self) -> bool {
        self.order().is_some()
    }
}

/// Result of a successful payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    /// The created order, when the backend returned it.
    pub order: Option<Order>,
    /// Where to go next.
    pub next: View,
}

/// Loads the staged order and submits it as an order.
#[derive(Debug, Clone)]
pub struct PaymentSubmitter {
    store: Store,
    sessions: SessionReader,
    orders: OrdersApi,
    processing_delay: Duration,
}

impl PaymentSubmitter {
    pub fn new(store: Store, sessions: SessionReader, orders: OrdersApi) -> Self {
        Self {
            store,
            sessions,
            orders,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }

    /// Override the simulated processing pause.
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    /// Read `pendingOrder`, deleting it if it cannot be used.
    pub fn load(&self) -> Result<StagedOrderLoad, AppError> {
        let raw = self.store.get_raw(keys::PENDING_ORDER)?;
        match StagedOrder::parse(raw.as_deref()) {
            Ok(order) => Ok(StagedOrderLoad::Ready(order)),
            Err(StagedOrderError::Absent) => Ok(StagedOrderLoad::NoOrder),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unusable staged order");
                self.store.delete(keys::PENDING_ORDER)?;
                Ok(StagedOrderLoad::InvalidOrder(e.to_string()))
            }
        }
    }

    /// Pay for the loaded order.
    ///
    /// Checks, in order: an order is loaded, every card field is filled
    /// in, someone is signed in. Nothing is sent if any check fails. On
    /// success the staged order and the cart are cleared; on failure both
    /// are kept so the user can try again.
    pub fn submit(
        &self,
        loaded: &StagedOrderLoad,
        details: &PaymentDetails,
        cart: &mut CartStore,
    ) -> Result<PaymentReceipt, AppError> {
        let staged = loaded.order().ok_or(AppError::NoPendingOrder)?;

        let missing = details.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Please fill in all payment fields (missing: {})",
                missing.join(", ")
            )));
        }

        let session = self.sessions.current()?.ok_or(AppError::LoginRequired)?;

        if !self.processing_delay.is_zero() {
            std::thread::sleep(self.processing_delay);
        }

        let body = NewOrder::from_staged(staged, details.shipping_address());
        let order = self.orders.create(&session.token, &body)?;

        self.store.delete(keys::PENDING_ORDER)?;
        cart.clear()?;
        tracing::info!(
            total = %staged.total,
            order = order.as_ref().map(|o| o.id.as_str()).unwrap_or("-"),
            "payment completed"
        );

        Ok(PaymentReceipt {
            order,
            next: View::Orders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_data::FetchClient;
    use shop_data::mock::MockTransport;
    use shop_store::MemoryStore;

    fn submitter(store: &Store) -> PaymentSubmitter {
        PaymentSubmitter::new(
            store.clone(),
            SessionReader::new(store.clone()),
            OrdersApi::new(FetchClient::new(MockTransport::new())),
        )
        .with_processing_delay(Duration::ZERO)
    }

    fn store_with_pending(raw: &str) -> Store {
        Store::new(MemoryStore::with_entries([(keys::PENDING_ORDER, raw)]))
    }

    #[test]
    fn test_load_absent() {
        let store = Store::new(MemoryStore::new());
        assert_eq!(submitter(&store).load().unwrap(), StagedOrderLoad::NoOrder);

        let store = store_with_pending("undefined");
        let loaded = submitter(&store).load().unwrap();
        assert_eq!(loaded, StagedOrderLoad::NoOrder);
        assert!(!loaded.can_pay());
    }

    #[test]
    fn test_load_missing_total_deletes_key() {
        let store = store_with_pending(r#"{"items": []}"#);
        let loaded = submitter(&store).load().unwrap();
        assert!(matches!(loaded, StagedOrderLoad::InvalidOrder(_)));
        assert!(!store.exists(keys::PENDING_ORDER).unwrap());
    }

    #[test]
    fn test_load_non_numeric_total_deletes_key() {
        let store = store_with_pending(r#"{"items": [], "total": "lots"}"#);
        assert!(!submitter(&store).load().unwrap().can_pay());
        assert!(!store.exists(keys::PENDING_ORDER).unwrap());
    }

    #[test]
    fn test_load_garbage_deletes_key() {
        let store = store_with_pending("{{{");
        assert!(matches!(
            submitter(&store).load().unwrap(),
            StagedOrderLoad::InvalidOrder(_)
        ));
        assert!(!store.exists(keys::PENDING_ORDER).unwrap());
    }

    #[test]
    fn test_submit_without_order() {
        let store = Store::new(MemoryStore::new());
        let mut cart = CartStore::open(store.clone());
        let err = submitter(&store)
            .submit(&StagedOrderLoad::NoOrder, &PaymentDetails::default(), &mut cart)
            .unwrap_err();
        assert!(matches!(err, AppError::NoPendingOrder));
    }

    #[test]
    fn test_submit_blank_fields_lists_them() {
        let store = store_with_pending(r#"{"items": [], "total": 0}"#);
        let payments = submitter(&store);
        let loaded = payments.load().unwrap();
        let mut cart = CartStore::open(store.clone());

        let details = PaymentDetails {
            card_holder: "Ada".to_string(),
            expiry: "12/30".to_string(),
            ..Default::default()
        };
        let err = payments.submit(&loaded, &details, &mut cart).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in all payment fields (missing: card number, CVV)"
        );
        assert!(store.exists(keys::PENDING_ORDER).unwrap());
    }
}
