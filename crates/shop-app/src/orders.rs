//! Order history of the signed-in user.

use crate::api::OrdersApi;
use crate::remote::{Remote, Tracked};
use crate::AppError;
use shop_auth::SessionReader;
use shop_commerce::checkout::Order;

const LOGIN_MESSAGE: &str = "Please login to view your orders";

#[derive(Debug)]
pub struct OrderHistory {
    api: OrdersApi,
    sessions: SessionReader,
    orders: Tracked<Vec<Order>>,
}

impl OrderHistory {
    pub fn new(api: OrdersApi, sessions: SessionReader) -> Self {
        Self {
            api,
            sessions,
            orders: Tracked::new(),
        }
    }

    /// Fetch the user's orders.
    ///
    /// Only the token is needed. Without one nothing is sent; if the
    /// backend rejects it with 401, the token is dropped.
    pub fn refresh(&mut self) -> Result<&[Order], AppError> {
        let ticket = self.orders.begin();

        let Some(token) = self.sessions.token()? else {
            self.orders.fail(ticket, LOGIN_MESSAGE);
            return Err(AppError::LoginRequired);
        };

        match self.api.mine(&token) {
            Ok(orders) => {
                self.orders.resolve(ticket, Ok(orders));
                Ok(self.orders())
            }
            Err(AppError::Server { status: 401, .. }) => {
                tracing::warn!("token rejected, clearing it");
                self.sessions.invalidate_token()?;
                self.orders.fail(ticket, LOGIN_MESSAGE);
                Err(AppError::LoginRequired)
            }
            Err(e) => {
                self.orders.fail(ticket, format!("Failed to fetch orders: {}", e));
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &Remote<Vec<Order>> {
        self.orders.state()
    }

    /// The loaded orders; empty until loaded.
    pub fn orders(&self) -> &[Order] {
        self.orders.value().map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shop_data::mock::MockTransport;
    use shop_data::{FetchClient, Method};
    use shop_store::{keys, MemoryStore, Store};

    fn history(store: &Store, mock: &MockTransport) -> OrderHistory {
        OrderHistory::new(
            OrdersApi::new(FetchClient::new(mock.clone())),
            SessionReader::new(store.clone()),
        )
    }

    #[test]
    fn test_no_token_sends_nothing() {
        let store = Store::new(MemoryStore::new());
        let mock = MockTransport::new();
        let mut orders = history(&store, &mock);

        assert!(matches!(orders.refresh(), Err(AppError::LoginRequired)));
        assert_eq!(orders.state().error(), Some(LOGIN_MESSAGE));
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_loads_orders() {
        let store = Store::new(MemoryStore::with_entries([(keys::TOKEN, "tok")]));
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/api/orders/myorders",
            200,
            json!([{"_id": "o1", "orderItems": [], "totalPrice": 5, "orderStatus": "pending"}]),
        );
        let mut orders = history(&store, &mock);

        assert_eq!(orders.refresh().unwrap().len(), 1);
        assert_eq!(
            mock.last_request().unwrap().header_value("Authorization"),
            Some("Bearer tok")
        );
    }

    #[test]
    fn test_unauthorized_clears_token() {
        let store = Store::new(MemoryStore::with_entries([(keys::TOKEN, "stale")]));
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/orders/myorders", 401, json!({"message": "Not authorized"}));
        let mut orders = history(&store, &mock);

        assert!(matches!(orders.refresh(), Err(AppError::LoginRequired)));
        assert!(!store.exists(keys::TOKEN).unwrap());
    }

    #[test]
    fn test_other_errors_keep_token() {
        let store = Store::new(MemoryStore::with_entries([(keys::TOKEN, "tok")]));
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/orders/myorders", 500, json!({}));
        let mut orders = history(&store, &mock);

        let err = orders.refresh().unwrap_err();
        assert_eq!(err.to_string(), "Internal Server Error");
        assert_eq!(
            orders.state().error(),
            Some("Failed to fetch orders: Internal Server Error")
        );
        assert!(store.exists(keys::TOKEN).unwrap());
    }
}
