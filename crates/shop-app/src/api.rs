//! Typed wrappers over the product and order endpoints.

use crate::admin::ProductInput;
use crate::AppError;
use shop_commerce::checkout::{NewOrder, Order};
use shop_commerce::catalog::Product;
use shop_commerce::ProductId;
use shop_data::FetchClient;

const PRODUCTS_PATH: &str = "/api/products";
const ORDERS_PATH: &str = "/api/orders";
const MY_ORDERS_PATH: &str = "/api/orders/myorders";

/// The product resource.
#[derive(Debug, Clone)]
pub struct ProductsApi {
    client: FetchClient,
}

impl ProductsApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// `GET /api/products`, bypassing caches. The list may come wrapped in
    /// a `data` envelope.
    pub fn list(&self) -> Result<Vec<Product>, AppError> {
        let products = self
            .client
            .get(PRODUCTS_PATH)
            .no_cache()
            .send()?
            .error_for_status()?
            .json_data()?;
        Ok(products)
    }

    /// `POST /api/products`.
    pub fn create(&self, token: &str, input: &ProductInput) -> Result<(), AppError> {
        self.client
            .post(PRODUCTS_PATH)
            .bearer_auth(token)
            .json(input)?
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `PUT /api/products/{id}`.
    pub fn update(&self, token: &str, id: &ProductId, input: &ProductInput) -> Result<(), AppError> {
        self.client
            .put(product_path(id))
            .bearer_auth(token)
            .json(input)?
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `DELETE /api/products/{id}`.
    pub fn delete(&self, token: &str, id: &ProductId) -> Result<(), AppError> {
        self.client
            .delete(product_path(id))
            .bearer_auth(token)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

fn product_path(id: &ProductId) -> String {
    format!("{}/{}", PRODUCTS_PATH, id)
}

/// The order resource.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: FetchClient,
}

impl OrdersApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// `GET /api/orders/myorders`.
    pub fn mine(&self, token: &str) -> Result<Vec<Order>, AppError> {
        let orders = self
            .client
            .get(MY_ORDERS_PATH)
            .bearer_auth(token)
            .send()?
            .error_for_status()?
            .json_data()?;
        Ok(orders)
    }

    /// `POST /api/orders`. Returns the created order when the backend
    /// echoes one back.
    pub fn create(&self, token: &str, order: &NewOrder) -> Result<Option<Order>, AppError> {
        let response = self
            .client
            .post(ORDERS_PATH)
            .bearer_auth(token)
            .json(order)?
            .send()?
            .error_for_status()?;
        Ok(response.json_data().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shop_data::mock::MockTransport;
    use shop_data::Method;

    #[test]
    fn test_list_sends_no_cache() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            PRODUCTS_PATH,
            200,
            json!([{"_id": "p1", "name": "Honey", "price": 10, "stock": 3}]),
        );
        let api = ProductsApi::new(FetchClient::new(mock.clone()));

        let products = api.list().unwrap();
        assert_eq!(products[0].name, "Honey");
        assert_eq!(
            mock.last_request().unwrap().header_value("Cache-Control"),
            Some("no-cache")
        );
    }

    #[test]
    fn test_list_accepts_data_envelope() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            PRODUCTS_PATH,
            200,
            json!({"data": [{"_id": "p1", "name": "Honey", "price": "10.50"}]}),
        );
        let api = ProductsApi::new(FetchClient::new(mock));
        assert_eq!(api.list().unwrap()[0].price.amount_cents, 1050);
    }

    #[test]
    fn test_delete_path_and_auth() {
        let mock = MockTransport::new();
        mock.respond(Method::Delete, "/api/products/p1", 200, json!({}));
        let api = ProductsApi::new(FetchClient::new(mock.clone()));

        api.delete("tok", &ProductId::new("p1")).unwrap();
        let req = mock.last_request().unwrap();
        assert_eq!(req.header_value("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_mine_server_error() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, MY_ORDERS_PATH, 500, json!({"message": "db down"}));
        let api = OrdersApi::new(FetchClient::new(mock));

        let err = api.mine("tok").unwrap_err();
        assert!(matches!(err, AppError::Server { status: 500, ref message } if message == "db down"));
    }
}
