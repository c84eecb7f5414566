//! Product listing.

use crate::api::ProductsApi;
use crate::remote::{Remote, Tracked};
use crate::AppError;
use shop_commerce::catalog::Product;
use shop_commerce::ProductId;

/// The storefront's view of the product list.
#[derive(Debug)]
pub struct Catalog {
    api: ProductsApi,
    products: Tracked<Vec<Product>>,
}

impl Catalog {
    pub fn new(api: ProductsApi) -> Self {
        Self {
            api,
            products: Tracked::new(),
        }
    }

    /// Fetch the list again. The previous list is dropped while loading.
    pub fn refresh(&mut self) -> Result<&[Product], AppError> {
        let ticket = self.products.begin();
        match self.api.list() {
            Ok(list) => {
                tracing::debug!(count = list.len(), "catalog loaded");
                self.products.resolve(ticket, Ok(list));
                Ok(self.products())
            }
            Err(e) => {
                self.products.fail(ticket, format!("Failed to fetch products: {}", e));
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &Remote<Vec<Product>> {
        self.products.state()
    }

    /// The loaded products; empty until the first successful refresh.
    pub fn products(&self) -> &[Product] {
        self.products.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|p| &p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shop_data::mock::MockTransport;
    use shop_data::{FetchClient, FetchError, Method};

    #[test]
    fn test_refresh_and_find() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/api/products",
            200,
            json!([{"_id": "p1", "name": "Honey", "price": 10, "stock": 0}]),
        );
        let mut catalog = Catalog::new(ProductsApi::new(FetchClient::new(mock)));
        assert!(catalog.state().is_loading());

        catalog.refresh().unwrap();
        let honey = catalog.find(&ProductId::new("p1")).unwrap();
        assert!(!honey.can_add_to_cart());
        assert!(catalog.find(&ProductId::new("p2")).is_none());
    }

    #[test]
    fn test_network_failure() {
        let mock = MockTransport::new();
        mock.fail(
            Method::Get,
            "/api/products",
            FetchError::RequestError("connection refused".to_string()),
        );
        let mut catalog = Catalog::new(ProductsApi::new(FetchClient::new(mock)));

        assert!(matches!(catalog.refresh(), Err(AppError::Network(_))));
        assert!(catalog
            .state()
            .error()
            .unwrap()
            .ends_with("Please check your connection."));
        assert!(catalog.products().is_empty());
    }
}
