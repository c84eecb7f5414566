//! REST client utilities for the storefront client.
//!
//! Provides a small builder API over a pluggable [`Transport`], with JSON
//! handling and server error messages extracted the way the storefront
//! backend reports them.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_data::{FetchClient, HttpTransport};
//!
//! let client = FetchClient::new(HttpTransport::new(None)?)
//!     .with_base_url("http://localhost:5000");
//!
//! // Simple GET request
//! let products: Vec<Product> = client
//!     .get("/api/products")
//!     .no_cache()
//!     .send()?
//!     .error_for_status()?
//!     .json_data()?;
//!
//! // Authenticated POST with JSON body
//! client
//!     .post("/api/orders")
//!     .bearer_auth(token)
//!     .json(&order)?
//!     .send()?
//!     .error_for_status()?;
//! ```

mod error;
pub mod mock;
mod request;
mod response;
mod transport;

pub use error::FetchError;
pub use request::{Method, Request};
pub use response::Response;
pub use transport::{HttpTransport, Transport};

use std::collections::HashMap;
use std::sync::Arc;

/// Client for one backend API.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl FetchClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Build over a transport that is already shared elsewhere.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Resolve relative paths against `base_url`.
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..self
        }
    }

    /// Send `name: value` with every request.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn get(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, path)
    }

    pub fn post(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, path)
    }

    pub fn put(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, path)
    }

    pub fn delete(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Delete, path)
    }

    /// Start a request. Absolute URLs bypass the base URL.
    pub fn request(&self, method: Method, path: impl Into<String>) -> ClientRequestBuilder {
        let request = self.default_headers.iter().fold(
            Request::new(method, self.resolve(path.into())),
            |request, (name, value)| request.header(name.clone(), value.clone()),
        );

        ClientRequestBuilder {
            request,
            transport: Arc::clone(&self.transport),
        }
    }

    fn resolve(&self, path: String) -> String {
        let absolute = path.starts_with("http://") || path.starts_with("https://");
        match &self.base_url {
            Some(base) if !absolute => format!("{}{}", base.trim_end_matches('/'), path),
            _ => path,
        }
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// A request being assembled; [`send`](Self::send) hands it to the
/// client's transport.
pub struct ClientRequestBuilder {
    request: Request,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.map(|r| r.header(name, value))
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<T: serde::Serialize>(self, body: &T) -> Result<Self, FetchError> {
        let request = self.request.json(body)?;
        Ok(Self {
            request,
            transport: self.transport,
        })
    }

    /// `Authorization: Bearer <token>`.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.map(|r| r.bearer_auth(token))
    }

    /// Ask intermediaries not to serve a cached copy.
    pub fn no_cache(self) -> Self {
        self.map(Request::no_cache)
    }

    fn map(self, f: impl FnOnce(Request) -> Request) -> Self {
        Self {
            request: f(self.request),
            transport: self.transport,
        }
    }

    /// Send it. Any HTTP status comes back as `Ok`; only transport
    /// failures are errors.
    pub fn send(self) -> Result<Response, FetchError> {
        let method = self.request.method;
        let url = self.request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let result = self.transport.send(self.request);
        match &result {
            Ok(response) => tracing::debug!(%method, %url, status = response.status, "response"),
            Err(e) => tracing::debug!(%method, %url, error = %e, "request failed"),
        }
        result
    }
}

/// Common imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, HttpTransport, Method, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;

    #[test]
    fn test_base_url_is_prepended() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/products", 200, json!([]));
        let client = FetchClient::new(mock.clone()).with_base_url("http://localhost:5000/");

        client.get("/api/products").send().unwrap();
        assert_eq!(
            mock.last_request().unwrap().url,
            "http://localhost:5000/api/products"
        );
    }

    #[test]
    fn test_absolute_url_is_kept() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/health", 200, json!({}));
        let client = FetchClient::new(mock.clone()).with_base_url("http://localhost:5000");

        client.get("http://other.test/health").send().unwrap();
        assert_eq!(mock.last_request().unwrap().url, "http://other.test/health");
    }

    #[test]
    fn test_default_headers_and_auth() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/api/orders", 201, json!({}));
        let client = FetchClient::new(mock.clone()).with_default_header("Accept", "application/json");

        client
            .post("/api/orders")
            .bearer_auth("tok")
            .json(&json!({"totalPrice": 1.0}))
            .unwrap()
            .send()
            .unwrap();

        let req = mock.last_request().unwrap();
        assert_eq!(req.header_value("accept"), Some("application/json"));
        assert_eq!(req.header_value("authorization"), Some("Bearer tok"));
        assert_eq!(req.json_body().unwrap()["totalPrice"], 1.0);
    }

    #[test]
    fn test_error_status_is_a_response() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/orders/myorders", 401, json!({"message": "Not authorized"}));
        let client = FetchClient::new(mock);

        let response = client.get("/api/orders/myorders").send().unwrap();
        assert_eq!(response.status, 401);
        assert_eq!(
            response.error_for_status().unwrap_err().to_string(),
            "HTTP 401: Not authorized"
        );
    }
}
