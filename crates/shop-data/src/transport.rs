//! Transports: the seam between request building and the network.

use crate::{FetchError, Request, Response};
use std::collections::HashMap;
use std::time::Duration;

/// Sends a built [`Request`] and returns whatever the server answered.
///
/// Non-2xx statuses are returned as responses, not errors; callers decide
/// with [`Response::error_for_status`].
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> Result<Response, FetchError>;
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport. `timeout` of `None` keeps the client's default.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("shop-cli/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self { client })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_builder() {
        FetchError::InvalidUrl(e.to_string())
    } else {
        FetchError::RequestError(e.to_string())
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> Result<Response, FetchError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.as_str());

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().map_err(map_reqwest_error)?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}
