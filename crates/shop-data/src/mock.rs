//! Scripted in-memory transport for tests and offline runs.

use crate::{FetchError, Method, Request, Response, Transport};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct Scripted {
    method: Method,
    path: String,
    outcome: Result<Response, FetchError>,
}

#[derive(Debug, Default)]
struct State {
    script: VecDeque<Scripted>,
    requests: Vec<Request>,
}

/// A [`Transport`] that answers from a script and records every request.
///
/// Each scripted answer is used once, matched by method and URL path in the
/// order it was added. A request with no matching answer fails as a
/// network error. Clones share the same script and request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    /// Create a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next matching request with `status` and a JSON body.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let response = Response::new(status, headers, body.to_string().into_bytes());
        self.push(method, path, Ok(response));
    }

    /// Answer the next matching request with a raw response.
    pub fn respond_raw(&self, method: Method, path: &str, response: Response) {
        self.push(method, path, Ok(response));
    }

    /// Fail the next matching request without a response.
    pub fn fail(&self, method: Method, path: &str, error: FetchError) {
        self.push(method, path, Err(error));
    }

    fn push(&self, method: Method, path: &str, outcome: Result<Response, FetchError>) {
        if let Ok(mut state) = self.state.lock() {
            state.script.push_back(Scripted {
                method,
                path: path.to_string(),
                outcome,
            });
        }
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.state
            .lock()
            .map(|s| s.requests.clone())
            .unwrap_or_default()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<Request> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.requests.last().cloned())
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.state.lock().map(|s| s.requests.len()).unwrap_or(0)
    }

    /// Scripted answers not yet consumed.
    pub fn pending(&self) -> usize {
        self.state.lock().map(|s| s.script.len()).unwrap_or(0)
    }
}

impl Transport for MockTransport {
    fn send(&self, request: Request) -> Result<Response, FetchError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| FetchError::RequestError("mock transport poisoned".to_string()))?;

        let position = state
            .script
            .iter()
            .position(|s| s.method == request.method && s.path == request.path());
        let description = format!("{} {}", request.method, request.path());
        state.requests.push(request);

        match position.and_then(|i| state.script.remove(i)) {
            Some(scripted) => scripted.outcome,
            None => Err(FetchError::RequestError(format!(
                "no scripted response for {}",
                description
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answers_in_order_and_records() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/products", 200, json!([1]));
        mock.respond(Method::Get, "/api/products", 200, json!([2]));

        let first = mock
            .send(Request::new(Method::Get, "http://localhost:5000/api/products"))
            .unwrap();
        let second = mock
            .send(Request::new(Method::Get, "http://localhost:5000/api/products"))
            .unwrap();

        assert_eq!(first.body, b"[1]");
        assert_eq!(second.body, b"[2]");
        assert_eq!(mock.request_count(), 2);
        assert_eq!(mock.pending(), 0);
    }

    #[test]
    fn test_matches_on_method() {
        let mock = MockTransport::new();
        mock.respond(Method::Delete, "/api/products/p1", 200, json!({}));

        let err = mock
            .send(Request::new(Method::Get, "http://x/api/products/p1"))
            .unwrap_err();
        assert!(err.is_network());
        assert_eq!(mock.pending(), 1);
    }

    #[test]
    fn test_scripted_failure() {
        let mock = MockTransport::new();
        mock.fail(Method::Get, "/api/products", FetchError::Timeout);
        assert_eq!(
            mock.send(Request::new(Method::Get, "http://x/api/products")),
            Err(FetchError::Timeout)
        );
    }
}
