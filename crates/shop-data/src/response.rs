//! What came back from the API.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// A received response. Any status, including errors, lands here.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    /// Header names as the server sent them.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// A payload that may or may not be wrapped in a `{"data": ...}` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }

    /// 4xx: the backend refused what we sent.
    pub fn is_client_error(&self) -> bool {
        matches!(self.status, 400..=499)
    }

    /// Decode the body as-is.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Decode the body, looking through a `data` envelope when present.
    pub fn json_data<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(match self.json::<Envelope<T>>()? {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        })
    }

    /// Look up a header without regard to case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v.as_str()))
    }

    /// Reason phrase for the status code ("Not Found").
    pub fn status_text(&self) -> &'static str {
        http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status")
    }

    /// The non-blank `message` string of a JSON body.
    pub fn server_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        value
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
    }

    /// Turn a non-2xx response into [`FetchError::HttpError`].
    ///
    /// The error carries the server's `message` verbatim, or the status
    /// text when the body has none.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .server_message()
            .unwrap_or_else(|| self.status_text().to_string());
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> Response {
        Response::new(status, HashMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_status_classes() {
        assert!(reply(201, "").is_success());
        assert!(!reply(304, "").is_success());
        assert!(reply(401, "").is_client_error());
        assert!(!reply(502, "").is_client_error());
    }

    #[test]
    fn test_product_list_bare_or_enveloped() {
        let bare: Vec<serde_json::Value> = reply(200, r#"[{"_id": "p1"}, {"_id": "p2"}]"#)
            .json_data()
            .unwrap();
        assert_eq!(bare.len(), 2);

        let wrapped: Vec<serde_json::Value> = reply(200, r#"{"data": [{"_id": "p1"}]}"#)
            .json_data()
            .unwrap();
        assert_eq!(wrapped[0]["_id"], "p1");
    }

    #[test]
    fn test_html_body_is_a_parse_error() {
        let result: Result<Vec<serde_json::Value>, _> = reply(200, "<!doctype html>").json_data();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let resp = Response::new(200, headers, Vec::new());
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.header("ETag"), None);
    }

    #[test]
    fn test_rejection_carries_server_message() {
        assert_eq!(
            reply(400, r#"{"message": "Product name is required"}"#).error_for_status(),
            Err(FetchError::HttpError {
                status: 400,
                message: "Product name is required".to_string()
            })
        );
    }

    #[test]
    fn test_rejection_without_message_uses_status_text() {
        assert_eq!(
            reply(404, "<html>nope</html>").error_for_status(),
            Err(FetchError::HttpError {
                status: 404,
                message: "Not Found".to_string()
            })
        );
        assert_eq!(
            reply(500, r#"{"message": " "}"#)
                .error_for_status()
                .unwrap_err()
                .to_string(),
            "HTTP 500: Internal Server Error"
        );
    }
}
