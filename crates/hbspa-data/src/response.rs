//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// An HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: BTreeMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: BTreeMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON response with the given status.
    pub fn from_json(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get the raw response body.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error message is the response body, or a generic text when the
    /// body is empty or not UTF-8.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self
                .text()
                .ok()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Unknown error".to_string());
            Err(FetchError::HttpError {
                status: self.status,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, BTreeMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_response_json() {
        let resp = Response::from_json(200, &serde_json::json!([{"id": 1}]));
        let data: Vec<serde_json::Value> = resp.json().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(resp.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        assert!(make_response(200, &[0xff, 0xfe]).text().is_err());
    }

    #[test]
    fn test_error_for_status_carries_body() {
        let err = make_response(409, b"Horario ocupado").error_for_status().unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpError {
                status: 409,
                message: "Horario ocupado".to_string()
            }
        );

        let err = make_response(500, b"").error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Unknown error");
    }
}
