//! Error types for The One API client.
//!
//! This module provides the error type returned by every fallible
//! operation in this crate, from transport failures to non-success
//! HTTP responses.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for The One API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all The One API operations.
///
/// Login failures are deliberately absent here: a rejected login is a
/// soft failure reported through
/// [`LoginOutcome`](crate::auth::LoginOutcome), never through `Error`.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed (DNS, TLS, connection, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Response body, parsed as JSON when possible and otherwise
        /// kept as a JSON string holding the raw text
        body: Value,
    },

    /// A success response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code carried by this error, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use theoneapi_rs::Error;
    ///
    /// fn report(err: &Error) {
    ///     if let Some(status) = err.status() {
    ///         eprintln!("request failed with {}", status);
    ///     }
    /// }
    /// ```
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the server rejected the credentials (401 or 403).
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::InvalidInput(_) | Error::Config(_) | Error::UrlParse(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a status code and raw response text.
    pub(crate) fn from_api_response(status: u16, text: &str) -> Self {
        let body = serde_json::from_str::<Value>(text)
            .unwrap_or_else(|_| Value::String(text.to_string()));

        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from)
            .unwrap_or_else(|| match &body {
                Value::String(s) if !s.is_empty() => s.clone(),
                _ => "Unknown API error".to_string(),
            });

        Error::Api {
            status,
            message,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_api_response_json_body() {
        let err = Error::from_api_response(404, r#"{"message":"not found"}"#);
        match err {
            Error::Api {
                status,
                message,
                body,
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
                assert_eq!(body, serde_json::json!({"message": "not found"}));
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_from_api_response_plain_text_body() {
        let err = Error::from_api_response(502, "Bad Gateway");
        match err {
            Error::Api { message, body, .. } => {
                assert_eq!(message, "Bad Gateway");
                assert_eq!(body, Value::String("Bad Gateway".into()));
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_error_classification() {
        let not_found = Error::from_api_response(404, "");
        assert!(not_found.is_not_found());
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());

        let unauthorized = Error::from_api_response(401, "{}");
        assert!(unauthorized.is_auth_error());

        let server = Error::from_api_response(503, "{}");
        assert!(server.is_server_error());
        assert_eq!(server.status(), Some(503));

        assert!(Error::InvalidInput("bad".into()).is_client_error());
        assert_eq!(Error::InvalidResponse("x".into()).status(), None);
    }
}
