//! HTTP transport abstraction.
//!
//! Resource clients describe each call as an [`HttpRequest`] and hand it to a
//! [`Transport`]. The production implementation is [`ReqwestTransport`], a
//! blocking `reqwest` client; tests substitute an in-memory transport that
//! records requests and replays canned responses.

use std::fmt;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use thiserror::Error;

use crate::domain::{LibrisError, Result};

/// HTTP verbs used by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        })
    }
}

/// One outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    /// Query parameters in the order they are appended.
    pub query: Vec<(String, String)>,
    /// JSON body, sent with `Content-Type: application/json`.
    pub body: Option<serde_json::Value>,
    /// Bearer token for the `Authorization` header.
    pub bearer: Option<String>,
}

impl HttpRequest {
    /// Looks up a query parameter by name.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A received response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    /// Raw value of the `Authorization` response header.
    pub authorization: Option<String>,
}

impl HttpResponse {
    /// Returns whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request did not produce any response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends requests and returns responses.
///
/// Implementations must return `Ok` for every response received, including
/// non-2xx ones; `Err` is reserved for "no response".
pub trait Transport: Send + Sync {
    /// Performs the request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response was received.
    fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// Blocking `reqwest` transport.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Builds the transport. `timeout` of `None` leaves requests unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LibrisError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Patch => self.client.patch(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let authorization = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let body = response.text().map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status,
            body,
            authorization,
        })
    }
}

/// Extracts the token from an `Authorization` header value.
///
/// Accepts both `Bearer <token>` and a bare token; blank values yield `None`.
#[must_use]
pub fn bearer_token(header: &str) -> Option<String> {
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(bearer_token("Bearer abc.def").as_deref(), Some("abc.def"));
        assert_eq!(bearer_token("abc").as_deref(), Some("abc"));
        assert_eq!(bearer_token("Bearer  "), None);
    }

    #[test]
    fn success_range() {
        let mut response = HttpResponse {
            status: 204,
            body: String::new(),
            authorization: None,
        };
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
    }
}
