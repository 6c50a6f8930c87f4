//! Request plumbing shared by the resource clients.

use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiResult};
use super::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Bearer token shared by every client of one [`super::Api`].
pub(crate) type SharedToken = Arc<RwLock<Option<String>>>;

/// One service endpoint: base URL, transport and the shared token.
#[derive(Clone)]
pub(crate) struct ServiceClient {
    service: &'static str,
    base_url: String,
    transport: Arc<dyn Transport>,
    token: SharedToken,
}

impl ServiceClient {
    pub(crate) fn new(
        service: &'static str,
        base_url: &str,
        transport: Arc<dyn Transport>,
        token: SharedToken,
    ) -> Self {
        Self {
            service,
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            token,
        }
    }

    /// Builds a request against `base_url + path`, attaching the current token.
    pub(crate) fn request(&self, method: Method, path: &str) -> HttpRequest {
        let bearer = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            query: Vec::new(),
            body: None,
            bearer,
        }
    }

    /// Sends a request and maps "no response" and non-2xx to [`ApiError`].
    pub(crate) fn execute(&self, operation: &str, request: &HttpRequest) -> ApiResult<HttpResponse> {
        let _span = tracing::debug_span!(
            "api_request",
            service = self.service,
            operation = operation,
            method = %request.method,
        )
        .entered();

        match self.transport.send(request) {
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "request got no response");
                Err(ApiError::NoResponse)
            }
            Ok(response) if !response.is_success() => {
                tracing::warn!(url = %request.url, status = response.status, "request failed");
                Err(ApiError::Status(response.status))
            }
            Ok(response) => {
                tracing::debug!(status = response.status, "request succeeded");
                Ok(response)
            }
        }
    }

    /// Sends a request and decodes the JSON body.
    pub(crate) fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: &HttpRequest,
    ) -> ApiResult<T> {
        let response = self.execute(operation, request)?;
        decode(&response)
    }
}

/// Decodes a JSON body, reporting the received status on failure.
pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ApiResult<T> {
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(status = response.status, error = %e, "response body did not decode");
        ApiError::Decode {
            status: response.status,
            message: e.to_string(),
        }
    })
}
