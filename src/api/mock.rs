//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Replays queued responses in order and records every request.
///
/// An empty queue behaves like an unreachable host.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpResponse {
            status,
            body: body.to_string(),
            authorization: None,
        }))
    }

    pub(crate) fn respond_with_token(&self, status: u16, body: &str, header: &str) -> &Self {
        self.push(Ok(HttpResponse {
            status,
            body: body.to_string(),
            authorization: Some(header.to_string()),
        }))
    }

    pub(crate) fn fail(&self) -> &Self {
        self.push(Err(TransportError("connection refused".to_string())))
    }

    fn push(&self, response: Result<HttpResponse, TransportError>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no response queued".to_string())))
    }
}
