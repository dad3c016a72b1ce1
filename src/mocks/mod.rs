//! Mock implementations for testing.
//!
//! Provides a mock transport that replays queued responses and records
//! every request, so submissions can be tested without a server.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

use crate::transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MultipartPart, MultipartRequest,
    TransportError,
};

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Form parts, for multipart requests.
    pub parts: Vec<MultipartPart>,
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Creates a response with a raw body.
    pub fn raw(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Creates a response with custom status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

enum MockReply {
    Response(MockResponse),
    Failure(TransportError),
}

/// Lets a test observe a request before its response is released.
#[derive(Debug, Clone)]
pub struct DeferredControl {
    received: Arc<Notify>,
    release: Arc<Notify>,
}

impl DeferredControl {
    /// Waits until the transport has received a request.
    pub async fn request_received(&self) {
        self.received.notified().await;
    }

    /// Lets the pending request complete.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// Mock HTTP transport for testing.
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
    deferred: Option<DeferredControl>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_response: Mutex::new(None),
            deferred: None,
        }
    }

    /// Creates a mock transport that holds each response until released.
    pub fn deferred() -> (Self, DeferredControl) {
        let control = DeferredControl {
            received: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        };
        let transport = Self {
            deferred: Some(control.clone()),
            ..Self::new()
        };
        (transport, control)
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        lock(&self.replies).push_back(MockReply::Response(response));
    }

    /// Queues a JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues a transport failure.
    pub fn queue_failure(&self, error: TransportError) {
        lock(&self.replies).push_back(MockReply::Failure(error));
    }

    /// Sets the default response.
    pub fn set_default(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn next_reply(&self) -> MockReply {
        if let Some(reply) = lock(&self.replies).pop_front() {
            return reply;
        }
        let fallback = lock(&self.default_response)
            .clone()
            .unwrap_or_else(|| MockResponse::raw(500, "No mock response configured"));
        MockReply::Response(fallback)
    }

    async fn respond(&self, request: RecordedRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);

        if let Some(control) = &self.deferred {
            control.received.notify_one();
            control.release.notified().await;
        }

        match self.next_reply() {
            MockReply::Response(response) => Ok(HttpResponse {
                status: response.status,
                headers: response.headers,
                body: response.body,
            }),
            MockReply::Failure(error) => Err(error),
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.respond(RecordedRequest {
            method: HttpMethod::Get,
            url: request.url,
            headers: request.headers,
            parts: Vec::new(),
        })
        .await
    }

    async fn send_multipart(
        &self,
        request: MultipartRequest,
    ) -> Result<HttpResponse, TransportError> {
        self.respond(RecordedRequest {
            method: HttpMethod::Post,
            url: request.url,
            headers: request.headers,
            parts: request.parts,
        })
        .await
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}
