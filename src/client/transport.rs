//! Transport Layer for the RPC Client
//!
//! Abstracts the HTTP exchange for testability. Provides:
//! - HttpExchange trait: one POST in, one raw response out
//! - Transport: the invoker that adds headers, applies the deadline and
//!   turns non-2xx statuses into transport failures
//! - ReqwestExchange: blocking HTTP client for production
//! - MockExchange: scripted in-process replies for unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Boxed error kept as the cause of a connection failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Transport errors. Every variant is retryable.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error {status}")]
    Status { status: u16, status_text: String },

    #[error("Request timed out")]
    TimedOut,

    #[error("{message}")]
    Connection {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Exceeded maximum retry attempts")]
    RetriesExhausted,
}

impl TransportError {
    /// Wrap a lower-level fault, keeping it as the error source.
    pub fn connection<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TransportError::Connection {
            message: source.to_string(),
            source: Box::new(source),
        }
    }
}

/// A single outgoing POST.
#[derive(Debug, Clone, Copy)]
pub struct HttpRequest<'a> {
    pub url: &'a str,
    pub headers: &'a [(String, String)],
    pub body: &'a str,
    /// Deadline for this exchange; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Raw response as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: String::new(),
            body: body.into(),
        }
    }

    /// 200 with a JSON body.
    pub fn ok_json(value: &serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP primitive used by [`Transport`].
///
/// Implementations report deadline expiry as [`TransportError::TimedOut`]
/// and any other fault as [`TransportError::Connection`]. Status handling
/// is left to the caller.
pub trait HttpExchange: Send + Sync {
    fn post(&self, request: HttpRequest<'_>) -> Result<HttpResponse, TransportError>;
}

/// Issues one POST per call against a fixed endpoint.
pub struct Transport {
    endpoint: String,
    headers: Vec<(String, String)>,
    exchange: Arc<dyn HttpExchange>,
}

impl Transport {
    /// Create a transport. A single trailing `/` on the endpoint is dropped.
    pub fn new(
        endpoint: &str,
        extra_headers: Vec<(String, String)>,
        exchange: Arc<dyn HttpExchange>,
    ) -> Self {
        let endpoint = endpoint.strip_suffix('/').unwrap_or(endpoint).to_string();

        // Configured headers override the default content type.
        let mut headers = Vec::with_capacity(extra_headers.len() + 1);
        if !extra_headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        headers.extend(extra_headers);

        Self {
            endpoint,
            headers,
            exchange,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Perform one exchange.
    ///
    /// A zero `timeout` means no deadline. Returns the response only when
    /// the status is 2xx.
    pub fn send(
        &self,
        body: &str,
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, TransportError> {
        let request = HttpRequest {
            url: &self.endpoint,
            headers: &self.headers,
            body,
            timeout: timeout.filter(|t| !t.is_zero()),
        };

        let response = self.exchange.post(request)?;
        if !response.is_success() {
            return Err(TransportError::Status {
                status: response.status,
                status_text: response.status_text,
            });
        }
        Ok(response)
    }
}

/// Blocking HTTP exchange over reqwest.
///
/// The client itself carries no timeout; each request gets its own, so the
/// deadline lives and dies with the attempt.
pub struct ReqwestExchange {
    client: reqwest::blocking::Client,
}

impl ReqwestExchange {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(TransportError::connection)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    fn classify(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::TimedOut
        } else {
            TransportError::connection(err)
        }
    }
}

impl HttpExchange for ReqwestExchange {
    fn post(&self, request: HttpRequest<'_>) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.post(request.url).body(request.body.to_string());
        for (name, value) in request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().map_err(Self::classify)?;
        let status = response.status();
        let body = response.text().map_err(Self::classify)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// A request captured by [`MockExchange`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub timeout: Option<Duration>,
}

impl RecordedRequest {
    /// Body parsed as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Scripted exchange for tests.
///
/// Replies are consumed in order, one per attempt. Running out of replies is
/// reported as a connection failure so the retry path stays observable.
#[derive(Default)]
pub struct MockExchange {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with a JSON body.
    pub fn push_json(&self, value: serde_json::Value) -> &Self {
        self.push_response(HttpResponse::ok_json(&value))
    }

    /// Queue a response with an arbitrary status and raw body.
    pub fn push_body(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push_response(HttpResponse::new(status, body))
    }

    pub fn push_response(&self, response: HttpResponse) -> &Self {
        lock(&self.replies).push_back(Ok(response));
        self
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: TransportError) -> &Self {
        lock(&self.replies).push_back(Err(error));
        self
    }

    /// Number of exchanges performed so far.
    pub fn attempts(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Number of scripted replies not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.replies).len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }
}

impl HttpExchange for MockExchange {
    fn post(&self, request: HttpRequest<'_>) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            url: request.url.to_string(),
            headers: request.headers.to_vec(),
            body: request.body.to_string(),
            timeout: request.timeout,
        });

        lock(&self.replies).pop_front().unwrap_or_else(|| {
            Err(TransportError::connection(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "mock exchange has no scripted reply",
            )))
        })
    }
}

/// Lock ignoring poisoning.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
