//! RPC Client
//!
//! Implements the client side of the code-index JSON-RPC protocol.
//! Handles request correlation, retry with backoff, envelope discrimination
//! and error mapping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cds_protocol::ops::{
    RebuildIndexParams, RebuildIndexResult, RetrieveEntityOptions, RetrieveEntityParams,
    RetrieveEntityResult, SearchEntitiesParams, SearchEntitiesResult, TraverseGraphParams,
    TraverseGraphResult,
};
use cds_protocol::{
    decode, decode_value, names, DecodeError, EntityDetails, ErrorCode, ErrorObject,
    FailureEnvelope, ResponseId, RpcRequest, SuccessEnvelope,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::observer::{CallEvent, RpcObserver, TracingObserver};
use super::transport::{HttpExchange, ReqwestExchange, Transport, TransportError};
use crate::config::{ClientConfig, ConfigError};

/// Longest body excerpt quoted in an unparseable-response error.
const BODY_SNIPPET_LIMIT: usize = 512;

/// RPC client configuration
#[derive(Debug, Clone)]
pub struct RpcClientConfig {
    /// Default deadline per attempt; zero disables it
    pub timeout: Duration,
    /// Backoff before each retry; its length is the retry count
    pub retry_delays: Vec<Duration>,
    /// Extra HTTP headers sent with every request
    pub headers: Vec<(String, String)>,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(crate::config::DEFAULT_TIMEOUT_MS),
            retry_delays: crate::config::DEFAULT_RETRY_DELAYS_MS
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
            headers: Vec::new(),
        }
    }
}

impl From<&ClientConfig> for RpcClientConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.timeout_ms),
            retry_delays: config
                .retry_delays_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
            headers: Vec::new(),
        }
    }
}

/// RPC client errors
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Failed to serialize request: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid client configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid params: {message}")]
    InvalidParams { message: String, data: Option<Value> },

    #[error("Index not initialized: {message}")]
    IndexNotInitialized { message: String, data: Option<Value> },

    #[error("Entity not found: {message}")]
    EntityNotFound { message: String, data: Option<Value> },

    #[error("Query timeout: {message}")]
    QueryTimeout { message: String, data: Option<Value> },

    #[error("RPC error {code}: {message}")]
    Protocol {
        code: i64,
        message: String,
        data: Option<Value>,
    },
}

impl RpcError {
    /// Map a failure envelope's error object to a typed error.
    pub fn from_error_object(error: ErrorObject) -> Self {
        let ErrorObject {
            code,
            message,
            data,
        } = error;
        match ErrorCode::from_i64(code) {
            Some(ErrorCode::InvalidParams) => RpcError::InvalidParams { message, data },
            Some(ErrorCode::IndexNotFound) => RpcError::IndexNotInitialized { message, data },
            Some(ErrorCode::EntityNotFound) => RpcError::EntityNotFound { message, data },
            Some(ErrorCode::QueryTimeout) => RpcError::QueryTimeout { message, data },
            _ => RpcError::Protocol {
                code,
                message,
                data,
            },
        }
    }

    /// Protocol error code, for errors that came from a failure envelope
    /// (or its local equivalent).
    pub fn code(&self) -> Option<i64> {
        match self {
            RpcError::InvalidParams { .. } => Some(ErrorCode::InvalidParams.as_i64()),
            RpcError::IndexNotInitialized { .. } => Some(ErrorCode::IndexNotFound.as_i64()),
            RpcError::EntityNotFound { .. } => Some(ErrorCode::EntityNotFound.as_i64()),
            RpcError::QueryTimeout { .. } => Some(ErrorCode::QueryTimeout.as_i64()),
            RpcError::Protocol { code, .. } => Some(*code),
            RpcError::Transport(_)
            | RpcError::UnexpectedResponse(_)
            | RpcError::Serialization(_)
            | RpcError::Config(_) => None,
        }
    }

    /// Auxiliary data attached by the service.
    pub fn data(&self) -> Option<&Value> {
        match self {
            RpcError::InvalidParams { data, .. }
            | RpcError::IndexNotInitialized { data, .. }
            | RpcError::EntityNotFound { data, .. }
            | RpcError::QueryTimeout { data, .. }
            | RpcError::Protocol { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// Only transport failures are retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RpcError::Transport(_))
    }
}

/// Result type for RPC operations
pub type RpcResult<T> = Result<T, RpcError>;

/// JSON-RPC client for the code-index service.
///
/// The client is `Send + Sync`; concurrent calls share only the request id
/// counter.
pub struct RpcClient {
    transport: Transport,
    config: RpcClientConfig,
    observer: Option<Arc<dyn RpcObserver>>,
    /// Last issued request id
    request_counter: AtomicU64,
}

impl RpcClient {
    /// Create a client with default timeout and retry schedule
    pub fn new(endpoint: &str, exchange: Arc<dyn HttpExchange>) -> Self {
        Self::with_config(endpoint, exchange, RpcClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(
        endpoint: &str,
        exchange: Arc<dyn HttpExchange>,
        config: RpcClientConfig,
    ) -> Self {
        let transport = Transport::new(endpoint, config.headers.clone(), exchange);
        Self {
            transport,
            config,
            observer: None,
            request_counter: AtomicU64::new(0),
        }
    }

    /// Create a client that talks HTTP through reqwest
    pub fn http(endpoint: &str, config: RpcClientConfig) -> Result<Self, TransportError> {
        let exchange = ReqwestExchange::new()?;
        Ok(Self::with_config(endpoint, Arc::new(exchange), config))
    }

    /// Create an HTTP client from loaded configuration.
    ///
    /// The configuration is validated first. Installs [`TracingObserver`]
    /// when request logging is enabled.
    pub fn from_config(config: &ClientConfig) -> RpcResult<Self> {
        config.validate()?;
        let client = Self::http(&config.service_url, RpcClientConfig::from(config))?;
        Ok(if config.enable_request_logging {
            client.with_observer(Arc::new(TracingObserver))
        } else {
            client
        })
    }

    /// Start building a client for `endpoint`
    pub fn builder(endpoint: impl Into<String>) -> RpcClientBuilder {
        RpcClientBuilder::new(endpoint)
    }

    /// Attach an observer
    pub fn with_observer(mut self, observer: Arc<dyn RpcObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    pub fn config(&self) -> &RpcClientConfig {
        &self.config
    }

    /// Allocate the next request id (1, 2, 3, ...)
    fn next_request_id(&self) -> u64 {
        self.request_counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn notify(&self, f: impl FnOnce(&dyn RpcObserver)) {
        if let Some(observer) = &self.observer {
            f(observer.as_ref());
        }
    }

    // === Generic Call ===

    /// Call `method` and decode its result with `decoder`.
    ///
    /// Transport failures are retried with the configured backoff, reusing
    /// the same request id. Failure envelopes, malformed responses and
    /// decode failures are returned immediately.
    pub fn call<T, D>(
        &self,
        method: &str,
        params: Value,
        decoder: D,
        timeout: Option<Duration>,
    ) -> RpcResult<T>
    where
        D: Fn(&Value) -> Result<T, DecodeError>,
    {
        let id = self.next_request_id();
        let request = RpcRequest::new(id, method, params);
        let body = serde_json::to_string(&request)?;
        let timeout = timeout.unwrap_or(self.config.timeout);

        let attempts = self.config.retry_delays.len() + 1;
        for attempt in 0..attempts {
            let event = CallEvent {
                method,
                id,
                attempt,
            };
            self.notify(|o| o.on_request(&event, &request.params));

            let outcome = self.exchange(&body, id, timeout).and_then(|raw| {
                let result = decoder(&raw).map_err(|e| {
                    RpcError::UnexpectedResponse(format!(
                        "JSON-RPC response validation failed: {}",
                        e
                    ))
                })?;
                Ok((raw, result))
            });

            match outcome {
                Ok((raw, result)) => {
                    self.notify(|o| o.on_response(&event, &raw));
                    return Ok(result);
                }
                Err(RpcError::Transport(err)) => {
                    let will_retry = attempt + 1 < attempts;
                    self.notify(|o| o.on_network_error(&event, &err, will_retry));
                    if !will_retry {
                        return Err(RpcError::Transport(err));
                    }
                    let delay = self.config.retry_delays[attempt];
                    tracing::debug!(method, id, attempt, ?delay, "retrying after network error");
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
                Err(err) => {
                    self.notify(|o| o.on_error(&event, &err));
                    return Err(err);
                }
            }
        }

        Err(TransportError::RetriesExhausted.into())
    }

    /// Call `method` and return its result without decoding.
    pub fn call_value(
        &self,
        method: &str,
        params: Value,
        timeout: Option<Duration>,
    ) -> RpcResult<Value> {
        self.call(method, params, decode_value, timeout)
    }

    /// One transport attempt: returns the raw `result` of a success envelope
    /// whose id matches.
    fn exchange(&self, body: &str, id: u64, timeout: Duration) -> RpcResult<Value> {
        let response = self.transport.send(body, Some(timeout))?;

        let payload: Value = serde_json::from_str(&response.body).map_err(|e| {
            RpcError::UnexpectedResponse(format!(
                "Failed to parse JSON-RPC response: {}{}",
                e,
                body_snippet(&response.body)
            ))
        })?;

        if let Ok(failure) = FailureEnvelope::deserialize(&payload) {
            assert_matching_id(&failure.id, id)?;
            return Err(RpcError::from_error_object(failure.error));
        }

        let success = SuccessEnvelope::deserialize(&payload).map_err(|e| {
            RpcError::UnexpectedResponse(format!("JSON-RPC response validation failed: {}", e))
        })?;
        assert_matching_id(&success.id, id)?;
        Ok(success.result)
    }

    // === Public RPC Operations ===

    /// Search indexed entities
    pub fn search_entities(
        &self,
        params: &SearchEntitiesParams,
    ) -> RpcResult<SearchEntitiesResult> {
        self.call(names::SEARCH_ENTITIES, params.to_wire(), decode::<SearchEntitiesResult>, None)
    }

    /// Walk the code graph from a set of start entities
    pub fn traverse_graph(&self, params: &TraverseGraphParams) -> RpcResult<TraverseGraphResult> {
        self.call(names::TRAVERSE_GRAPH, params.to_wire(), decode::<TraverseGraphResult>, None)
    }

    /// Fetch full entity bodies
    pub fn retrieve_entity(
        &self,
        params: &RetrieveEntityParams,
    ) -> RpcResult<RetrieveEntityResult> {
        self.call(names::RETRIEVE_ENTITY, params.to_wire(), decode::<RetrieveEntityResult>, None)
    }

    /// Rebuild the index for a repository
    pub fn rebuild_index(&self, params: &RebuildIndexParams) -> RpcResult<RebuildIndexResult> {
        self.call(names::REBUILD_INDEX, params.to_wire(), decode::<RebuildIndexResult>, None)
    }

    /// Alias of [`rebuild_index`](Self::rebuild_index)
    pub fn initialize_index(&self, params: &RebuildIndexParams) -> RpcResult<RebuildIndexResult> {
        self.rebuild_index(params)
    }

    /// Fetch one entity, failing with `EntityNotFound` if the service
    /// returns nothing for it.
    ///
    /// The not-found check is local; the service answers an unknown id with
    /// an empty list.
    pub fn get_entity_details(
        &self,
        entity_id: &str,
        options: &RetrieveEntityOptions,
    ) -> RpcResult<EntityDetails> {
        let params = RetrieveEntityParams::new([entity_id]).with_options(options);
        let result = self.retrieve_entity(&params)?;

        result
            .entities
            .into_iter()
            .next()
            .ok_or_else(|| RpcError::EntityNotFound {
                message: "Entity not found".to_string(),
                data: Some(json!({ "entityId": entity_id })),
            })
    }
}

/// Builder for [`RpcClient`].
///
/// Uses the reqwest exchange unless another one is supplied.
pub struct RpcClientBuilder {
    endpoint: String,
    config: RpcClientConfig,
    exchange: Option<Arc<dyn HttpExchange>>,
    observer: Option<Arc<dyn RpcObserver>>,
}

impl RpcClientBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            config: RpcClientConfig::default(),
            exchange: None,
            observer: None,
        }
    }

    /// Add a header sent with every request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.config.retry_delays = delays;
        self
    }

    /// Replace the HTTP exchange
    pub fn exchange(mut self, exchange: Arc<dyn HttpExchange>) -> Self {
        self.exchange = Some(exchange);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn RpcObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Result<RpcClient, TransportError> {
        let exchange = match self.exchange {
            Some(exchange) => exchange,
            None => Arc::new(ReqwestExchange::new()?),
        };
        let mut client = RpcClient::with_config(&self.endpoint, exchange, self.config);
        client.observer = self.observer;
        Ok(client)
    }
}

/// Null and string ids never match a numeric request id.
fn assert_matching_id(received: &ResponseId, expected: u64) -> RpcResult<()> {
    if received.matches(expected) {
        Ok(())
    } else {
        Err(RpcError::UnexpectedResponse(format!(
            "JSON-RPC response id mismatch: expected {}, received {}",
            expected, received
        )))
    }
}

/// ` (body: ...)` suffix for parse errors, or empty for an empty body.
fn body_snippet(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    let mut excerpt: String = body.chars().take(BODY_SNIPPET_LIMIT).collect();
    if excerpt.len() < body.len() {
        excerpt.push_str("...");
    }
    format!(" (body: {})", excerpt)
}
