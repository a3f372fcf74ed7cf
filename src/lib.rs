//! CDS Index Client - typed JSON-RPC client for the code-index service
//!
//! This crate sends search, graph traversal, entity retrieval and index
//! rebuild requests to the index service, retries transport failures with a
//! fixed backoff schedule, and maps failure envelopes to typed errors.

pub mod client;
pub mod config;
pub mod logging;

pub use cds_protocol as protocol;
pub use cds_protocol::ops::{
    RebuildIndexParams, RebuildIndexResult, RetrieveEntityOptions, RetrieveEntityParams,
    RetrieveEntityResult, SearchEntitiesParams, SearchEntitiesResult, TraverseGraphParams,
    TraverseGraphResult,
};
pub use client::{
    HttpExchange, MockExchange, RpcClient, RpcClientBuilder, RpcClientConfig, RpcError,
    RpcObserver, RpcResult, TracingObserver, TransportError,
};
pub use config::{ClientConfig, ConfigError, LogLevel};
