//! Client-Side Components
//!
//! The transport invoker, the JSON-RPC call engine built on it, and the
//! observer hook the engine reports to.

pub mod observer;
pub mod rpc;
pub mod transport;

pub use observer::{CallEvent, RpcObserver, TracingObserver};
pub use rpc::{RpcClient, RpcClientBuilder, RpcClientConfig, RpcError, RpcResult};
pub use transport::{
    HttpExchange, HttpRequest, HttpResponse, MockExchange, RecordedRequest, ReqwestExchange,
    Transport, TransportError,
};
