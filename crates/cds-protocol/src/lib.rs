//! CDS Index Protocol Types
//!
//! Defines the JSON-RPC 2.0 envelope and the method payloads spoken between
//! the client and the code-index service.

pub mod decode;
pub mod error;
pub mod ops;
pub mod request;
pub mod response;
pub mod types;

pub use decode::{decode, decode_value, DecodeError, Validate};
pub use error::{ErrorCode, ErrorObject};
pub use request::{compact_params, JsonRpcVersion, RpcRequest};
pub use response::{FailureEnvelope, ResponseId, SuccessEnvelope};
pub use types::{
    Entity, EntityDetails, EntityMetadata, EntityType, GraphEdge, GraphNode, LineRange,
    RelationType, Snippet, SnippetMode,
};

/// JSON-RPC protocol tag carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// API schema version the types in this crate describe.
pub const API_SCHEMA_VERSION: &str = "0.1.0";

/// Known method names.
pub mod names {
    pub const SEARCH_ENTITIES: &str = "search_entities";
    pub const TRAVERSE_GRAPH: &str = "traverse_graph";
    pub const RETRIEVE_ENTITY: &str = "retrieve_entity";
    pub const REBUILD_INDEX: &str = "rebuild_index";
}
