//! Method-specific parameter and result types.
//!
//! Parameter structs use optional fields for everything the service can
//! default; `to_wire` builds the snake_case wire object with absent fields
//! omitted.

pub mod rebuild;
pub mod retrieve;
pub mod search;
pub mod traverse;

pub use rebuild::{
    EdgeCounts, EntityCounts, Language, RebuildError, RebuildIndexParams, RebuildIndexResult,
    RebuildStats,
};
pub use retrieve::{RetrieveEntityOptions, RetrieveEntityParams, RetrieveEntityResult};
pub use search::{QueryMetadata, SearchEntitiesParams, SearchEntitiesResult};
pub use traverse::{
    GraphFormat, Subgraph, TraversalDirection, TraversalMetadata, TraverseGraphParams,
    TraverseGraphResult,
};
