//! `search_entities` types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::decode::{check_non_negative, DecodeError, Validate};
use crate::request::compact_params;
use crate::types::{Entity, EntityType, SnippetMode};

/// Search parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchEntitiesParams {
    pub query: String,
    pub entity_types: Option<Vec<EntityType>>,
    pub limit: Option<u32>,
    pub use_bm25: Option<bool>,
    pub snippet_mode: Option<SnippetMode>,
}

impl SearchEntitiesParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_entity_types(mut self, types: Vec<EntityType>) -> Self {
        self.entity_types = Some(types);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_bm25(mut self, use_bm25: bool) -> Self {
        self.use_bm25 = Some(use_bm25);
        self
    }

    pub fn with_snippet_mode(mut self, mode: SnippetMode) -> Self {
        self.snippet_mode = Some(mode);
        self
    }

    pub fn to_wire(&self) -> Value {
        compact_params([
            ("query", json!(self.query)),
            ("entity_types", json!(self.entity_types)),
            ("limit", json!(self.limit)),
            ("use_bm25", json!(self.use_bm25)),
            ("snippet_mode", json!(self.snippet_mode)),
        ])
    }
}

/// How the service answered a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMetadata {
    pub used_upper_index: bool,
    pub used_bm25: bool,
    pub execution_time_ms: f64,
}

/// Search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntitiesResult {
    pub entities: Vec<Entity>,
    pub total_count: u64,
    pub query_metadata: QueryMetadata,
}

impl Validate for SearchEntitiesResult {
    fn validate(&self) -> Result<(), DecodeError> {
        self.entities.validate()?;
        check_non_negative(
            "query_metadata.execution_time_ms",
            self.query_metadata.execution_time_ms,
        )
    }
}
