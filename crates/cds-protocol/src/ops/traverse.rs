//! `traverse_graph` types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::decode::{check_non_negative, DecodeError, Validate};
use crate::request::compact_params;
use crate::types::{EntityType, GraphEdge, GraphNode, RelationType};

/// Which edges to follow from the start entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalDirection {
    Forward,
    Backward,
    Bidirectional,
}

/// Shape of the returned subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    Graph,
    Tree,
}

/// Traversal parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraverseGraphParams {
    pub start_entities: Vec<String>,
    pub depth: Option<u32>,
    pub relations: Option<Vec<RelationType>>,
    pub entity_types: Option<Vec<EntityType>>,
    pub direction: Option<TraversalDirection>,
    pub format: Option<GraphFormat>,
}

impl TraverseGraphParams {
    pub fn new<I, S>(start_entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            start_entities: start_entities.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_relations(mut self, relations: Vec<RelationType>) -> Self {
        self.relations = Some(relations);
        self
    }

    pub fn with_entity_types(mut self, types: Vec<EntityType>) -> Self {
        self.entity_types = Some(types);
        self
    }

    pub fn with_direction(mut self, direction: TraversalDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn to_wire(&self) -> Value {
        compact_params([
            ("start_entities", json!(self.start_entities)),
            ("depth", json!(self.depth)),
            ("relations", json!(self.relations)),
            ("entity_types", json!(self.entity_types)),
            ("direction", json!(self.direction)),
            ("format", json!(self.format)),
        ])
    }
}

/// Nodes and edges reached by a traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Traversal counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalMetadata {
    pub total_nodes: u64,
    pub total_edges: u64,
    pub max_depth_reached: u32,
    pub execution_time_ms: f64,
}

/// Traversal result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraverseGraphResult {
    pub subgraph: Subgraph,
    pub metadata: TraversalMetadata,
}

impl Validate for TraverseGraphResult {
    fn validate(&self) -> Result<(), DecodeError> {
        self.subgraph.nodes.validate()?;
        check_non_negative("metadata.execution_time_ms", self.metadata.execution_time_ms)
    }
}
