//! Domain entities returned by the index service.
//!
//! These are pass-through data: the client decodes and validates them but
//! never manipulates them.

use serde::{Deserialize, Serialize};

use crate::decode::{DecodeError, Validate};

/// Kind of indexed code artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Directory,
    File,
    Class,
    Function,
}

/// Edge relation in the code graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    Contain,
    Import,
    Invoke,
    Inherit,
}

/// Snippet detail level: fold < preview < full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetMode {
    #[default]
    Fold,
    Preview,
    Full,
}

/// 1-based inclusive `[start, end]` line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange(pub u32, pub u32);

impl LineRange {
    pub fn start(&self) -> u32 {
        self.0
    }

    pub fn end(&self) -> u32 {
        self.1
    }
}

impl Validate for LineRange {
    fn validate(&self) -> Result<(), DecodeError> {
        if self.0 < 1 || self.1 < 1 {
            return Err(DecodeError::invalid(
                "line_range",
                format!("[{}, {}] is not 1-based", self.0, self.1),
            ));
        }
        Ok(())
    }
}

/// Layered code snippet. `fold` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub fold: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
}

/// Search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub entity_type: EntityType,
    pub file_path: String,
    pub line_range: LineRange,
    /// Relevance in [0, 1].
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<Snippet>,
}

impl Validate for Entity {
    fn validate(&self) -> Result<(), DecodeError> {
        self.line_range.validate()?;
        if !(0.0..=1.0).contains(&self.score) {
            return Err(DecodeError::invalid(
                "score",
                format!("{} is outside [0, 1]", self.score),
            ));
        }
        Ok(())
    }
}

/// Node of a traversed subgraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub entity_type: EntityType,
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_range: Option<LineRange>,
    /// Hops from the nearest start entity.
    pub depth: u32,
}

impl Validate for GraphNode {
    fn validate(&self) -> Result<(), DecodeError> {
        self.line_range.validate()
    }
}

/// Directed edge of a traversed subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub relation: RelationType,
}

/// Optional structural metadata for functions and classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_class: Option<String>,
}

/// Full entity body as returned by `retrieve_entity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDetails {
    pub id: String,
    pub name: String,
    pub entity_type: EntityType,
    pub file_path: String,
    pub line_range: LineRange,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EntityMetadata>,
}

impl Validate for EntityDetails {
    fn validate(&self) -> Result<(), DecodeError> {
        self.line_range.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use serde_json::json;

    fn entity_json(score: f64) -> serde_json::Value {
        json!({
            "id": "e1",
            "name": "sanitize",
            "entity_type": "function",
            "file_path": "src/app.py",
            "line_range": [10, 42],
            "score": score,
            "snippet": {"fold": "def sanitize"}
        })
    }

    #[test]
    fn test_entity_decode() {
        let entity: Entity = decode(&entity_json(0.9)).unwrap();

        assert_eq!(entity.entity_type, EntityType::Function);
        assert_eq!(entity.line_range, LineRange(10, 42));
        assert_eq!(entity.snippet.unwrap().fold, "def sanitize");
    }

    #[test]
    fn test_entity_score_bounds() {
        assert!(decode::<Entity>(&entity_json(0.0)).is_ok());
        assert!(decode::<Entity>(&entity_json(1.0)).is_ok());
        assert!(decode::<Entity>(&entity_json(1.5)).is_err());
        assert!(decode::<Entity>(&entity_json(-0.1)).is_err());
    }

    #[test]
    fn test_line_range_is_one_based() {
        let mut raw = entity_json(0.5);
        raw["line_range"] = json!([0, 4]);
        let err = decode::<Entity>(&raw).unwrap_err();
        assert!(err.to_string().contains("line_range"));
    }

    #[test]
    fn test_unknown_entity_type_rejected() {
        let mut raw = entity_json(0.5);
        raw["entity_type"] = json!("module");
        assert!(decode::<Entity>(&raw).is_err());
    }

    #[test]
    fn test_graph_node_without_line_range() {
        let node: GraphNode = decode(&json!({
            "id": "n1",
            "name": "pkg",
            "entity_type": "directory",
            "file_path": "pkg",
            "depth": 0
        }))
        .unwrap();

        assert!(node.line_range.is_none());
    }

    #[test]
    fn test_graph_node_negative_depth_rejected() {
        let res = decode::<GraphNode>(&json!({
            "id": "n1",
            "name": "pkg",
            "entity_type": "directory",
            "file_path": "pkg",
            "depth": -1
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_relation_names() {
        let edge: GraphEdge = serde_json::from_value(json!({
            "source": "a",
            "target": "b",
            "relation": "inherit"
        }))
        .unwrap();
        assert_eq!(edge.relation, RelationType::Inherit);
    }

    #[test]
    fn test_entity_details_with_metadata() {
        let details: EntityDetails = decode(&json!({
            "id": "e1",
            "name": "Parser",
            "entity_type": "class",
            "file_path": "src/parser.py",
            "line_range": [1, 80],
            "code": "class Parser: ...",
            "metadata": {"decorators": ["dataclass"], "parent_class": "Base"}
        }))
        .unwrap();

        let metadata = details.metadata.unwrap();
        assert_eq!(metadata.decorators, Some(vec!["dataclass".to_string()]));
        assert_eq!(metadata.parent_class.as_deref(), Some("Base"));
        assert!(details.context_before.is_none());
    }
}
