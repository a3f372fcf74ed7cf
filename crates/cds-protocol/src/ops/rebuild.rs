//! `rebuild_index` types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::decode::{check_non_negative, DecodeError, Validate};
use crate::request::compact_params;

/// Source languages the indexer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    TypeScript,
    JavaScript,
    Rust,
}

/// Rebuild parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RebuildIndexParams {
    pub repo_path: String,
    pub languages: Option<Vec<Language>>,
    pub incremental: Option<bool>,
    pub output_path: Option<String>,
}

impl RebuildIndexParams {
    pub fn new(repo_path: impl Into<String>) -> Self {
        Self {
            repo_path: repo_path.into(),
            ..Default::default()
        }
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = Some(languages);
        self
    }

    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = Some(incremental);
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<String>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    pub fn to_wire(&self) -> Value {
        compact_params([
            ("repo_path", json!(self.repo_path)),
            ("languages", json!(self.languages)),
            ("incremental", json!(self.incremental)),
            ("output_path", json!(self.output_path)),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    pub directories: u64,
    pub files: u64,
    pub classes: u64,
    pub functions: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCounts {
    pub contain: u64,
    pub import: u64,
    pub invoke: u64,
    pub inherit: u64,
}

/// Index build counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebuildStats {
    pub files_indexed: u64,
    pub entities_found: EntityCounts,
    pub edges_created: EdgeCounts,
    pub build_time_ms: f64,
}

/// A file the indexer could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildError {
    pub file_path: String,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Rebuild result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebuildIndexResult {
    pub success: bool,
    pub stats: RebuildStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<RebuildError>>,
}

impl Validate for RebuildIndexResult {
    fn validate(&self) -> Result<(), DecodeError> {
        check_non_negative("stats.build_time_ms", self.stats.build_time_ms)
    }
}
