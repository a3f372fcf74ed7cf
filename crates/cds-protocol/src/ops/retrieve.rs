//! `retrieve_entity` types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::decode::{DecodeError, Validate};
use crate::request::compact_params;
use crate::types::EntityDetails;

/// Retrieval parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrieveEntityParams {
    pub entity_ids: Vec<String>,
    /// Lines of surrounding context to include.
    pub include_context: Option<u32>,
    pub include_metadata: Option<bool>,
}

impl RetrieveEntityParams {
    pub fn new<I, S>(entity_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entity_ids: entity_ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: &RetrieveEntityOptions) -> Self {
        self.include_context = options.include_context;
        self.include_metadata = options.include_metadata;
        self
    }

    pub fn to_wire(&self) -> Value {
        compact_params([
            ("entity_ids", json!(self.entity_ids)),
            ("include_context", json!(self.include_context)),
            ("include_metadata", json!(self.include_metadata)),
        ])
    }
}

/// Retrieval options without the id list, for single-entity lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrieveEntityOptions {
    pub include_context: Option<u32>,
    pub include_metadata: Option<bool>,
}

/// Retrieval result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieveEntityResult {
    pub entities: Vec<EntityDetails>,
}

impl Validate for RetrieveEntityResult {
    fn validate(&self) -> Result<(), DecodeError> {
        self.entities.validate()
    }
}
