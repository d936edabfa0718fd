//! RelGraph Extractor - Entity and relationship extraction
//!
//! Implements the extraction stages between the language model and the
//! graph:
//! - Entity extraction (named entities, noun chunks, domain acronyms)
//! - Sentence-level relationships from dependency parses
//! - Table-row relationships from serialized `[TABLE]` lines

use relgraph_core::{Relationship, Result};
use relgraph_nlp::{Doc, EntityLabel};
use serde::{Deserialize, Serialize};

pub mod matching;
pub mod ner;
pub mod pipeline;
pub mod relation;
pub mod table;

pub use matching::{is_valid_entity, EntityMatcher};
pub use ner::PolicyEntityExtractor;
pub use pipeline::ExtractionPipeline;
pub use relation::DependencyRelationExtractor;
pub use table::TableRelationExtractor;

/// Where an entity candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityCategory {
    /// Named entity with its model label
    Named(EntityLabel),
    /// Multi-word noun phrase
    NounChunk,
    /// Configured domain acronym
    Acronym,
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(label) => write!(f, "{label}"),
            Self::NounChunk => write!(f, "NOUN_CHUNK"),
            Self::Acronym => write!(f, "ACRONYM"),
        }
    }
}

/// Extracted entity candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntity {
    pub text: String,
    pub category: EntityCategory,
}

/// Trait for entity extractors
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, doc: &Doc) -> Result<Vec<ExtractedEntity>>;
}

/// Trait for relation extractors
pub trait RelationExtractor: Send + Sync {
    fn extract(&self, text: &str, entities: &[String]) -> Result<Vec<Relationship>>;
}
