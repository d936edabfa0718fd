//! Extraction pipeline
//!
//! Runs the language model once over the whole text for entities, then
//! re-parses each sentence for relationships and finally scans the table
//! lines. Sentence relationships come first, table relationships last.

use std::sync::Arc;

use tracing::info;

use crate::ner::PolicyEntityExtractor;
use crate::relation::DependencyRelationExtractor;
use crate::table::TableRelationExtractor;
use crate::RelationExtractor;
use relgraph_core::{ExtractionConfig, Extraction, Result};
use relgraph_nlp::LanguageModel;

/// Full text-to-triples pipeline
#[derive(Debug, Clone)]
pub struct ExtractionPipeline {
    entities: PolicyEntityExtractor,
    sentences: DependencyRelationExtractor,
    tables: TableRelationExtractor,
    model: Arc<dyn LanguageModel>,
}

impl ExtractionPipeline {
    /// Build every stage from configuration
    pub fn new(model: Arc<dyn LanguageModel>, config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            entities: PolicyEntityExtractor::from_config(config)?,
            sentences: DependencyRelationExtractor::from_config(Arc::clone(&model), config)?,
            tables: TableRelationExtractor::from_config(config),
            model,
        })
    }

    /// Extract entities and relationships from flattened document text
    pub fn run(&self, text: &str) -> Result<Extraction> {
        let doc = self.model.parse(text);
        info!(
            model = self.model.name(),
            sentences = doc.sentences.len(),
            "Document annotated"
        );

        let entities = self.entities.entity_list(&doc)?;
        info!(count = entities.len(), "Entities extracted");

        let mut relationships = Vec::new();
        for sentence in doc.sents() {
            relationships.extend(self.sentences.extract(sentence, &entities)?);
        }
        let sentence_count = relationships.len();

        relationships.extend(self.tables.extract(text, &entities)?);
        info!(
            sentence = sentence_count,
            table = relationships.len() - sentence_count,
            "Relationships extracted"
        );

        Ok(Extraction {
            entities,
            relationships,
        })
    }
}
