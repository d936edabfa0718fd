//! Entity extraction policy
//!
//! Candidates come from three sources, merged in this order:
//! - Named entities with an allowed label
//! - Noun chunks of more than one word
//! - Configured acronyms found in the text
//!
//! A later source overrides the category of an existing entry, but every
//! entry keeps the position where it was first seen.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use tracing::debug;

use crate::{EntityCategory, EntityExtractor, ExtractedEntity};
use relgraph_core::{ConfigError, ExtractionConfig, Result};
use relgraph_nlp::{Doc, EntityLabel};

// ============================================================================
// Policy-based Entity Extractor
// ============================================================================

/// Entity extractor driven by the extraction config
#[derive(Debug, Clone)]
pub struct PolicyEntityExtractor {
    allowed: HashSet<EntityLabel>,
    acronym_pattern: Regex,
    acronyms: HashSet<String>,
    /// Configured terms the acronym pattern can never produce ("Pillar IV")
    literal_terms: Vec<Regex>,
    min_length: usize,
}

impl PolicyEntityExtractor {
    /// Build an extractor, validating labels and patterns
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let allowed = config
            .allowed_entity_types
            .iter()
            .map(|label| {
                label.parse::<EntityLabel>().map_err(|_| ConfigError::InvalidValue {
                    key: "extraction.allowed_entity_types".to_string(),
                    value: label.clone(),
                })
            })
            .collect::<std::result::Result<HashSet<_>, _>>()?;

        let acronym_pattern =
            Regex::new(&config.acronym_pattern).map_err(|e| ConfigError::InvalidValue {
                key: "extraction.acronym_pattern".to_string(),
                value: format!("{}: {e}", config.acronym_pattern),
            })?;

        let mut literal_terms = Vec::new();
        for term in &config.custom_acronyms {
            let whole_match = acronym_pattern
                .find(term)
                .is_some_and(|m| m.start() == 0 && m.end() == term.len());
            if !whole_match {
                let pattern = format!(r"\b{}\b", regex::escape(term));
                let regex = Regex::new(&pattern).map_err(|e| ConfigError::InvalidValue {
                    key: "extraction.custom_acronyms".to_string(),
                    value: format!("{term}: {e}"),
                })?;
                literal_terms.push(regex);
            }
        }

        Ok(Self {
            allowed,
            acronym_pattern,
            acronyms: config.custom_acronyms.iter().cloned().collect(),
            literal_terms,
            min_length: config.min_entity_length,
        })
    }

    /// Deduplicated entity strings in first-seen order
    pub fn entity_list(&self, doc: &Doc) -> Result<Vec<String>> {
        Ok(self.extract(doc)?.into_iter().map(|e| e.text).collect())
    }

    fn named(&self, doc: &Doc) -> Vec<ExtractedEntity> {
        doc.ents()
            .filter(|(_, label)| self.allowed.contains(label))
            .map(|(text, label)| ExtractedEntity {
                text: text.trim().to_string(),
                category: EntityCategory::Named(label),
            })
            .collect()
    }

    fn noun_chunks(&self, doc: &Doc) -> Vec<ExtractedEntity> {
        doc.chunks()
            .filter(|chunk| chunk.split_whitespace().count() > 1)
            .map(|chunk| ExtractedEntity {
                text: chunk.trim().to_string(),
                category: EntityCategory::NounChunk,
            })
            .collect()
    }

    fn acronyms(&self, text: &str) -> Vec<ExtractedEntity> {
        let mut found: Vec<(usize, &str)> = self
            .acronym_pattern
            .find_iter(text)
            .filter(|m| self.acronyms.contains(m.as_str()))
            .map(|m| (m.start(), m.as_str()))
            .collect();
        for regex in &self.literal_terms {
            found.extend(regex.find_iter(text).map(|m| (m.start(), m.as_str())));
        }
        found.sort_by_key(|(start, _)| *start);

        found
            .into_iter()
            .map(|(_, text)| ExtractedEntity {
                text: text.to_string(),
                category: EntityCategory::Acronym,
            })
            .collect()
    }

    fn keep(&self, text: &str) -> bool {
        text.chars().count() >= self.min_length && !text.chars().all(char::is_numeric)
    }
}

impl EntityExtractor for PolicyEntityExtractor {
    fn extract(&self, doc: &Doc) -> Result<Vec<ExtractedEntity>> {
        let mut merged: Vec<ExtractedEntity> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        let sources = [self.named(doc), self.noun_chunks(doc), self.acronyms(&doc.text)];
        for entity in sources.into_iter().flatten() {
            match index.get(&entity.text) {
                Some(&i) => merged[i].category = entity.category,
                None => {
                    index.insert(entity.text.clone(), merged.len());
                    merged.push(entity);
                }
            }
        }

        let before = merged.len();
        merged.retain(|e| self.keep(&e.text));
        debug!(candidates = before, kept = merged.len(), "Entities merged");

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use relgraph_nlp::{LanguageModel, RuleBasedModel};

    fn extractor() -> PolicyEntityExtractor {
        PolicyEntityExtractor::from_config(&ExtractionConfig::default()).unwrap()
    }

    fn entities(text: &str) -> Vec<ExtractedEntity> {
        let doc = RuleBasedModel::new().parse(text);
        extractor().extract(&doc).unwrap()
    }

    #[test]
    fn test_merge_order_and_override() {
        let found = entities("UNMIK discusses the mandate with KTA.");
        let texts: Vec<&str> = found.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["UNMIK", "KTA", "the mandate"]);
        // acronyms come last and take over the category
        assert_eq!(found[0].category, EntityCategory::Acronym);
        assert_eq!(found[2].category, EntityCategory::NounChunk);
    }

    #[test]
    fn test_unlisted_acronym_is_not_added() {
        let found = entities("The ABC report was short.");
        assert!(!found
            .iter()
            .any(|e| e.text == "ABC" && e.category == EntityCategory::Acronym));
    }

    #[test]
    fn test_literal_multiword_acronym() {
        let found = entities("Responsibility lies with Pillar IV today.");
        assert!(found
            .iter()
            .any(|e| e.text == "Pillar IV" && e.category == EntityCategory::Acronym));
    }

    #[test]
    fn test_short_and_numeric_entries_dropped() {
        let mut config = ExtractionConfig::default();
        config.custom_acronyms.push("EU".to_string());
        let extractor = PolicyEntityExtractor::from_config(&config).unwrap();
        let doc = RuleBasedModel::new().parse("EU funds reached 2002 projects.");
        let texts = extractor.entity_list(&doc).unwrap();
        assert!(!texts.contains(&"EU".to_string()));
        assert!(!texts.contains(&"2002".to_string()));
    }

    #[test]
    fn test_disallowed_labels_skipped() {
        let mut config = ExtractionConfig::default();
        config.allowed_entity_types = vec!["PERSON".to_string()];
        config.custom_acronyms.clear();
        let extractor = PolicyEntityExtractor::from_config(&config).unwrap();
        let doc = RuleBasedModel::new().parse("Kosovo welcomed Bernard Kouchner.");
        assert_eq!(extractor.entity_list(&doc).unwrap(), vec!["Bernard Kouchner"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ExtractionConfig::default();
        config.acronym_pattern = "([A-Z".to_string();
        assert!(PolicyEntityExtractor::from_config(&config).is_err());

        let mut config = ExtractionConfig::default();
        config.allowed_entity_types = vec!["WIDGET".to_string()];
        assert!(PolicyEntityExtractor::from_config(&config).is_err());
    }

    proptest! {
        #[test]
        fn prop_entities_unique_long_and_not_numeric(text in "[A-Za-z0-9 ,.]{0,160}") {
            let found = entities(&text);
            let mut seen = HashSet::new();
            for entity in &found {
                prop_assert!(seen.insert(entity.text.clone()));
                prop_assert!(entity.text.chars().count() > 2);
                prop_assert!(!entity.text.chars().all(char::is_numeric));
            }
        }
    }
}
