//! Sentence-level relationship extraction
//!
//! Every subject-like token whose head is a verb yields triples
//! `(subject, verb lemma, object)` for each object-like child of that verb.
//! Both ends must fuzzy-match the entity list and must not be a bare
//! pronoun. Heading sentences additionally produce a synthetic
//! `("Document", "discusses", heading)` triple.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::matching::EntityMatcher;
use crate::RelationExtractor;
use relgraph_core::{ConfigError, ExtractionConfig, Relationship, Result};
use relgraph_nlp::{Dep, LanguageModel, Pos};

/// Dependency-parse driven relation extractor
#[derive(Debug, Clone)]
pub struct DependencyRelationExtractor {
    model: Arc<dyn LanguageModel>,
    subject_roles: HashSet<Dep>,
    object_roles: HashSet<Dep>,
    excluded_subjects: HashSet<String>,
    excluded_objects: HashSet<String>,
    cutoff: f64,
    header_marker: String,
    header_subject: String,
    header_predicate: String,
}

fn parse_roles(key: &str, roles: &[String]) -> Result<HashSet<Dep>> {
    roles
        .iter()
        .map(|role| {
            role.parse::<Dep>().map_err(|_| {
                ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: role.clone(),
                }
                .into()
            })
        })
        .collect()
}

fn lowercase_set(items: &[String]) -> HashSet<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

impl DependencyRelationExtractor {
    /// Build an extractor over a shared language model
    pub fn from_config(model: Arc<dyn LanguageModel>, config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            model,
            subject_roles: parse_roles("extraction.subject_roles", &config.subject_roles)?,
            object_roles: parse_roles("extraction.object_roles", &config.object_roles)?,
            excluded_subjects: lowercase_set(&config.excluded_subjects),
            excluded_objects: lowercase_set(&config.excluded_objects),
            cutoff: config.similarity_cutoff,
            header_marker: config.header_marker.clone(),
            header_subject: config.header_subject.clone(),
            header_predicate: config.header_predicate.clone(),
        })
    }

    /// Override the similarity cutoff
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    fn header_relationship(&self, sentence: &str) -> Option<Relationship> {
        if self.header_marker.is_empty() || !sentence.contains(&self.header_marker) {
            return None;
        }
        let heading = sentence.replace(&self.header_marker, "");
        Some(Relationship::new(
            &self.header_subject,
            &self.header_predicate,
            heading.trim(),
        ))
    }
}

impl RelationExtractor for DependencyRelationExtractor {
    fn extract(&self, text: &str, entities: &[String]) -> Result<Vec<Relationship>> {
        let doc = self.model.parse(text);
        let matcher = EntityMatcher::new(entities, self.cutoff);
        let mut relationships = Vec::new();

        for token in &doc.tokens {
            if !self.subject_roles.contains(&token.dep) {
                continue;
            }
            let verb = doc.head(token);
            if verb.pos != Pos::Verb || verb.index == token.index {
                continue;
            }

            let subject = token.text.as_str();
            if self.excluded_subjects.contains(&subject.to_lowercase()) || !matcher.matches(subject) {
                continue;
            }

            for child in doc.children(verb.index) {
                if !self.object_roles.contains(&child.dep) {
                    continue;
                }
                let object = child.text.as_str();
                if self.excluded_objects.contains(&object.to_lowercase()) || !matcher.matches(object) {
                    continue;
                }
                relationships.push(Relationship::new(subject, &verb.lemma, object));
            }
        }

        if let Some(header) = self.header_relationship(text) {
            relationships.push(header);
        }

        if !relationships.is_empty() {
            debug!(count = relationships.len(), "Sentence relationships");
        }
        Ok(relationships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use relgraph_nlp::RuleBasedModel;

    fn extractor() -> DependencyRelationExtractor {
        DependencyRelationExtractor::from_config(
            Arc::new(RuleBasedModel::new()),
            &ExtractionConfig::default(),
        )
        .unwrap()
    }

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_subject_verb_object() {
        let rels = extractor()
            .extract("UNMIK discusses the mandate.", &list(&["UNMIK", "mandate"]))
            .unwrap();
        assert_eq!(rels, vec![Relationship::new("UNMIK", "discuss", "mandate")]);
    }

    #[test]
    fn test_objects_must_match_entities() {
        let rels = extractor()
            .extract("UNMIK discusses the mandate.", &list(&["UNMIK"]))
            .unwrap();
        assert!(rels.is_empty());
    }

    #[test]
    fn test_pronoun_subjects_excluded() {
        let entities = list(&["it", "they", "mandate"]);
        let rels = extractor()
            .extract("It discusses the mandate. They support the mandate.", &entities)
            .unwrap();
        assert!(rels.is_empty());
    }

    #[test]
    fn test_prepositions_are_objects_only_when_matching() {
        let entities = list(&["UNMIK", "assets", "KTA"]);
        let rels = extractor()
            .extract("UNMIK has transferred the assets to KTA.", &entities)
            .unwrap();
        assert_eq!(rels, vec![Relationship::new("UNMIK", "transfer", "assets")]);
    }

    #[test]
    fn test_header_sentence() {
        let rels = extractor().extract("[HEADER] 1. Introduction", &[]).unwrap();
        assert_eq!(
            rels,
            vec![Relationship::new("Document", "discusses", "1. Introduction")]
        );
    }

    #[test]
    fn test_unknown_role_rejected() {
        let mut config = ExtractionConfig::default();
        config.subject_roles.push("subjecty".to_string());
        let err = DependencyRelationExtractor::from_config(Arc::new(RuleBasedModel::new()), &config)
            .unwrap_err();
        assert!(err.to_string().contains("subjecty"));
    }

    proptest! {
        #[test]
        fn prop_relationships_respect_filters(
            words in proptest::collection::vec(
                prop_oneof![
                    Just("UNMIK"), Just("KTA"), Just("it"), Just("that"), Just("they"),
                    Just("manages"), Just("supports"), Just("the"), Just("assets"), Just("of"),
                ],
                1..12,
            )
        ) {
            let sentence = format!("{}.", words.join(" "));
            let entities = list(&["UNMIK", "KTA", "assets", "it", "that", "they"]);
            let rels = extractor().extract(&sentence, &entities).unwrap();
            for rel in rels {
                prop_assert!(!["he", "she", "it", "that", "they"].contains(&rel.subject.to_lowercase().as_str()));
                prop_assert!(!["it", "that"].contains(&rel.object.to_lowercase().as_str()));
                prop_assert!(is_valid(&rel.subject, &entities));
                prop_assert!(is_valid(&rel.object, &entities));
            }
        }
    }

    fn is_valid(candidate: &str, entities: &[String]) -> bool {
        crate::matching::is_valid_entity(candidate, entities, 0.75)
    }
}
