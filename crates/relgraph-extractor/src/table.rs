//! Table-row relationship extraction
//!
//! Serialized tables look like `[TABLE] [['a','b'],['c','d']]`. The first
//! two columns of each row are linked by a fixed predicate when both
//! fuzzy-match the entity list. Rows that do not split into two columns
//! are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::matching::EntityMatcher;
use crate::RelationExtractor;
use relgraph_core::{ExtractionConfig, Relationship, Result};

static ROW_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\]\s*,\s*\[").unwrap());

/// Extracts `(col0, predicate, col1)` triples from `[TABLE]` lines
#[derive(Debug, Clone)]
pub struct TableRelationExtractor {
    marker: String,
    predicate: String,
    cutoff: f64,
}

impl TableRelationExtractor {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            marker: config.table_marker.clone(),
            predicate: config.table_predicate.clone(),
            cutoff: config.similarity_cutoff,
        }
    }

    /// Split one table dump into rows of cleaned columns
    ///
    /// Both the compact `[['a','b'],['c','d']]` form and the spaced
    /// `[['a', 'b'], ['c', 'd']]` form split into the same rows.
    pub fn rows(table: &str) -> Vec<Vec<String>> {
        ROW_SEPARATOR
            .split(table)
            .map(|row| {
                row.trim()
                    .trim_matches(|c| c == '[' || c == ']')
                    .split(',')
                    .map(|col| {
                        col.trim_matches(|c: char| {
                            c == '\'' || c == '[' || c == ']' || c.is_whitespace()
                        })
                        .to_string()
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for TableRelationExtractor {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl RelationExtractor for TableRelationExtractor {
    fn extract(&self, text: &str, entities: &[String]) -> Result<Vec<Relationship>> {
        let matcher = EntityMatcher::new(entities, self.cutoff);
        let mut relationships = Vec::new();

        for line in text.lines().filter(|l| l.contains(&self.marker)) {
            let table = line.replace(&self.marker, "");
            for row in Self::rows(table.trim()) {
                let [subject, object, ..] = row.as_slice() else {
                    debug!(row = ?row, "Skipping table row without two columns");
                    continue;
                };
                if matcher.matches(subject) && matcher.matches(object) {
                    relationships.push(Relationship::new(subject, &self.predicate, object));
                }
            }
        }

        Ok(relationships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_table_rows() {
        let entities = list(&["UNMIK", "KTA", "ITF", "PISG"]);
        let rels = TableRelationExtractor::default()
            .extract("[TABLE] [['UNMIK','KTA'],['ITF','PISG']]", &entities)
            .unwrap();
        assert_eq!(
            rels,
            vec![
                Relationship::new("UNMIK", "is associated with", "KTA"),
                Relationship::new("ITF", "is associated with", "PISG"),
            ]
        );
    }

    #[test]
    fn test_spaced_table_rows() {
        let entities = list(&["UNMIK", "KTA", "ITF", "PISG"]);
        let rels = TableRelationExtractor::default()
            .extract("[TABLE] [['UNMIK', 'KTA'], ['ITF', 'PISG']]", &entities)
            .unwrap();
        assert_eq!(
            rels,
            vec![
                Relationship::new("UNMIK", "is associated with", "KTA"),
                Relationship::new("ITF", "is associated with", "PISG"),
            ]
        );
        assert!(rels.iter().all(|r| !r.object.contains(']')));
    }

    #[test]
    fn test_spaced_rows_split_cleanly() {
        let rows = TableRelationExtractor::rows("[['UNMIK', 'KTA'] , [ 'ITF' ,'PISG' ]]");
        assert_eq!(rows, vec![list(&["UNMIK", "KTA"]), list(&["ITF", "PISG"])]);
    }

    #[test]
    fn test_row_split_and_cleanup() {
        let rows = TableRelationExtractor::rows("[['UNMIK', 'KTA', 'x'],['solo']]");
        assert_eq!(rows[0], vec!["UNMIK", "KTA", "x"]);
        assert_eq!(rows[1], vec!["solo"]);
    }

    #[test]
    fn test_short_rows_and_unmatched_cells_skipped() {
        let entities = list(&["UNMIK", "KTA"]);
        let text = "Intro line\n[TABLE] [['UNMIK'],['UNMIK','Budget'],['UNMIK','KTA']]";
        let rels = TableRelationExtractor::default().extract(text, &entities).unwrap();
        assert_eq!(rels, vec![Relationship::new("UNMIK", "is associated with", "KTA")]);
    }

    #[test]
    fn test_lines_without_marker_ignored() {
        let entities = list(&["UNMIK", "KTA"]);
        let rels = TableRelationExtractor::default()
            .extract("[['UNMIK','KTA']]", &entities)
            .unwrap();
        assert!(rels.is_empty());
    }

    proptest! {
        #[test]
        fn prop_single_column_rows_yield_nothing(cells in proptest::collection::vec("[A-Z]{2,5}", 1..6)) {
            let rows: Vec<String> = cells.iter().map(|c| format!("['{c}']")).collect();
            let text = format!("[TABLE] [{}]", rows.join(","));
            let rels = TableRelationExtractor::default().extract(&text, &cells).unwrap();
            prop_assert!(rels.is_empty());
        }
    }
}
