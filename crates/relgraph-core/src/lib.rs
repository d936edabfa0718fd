//! relgraph Core - Shared types, errors and configuration
//!
//! This crate defines the pieces every stage of the pipeline agrees on:
//! - Common error types
//! - The relationship triple and the final extraction result
//! - Configuration management (TOML files + environment overrides)

pub mod config;

pub use config::{
    AppConfig, ConfigError, ExtractionConfig, InputConfig, LoggingConfig, NlpConfig,
    OutputFormat, ParserConfig, VisualizationConfig,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for relgraph operations
#[derive(Error, Debug)]
pub enum RelGraphError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Language model error: {0}")]
    Nlp(String),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("IO error at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RelGraphError>;

// ============================================================================
// Relationships
// ============================================================================

/// A relationship triple (Subject, Predicate, Object)
///
/// Triples carry plain surface strings. Nothing enforces uniqueness; the
/// pipeline keeps them in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Relationship {
    /// Create a new relationship
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Borrow the triple as a tuple of string slices
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.subject, &self.predicate, &self.object)
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:?}, {:?}, {:?})",
            self.subject, self.predicate, self.object
        )
    }
}

impl<S, P, O> From<(S, P, O)> for Relationship
where
    S: Into<String>,
    P: Into<String>,
    O: Into<String>,
{
    fn from((subject, predicate, object): (S, P, O)) -> Self {
        Self::new(subject, predicate, object)
    }
}

// ============================================================================
// Extraction Result
// ============================================================================

/// Everything one pipeline run produces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    /// Deduplicated entity surface strings, first-seen order
    pub entities: Vec<String>,

    /// Relationships in discovery order (sentence-level first, then tables)
    pub relationships: Vec<Relationship>,
}

impl Extraction {
    /// Create an empty extraction
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the entity block the way the console report prints it
    pub fn entity_listing(&self) -> String {
        format!("{:?}", self.entities)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_display() {
        let rel = Relationship::new("UNMIK", "discuss", "mandate");
        assert_eq!(rel.to_string(), r#"("UNMIK", "discuss", "mandate")"#);
    }

    #[test]
    fn test_relationship_from_tuple() {
        let rel: Relationship = ("ITF", "is associated with", "PISG").into();
        assert_eq!(rel.as_tuple(), ("ITF", "is associated with", "PISG"));
    }

    #[test]
    fn test_extraction_serializes() {
        let extraction = Extraction {
            entities: vec!["UNMIK".to_string()],
            relationships: vec![Relationship::new("UNMIK", "run", "KTA")],
        };
        let json = serde_json::to_value(&extraction).unwrap();
        assert_eq!(json["entities"][0], "UNMIK");
        assert_eq!(json["relationships"][0]["predicate"], "run");
        assert_eq!(extraction.entity_listing(), r#"["UNMIK"]"#);
    }

    #[test]
    fn test_config_error_converts() {
        let err: RelGraphError = ConfigError::InvalidValue {
            key: "k".to_string(),
            value: "v".to_string(),
        }
        .into();
        assert!(err.to_string().contains("Invalid value for k"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;
        let err = RelGraphError::Io {
            path: "graph.html".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "IO error at graph.html");
        assert!(err.source().is_some());
    }
}
