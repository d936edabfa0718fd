//! relgraph Configuration Management
//!
//! Handles configuration from TOML files and environment variables with
//! defaults that reproduce the stock pipeline behaviour. Every magic constant
//! the pipeline uses (entity allow-list, acronym set, pronoun filters,
//! dependency roles, similarity cutoff, layout parameters) lives here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Input document
    pub input: InputConfig,

    /// Text/table extraction
    pub parser: ParserConfig,

    /// Language model
    pub nlp: NlpConfig,

    /// Entity and relationship extraction
    pub extraction: ExtractionConfig,

    /// Graph rendering
    pub visualization: VisualizationConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError { path, message },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the types alone do not enforce
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cutoff = self.extraction.similarity_cutoff;
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(ConfigError::InvalidValue {
                key: "extraction.similarity_cutoff".to_string(),
                value: cutoff.to_string(),
            });
        }
        Ok(())
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        self.apply_env()?;
        Ok(self)
    }

    /// Serialize the effective configuration back to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        // Input
        if let Some(path) = var("RELGRAPH_PDF_PATH") {
            self.input.pdf_path = PathBuf::from(path);
        }

        // Visualization
        if let Some(output) = var("RELGRAPH_OUTPUT") {
            self.visualization.output_path = PathBuf::from(output);
        }
        if let Some(format) = var("RELGRAPH_FORMAT") {
            self.visualization.format = Some(format.parse()?);
        }
        if let Some(source) = var("RELGRAPH_PLOTLY_JS") {
            self.visualization.plotly_js = source;
        }

        // Extraction
        if let Some(cutoff) = var("RELGRAPH_SIMILARITY_CUTOFF") {
            let parsed: f64 = cutoff.parse().map_err(|_| ConfigError::InvalidValue {
                key: "RELGRAPH_SIMILARITY_CUTOFF".to_string(),
                value: cutoff.clone(),
            })?;
            self.extraction.similarity_cutoff = parsed;
        }

        // Acronyms from environment variable (comma-separated)
        if let Some(acronyms) = var("RELGRAPH_ACRONYMS") {
            self.extraction.custom_acronyms = acronyms
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Language model
        if let Some(path) = var("RELGRAPH_GAZETTEER") {
            self.nlp.gazetteer_path = Some(PathBuf::from(path));
        }

        // Logging
        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level;
        }

        self.validate()
    }
}

/// Input document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Document to process when none is given on the command line
    pub pdf_path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pdf_path: PathBuf::from("YOUR_PDF_HERE.pdf"),
        }
    }
}

/// Text/table extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Detect aligned-column tables and emit `[TABLE]` lines
    pub extract_tables: bool,

    /// Prefix heading-like lines with `[HEADER]`
    pub mark_headers: bool,

    /// Minimum run of spaces separating two table cells
    pub column_gap: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            extract_tables: true,
            mark_headers: true,
            column_gap: 2,
        }
    }
}

/// Language model configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NlpConfig {
    /// Extra gazetteer entries (TOML: label -> list of names)
    pub gazetteer_path: Option<PathBuf>,
}

/// Entity and relationship extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Named-entity labels kept as entities
    pub allowed_entity_types: Vec<String>,

    /// Domain acronyms recognised verbatim
    pub custom_acronyms: Vec<String>,

    /// Pattern acronym candidates must match
    pub acronym_pattern: String,

    /// Entities shorter than this (in characters) are dropped
    pub min_entity_length: usize,

    /// Minimum similarity ratio for an entity-list match
    pub similarity_cutoff: f64,

    /// Dependency roles treated as subjects
    pub subject_roles: Vec<String>,

    /// Dependency roles treated as objects
    pub object_roles: Vec<String>,

    /// Subjects rejected regardless of matching (lowercase)
    pub excluded_subjects: Vec<String>,

    /// Objects rejected regardless of matching (lowercase)
    pub excluded_objects: Vec<String>,

    /// Marker tagging a heading sentence
    pub header_marker: String,

    /// Subject of the synthetic heading relationship
    pub header_subject: String,

    /// Predicate of the synthetic heading relationship
    pub header_predicate: String,

    /// Marker tagging a serialized table line
    pub table_marker: String,

    /// Predicate linking the first two columns of a table row
    pub table_predicate: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            allowed_entity_types: to_strings(&[
                "PERSON", "ORG", "GPE", "LOC", "PRODUCT", "NORP", "FACILITY", "LAW",
            ]),
            custom_acronyms: to_strings(&[
                "ATCS",
                "UNMIK",
                "KTA",
                "ITF",
                "PEAP",
                "PISG",
                "DSA",
                "Pillar IV",
            ]),
            acronym_pattern: r"\b[A-Z]{2,5}\b".to_string(),
            min_entity_length: 3,
            similarity_cutoff: 0.75,
            subject_roles: to_strings(&["nsubj", "nsubjpass", "agent", "nmod", "acl", "advcl"]),
            object_roles: to_strings(&["dobj", "pobj", "attr", "prep"]),
            excluded_subjects: to_strings(&["he", "she", "it", "that", "they"]),
            excluded_objects: to_strings(&["it", "that"]),
            header_marker: "[HEADER]".to_string(),
            header_subject: "Document".to_string(),
            header_predicate: "discusses".to_string(),
            table_marker: "[TABLE]".to_string(),
            table_predicate: "is associated with".to_string(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Graph rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    /// Where the rendered graph is written
    pub output_path: PathBuf,

    /// Explicit output format; inferred from the extension when unset
    pub format: Option<OutputFormat>,

    /// Figure title
    pub title: String,

    /// Seed for the initial layout positions
    pub seed: u64,

    /// Optimal node distance for the spring layout
    pub spring_k: f64,

    /// Spring layout iterations
    pub iterations: usize,

    /// Static render width in pixels
    pub width: u32,

    /// Static render height in pixels
    pub height: u32,

    /// Node fill colour
    pub node_color: String,

    /// Edge line colour
    pub edge_color: String,

    /// Edge label colour
    pub label_color: String,

    /// plotly.js for HTML output: a URL is referenced, a local file is inlined
    pub plotly_js: String,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("relationship_graph.html"),
            format: None,
            title: "Enhanced Entity Relationship Network".to_string(),
            seed: 42,
            spring_k: 0.8,
            iterations: 50,
            width: 1200,
            height: 900,
            node_color: "#6175c1".to_string(),
            edge_color: "#888".to_string(),
            label_color: "red".to_string(),
            plotly_js: "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string(),
        }
    }
}

impl VisualizationConfig {
    /// Format to render: explicit setting first, then the output extension
    pub fn resolved_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::from_path(&self.output_path))
    }
}

/// Supported render targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Interactive Plotly page
    Html,
    Svg,
    Png,
}

impl OutputFormat {
    /// Detect format from a file extension, defaulting to HTML
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or(Self::Html)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(ConfigError::InvalidValue {
                key: "format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Svg => write!(f, "svg"),
            Self::Png => write!(f, "png"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.input.pdf_path, PathBuf::from("YOUR_PDF_HERE.pdf"));
        assert_eq!(config.extraction.similarity_cutoff, 0.75);
        assert_eq!(config.extraction.allowed_entity_types.len(), 8);
        assert!(config
            .extraction
            .custom_acronyms
            .contains(&"Pillar IV".to_string()));
        assert_eq!(config.visualization.seed, 42);
        assert_eq!(config.visualization.resolved_format(), OutputFormat::Html);
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [extraction]
            similarity_cutoff = 0.9
            custom_acronyms = ["NATO"]

            [visualization]
            output_path = "graph.svg"
            "#,
        )
        .unwrap();

        assert_eq!(config.extraction.similarity_cutoff, 0.9);
        assert_eq!(config.extraction.custom_acronyms, vec!["NATO".to_string()]);
        // Untouched fields keep their defaults
        assert_eq!(config.extraction.table_predicate, "is associated with");
        assert_eq!(config.visualization.resolved_format(), OutputFormat::Svg);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_from_file_errors() {
        let missing = AppConfig::from_file("/nonexistent/relgraph.toml");
        assert!(matches!(missing, Err(ConfigError::FileReadError { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging\nlevel = ").unwrap();
        match AppConfig::from_file(file.path()) {
            Err(ConfigError::ParseError { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_vars(vars(&[
                ("RELGRAPH_PDF_PATH", "report.pdf"),
                ("RELGRAPH_ACRONYMS", "NATO, OSCE,,"),
                ("RELGRAPH_FORMAT", "png"),
                ("RELGRAPH_SIMILARITY_CUTOFF", "0.8"),
                ("RELGRAPH_PLOTLY_JS", "vendor/plotly.min.js"),
            ]))
            .unwrap();

        assert_eq!(config.input.pdf_path, PathBuf::from("report.pdf"));
        assert_eq!(
            config.extraction.custom_acronyms,
            vec!["NATO".to_string(), "OSCE".to_string()]
        );
        assert_eq!(config.visualization.resolved_format(), OutputFormat::Png);
        assert_eq!(config.extraction.similarity_cutoff, 0.8);
        assert_eq!(config.visualization.plotly_js, "vendor/plotly.min.js");
    }

    #[test]
    fn test_env_invalid_values() {
        let mut config = AppConfig::default();
        assert!(config
            .apply_vars(vars(&[("RELGRAPH_SIMILARITY_CUTOFF", "high")]))
            .is_err());
        assert!(config
            .apply_vars(vars(&[("RELGRAPH_SIMILARITY_CUTOFF", "1.5")]))
            .is_err());
        assert!(config.apply_vars(vars(&[("RELGRAPH_FORMAT", "gif")])).is_err());
    }

    #[test]
    fn test_toml_cutoff_out_of_range() {
        let result = AppConfig::from_toml_str("[extraction]\nsimilarity_cutoff = 2.0\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "extraction.similarity_cutoff"
        ));
        assert!(AppConfig::from_toml_str("[extraction]\nsimilarity_cutoff = 1.0\n").is_ok());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert!("pdf".parse::<OutputFormat>().is_err());
        assert_eq!(
            OutputFormat::from_path(Path::new("out/graph.PNG")),
            OutputFormat::Png
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("graph")),
            OutputFormat::Html
        );
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let text = AppConfig::default().to_toml_string().unwrap();
        let parsed = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(
            parsed.extraction.subject_roles,
            AppConfig::default().extraction.subject_roles
        );
    }
}
