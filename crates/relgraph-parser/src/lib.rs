//! relgraph Parser - Document text and table extraction
//!
//! Turns a document into the flat, line-oriented text the rest of the
//! pipeline consumes:
//! - prose lines of whitespace-joined words
//! - heading lines prefixed with `[HEADER]`
//! - one `[TABLE] [['a','b'],['c','d']]` line per detected table
//!
//! Each parser implements the `DocumentParser` trait and produces
//! a `ParsedDocument` whose `flat_text` feeds entity and relation extraction.

pub mod layout;
pub mod pdf;

pub use layout::{LayoutOptions, HEADER_MARKER, TABLE_MARKER};
pub use pdf::PdfParser;

use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during document parsing
#[derive(Error, Debug)]
pub enum ParserError {
    /// File format is not supported
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// IO error while reading the file
    #[error("IO error reading file: {path}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// PDF parsing error
    #[error("PDF parsing error: {0}")]
    PdfError(String),

    /// File is encrypted and cannot be parsed
    #[error("File is encrypted and requires a password: {0}")]
    EncryptedFile(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;

// ============================================================================
// Parsed Document Types
// ============================================================================

/// A parsed document, page by page
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Original file path
    pub file_path: String,

    /// Detected file type
    pub file_type: FileType,

    /// Extracted pages in reading order
    pub pages: Vec<Page>,

    /// Metadata extracted from the document
    pub metadata: DocumentParseMetadata,
}

impl ParsedDocument {
    /// Create a new parsed document
    pub fn new(file_path: impl Into<String>, file_type: FileType) -> Self {
        Self {
            file_path: file_path.into(),
            file_type,
            pages: Vec::new(),
            metadata: DocumentParseMetadata::default(),
        }
    }

    /// Add a page
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// All tables across pages
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.pages.iter().flat_map(|p| p.tables.iter())
    }

    /// Flatten into the line-oriented text blob
    ///
    /// Per page: its text lines, then one marker line per table.
    pub fn flat_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for page in &self.pages {
            lines.extend(page.lines.iter().cloned());
            for table in &page.tables {
                lines.push(format!("{} {}", page.table_marker, table.serialize()));
            }
        }
        lines.join("\n")
    }

    /// Get total word count (approximate)
    pub fn word_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| p.lines.iter())
            .map(|l| l.split_whitespace().count())
            .sum()
    }
}

/// One page of extracted content
#[derive(Debug, Clone)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Text lines, words joined by single spaces; headings carry the header marker
    pub lines: Vec<String>,

    /// Tables detected on this page
    pub tables: Vec<Table>,

    /// Marker written in front of serialized tables
    pub table_marker: String,
}

impl Page {
    /// Create an empty page
    pub fn new(number: u32) -> Self {
        Self {
            number,
            lines: Vec::new(),
            tables: Vec::new(),
            table_marker: TABLE_MARKER.to_string(),
        }
    }
}

/// Supported file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Markdown,
    PlainText,
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "md" | "markdown" => Self::Markdown,
            "txt" => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Markdown => write!(f, "markdown"),
            Self::PlainText => write!(f, "text"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A table extracted from a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Table rows, cells already sanitized
    pub rows: Vec<Vec<String>>,

    /// Page number where table appears
    pub page: Option<u32>,
}

impl Table {
    /// Create a new table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row, sanitizing every cell
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        self.rows
            .push(row.iter().map(|c| sanitize_cell(c.as_ref())).collect());
    }

    /// Get number of columns
    pub fn num_columns(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Get number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Serialize as a nested list literal: `[['a','b'],['c','d']]`
    pub fn serialize(&self) -> String {
        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|c| format!("'{c}'")).collect();
                format!("[{}]", cells.join(","))
            })
            .collect();
        format!("[{}]", rows.join(","))
    }
}

/// Strip the characters the serialized row grammar reserves
fn sanitize_cell(cell: &str) -> String {
    let cleaned: String = cell
        .chars()
        .map(|c| match c {
            '\'' | ',' | '[' | ']' => ' ',
            other => other,
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Metadata extracted during parsing
#[derive(Debug, Clone, Default)]
pub struct DocumentParseMetadata {
    /// Number of pages
    pub page_count: Option<u32>,
}

// ============================================================================
// Parser Trait
// ============================================================================

/// Trait for document parsers
pub trait DocumentParser: Send + Sync {
    /// Parse a document from a file path
    fn parse(&self, path: &Path) -> Result<ParsedDocument>;

    /// Get supported file types
    fn supported_types(&self) -> &[FileType];

    /// Check if this parser can handle a file type
    fn can_parse(&self, file_type: FileType) -> bool {
        self.supported_types().contains(&file_type)
    }
}

// ============================================================================
// Parser Registry
// ============================================================================

/// Registry of available parsers
pub struct ParserRegistry {
    parsers: Vec<Box<dyn DocumentParser>>,
}

impl ParserRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Registry with the PDF and plain-text parsers sharing one layout
    pub fn with_layout(options: LayoutOptions) -> Self {
        let mut registry = Self::new();
        registry.register(PdfParser::new().with_layout(options.clone()));
        registry.register(PlainTextParser::new().with_layout(options));
        registry
    }

    /// Register a parser
    pub fn register<P: DocumentParser + 'static>(&mut self, parser: P) {
        self.parsers.push(Box::new(parser));
    }

    /// Find a parser for a file type
    pub fn find_parser(&self, file_type: FileType) -> Option<&dyn DocumentParser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(file_type))
            .map(|p| p.as_ref())
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        let file_type = FileType::from_path(path);

        if file_type == FileType::Unknown {
            return Err(ParserError::UnsupportedFormat(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("none")
                    .to_string(),
            ));
        }

        let parser = self
            .find_parser(file_type)
            .ok_or_else(|| ParserError::UnsupportedFormat(file_type.to_string()))?;

        parser.parse(path)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_layout(LayoutOptions::default())
    }
}

// ============================================================================
// Plain Text Parser
// ============================================================================

/// Plain text parser, for text dumps of documents
///
/// Form feeds split pages exactly as in PDF output.
#[derive(Debug, Clone, Default)]
pub struct PlainTextParser {
    layout: LayoutOptions,
}

impl PlainTextParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom layout options
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }
}

impl DocumentParser for PlainTextParser {
    fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        let content = std::fs::read_to_string(path).map_err(|e| ParserError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut doc = ParsedDocument::new(path.display().to_string(), FileType::from_path(path));
        for page in self.layout.split_pages(&content) {
            doc.add_page(page);
        }
        doc.metadata.page_count = Some(doc.pages.len() as u32);
        Ok(doc)
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::PlainText, FileType::Markdown]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("md"), FileType::Markdown);
        assert_eq!(FileType::from_extension("docx"), FileType::Unknown);
        assert_eq!(
            FileType::from_path(Path::new("report.txt")),
            FileType::PlainText
        );
    }

    #[test]
    fn test_table_serialize() {
        let mut table = Table::new();
        table.add_row(&["UNMIK", "KTA"]);
        table.add_row(&["ITF", "PISG"]);

        assert_eq!(table.serialize(), "[['UNMIK','KTA'],['ITF','PISG']]");
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 2);
    }

    #[test]
    fn test_table_cells_sanitized() {
        let mut table = Table::new();
        table.add_row(&["O'Brien, J.", "[draft]"]);
        assert_eq!(table.rows[0], vec!["O Brien J.", "draft"]);
        assert_eq!(table.serialize(), "[['O Brien J.','draft']]");
    }

    #[test]
    fn test_flat_text_appends_tables_per_page() {
        let mut doc = ParsedDocument::new("x.txt", FileType::PlainText);

        let mut first = Page::new(1);
        first.lines.push("UNMIK oversees KTA".to_string());
        let mut table = Table::new();
        table.add_row(&["UNMIK", "KTA"]);
        first.tables.push(table);
        doc.add_page(first);

        let mut second = Page::new(2);
        second.lines.push("Second page".to_string());
        doc.add_page(second);

        assert_eq!(
            doc.flat_text(),
            "UNMIK oversees KTA\n[TABLE] [['UNMIK','KTA']]\nSecond page"
        );
        assert_eq!(doc.word_count(), 5);
        assert_eq!(doc.tables().count(), 1);
    }

    #[test]
    fn test_plain_text_parser() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(
            file,
            "INTRODUCTION\nUNMIK   discusses the mandate.\n\x0CSecond page text"
        )
        .unwrap();

        let registry = ParserRegistry::default();
        let doc = registry.parse(file.path()).unwrap();

        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.metadata.page_count, Some(2));
        assert_eq!(
            doc.flat_text(),
            "[HEADER] INTRODUCTION\nUNMIK discusses the mandate.\nSecond page text"
        );
    }

    #[test]
    fn test_registry_rejects_unknown() {
        let registry = ParserRegistry::default();
        let err = registry.parse(Path::new("notes.docx")).unwrap_err();
        assert!(matches!(err, ParserError::UnsupportedFormat(ext) if ext == "docx"));
    }

    #[test]
    fn test_missing_file_propagates() {
        let registry = ParserRegistry::default();
        let err = registry.parse(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(matches!(err, ParserError::IoError { .. }));
    }
}
