//! PDF document parser using pdf-extract
//!
//! Extracts text content from PDF files, splits it into pages on form
//! feeds and hands each page to the layout heuristics for table and
//! heading detection.

use std::path::Path;

use tracing::debug;

use crate::{DocumentParser, FileType, LayoutOptions, ParsedDocument, ParserError, Result};

/// PDF document parser
#[derive(Debug, Clone, Default)]
pub struct PdfParser {
    layout: LayoutOptions,
}

impl PdfParser {
    /// Create a new PDF parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom layout options
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Enable or disable table extraction
    pub fn with_table_extraction(mut self, enabled: bool) -> Self {
        self.layout.extract_tables = enabled;
        self
    }

    /// Extract text from a PDF file
    fn extract_text(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| ParserError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            let message = e.to_string();
            if message.to_lowercase().contains("encrypt") {
                ParserError::EncryptedFile(path.display().to_string())
            } else {
                ParserError::PdfError(message)
            }
        })
    }
}

impl DocumentParser for PdfParser {
    fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        let text = self.extract_text(path)?;

        let mut doc = ParsedDocument::new(path.display().to_string(), FileType::Pdf);
        let page_count = text.matches('\x0C').count() as u32 + 1;
        for page in self.layout.split_pages(&text) {
            doc.add_page(page);
        }
        doc.metadata.page_count = Some(page_count);

        debug!(
            path = %path.display(),
            pages = page_count,
            tables = doc.tables().count(),
            words = doc.word_count(),
            "PDF parsed"
        );

        Ok(doc)
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::Pdf]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_pdf_parser_creation() {
        let parser = PdfParser::new();
        assert!(parser.layout.extract_tables);

        let parser = parser.with_table_extraction(false);
        assert!(!parser.layout.extract_tables);
    }

    #[test]
    fn test_supported_types() {
        let parser = PdfParser::new();
        assert!(parser.can_parse(FileType::Pdf));
        assert!(!parser.can_parse(FileType::PlainText));
    }

    #[test]
    fn test_missing_file() {
        let err = PdfParser::new()
            .parse(Path::new("/nonexistent/YOUR_PDF_HERE.pdf"))
            .unwrap_err();
        assert!(matches!(err, ParserError::IoError { .. }));
    }

    #[test]
    fn test_corrupt_file() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let result = PdfParser::new().parse(file.path());
        assert!(result.is_err());
    }
}
