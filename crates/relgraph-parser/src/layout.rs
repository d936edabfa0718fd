//! Page layout heuristics
//!
//! Extracted PDF text arrives as raw lines. This module normalizes them,
//! detects aligned-column tables and tags heading-like lines.

use crate::{Page, Table};

/// Marker prefixed to serialized table lines
pub const TABLE_MARKER: &str = "[TABLE]";

/// Marker prefixed to heading lines
pub const HEADER_MARKER: &str = "[HEADER]";

/// Options controlling how raw page text is laid out
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Detect tables from aligned columns
    pub extract_tables: bool,

    /// Prefix heading-like lines with the header marker
    pub mark_headers: bool,

    /// Minimum run of spaces that separates two cells
    pub column_gap: usize,

    /// Marker for serialized tables
    pub table_marker: String,

    /// Marker for headings
    pub header_marker: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            extract_tables: true,
            mark_headers: true,
            column_gap: 2,
            table_marker: TABLE_MARKER.to_string(),
            header_marker: HEADER_MARKER.to_string(),
        }
    }
}

impl LayoutOptions {
    /// Split text on form feeds and lay out each page
    pub fn split_pages(&self, text: &str) -> Vec<Page> {
        text.split('\x0C')
            .enumerate()
            .map(|(i, page_text)| self.layout_page(i as u32 + 1, page_text))
            .filter(|page| !page.lines.is_empty() || !page.tables.is_empty())
            .collect()
    }

    /// Lay out a single page of raw text
    pub fn layout_page(&self, number: u32, text: &str) -> Page {
        let raw_lines: Vec<&str> = text.lines().collect();
        let mut page = Page::new(number);
        page.table_marker = self.table_marker.clone();

        let mut in_table = vec![false; raw_lines.len()];
        if self.extract_tables {
            for (start, end) in self.find_table_runs(&raw_lines) {
                let mut table = Table::new();
                table.page = Some(number);
                for (idx, line) in raw_lines.iter().enumerate().take(end).skip(start) {
                    table.add_row(&split_cells(line, self.column_gap));
                    in_table[idx] = true;
                }
                page.tables.push(table);
            }
        }

        for (idx, line) in raw_lines.iter().enumerate() {
            let normalized = line.split_whitespace().collect::<Vec<_>>().join(" ");
            if normalized.is_empty() {
                continue;
            }

            if self.mark_headers && !in_table[idx] && is_potential_header(&normalized) {
                page.lines
                    .push(format!("{} {}", self.header_marker, normalized));
            } else {
                page.lines.push(normalized);
            }
        }

        page
    }

    /// Runs of at least two consecutive lines sharing a cell count of 2+
    fn find_table_runs(&self, lines: &[&str]) -> Vec<(usize, usize)> {
        let counts: Vec<usize> = lines
            .iter()
            .map(|l| split_cells(l, self.column_gap).len())
            .collect();

        let mut runs = Vec::new();
        let mut start = 0;
        while start < counts.len() {
            let width = counts[start];
            if width < 2 {
                start += 1;
                continue;
            }

            let mut end = start + 1;
            while end < counts.len() && counts[end] == width {
                end += 1;
            }

            if end - start >= 2 {
                runs.push((start, end));
            }
            start = end;
        }
        runs
    }
}

/// Split a raw line into cells on tabs or runs of `gap`+ spaces
pub fn split_cells(line: &str, gap: usize) -> Vec<String> {
    let gap = gap.max(1);
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut spaces = 0usize;

    let flush = |current: &mut String, cells: &mut Vec<String>| {
        let cell = current.trim();
        if !cell.is_empty() {
            cells.push(cell.to_string());
        }
        current.clear();
    };

    for c in line.chars() {
        match c {
            '\t' => {
                flush(&mut current, &mut cells);
                spaces = 0;
            }
            ' ' => {
                spaces += 1;
                if spaces == gap {
                    flush(&mut current, &mut cells);
                } else if spaces < gap {
                    current.push(' ');
                }
            }
            other => {
                spaces = 0;
                current.push(other);
            }
        }
    }
    flush(&mut current, &mut cells);

    cells
}

/// Check if a normalized line might be a section heading
pub fn is_potential_header(line: &str) -> bool {
    let trimmed = line.trim();

    if trimmed.is_empty() || trimmed.chars().count() > 100 {
        return false;
    }
    if trimmed.split_whitespace().count() > 12 {
        return false;
    }

    // Numbered sections (e.g., "1. Introduction", "2.3 Scope")
    let numbered = {
        let mut words = trimmed.split_whitespace();
        let first = words.next().unwrap_or_default();
        let second = words.next().unwrap_or_default();
        first.chars().next().is_some_and(|c| c.is_ascii_digit())
            && first.chars().all(|c| c.is_ascii_digit() || c == '.')
            && second.chars().next().is_some_and(|c| c.is_uppercase())
    };

    let keyword = ["Chapter ", "CHAPTER ", "Section ", "SECTION ", "Annex ", "ANNEX "]
        .iter()
        .any(|k| trimmed.starts_with(k));

    // All caps (common in headers); a lone word must be longer than an acronym
    let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
    let min_letters = if trimmed.contains(' ') { 4 } else { 6 };
    let all_caps = letters.len() >= min_letters && letters.iter().all(|c| c.is_uppercase());

    numbered || keyword || all_caps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_cells() {
        assert_eq!(split_cells("UNMIK   KTA", 2), vec!["UNMIK", "KTA"]);
        assert_eq!(split_cells("Kosovo Trust Agency\tKTA", 2), vec!["Kosovo Trust Agency", "KTA"]);
        assert_eq!(split_cells("single spaced words", 2), vec!["single spaced words"]);
        assert!(split_cells("   ", 2).is_empty());
    }

    #[test]
    fn test_header_detection() {
        assert!(is_potential_header("1. Introduction"));
        assert!(is_potential_header("2.3 Scope of Work"));
        assert!(is_potential_header("EXECUTIVE SUMMARY"));
        assert!(is_potential_header("Chapter 4 Findings"));
        assert!(!is_potential_header("UNMIK"));
        assert!(!is_potential_header("2019 budget was approved by the board."));
        assert!(!is_potential_header("This is a normal paragraph."));
        assert!(!is_potential_header(""));
    }

    #[test]
    fn test_layout_detects_table() {
        let text = "Partners overview\nUNMIK    KTA\nITF    PISG\nClosing remarks here";
        let page = LayoutOptions::default().layout_page(3, text);

        assert_eq!(page.tables.len(), 1);
        assert_eq!(page.tables[0].serialize(), "[['UNMIK','KTA'],['ITF','PISG']]");
        assert_eq!(page.tables[0].page, Some(3));
        // Table words stay in the prose stream as well
        assert_eq!(page.lines[1], "UNMIK KTA");
    }

    #[test]
    fn test_single_aligned_line_is_not_table() {
        let page = LayoutOptions::default().layout_page(1, "Name    Role\nplain prose");
        assert!(page.tables.is_empty());
    }

    #[test]
    fn test_tables_can_be_disabled() {
        let options = LayoutOptions {
            extract_tables: false,
            ..Default::default()
        };
        let page = options.layout_page(1, "A1    B1\nA2    B2");
        assert!(page.tables.is_empty());
        assert_eq!(page.lines.len(), 2);
    }

    #[test]
    fn test_header_marking() {
        let page = LayoutOptions::default().layout_page(1, "1. Scope\nUNMIK   discusses the mandate.");
        assert_eq!(page.lines[0], "[HEADER] 1. Scope");
        assert_eq!(page.lines[1], "UNMIK discusses the mandate.");

        let options = LayoutOptions {
            mark_headers: false,
            ..Default::default()
        };
        let page = options.layout_page(1, "1. Scope");
        assert_eq!(page.lines[0], "1. Scope");
    }

    #[test]
    fn test_split_pages_skips_blank_pages() {
        let pages = LayoutOptions::default().split_pages("first\x0C\x0C  \x0Cthird");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[1].number, 4);
    }
}
