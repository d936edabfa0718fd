//! Sentence boundary detection
//!
//! Sentences end at terminal punctuation (absorbing closing quotes and
//! brackets) and at paragraph breaks. A line that starts with a marker
//! such as `[HEADER]` is a sentence of its own, whatever it contains.

use std::ops::Range;

use crate::doc::is_marker;
use crate::tokenizer::RawToken;

fn is_terminal(text: &str) -> bool {
    matches!(text, "." | "!" | "?")
}

fn is_closer(text: &str) -> bool {
    matches!(
        text,
        "\"" | "'" | ")" | "]" | "}" | "\u{201D}" | "\u{2019}"
    )
}

/// Split a token stream into sentence ranges
pub fn split_sentences(tokens: &[RawToken]) -> Vec<Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut in_marker_line = false;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];

        if i > start {
            let boundary = token.paragraph_start
                || is_marker(&token.text)
                || (in_marker_line && token.line_start);
            if boundary {
                sentences.push(start..i);
                start = i;
            }
        }
        if i == start {
            in_marker_line = is_marker(&token.text);
        }

        if !in_marker_line && is_terminal(&token.text) {
            let mut end = i + 1;
            while end < tokens.len()
                && !tokens[end].line_start
                && (is_terminal(&tokens[end].text) || is_closer(&tokens[end].text))
            {
                end += 1;
            }
            sentences.push(start..end);
            start = end;
            i = end;
            continue;
        }

        i += 1;
    }

    if start < tokens.len() {
        sentences.push(start..tokens.len());
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn sentences(text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        split_sentences(&tokens)
            .into_iter()
            .map(|r| text[tokens[r.start].start..tokens[r.end - 1].end].to_string())
            .collect()
    }

    #[test]
    fn test_terminal_punctuation() {
        assert_eq!(
            sentences("UNMIK discusses the mandate. KTA manages assets!"),
            vec!["UNMIK discusses the mandate.", "KTA manages assets!"]
        );
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        assert_eq!(
            sentences("Mr. Smith met the U.S. envoy."),
            vec!["Mr. Smith met the U.S. envoy."]
        );
    }

    #[test]
    fn test_marker_lines() {
        let text = "[HEADER] 1. Introduction\nThe report covers\nthe period. Done.";
        assert_eq!(
            sentences(text),
            vec!["[HEADER] 1. Introduction", "The report covers\nthe period.", "Done."]
        );
    }

    #[test]
    fn test_table_line_is_one_sentence() {
        let text = "Partners are listed.\n[TABLE] [['UNMIK','KTA'],['ITF','PISG']]";
        let sents = sentences(text);
        assert_eq!(sents.len(), 2);
        assert_eq!(sents[1], "[TABLE] [['UNMIK','KTA'],['ITF','PISG']]");
    }

    #[test]
    fn test_paragraph_break() {
        assert_eq!(
            sentences("no period here\n\nnext paragraph"),
            vec!["no period here", "next paragraph"]
        );
    }

    #[test]
    fn test_closing_quote_absorbed() {
        assert_eq!(sentences("He said \"yes.\" Then"), vec!["He said \"yes.\"", "Then"]);
    }
}
