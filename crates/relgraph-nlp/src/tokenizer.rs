//! Whitespace and punctuation tokenizer
//!
//! Words keep internal hyphens, apostrophes, slashes and ampersands,
//! dotted abbreviations ("U.S.") and digit groups ("1,000", "2.5").
//! English clitics ("n't", "'s", "'ll", ...) become tokens of their own,
//! as do bracketed markers like `[TABLE]`.

use crate::lexicon::ABBREVIATIONS;

/// A token before annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub line_start: bool,
    pub paragraph_start: bool,
}

const CLITICS: &[&str] = &["s", "re", "ve", "ll", "d", "m"];

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Split text into raw tokens with byte offsets
pub fn tokenize(text: &str) -> Vec<RawToken> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |idx: usize| chars.get(idx).map_or(text.len(), |(b, _)| *b);

    let mut tokens = Vec::new();
    let mut newlines = 0usize;
    let mut first = true;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i].1;
        if c.is_whitespace() {
            if c == '\n' {
                newlines += 1;
            }
            i += 1;
            continue;
        }

        let end = if let Some(end) = scan_marker(&chars, i) {
            end
        } else if c.is_alphanumeric() {
            scan_word(text, &chars, i)
        } else {
            i + 1
        };

        let start_byte = byte_at(i);
        let end_byte = byte_at(end);
        let line_start = first || newlines > 0;
        let paragraph_start = first || newlines > 1;

        for (k, (s, e)) in split_clitic(&text[start_byte..end_byte])
            .into_iter()
            .enumerate()
        {
            tokens.push(RawToken {
                text: text[start_byte + s..start_byte + e].to_string(),
                start: start_byte + s,
                end: start_byte + e,
                line_start: line_start && k == 0,
                paragraph_start: paragraph_start && k == 0,
            });
        }

        newlines = 0;
        first = false;
        i = end;
    }

    tokens
}

/// `[UPPER_CASE]` markers
fn scan_marker(chars: &[(usize, char)], i: usize) -> Option<usize> {
    if chars[i].1 != '[' {
        return None;
    }
    let mut j = i + 1;
    while j < chars.len() && (chars[j].1.is_ascii_uppercase() || chars[j].1 == '_') {
        j += 1;
    }
    (j > i + 1 && j < chars.len() && chars[j].1 == ']').then_some(j + 1)
}

fn scan_word(text: &str, chars: &[(usize, char)], i: usize) -> usize {
    let at = |idx: usize| chars.get(idx).map(|(_, c)| *c);
    let mut j = i + 1;
    let mut segment = 1usize;

    while let Some(c) = at(j) {
        if c.is_alphanumeric() {
            segment += 1;
            j += 1;
            continue;
        }

        let prev = chars[j - 1].1;
        let next = at(j + 1);
        let next_alpha = next.is_some_and(|n| n.is_alphabetic());
        let next_digit = next.is_some_and(|n| n.is_ascii_digit());
        let joins = match c {
            '-' | '&' | '/' => prev.is_alphanumeric() && next.is_some_and(|n| n.is_alphanumeric()),
            c if is_apostrophe(c) => prev.is_alphabetic() && next_alpha,
            '.' => {
                (segment == 1 && prev.is_alphabetic() && next_alpha)
                    || (prev.is_ascii_digit() && next_digit)
            }
            ',' => {
                prev.is_ascii_digit()
                    && (j + 1..j + 4).all(|k| at(k).is_some_and(|d| d.is_ascii_digit()))
                    && !at(j + 4).is_some_and(|d| d.is_ascii_digit())
            }
            _ => false,
        };
        if !joins {
            break;
        }
        j += 2;
        segment = 1;
    }

    // Abbreviations keep their period
    if at(j) == Some('.') {
        let start = chars[i].0;
        let end = chars[j].0;
        let word = text[start..end].to_lowercase();
        let next_digit = chars[j + 1..]
            .iter()
            .find(|(_, c)| !c.is_whitespace())
            .is_some_and(|(_, c)| c.is_ascii_digit());
        let initial = word.chars().count() == 1 && chars[i].1.is_uppercase();
        let dotted = word.contains('.');
        let abbreviation = ABBREVIATIONS.contains(word.as_str()) && (word != "no" || next_digit);
        if initial || dotted || abbreviation {
            j += 1;
        }
    }

    j
}

/// Byte ranges of a word split before any trailing clitic
fn split_clitic(word: &str) -> Vec<(usize, usize)> {
    let lower = word.to_lowercase().replace('\u{2019}', "'");
    if lower.len() == word.len() {
        if lower.ends_with("n't") && lower.len() > 3 && !lower.ends_with("'n't") {
            let cut = word.len() - 3;
            return vec![(0, cut), (cut, word.len())];
        }
        if let Some(pos) = lower.rfind('\'') {
            if pos > 0 && CLITICS.contains(&&lower[pos + 1..]) {
                return vec![(0, pos), (pos, word.len())];
            }
        }
    } else if let Some((pos, c)) = word.char_indices().filter(|(_, c)| is_apostrophe(*c)).last() {
        // Curly apostrophes change the byte length, so work on the original
        let suffix = word[pos + c.len_utf8()..].to_lowercase();
        if suffix == "t" && word[..pos].to_lowercase().ends_with('n') && pos > 1 {
            let cut = pos - 1;
            return vec![(0, cut), (cut, word.len())];
        }
        if pos > 0 && CLITICS.contains(&suffix.as_str()) {
            return vec![(0, pos), (pos, word.len())];
        }
    }
    vec![(0, word.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_basic_sentence() {
        assert_eq!(
            texts("UNMIK discusses the mandate."),
            vec!["UNMIK", "discusses", "the", "mandate", "."]
        );
    }

    #[test]
    fn test_offsets_round_trip() {
        let text = "The Kosovo Trust Agency (KTA) was created in 2002.";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_markers_and_tables() {
        assert_eq!(
            texts("[TABLE] [['UNMIK','KTA']]"),
            vec!["[TABLE]", "[", "[", "'", "UNMIK", "'", ",", "'", "KTA", "'", "]", "]"]
        );
        assert_eq!(texts("[HEADER] 1. Scope"), vec!["[HEADER]", "1", ".", "Scope"]);
    }

    #[test]
    fn test_internal_connectors() {
        assert_eq!(texts("socio-economic"), vec!["socio-economic"]);
        assert_eq!(texts("1,000,000 euros"), vec!["1,000,000", "euros"]);
        assert_eq!(texts("2.5 percent"), vec!["2.5", "percent"]);
        assert_eq!(texts("the U.S. mission"), vec!["the", "U.S.", "mission"]);
        assert_eq!(texts("Mr. Smith"), vec!["Mr.", "Smith"]);
        assert_eq!(texts("in 2001, UNMIK"), vec!["in", "2001", ",", "UNMIK"]);
    }

    #[test]
    fn test_clitics() {
        assert_eq!(texts("UNMIK's mandate"), vec!["UNMIK", "'s", "mandate"]);
        assert_eq!(texts("they don't"), vec!["they", "do", "n't"]);
        assert_eq!(texts("it\u{2019}s"), vec!["it", "\u{2019}s"]);
        assert_eq!(texts("can\u{2019}t"), vec!["ca", "n\u{2019}t"]);
        assert_eq!(texts("O'Neill"), vec!["O'Neill"]);
    }

    #[test]
    fn test_line_flags() {
        let tokens = tokenize("first line\nsecond\n\nthird");
        assert!(tokens[0].line_start && tokens[0].paragraph_start);
        assert!(!tokens[1].line_start);
        assert!(tokens[2].line_start && !tokens[2].paragraph_start);
        assert!(tokens[3].line_start && tokens[3].paragraph_start);
    }
}
