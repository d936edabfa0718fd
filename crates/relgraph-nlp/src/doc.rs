//! Annotated document types
//!
//! A `Doc` owns the original text plus one `Token` per word or symbol.
//! Sentences, entities and noun chunks are token ranges into it.

use std::ops::Range;

use serde::{Deserialize, Serialize};

// ============================================================================
// Part of speech
// ============================================================================

/// Coarse part-of-speech tags (Universal Dependencies inventory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pos {
    Noun,
    Propn,
    Pron,
    Verb,
    Aux,
    Adj,
    Adv,
    Det,
    Adp,
    Cconj,
    Sconj,
    Num,
    Part,
    Punct,
    Sym,
    X,
}

impl Pos {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "NOUN",
            Self::Propn => "PROPN",
            Self::Pron => "PRON",
            Self::Verb => "VERB",
            Self::Aux => "AUX",
            Self::Adj => "ADJ",
            Self::Adv => "ADV",
            Self::Det => "DET",
            Self::Adp => "ADP",
            Self::Cconj => "CCONJ",
            Self::Sconj => "SCONJ",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Punct => "PUNCT",
            Self::Sym => "SYM",
            Self::X => "X",
        }
    }

    /// Nouns, proper nouns and pronouns
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::Propn | Self::Pron)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Dependency labels
// ============================================================================

/// Dependency relation between a token and its head (ClearNLP-style labels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dep {
    Root,
    Nsubj,
    NsubjPass,
    Dobj,
    Pobj,
    Pcomp,
    Attr,
    Prep,
    Agent,
    Aux,
    AuxPass,
    Det,
    Amod,
    Compound,
    Advmod,
    Neg,
    Cc,
    Conj,
    Punct,
    Poss,
    Case,
    Nummod,
    Acomp,
    Xcomp,
    Ccomp,
    Mark,
    Advcl,
    Acl,
    Relcl,
    Nmod,
    Appos,
    Dep,
}

impl Dep {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Nsubj => "nsubj",
            Self::NsubjPass => "nsubjpass",
            Self::Dobj => "dobj",
            Self::Pobj => "pobj",
            Self::Pcomp => "pcomp",
            Self::Attr => "attr",
            Self::Prep => "prep",
            Self::Agent => "agent",
            Self::Aux => "aux",
            Self::AuxPass => "auxpass",
            Self::Det => "det",
            Self::Amod => "amod",
            Self::Compound => "compound",
            Self::Advmod => "advmod",
            Self::Neg => "neg",
            Self::Cc => "cc",
            Self::Conj => "conj",
            Self::Punct => "punct",
            Self::Poss => "poss",
            Self::Case => "case",
            Self::Nummod => "nummod",
            Self::Acomp => "acomp",
            Self::Xcomp => "xcomp",
            Self::Ccomp => "ccomp",
            Self::Mark => "mark",
            Self::Advcl => "advcl",
            Self::Acl => "acl",
            Self::Relcl => "relcl",
            Self::Nmod => "nmod",
            Self::Appos => "appos",
            Self::Dep => "dep",
        }
    }
}

impl std::str::FromStr for Dep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dep = match s.to_lowercase().as_str() {
            "root" => Self::Root,
            "nsubj" => Self::Nsubj,
            "nsubjpass" => Self::NsubjPass,
            "dobj" => Self::Dobj,
            "pobj" => Self::Pobj,
            "pcomp" => Self::Pcomp,
            "attr" => Self::Attr,
            "prep" => Self::Prep,
            "agent" => Self::Agent,
            "aux" => Self::Aux,
            "auxpass" => Self::AuxPass,
            "det" => Self::Det,
            "amod" => Self::Amod,
            "compound" => Self::Compound,
            "advmod" => Self::Advmod,
            "neg" => Self::Neg,
            "cc" => Self::Cc,
            "conj" => Self::Conj,
            "punct" => Self::Punct,
            "poss" => Self::Poss,
            "case" => Self::Case,
            "nummod" => Self::Nummod,
            "acomp" => Self::Acomp,
            "xcomp" => Self::Xcomp,
            "ccomp" => Self::Ccomp,
            "mark" => Self::Mark,
            "advcl" => Self::Advcl,
            "acl" => Self::Acl,
            "relcl" => Self::Relcl,
            "nmod" => Self::Nmod,
            "appos" => Self::Appos,
            "dep" => Self::Dep,
            other => return Err(other.to_string()),
        };
        Ok(dep)
    }
}

impl std::fmt::Display for Dep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Entity labels
// ============================================================================

/// Named-entity categories (OntoNotes inventory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Norp,
    Facility,
    Org,
    Gpe,
    Loc,
    Product,
    Event,
    Law,
    Date,
    Money,
    Percent,
    Cardinal,
}

impl EntityLabel {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Norp => "NORP",
            Self::Facility => "FACILITY",
            Self::Org => "ORG",
            Self::Gpe => "GPE",
            Self::Loc => "LOC",
            Self::Product => "PRODUCT",
            Self::Event => "EVENT",
            Self::Law => "LAW",
            Self::Date => "DATE",
            Self::Money => "MONEY",
            Self::Percent => "PERCENT",
            Self::Cardinal => "CARDINAL",
        }
    }
}

impl std::str::FromStr for EntityLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = match s.to_uppercase().as_str() {
            "PERSON" => Self::Person,
            "NORP" => Self::Norp,
            "FACILITY" | "FAC" => Self::Facility,
            "ORG" => Self::Org,
            "GPE" => Self::Gpe,
            "LOC" => Self::Loc,
            "PRODUCT" => Self::Product,
            "EVENT" => Self::Event,
            "LAW" => Self::Law,
            "DATE" => Self::Date,
            "MONEY" => Self::Money,
            "PERCENT" => Self::Percent,
            "CARDINAL" => Self::Cardinal,
            other => return Err(other.to_string()),
        };
        Ok(label)
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tokens and spans
// ============================================================================

/// A single token with its annotations
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Position within the doc
    pub index: usize,
    /// Surface text
    pub text: String,
    /// Base form
    pub lemma: String,
    /// Part of speech
    pub pos: Pos,
    /// Relation to the head token
    pub dep: Dep,
    /// Index of the head token (the root points at itself)
    pub head: usize,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// First token on its line
    pub line_start: bool,
    /// Preceded by a blank line
    pub paragraph_start: bool,
}

impl Token {
    /// Lowercased surface text
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Bracketed marker such as `[TABLE]` or `[HEADER]`
    pub fn is_marker(&self) -> bool {
        is_marker(&self.text)
    }
}

/// Check whether a word is a bracketed uppercase marker
pub fn is_marker(text: &str) -> bool {
    text.len() > 2
        && text.starts_with('[')
        && text.ends_with(']')
        && text[1..text.len() - 1]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == '_')
}

/// A labelled entity span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    /// Token range
    pub tokens: Range<usize>,
    /// Entity category
    pub label: EntityLabel,
}

// ============================================================================
// Doc
// ============================================================================

/// A fully annotated text
#[derive(Debug, Clone, Default)]
pub struct Doc {
    /// Original text
    pub text: String,
    /// Tokens in order
    pub tokens: Vec<Token>,
    /// Sentence token ranges
    pub sentences: Vec<Range<usize>>,
    /// Named entities
    pub entities: Vec<EntitySpan>,
    /// Base noun phrases
    pub noun_chunks: Vec<Range<usize>>,
}

impl Doc {
    /// Source text covered by a token range
    pub fn span_text(&self, range: &Range<usize>) -> &str {
        if range.start >= range.end || range.end > self.tokens.len() {
            return "";
        }
        let start = self.tokens[range.start].start;
        let end = self.tokens[range.end - 1].end;
        &self.text[start..end]
    }

    /// Sentence texts in order
    pub fn sents(&self) -> impl Iterator<Item = &str> + '_ {
        self.sentences.iter().map(|r| self.span_text(r))
    }

    /// Entity texts with their labels
    pub fn ents(&self) -> impl Iterator<Item = (&str, EntityLabel)> + '_ {
        self.entities
            .iter()
            .map(|e| (self.span_text(&e.tokens), e.label))
    }

    /// Noun chunk texts
    pub fn chunks(&self) -> impl Iterator<Item = &str> + '_ {
        self.noun_chunks.iter().map(|r| self.span_text(r))
    }

    /// Head token of a token
    pub fn head(&self, token: &Token) -> &Token {
        &self.tokens[token.head]
    }

    /// Direct dependents of a token, in order
    pub fn children(&self, index: usize) -> impl Iterator<Item = &Token> + '_ {
        self.tokens
            .iter()
            .filter(move |t| t.head == index && t.index != index)
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the doc has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse() {
        assert_eq!("org".parse::<EntityLabel>(), Ok(EntityLabel::Org));
        assert_eq!("FAC".parse::<EntityLabel>(), Ok(EntityLabel::Facility));
        assert!("FOO".parse::<EntityLabel>().is_err());
        assert_eq!(EntityLabel::Gpe.to_string(), "GPE");
    }

    #[test]
    fn test_dep_parse() {
        assert_eq!("nsubjpass".parse::<Dep>(), Ok(Dep::NsubjPass));
        assert_eq!("ROOT".parse::<Dep>(), Ok(Dep::Root));
        assert!("subject".parse::<Dep>().is_err());
        assert_eq!(Dep::Dobj.to_string(), "dobj");
    }

    #[test]
    fn test_marker_detection() {
        assert!(is_marker("[TABLE]"));
        assert!(is_marker("[HEADER]"));
        assert!(!is_marker("[['a','b']]"));
        assert!(!is_marker("[]"));
        assert!(!is_marker("[table]"));
    }
}
