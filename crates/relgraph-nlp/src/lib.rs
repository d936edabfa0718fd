//! RelGraph NLP - Rule-based English language model
//!
//! Turns raw text into an annotated [`Doc`]:
//! - Tokenization and sentence splitting
//! - Part-of-speech tagging and lemmatization
//! - Shallow dependency parsing with noun chunks
//! - Named entity recognition backed by a gazetteer
//!
//! The annotation scheme follows the familiar Universal POS tags, ClearNLP
//! style dependency labels and OntoNotes entity labels, so downstream code
//! can ask for `nsubj` children of a `VERB` head or for `ORG` entities.

pub mod doc;
pub mod lemma;
pub mod lexicon;
pub mod ner;
pub mod parser;
pub mod sentence;
pub mod tagger;
pub mod tokenizer;

pub use doc::{Dep, Doc, EntityLabel, EntitySpan, Pos, Token};
pub use ner::Gazetteer;

use relgraph_core::config::NlpConfig;
use relgraph_core::Result;
use tracing::{debug, info};

// ============================================================================
// Language Model
// ============================================================================

/// Anything that can annotate a text
pub trait LanguageModel: Send + Sync {
    /// Model name for logging
    fn name(&self) -> &str;

    /// Annotate a text
    fn parse(&self, text: &str) -> Doc;
}

impl std::fmt::Debug for dyn LanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LanguageModel({})", self.name())
    }
}

/// Lexicon and rule driven English model
#[derive(Debug, Clone)]
pub struct RuleBasedModel {
    gazetteer: Gazetteer,
}

impl Default for RuleBasedModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedModel {
    /// Model with the built-in gazetteer
    pub fn new() -> Self {
        Self {
            gazetteer: Gazetteer::builtin(),
        }
    }

    /// Build a model from configuration, loading any extra gazetteer
    pub fn from_config(config: &NlpConfig) -> Result<Self> {
        let mut model = Self::new();
        if let Some(path) = &config.gazetteer_path {
            let extra = Gazetteer::load(path)?;
            info!(path = %path.display(), entries = extra.len(), "Loaded custom gazetteer");
            model.gazetteer.extend(extra);
        }
        Ok(model)
    }

    /// Replace the gazetteer
    pub fn with_gazetteer(mut self, gazetteer: Gazetteer) -> Self {
        self.gazetteer = gazetteer;
        self
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }
}

impl LanguageModel for RuleBasedModel {
    fn name(&self) -> &str {
        "rule-based-en"
    }

    fn parse(&self, text: &str) -> Doc {
        let raw = tokenizer::tokenize(text);
        let sentences = sentence::split_sentences(&raw);

        let mut tokens: Vec<Token> = raw
            .into_iter()
            .enumerate()
            .map(|(i, raw)| Token {
                index: i,
                text: raw.text,
                lemma: String::new(),
                pos: Pos::X,
                dep: Dep::Dep,
                head: i,
                start: raw.start,
                end: raw.end,
                line_start: raw.line_start,
                paragraph_start: raw.paragraph_start,
            })
            .collect();

        let mut noun_chunks = Vec::new();
        let mut entities = Vec::new();

        for range in &sentences {
            let offset = range.start;
            let sentence = &mut tokens[range.clone()];

            let tags = tagger::tag(sentence);
            for (token, pos) in sentence.iter_mut().zip(tags) {
                token.pos = pos;
                token.lemma = lemma::lemmatize(&token.text, pos);
            }

            let parse = parser::parse(sentence);
            for (token, (head, dep)) in sentence.iter_mut().zip(parse.arcs) {
                token.head = head + offset;
                token.dep = dep;
            }
            noun_chunks.extend(
                parse
                    .noun_chunks
                    .into_iter()
                    .map(|c| c.start + offset..c.end + offset),
            );

            entities.extend(ner::recognize(text, &tokens, range.clone(), &self.gazetteer));
        }

        debug!(
            tokens = tokens.len(),
            sentences = sentences.len(),
            entities = entities.len(),
            "Annotated text"
        );

        Doc {
            text: text.to_string(),
            tokens,
            sentences,
            entities,
            noun_chunks,
        }
    }
}
