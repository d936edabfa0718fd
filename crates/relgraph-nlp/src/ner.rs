//! Named entity recognition
//!
//! Proper-noun runs (optionally bridged by "of", "for", "the", ...) are
//! classified by a gazetteer, then by head keywords ("Agency", "Act",
//! "Airport"), then by shape. Numbers become DATE, MONEY, PERCENT or
//! CARDINAL spans.

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use once_cell::sync::Lazy;
use relgraph_core::{RelGraphError, Result};
use tracing::debug;

use crate::doc::{EntityLabel, EntitySpan, Pos, Token};
use crate::lemma::normalize;
use crate::lexicon::{CURRENCIES, MONTHS, NUMBER_WORDS, TITLES};
use crate::tagger::{is_all_caps, is_title_case};

// ============================================================================
// Gazetteer
// ============================================================================

const BUILTIN: &[(EntityLabel, &[&str])] = &[
    (
        EntityLabel::Gpe,
        &[
            "Kosovo", "Serbia", "Albania", "Macedonia", "North Macedonia", "Montenegro",
            "Bosnia and Herzegovina", "Croatia", "Slovenia", "Belgrade", "Tirana", "Skopje",
            "Pristina", "Prishtina", "Mitrovica", "Prizren", "Peja", "Pec", "Gjakova",
            "Ferizaj", "Gjilan", "Germany", "France", "Italy", "Russia", "China",
            "United States", "United Kingdom", "Brussels", "Washington", "New York",
            "Geneva", "Vienna", "London", "Paris", "Berlin",
        ],
    ),
    (
        EntityLabel::Loc,
        &["Europe", "Balkans", "Western Balkans", "Africa", "Asia", "Danube", "Ibar"],
    ),
    (
        EntityLabel::Org,
        &[
            "UN", "United Nations", "NATO", "EU", "European Union", "KFOR", "OSCE",
            "UNHCR", "UNDP", "World Bank", "IMF", "European Commission", "Security Council",
            "European Agency for Reconstruction", "Kosovo Trust Agency",
            "Privatization Agency of Kosovo",
        ],
    ),
    (
        EntityLabel::Norp,
        &[
            "Albanian", "Albanians", "Serb", "Serbs", "Serbian", "Kosovar", "Kosovars",
            "European", "Europeans", "American", "Americans", "Bosniak", "Bosniaks",
            "Roma", "Turkish", "Muslim", "Muslims", "Christian", "Orthodox",
        ],
    ),
];

/// Known names with fixed labels
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: HashMap<String, EntityLabel>,
}

impl Gazetteer {
    /// Empty gazetteer
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in names for the default domain
    pub fn builtin() -> Self {
        let mut gazetteer = Self::new();
        for (label, names) in BUILTIN {
            for name in names.iter() {
                gazetteer.insert(name, *label);
            }
        }
        gazetteer
    }

    /// Parse a TOML table of `LABEL = ["Name", ...]`
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: HashMap<String, Vec<String>> =
            toml::from_str(content).map_err(|e| RelGraphError::Nlp(format!("gazetteer: {e}")))?;

        let mut gazetteer = Self::new();
        for (label, names) in file {
            let label: EntityLabel = label
                .parse()
                .map_err(|l| RelGraphError::Nlp(format!("gazetteer: unknown entity label {l}")))?;
            for name in names {
                gazetteer.insert(&name, label);
            }
        }
        Ok(gazetteer)
    }

    /// Load a gazetteer file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RelGraphError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let gazetteer = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), entries = gazetteer.len(), "Gazetteer loaded");
        Ok(gazetteer)
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: &str, label: EntityLabel) {
        self.entries.insert(name.trim().to_string(), label);
    }

    /// Merge another gazetteer over this one
    pub fn extend(&mut self, other: Gazetteer) {
        self.entries.extend(other.entries);
    }

    /// Label for an exact name
    pub fn get(&self, name: &str) -> Option<EntityLabel> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Keyword classes
// ============================================================================

static KEYWORDS: Lazy<Vec<(EntityLabel, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (
            EntityLabel::Law,
            vec![
                "Act", "Law", "Regulation", "Constitution", "Treaty", "Convention", "Agreement",
                "Resolution", "Code", "Charter", "Directive", "Article", "Protocol", "Accord",
            ],
        ),
        (
            EntityLabel::Org,
            vec![
                "Agency", "Authority", "Ministry", "Department", "Office", "Council", "Committee",
                "Commission", "Bank", "Fund", "Mission", "Organization", "Organisation",
                "Association", "Corporation", "Company", "Union", "Institute", "University",
                "Court", "Assembly", "Parliament", "Government", "Board", "Group", "Force",
                "Trust", "Forum", "Service", "Services", "Programme", "Program", "Bureau",
                "Secretariat", "Inc", "Inc.", "Ltd", "Ltd.", "Corp", "Corp.", "LLC",
                "Foundation", "Party", "Administration", "Team", "Network", "Chamber",
                "Task", "Pillar", "Unit", "Directorate",
            ],
        ),
        (
            EntityLabel::Facility,
            vec![
                "Airport", "Bridge", "Building", "Hospital", "Station", "Port", "Stadium",
                "Centre", "Center", "Plant", "Mine", "Prison", "Road", "Highway", "Tower",
                "Complex", "Factory", "Mines",
            ],
        ),
        (
            EntityLabel::Loc,
            vec![
                "River", "Mountain", "Mountains", "Lake", "Sea", "Valley", "Region", "Ocean",
                "Basin", "Plain", "Hills",
            ],
        ),
    ]
});

const DEMONYM_SUFFIXES: &[&str] = &["ian", "ians", "ese", "ish"];

fn connector(word: &str) -> bool {
    matches!(word, "of" | "for" | "on" | "the" | "de" | "and" | "&")
}

fn is_month(token: &Token, next: Option<&Token>) -> bool {
    let lower = normalize(&token.text);
    is_title_case(&token.text)
        && MONTHS.contains(lower.as_str())
        && (lower != "may" || next.is_some_and(|n| n.pos == Pos::Num))
}

fn is_digits(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || matches!(c, ',' | '.'))
}

// ============================================================================
// Recognizer
// ============================================================================

/// Recognize entities within one sentence of a tagged doc
pub fn recognize(
    text: &str,
    tokens: &[Token],
    sentence: Range<usize>,
    gazetteer: &Gazetteer,
) -> Vec<EntitySpan> {
    let mut entities = Vec::new();
    let mut i = sentence.start;
    let end = sentence.end;

    while i < end {
        let token = &tokens[i];
        let next = tokens.get(i + 1).filter(|_| i + 1 < end);

        if is_month(token, next) {
            let span = date_span(tokens, i, end);
            i = span.end;
            entities.push(EntitySpan {
                tokens: span,
                label: EntityLabel::Date,
            });
            continue;
        }

        if token.pos == Pos::Propn && !token.is_marker() {
            let run = proper_run(tokens, i, end);
            i = run.end;
            if let Some(entity) = classify_run(text, tokens, run, end, gazetteer) {
                i = i.max(entity.tokens.end);
                entities.push(entity);
            }
            continue;
        }

        if token.pos == Pos::Num
            || (token.pos == Pos::Sym && CURRENCIES.contains(token.text.to_lowercase().as_str()))
        {
            if let Some(entity) = numeric_entity(tokens, i, end) {
                i = entity.tokens.end;
                entities.push(entity);
                continue;
            }
        }

        i += 1;
    }

    entities
}

/// Maximal run of proper nouns, bridged by lowercase connectors
fn proper_run(tokens: &[Token], start: usize, end: usize) -> Range<usize> {
    let mut last = start;
    let mut j = start + 1;
    let mut bridged_of = false;

    while j < end {
        let token = &tokens[j];
        let next = tokens.get(j + 1).filter(|_| j + 1 < end);
        if token.pos == Pos::Propn && !token.is_marker() && !is_month(token, next) {
            last = j;
            j += 1;
            continue;
        }

        let word = token.text.as_str();
        if !connector(word) {
            break;
        }
        // "and" only joins parts of a long name ("Ministry of Trade and Industry")
        if matches!(word, "and" | "&")
            && !(bridged_of
                && is_title_case(&tokens[j - 1].text)
                && next.is_some_and(|n| is_title_case(&n.text)))
        {
            break;
        }
        let continues = tokens[j + 1..end]
            .iter()
            .find(|t| !connector(&t.text))
            .is_some_and(|t| t.pos == Pos::Propn && !t.is_marker());
        if !continues {
            break;
        }
        bridged_of |= matches!(word, "of" | "for");
        j += 1;
    }

    start..last + 1
}

fn span_text<'a>(text: &'a str, tokens: &[Token], range: &Range<usize>) -> &'a str {
    &text[tokens[range.start].start..tokens[range.end - 1].end]
}

fn classify_run(
    text: &str,
    tokens: &[Token],
    mut run: Range<usize>,
    end: usize,
    gazetteer: &Gazetteer,
) -> Option<EntitySpan> {
    let full = span_text(text, tokens, &run);
    if let Some(label) = gazetteer.get(full) {
        return Some(EntitySpan { tokens: run, label });
    }

    // Honorifics introduce a person and stay outside the span
    let first = normalize(&tokens[run.start].text);
    if TITLES.contains(first.as_str()) && run.len() > 1 {
        let is_name = tokens[run.start + 1..run.end]
            .iter()
            .all(|t| is_title_case(&t.text) || t.text.ends_with('.'));
        let has_keyword = tokens[run.clone()]
            .iter()
            .any(|t| keyword_label(&t.text).is_some());
        if is_name && !has_keyword {
            run.start += 1;
            return Some(EntitySpan {
                tokens: run,
                label: EntityLabel::Person,
            });
        }
    }

    let words = &tokens[run.clone()];
    if let Some(label) = words.iter().find_map(|t| keyword_label(&t.text)) {
        return Some(EntitySpan { tokens: run, label });
    }

    if run.len() == 1 {
        let word = words[0].text.as_str();
        if is_title_case(word) && DEMONYM_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return Some(EntitySpan {
                tokens: run,
                label: EntityLabel::Norp,
            });
        }
        // Model names followed by a number ("Windows 10")
        if run.end < end && is_digits(&tokens[run.end].text) && !is_all_caps(word) {
            let number = &tokens[run.end].text;
            if number.len() < 4 {
                return Some(EntitySpan {
                    tokens: run.start..run.end + 1,
                    label: EntityLabel::Product,
                });
            }
        }
        return Some(EntitySpan {
            tokens: run,
            label: EntityLabel::Org,
        });
    }

    let personal = (2..=3).contains(&run.len())
        && words
            .iter()
            .all(|t| is_title_case(&t.text) && t.text.chars().all(|c| c.is_alphabetic()));
    let label = if personal {
        EntityLabel::Person
    } else {
        EntityLabel::Org
    };
    Some(EntitySpan { tokens: run, label })
}

fn keyword_label(word: &str) -> Option<EntityLabel> {
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| *w == word))
        .map(|(label, _)| *label)
}

fn date_span(tokens: &[Token], start: usize, end: usize) -> Range<usize> {
    let mut j = start + 1;
    while j < end {
        let comma_then_number =
            tokens[j].text == "," && j + 1 < end && tokens[j + 1].pos == Pos::Num;
        if tokens[j].pos != Pos::Num && !comma_then_number {
            break;
        }
        j += 1;
    }
    start..j
}

fn numeric_entity(tokens: &[Token], start: usize, end: usize) -> Option<EntitySpan> {
    let at = |i: usize| tokens.get(i).filter(|_| i < end);
    let lower_at = |i: usize| at(i).map(|t| t.text.to_lowercase()).unwrap_or_default();

    let mut last = start;
    let mut label = EntityLabel::Cardinal;

    if tokens[start].pos == Pos::Sym {
        // "$ 5 million"
        if !at(start + 1).is_some_and(|t| t.pos == Pos::Num) {
            return None;
        }
        last = start + 1;
        label = EntityLabel::Money;
    }

    // Scale words ("5 million")
    while at(last + 1)
        .is_some_and(|t| t.pos == Pos::Num && NUMBER_WORDS.contains(t.text.to_lowercase().as_str()))
    {
        last += 1;
    }

    let after = lower_at(last + 1);
    if after == "%" || after == "percent" {
        last += 1;
        label = EntityLabel::Percent;
    } else if CURRENCIES.contains(after.as_str()) && tokens[last + 1].pos != Pos::Sym {
        last += 1;
        label = EntityLabel::Money;
    } else if is_month_at(tokens, last + 1, end) {
        last = date_span(tokens, last + 1, end).end - 1;
        label = EntityLabel::Date;
    } else if label == EntityLabel::Cardinal {
        let value = &tokens[start].text;
        let year = value.len() == 4
            && value.chars().all(|c| c.is_ascii_digit())
            && (value.starts_with("19") || value.starts_with("20"));
        if year {
            label = EntityLabel::Date;
        } else if !is_digits(value) && !NUMBER_WORDS.contains(value.to_lowercase().as_str()) {
            return None;
        }
    }

    Some(EntitySpan {
        tokens: start..last + 1,
        label,
    })
}

fn is_month_at(tokens: &[Token], i: usize, end: usize) -> bool {
    i < end && is_month(&tokens[i], tokens.get(i + 1).filter(|_| i + 1 < end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemma::lemmatize;
    use crate::tagger::{tag, tests::tokens};

    fn entities(text: &str) -> Vec<(String, EntityLabel)> {
        entities_with(text, &Gazetteer::builtin())
    }

    fn entities_with(text: &str, gazetteer: &Gazetteer) -> Vec<(String, EntityLabel)> {
        let mut tokens = tokens(text);
        let tags = tag(&tokens);
        for (token, pos) in tokens.iter_mut().zip(tags) {
            token.pos = pos;
            token.lemma = lemmatize(&token.text, pos);
        }
        recognize(text, &tokens, 0..tokens.len(), gazetteer)
            .into_iter()
            .map(|e| (span_text(text, &tokens, &e.tokens).to_string(), e.label))
            .collect()
    }

    #[test]
    fn test_acronyms_and_gazetteer() {
        let found = entities("UNMIK works with NATO in Kosovo.");
        assert_eq!(
            found,
            vec![
                ("UNMIK".to_string(), EntityLabel::Org),
                ("NATO".to_string(), EntityLabel::Org),
                ("Kosovo".to_string(), EntityLabel::Gpe),
            ]
        );
    }

    #[test]
    fn test_keyword_classes() {
        let found = entities("The Kosovo Trust Agency applies the Law on Privatization near Pristina Airport.");
        assert!(found.contains(&("Kosovo Trust Agency".to_string(), EntityLabel::Org)));
        assert!(found.contains(&("Law on Privatization".to_string(), EntityLabel::Law)));
        assert!(found.contains(&("Pristina Airport".to_string(), EntityLabel::Facility)));
    }

    #[test]
    fn test_people_and_groups() {
        let found = entities("Mr. Bernard Kouchner met Albanian leaders.");
        assert_eq!(found[0], ("Bernard Kouchner".to_string(), EntityLabel::Person));
        assert_eq!(found[1], ("Albanian".to_string(), EntityLabel::Norp));
    }

    #[test]
    fn test_and_does_not_join_acronyms() {
        let found = entities("UNMIK and KTA agreed.");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_numeric_entities() {
        let found = entities("In March 2002 about 5 million euros and 40 percent were spent in 2003.");
        assert!(found.contains(&("March 2002".to_string(), EntityLabel::Date)));
        assert!(found.contains(&("5 million euros".to_string(), EntityLabel::Money)));
        assert!(found.contains(&("40 percent".to_string(), EntityLabel::Percent)));
        assert!(found.contains(&("2003".to_string(), EntityLabel::Date)));
    }

    #[test]
    fn test_custom_gazetteer() {
        let custom = Gazetteer::from_toml_str("PRODUCT = [\"Zastava\"]\nLOC = [\"Sharr\"]").unwrap();
        assert_eq!(custom.len(), 2);
        let mut gazetteer = Gazetteer::builtin();
        gazetteer.extend(custom);
        let found = entities_with("They bought Zastava cars in Sharr.", &gazetteer);
        assert_eq!(found[0], ("Zastava".to_string(), EntityLabel::Product));
        assert_eq!(found[1], ("Sharr".to_string(), EntityLabel::Loc));
    }

    #[test]
    fn test_bad_gazetteer() {
        assert!(Gazetteer::from_toml_str("WIDGET = [\"x\"]").is_err());
        assert!(Gazetteer::from_toml_str("not toml").is_err());
    }
}
