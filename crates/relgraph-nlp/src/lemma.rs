//! Rule-based lemmatizer
//!
//! Verbs: irregular table, then suffix stripping checked against the verb
//! lexicon, then orthographic fallbacks. Nouns: irregular plurals and
//! regular plural rules. Proper nouns keep their surface form.

use crate::doc::Pos;
use crate::lexicon::{IRREGULAR_NOUNS, IRREGULAR_VERBS, MODALS, NOUNS, VERBS};

/// Lowercase and fold curly apostrophes
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

/// Base form of a token given its part of speech
pub fn lemmatize(text: &str, pos: Pos) -> String {
    let lower = normalize(text);
    match pos {
        Pos::Propn => text.to_string(),
        Pos::Verb | Pos::Aux => verb_lemma(&lower),
        Pos::Noun => noun_lemma(&lower),
        Pos::Part if lower == "n't" => "not".to_string(),
        _ => lower,
    }
}

/// Lemma of a lowercase verb form
pub fn verb_lemma(lower: &str) -> String {
    if let Some(lemma) = IRREGULAR_VERBS.get(lower) {
        return lemma.to_string();
    }
    if VERBS.contains(lower) || MODALS.contains(lower) {
        return lower.to_string();
    }

    let candidates = verb_candidates(lower);
    if let Some(found) = candidates.iter().find(|c| VERBS.contains(c.as_str())) {
        return found.clone();
    }
    fallback_verb_lemma(lower)
}

/// Whether a lowercase word is a form of a known verb
pub fn known_verb_lemma(lower: &str) -> Option<String> {
    if let Some(lemma) = IRREGULAR_VERBS.get(lower) {
        return Some(lemma.to_string());
    }
    if VERBS.contains(lower) {
        return Some(lower.to_string());
    }
    verb_candidates(lower)
        .into_iter()
        .find(|c| VERBS.contains(c.as_str()))
}

fn verb_candidates(lower: &str) -> Vec<String> {
    if let Some(stem) = lower.strip_suffix("ies").or_else(|| lower.strip_suffix("ied")) {
        vec![format!("{stem}y")]
    } else if let Some(stem) = lower.strip_suffix("ing") {
        vec![stem.to_string(), format!("{stem}e"), undouble(stem)]
    } else if let Some(stem) = lower.strip_suffix("ed") {
        vec![stem.to_string(), format!("{stem}e"), undouble(stem)]
    } else if let Some(stem) = lower.strip_suffix("es") {
        vec![stem.to_string(), format!("{stem}e")]
    } else if let Some(stem) = lower.strip_suffix('s').filter(|_| !lower.ends_with("ss")) {
        vec![stem.to_string()]
    } else {
        Vec::new()
    }
}

fn undouble(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] && b"bdgmnprt".contains(&bytes[n - 1]) {
        stem[..n - 1].to_string()
    } else {
        stem.to_string()
    }
}

fn restores_e(stem: &str) -> bool {
    ["at", "iz", "is", "iv", "lv", "ov", "uc", "ur", "bl", "dg", "ag", "us", "rc", "nc"]
        .iter()
        .any(|end| stem.ends_with(end))
}

fn fallback_verb_lemma(lower: &str) -> String {
    if let Some(stem) = lower.strip_suffix("ies").or_else(|| lower.strip_suffix("ied")) {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.len() < 2 {
                break;
            }
            let undoubled = undouble(stem);
            if undoubled.len() < stem.len() {
                return undoubled;
            }
            if restores_e(stem) {
                return format!("{stem}e");
            }
            return stem.to_string();
        }
    }
    if let Some(stem) = lower.strip_suffix("es") {
        if ["s", "x", "z", "ch", "sh", "o"].iter().any(|e| stem.ends_with(e)) {
            return stem.to_string();
        }
        return lower[..lower.len() - 1].to_string();
    }
    if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
        return lower[..lower.len() - 1].to_string();
    }
    lower.to_string()
}

/// Singular of a lowercase noun
pub fn noun_lemma(lower: &str) -> String {
    if let Some(lemma) = IRREGULAR_NOUNS.get(lower) {
        return lemma.to_string();
    }
    if NOUNS.contains(lower) {
        return lower.to_string();
    }
    if lower.len() > 4 {
        if let Some(stem) = lower.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if lower.ends_with(suffix) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    if ["ss", "us", "is", "ics"].iter().any(|e| lower.ends_with(e)) {
        return lower.to_string();
    }
    if lower.len() > 3 && lower.ends_with('s') {
        return lower[..lower.len() - 1].to_string();
    }
    lower.to_string()
}
