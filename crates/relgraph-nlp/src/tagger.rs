//! Part-of-speech tagger
//!
//! Two passes over a sentence. The first assigns every token its lexical
//! class (closed-class lists, capitalization, verb morphology, suffixes).
//! The second resolves noun/verb ambiguity left to right from the already
//! tagged left context and the lexical class of the next token.

use crate::doc::{is_marker, Pos, Token};
use crate::lemma::{known_verb_lemma, noun_lemma, normalize};
use crate::lexicon::{
    is_known, ADJECTIVES, ADVERBS, BE_FORMS, COORDINATORS, CURRENCIES, DETERMINERS, DO_FORMS,
    HAVE_FORMS, IRREGULAR_VERBS, MODALS, NEGATIONS, NOUNS, NOUN_VERBS, NUMBER_WORDS,
    POSSESSIVES, PREPOSITIONS, PRONOUNS, SUBORDINATORS,
};

/// Inflection of a verb-capable word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbForm {
    Base,
    ThirdPerson,
    Past,
    Gerund,
}

impl VerbForm {
    /// Classify a lowercase form against its lemma
    pub fn of(lower: &str, lemma: &str) -> Self {
        if IRREGULAR_VERBS.contains_key(lower) {
            return match lower {
                "is" | "has" | "does" | "goes" | "'s" => Self::ThirdPerson,
                "being" | "having" | "doing" => Self::Gerund,
                "am" | "are" | "'re" | "'m" | "'ve" => Self::Base,
                _ => Self::Past,
            };
        }
        if lower == lemma {
            Self::Base
        } else if lower.ends_with("ing") {
            Self::Gerund
        } else if lower.ends_with("ed") {
            Self::Past
        } else if lower.ends_with('s') {
            Self::ThirdPerson
        } else {
            Self::Base
        }
    }
}

/// First-pass class of a token
#[derive(Debug, Clone)]
struct Lexical {
    lower: String,
    pos: Pos,
    /// Set when the word can be a verb
    verb: Option<VerbForm>,
    /// The verb reading competes with an equally common noun reading
    noun_verb: bool,
}

impl Lexical {
    fn new(lower: String, pos: Pos) -> Self {
        Self {
            lower,
            pos,
            verb: None,
            noun_verb: false,
        }
    }

    fn is_verb_candidate(&self) -> bool {
        self.pos == Pos::Verb && self.verb.is_some()
    }
}

/// Two or more letters, all uppercase ("UNMIK", "IV", "U.S.")
pub fn is_all_caps(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

/// Leading capital followed by at least one lowercase letter
pub fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(|c| c.is_uppercase()) && chars.any(|c| c.is_lowercase())
}

fn knows_lowercase(lower: &str) -> bool {
    is_known(lower)
        || lower == "one"
        || known_verb_lemma(lower).is_some()
        || NOUNS.contains(noun_lemma(lower).as_str())
}

fn classify(word: &str, initial: bool) -> Lexical {
    let lower = normalize(word);

    if is_marker(word) {
        return Lexical::new(lower, Pos::X);
    }
    if !word.chars().any(|c| c.is_alphanumeric()) {
        let pos = if COORDINATORS.contains(lower.as_str()) {
            Pos::Cconj
        } else if CURRENCIES.contains(lower.as_str()) || "%§#+=<>*@".contains(word) {
            Pos::Sym
        } else {
            Pos::Punct
        };
        return Lexical::new(lower, pos);
    }
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        return Lexical::new(lower, Pos::Num);
    }
    if is_all_caps(word) {
        return Lexical::new(lower, Pos::Propn);
    }
    if word.starts_with(|c: char| c.is_uppercase()) && (!initial || !knows_lowercase(&lower)) {
        return Lexical::new(lower, Pos::Propn);
    }

    classify_lowercase(lower)
}

fn classify_lowercase(lower: String) -> Lexical {
    let l = lower.as_str();
    let pos = if COORDINATORS.contains(l) {
        Pos::Cconj
    } else if l == "that" {
        Pos::Pron
    } else if l == "to" {
        Pos::Adp
    } else if l == "one" {
        Pos::Num
    } else if l == "not" || l == "n't" || l == "'s" {
        Pos::Part
    } else if BE_FORMS.contains(l) || MODALS.contains(l) {
        Pos::Aux
    } else if HAVE_FORMS.contains(l) || DO_FORMS.contains(l) {
        let lemma = known_verb_lemma(l).unwrap_or_else(|| l.to_string());
        let form = VerbForm::of(l, &lemma);
        return Lexical {
            lower,
            pos: Pos::Verb,
            verb: Some(form),
            noun_verb: false,
        };
    } else if DETERMINERS.contains(l) {
        Pos::Det
    } else if POSSESSIVES.contains(l) || PRONOUNS.contains(l) {
        Pos::Pron
    } else if SUBORDINATORS.contains(l) {
        Pos::Sconj
    } else if PREPOSITIONS.contains(l) {
        Pos::Adp
    } else if NUMBER_WORDS.contains(l) {
        Pos::Num
    } else if ADVERBS.contains(l) || NEGATIONS.contains(l) {
        Pos::Adv
    } else if ADJECTIVES.contains(l) {
        Pos::Adj
    } else if let Some(lemma) = known_verb_lemma(l) {
        let form = VerbForm::of(l, &lemma);
        let noun_verb = NOUN_VERBS.contains(lemma.as_str());
        return Lexical {
            lower,
            pos: Pos::Verb,
            verb: Some(form),
            noun_verb,
        };
    } else if NOUNS.contains(noun_lemma(l).as_str()) {
        Pos::Noun
    } else {
        return classify_by_suffix(lower);
    };
    Lexical::new(lower, pos)
}

fn classify_by_suffix(lower: String) -> Lexical {
    let len = lower.chars().count();
    let adjective_suffixes = ["ous", "ful", "ive", "able", "ible", "less", "ical", "ial", "ual"];

    let (pos, verb) = if len > 4 && lower.ends_with("ly") {
        (Pos::Adv, None)
    } else if len > 4 && adjective_suffixes.iter().any(|s| lower.ends_with(s)) {
        (Pos::Adj, None)
    } else if len > 4 && lower.ends_with("ed") {
        (Pos::Verb, Some(VerbForm::Past))
    } else if len > 5 && lower.ends_with("ing") {
        (Pos::Verb, Some(VerbForm::Gerund))
    } else if len > 5 && lower.ends_with("ize") {
        (Pos::Verb, Some(VerbForm::Base))
    } else {
        (Pos::Noun, None)
    };

    Lexical {
        lower,
        pos,
        verb,
        noun_verb: false,
    }
}

// ============================================================================
// Contextual resolution
// ============================================================================

struct Resolver<'a> {
    lex: &'a [Lexical],
    tags: Vec<Pos>,
}

impl Resolver<'_> {
    /// Previous token, skipping adverbs
    fn prev(&self, i: usize) -> Option<usize> {
        (0..i).rev().find(|&p| self.tags[p] != Pos::Adv)
    }

    fn next_starts_np(&self, i: usize) -> bool {
        self.lex.get(i + 1).is_some_and(|n| match n.pos {
            Pos::Det | Pos::Num | Pos::Propn | Pos::Adj | Pos::Noun => true,
            Pos::Pron => !matches!(n.lower.as_str(), "that" | "which" | "who"),
            Pos::Verb => n.noun_verb && n.verb == Some(VerbForm::ThirdPerson),
            _ => false,
        })
    }

    /// Base-form verbs need a plural subject
    fn is_plural_noun(&self, p: usize) -> bool {
        let lower = self.lex[p].lower.as_str();
        self.tags[p] == Pos::Noun
            && (lower == "people"
                || (lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us")))
    }

    fn next_is_verbal(&self, i: usize) -> bool {
        self.lex.get(i + 1).is_some_and(|n| {
            n.pos == Pos::Aux
                || (n.is_verb_candidate() && (!n.noun_verb || n.verb == Some(VerbForm::Past)))
        })
    }

    fn next_is_base_verb(&self, i: usize) -> bool {
        let mut j = i + 1;
        while self.lex.get(j).is_some_and(|n| n.pos == Pos::Adv) {
            j += 1;
        }
        self.lex.get(j).is_some_and(|n| {
            matches!(n.lower.as_str(), "be" | "have" | "do")
                || (n.is_verb_candidate() && n.verb == Some(VerbForm::Base))
        })
    }

    fn verb_seen(&self, i: usize) -> bool {
        self.tags[..i]
            .iter()
            .any(|p| matches!(p, Pos::Verb | Pos::Aux))
    }

    fn resolve(&self, i: usize) -> Pos {
        let lex = &self.lex[i];
        match (lex.pos, lex.lower.as_str()) {
            (Pos::Pron, "that") => self.resolve_that(i),
            (Pos::Adp, "to") => {
                if self.next_is_base_verb(i) {
                    Pos::Part
                } else {
                    Pos::Adp
                }
            }
            (Pos::Part, "'s") => {
                let after_pronoun = i > 0
                    && self.tags[i - 1] == Pos::Pron
                    && !POSSESSIVES.contains(self.lex[i - 1].lower.as_str());
                let after_expletive = i > 0
                    && matches!(self.lex[i - 1].lower.as_str(), "there" | "here" | "what");
                if after_pronoun || after_expletive {
                    Pos::Aux
                } else {
                    Pos::Part
                }
            }
            (Pos::Adj, _) => {
                let after_infinitive = self.prev(i).is_some_and(|p| {
                    MODALS.contains(self.lex[p].lower.as_str())
                        || (self.tags[p] == Pos::Part && self.lex[p].lower == "to")
                });
                if after_infinitive && known_verb_lemma(&lex.lower).is_some() {
                    Pos::Verb
                } else {
                    Pos::Adj
                }
            }
            (Pos::Verb, l) if HAVE_FORMS.contains(l) || DO_FORMS.contains(l) => Pos::Verb,
            (Pos::Verb, _) => match lex.verb {
                Some(form) => self.resolve_verb(i, form, lex.noun_verb),
                None => Pos::Verb,
            },
            (pos, _) => pos,
        }
    }

    fn resolve_that(&self, i: usize) -> Pos {
        let prev = i.checked_sub(1).map(|p| self.tags[p]);
        let next = self.lex.get(i + 1);
        let prev_nominal = matches!(prev, Some(Pos::Noun | Pos::Propn | Pos::Num));

        if prev_nominal
            && next.is_some_and(|n| {
                matches!(n.pos, Pos::Aux | Pos::Adv | Pos::Part) || n.is_verb_candidate()
            })
        {
            return Pos::Pron;
        }
        if matches!(prev, Some(Pos::Verb)) {
            return Pos::Sconj;
        }
        if prev_nominal && next.is_some_and(|n| matches!(n.pos, Pos::Det | Pos::Propn | Pos::Pron)) {
            return Pos::Pron;
        }
        if next.is_some_and(|n| matches!(n.pos, Pos::Noun | Pos::Adj | Pos::Num)) {
            return Pos::Det;
        }
        Pos::Pron
    }

    fn resolve_verb(&self, i: usize, form: VerbForm, noun_verb: bool) -> Pos {
        let nominal = |form: VerbForm| {
            if form == VerbForm::Past {
                Pos::Adj
            } else {
                Pos::Noun
            }
        };
        let opening = |form: VerbForm| match form {
            VerbForm::Past | VerbForm::Gerund => Pos::Verb,
            _ if noun_verb => Pos::Noun,
            _ => Pos::Verb,
        };

        let Some(p) = self.prev(i) else {
            return opening(form);
        };
        let prev_lower = self.lex[p].lower.as_str();
        let prev_tag = self.tags[p];

        if MODALS.contains(prev_lower) || (prev_tag == Pos::Part && prev_lower == "to") {
            return if form == VerbForm::Base { Pos::Verb } else { nominal(form) };
        }
        if DO_FORMS.contains(prev_lower) {
            return if form == VerbForm::Base { Pos::Verb } else { nominal(form) };
        }
        if HAVE_FORMS.contains(prev_lower) {
            return if form == VerbForm::Past { Pos::Verb } else { nominal(form) };
        }
        if BE_FORMS.contains(prev_lower) && prev_tag == Pos::Aux {
            return if matches!(form, VerbForm::Past | VerbForm::Gerund) {
                Pos::Verb
            } else {
                nominal(form)
            };
        }
        if NEGATIONS.contains(prev_lower) {
            return Pos::Verb;
        }

        match prev_tag {
            Pos::Pron if !POSSESSIVES.contains(prev_lower) => Pos::Verb,
            Pos::Pron | Pos::Det | Pos::Adj => nominal(form),
            Pos::Num => Pos::Noun,
            Pos::Adp => match form {
                VerbForm::Gerund => Pos::Verb,
                other => nominal(other),
            },
            Pos::Noun | Pos::Propn => match form {
                VerbForm::Past | VerbForm::Gerund => Pos::Verb,
                VerbForm::ThirdPerson if noun_verb && self.next_is_verbal(i) => Pos::Noun,
                VerbForm::ThirdPerson => Pos::Verb,
                VerbForm::Base if !noun_verb => Pos::Verb,
                VerbForm::Base if self.is_plural_noun(p) && self.next_starts_np(i) => Pos::Verb,
                VerbForm::Base => Pos::Noun,
            },
            Pos::Verb => match form {
                VerbForm::Base | VerbForm::ThirdPerson if noun_verb => Pos::Noun,
                _ => Pos::Verb,
            },
            _ => {
                let finite = matches!(form, VerbForm::ThirdPerson | VerbForm::Past);
                if finite && self.verb_seen(i) && self.next_starts_np(i) {
                    Pos::Verb
                } else {
                    opening(form)
                }
            }
        }
    }

    /// have/do act as auxiliaries only in front of another verb
    fn settle_auxiliaries(&mut self) {
        for i in 0..self.tags.len() {
            let lower = self.lex[i].lower.as_str();
            if self.tags[i] != Pos::Verb || !(HAVE_FORMS.contains(lower) || DO_FORMS.contains(lower)) {
                continue;
            }
            let mut j = i + 1;
            while j < self.tags.len()
                && (self.tags[j] == Pos::Adv || NEGATIONS.contains(self.lex[j].lower.as_str()))
            {
                j += 1;
            }
            if j < self.tags.len() && self.tags[j] == Pos::Verb {
                self.tags[i] = Pos::Aux;
            }
        }
    }
}

/// Tag the tokens of one sentence
pub fn tag(tokens: &[Token]) -> Vec<Pos> {
    let initial = tokens
        .iter()
        .position(|t| !t.is_marker() && t.text.chars().any(|c| c.is_alphabetic()));

    let lex: Vec<Lexical> = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| classify(&t.text, Some(i) == initial))
        .collect();

    let mut resolver = Resolver {
        lex: &lex,
        tags: Vec::with_capacity(lex.len()),
    };
    for i in 0..lex.len() {
        let pos = resolver.resolve(i);
        resolver.tags.push(pos);
    }
    resolver.settle_auxiliaries();
    resolver.tags
}
