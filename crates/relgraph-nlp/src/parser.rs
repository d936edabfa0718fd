//! Shallow dependency parser
//!
//! A sentence is first chunked into units (noun phrases, verb groups,
//! prepositions, conjunctions, clause markers, punctuation). The units are
//! then attached left to right by a small clause machine that tracks the
//! current verb, its subject and pending prepositions or conjunctions.
//! Every token ends up with exactly one head; the root heads itself.

use std::ops::Range;

use crate::doc::{Dep, Pos, Token};
use crate::lemma::normalize;
use crate::lexicon::{NEGATIONS, POSSESSIVES, RELATIVE_PRONOUNS};
use crate::tagger::VerbForm;

/// Parse result with sentence-local indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentenceParse {
    /// Head and relation per token
    pub arcs: Vec<(usize, Dep)>,
    /// Base noun phrases
    pub noun_chunks: Vec<Range<usize>>,
}

// ============================================================================
// Chunking
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitKind {
    Noun {
        head: usize,
    },
    Verb {
        main: usize,
        passive: bool,
        infinitive: bool,
        has_aux: bool,
        form: VerbForm,
    },
    Adp,
    Cc,
    Mark,
    Relative,
    Punct {
        comma: bool,
    },
    Other,
}

#[derive(Debug, Clone)]
struct Unit {
    kind: UnitKind,
    range: Range<usize>,
}

fn lower(token: &Token) -> String {
    normalize(&token.text)
}

fn verb_follows(tokens: &[Token], j: usize) -> bool {
    let mut k = j + 1;
    while k < tokens.len()
        && (tokens[k].pos == Pos::Adv || NEGATIONS.contains(lower(&tokens[k]).as_str()))
    {
        k += 1;
    }
    k < tokens.len() && matches!(tokens[k].pos, Pos::Aux | Pos::Verb)
}

fn scan_noun(tokens: &[Token], i: usize) -> Option<Unit> {
    let first = &tokens[i];
    if first.pos == Pos::Pron && !POSSESSIVES.contains(lower(first).as_str()) {
        return Some(Unit {
            kind: UnitKind::Noun { head: i },
            range: i..i + 1,
        });
    }

    let mut j = i;
    let mut seen_nominal = false;
    while j < tokens.len() {
        let token = &tokens[j];
        let next_pos = tokens.get(j + 1).map(|t| t.pos);
        let take = match token.pos {
            Pos::Det => !seen_nominal,
            Pos::Pron => j == i,
            Pos::Adj | Pos::Num => true,
            Pos::Noun | Pos::Propn => {
                seen_nominal = true;
                true
            }
            Pos::Part => {
                lower(token) == "'s"
                    && seen_nominal
                    && matches!(next_pos, Some(Pos::Noun | Pos::Propn | Pos::Adj | Pos::Num))
            }
            Pos::Adv => !seen_nominal && next_pos == Some(Pos::Adj),
            _ => false,
        };
        if !take {
            break;
        }
        j += 1;
    }

    let nominal = (i..j)
        .rev()
        .find(|&k| matches!(tokens[k].pos, Pos::Noun | Pos::Propn));
    let last_num = (i..j).rev().find(|&k| tokens[k].pos == Pos::Num);

    let (head, end) = match (nominal, last_num) {
        (Some(n), Some(m)) if m > n => (n, m + 1),
        (Some(n), _) => (n, n + 1),
        (None, Some(m)) => (m, m + 1),
        (None, None) if (i..j).any(|k| tokens[k].pos == Pos::Det) => (j - 1, j),
        (None, None) => return None,
    };

    Some(Unit {
        kind: UnitKind::Noun { head },
        range: i..end,
    })
}

fn scan_verb(tokens: &[Token], i: usize) -> Option<Unit> {
    let mut j = i;
    let mut main = None;
    let mut last_aux = None;

    while j < tokens.len() {
        let token = &tokens[j];
        let word = lower(token);
        match token.pos {
            Pos::Aux => last_aux = Some(j),
            Pos::Part if word == "to" || NEGATIONS.contains(word.as_str()) => {}
            Pos::Adv if verb_follows(tokens, j) => {}
            Pos::Verb => {
                main = Some(j);
                j += 1;
                break;
            }
            _ => break,
        }
        j += 1;
    }

    let main = main.or(last_aux)?;
    let main_token = &tokens[main];
    let form = VerbForm::of(&lower(main_token), &main_token.lemma);
    let has_aux = last_aux.is_some_and(|a| a < main);
    let passive = main_token.pos == Pos::Verb
        && form == VerbForm::Past
        && (i..main).any(|k| tokens[k].pos == Pos::Aux && tokens[k].lemma == "be");
    let infinitive = tokens[i].pos == Pos::Part && lower(&tokens[i]) == "to";

    Some(Unit {
        kind: UnitKind::Verb {
            main,
            passive,
            infinitive,
            has_aux,
            form,
        },
        range: i..j,
    })
}

fn chunk(tokens: &[Token]) -> Vec<Unit> {
    let mut units: Vec<Unit> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let word = lower(token);
        let prev_is_noun = match units.as_slice() {
            [.., last] if matches!(last.kind, UnitKind::Noun { .. }) => true,
            [.., noun, comma] => {
                matches!(noun.kind, UnitKind::Noun { .. })
                    && comma.kind == UnitKind::Punct { comma: true }
            }
            _ => false,
        };
        let single = |kind| Unit {
            kind,
            range: i..i + 1,
        };

        let unit = match token.pos {
            Pos::Pron if prev_is_noun && RELATIVE_PRONOUNS.contains(word.as_str()) => {
                single(UnitKind::Relative)
            }
            Pos::Det | Pos::Adj | Pos::Num | Pos::Noun | Pos::Propn | Pos::Pron => {
                scan_noun(tokens, i).unwrap_or_else(|| single(UnitKind::Other))
            }
            Pos::Aux | Pos::Verb | Pos::Part | Pos::Adv => {
                scan_verb(tokens, i).unwrap_or_else(|| single(UnitKind::Other))
            }
            Pos::Adp => single(UnitKind::Adp),
            Pos::Cconj => single(UnitKind::Cc),
            Pos::Sconj => single(UnitKind::Mark),
            Pos::Punct => single(UnitKind::Punct { comma: word == "," }),
            _ => single(UnitKind::Other),
        };

        i = unit.range.end;
        units.push(unit);
    }

    units
}

// ============================================================================
// Attachment
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Attach {
    Main,
    Adverbial,
    Relative(usize),
    Complement(usize),
    Nested,
}

#[derive(Debug, Clone)]
struct Clause {
    attach: Attach,
    verb: Option<usize>,
    subject: Option<usize>,
    mark: Option<usize>,
    relative: Option<usize>,
    has_object: bool,
    copula: bool,
    passive: bool,
}

impl Clause {
    fn new(attach: Attach) -> Self {
        Self {
            attach,
            verb: None,
            subject: None,
            mark: None,
            relative: None,
            has_object: false,
            copula: false,
            passive: false,
        }
    }

    fn switch_verb(&mut self, verb: usize, passive: bool, copula: bool) {
        self.verb = Some(verb);
        self.passive = passive;
        self.copula = copula;
        self.has_object = false;
    }
}

struct Builder<'a> {
    tokens: &'a [Token],
    arcs: Vec<Option<(usize, Dep)>>,
    root: Option<usize>,
    clause: Clause,
    outer: Vec<Clause>,
    orphan_verbs: Vec<usize>,
    deferred: Vec<(usize, Dep)>,
    pending_prep: Option<usize>,
    pending_cc: Option<(usize, Option<UnitKind>)>,
    prev: Option<UnitKind>,
    before_prev: Option<UnitKind>,
    noun_chunks: Vec<Range<usize>>,
}

impl<'a> Builder<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            arcs: vec![None; tokens.len()],
            root: None,
            clause: Clause::new(Attach::Main),
            outer: Vec::new(),
            orphan_verbs: Vec::new(),
            deferred: Vec::new(),
            pending_prep: None,
            pending_cc: None,
            prev: None,
            before_prev: None,
            noun_chunks: Vec::new(),
        }
    }

    fn set(&mut self, dependent: usize, head: usize, dep: Dep) {
        self.arcs[dependent] = Some((head, dep));
    }

    fn dep_of(&self, index: usize) -> Option<Dep> {
        self.arcs[index].map(|(_, dep)| dep)
    }

    fn open(&mut self, clause: Clause) {
        let previous = std::mem::replace(&mut self.clause, clause);
        self.outer.push(previous);
    }

    /// Return to the enclosing clause when it still waits for its verb
    fn close_if_outer_waits(&mut self) {
        let waiting = self.outer.last().is_some_and(|c| c.verb.is_none());
        if self.clause.verb.is_some() && waiting {
            if let Some(outer) = self.outer.pop() {
                self.clause = outer;
            }
        }
    }

    fn push_unit(&mut self, unit: &Unit) {
        match unit.kind {
            UnitKind::Noun { head } => self.noun(unit.range.clone(), head),
            UnitKind::Verb { .. } => self.verb(unit),
            UnitKind::Adp => self.adposition(unit.range.start),
            UnitKind::Cc => self.pending_cc = Some((unit.range.start, self.prev)),
            UnitKind::Mark => self.mark(unit.range.start),
            UnitKind::Relative => self.relative(unit.range.start),
            UnitKind::Punct { comma } => {
                if comma {
                    self.close_if_outer_waits();
                }
                self.deferred.push((unit.range.start, Dep::Punct));
            }
            UnitKind::Other => self.other(unit.range.start),
        }
        self.before_prev = self.prev;
        self.prev = Some(unit.kind);
    }

    fn noun(&mut self, range: Range<usize>, head: usize) {
        let tokens = self.tokens;
        for t in range.clone().filter(|&t| t != head) {
            let token = &tokens[t];
            let (to, dep) = match token.pos {
                Pos::Det => (head, Dep::Det),
                Pos::Pron => (head, Dep::Poss),
                Pos::Adj => (head, Dep::Amod),
                Pos::Num => (head, Dep::Nummod),
                Pos::Noun | Pos::Propn => {
                    let possessive = tokens
                        .get(t + 1)
                        .is_some_and(|n| n.pos == Pos::Part && lower(n) == "'s");
                    (head, if possessive { Dep::Poss } else { Dep::Compound })
                }
                Pos::Part if t > range.start => (t - 1, Dep::Case),
                Pos::Adv => (t + 1, Dep::Advmod),
                _ => (head, Dep::Dep),
            };
            self.set(t, to, dep);
        }
        if matches!(tokens[head].pos, Pos::Noun | Pos::Propn | Pos::Pron) {
            self.noun_chunks.push(range);
        }

        if let Some(prep) = self.pending_prep.take() {
            self.set(head, prep, Dep::Pobj);
            return;
        }
        if let Some((cc, Some(UnitKind::Noun { head: first }))) = self.pending_cc {
            self.set(head, first, Dep::Conj);
            self.set(cc, first, Dep::Cc);
            self.pending_cc = None;
            return;
        }
        if let (Some(UnitKind::Punct { comma: true }), Some(UnitKind::Noun { head: first })) =
            (self.prev, self.before_prev)
        {
            let anchored = self.clause.subject == Some(first)
                || matches!(self.dep_of(first), Some(Dep::Dobj | Dep::Attr | Dep::Nsubj));
            if anchored {
                self.set(head, first, Dep::Appos);
                return;
            }
        }

        match self.clause.verb {
            Some(verb) if !self.clause.has_object => {
                let dep = if self.clause.copula { Dep::Attr } else { Dep::Dobj };
                self.set(head, verb, dep);
                self.clause.has_object = true;
            }
            Some(verb) => self.set(head, verb, Dep::Dep),
            None if self.clause.subject.is_none() => self.clause.subject = Some(head),
            None => self.deferred.push((head, Dep::Dep)),
        }
    }

    fn verb(&mut self, unit: &Unit) {
        let UnitKind::Verb {
            main,
            passive,
            infinitive,
            has_aux,
            form,
        } = unit.kind
        else {
            return;
        };

        let last_be = unit
            .range
            .clone()
            .filter(|&k| k < main && self.tokens[k].pos == Pos::Aux && self.tokens[k].lemma == "be")
            .last();
        for t in unit.range.clone().filter(|&t| t != main) {
            let word = lower(&self.tokens[t]);
            let dep = if NEGATIONS.contains(word.as_str()) {
                Dep::Neg
            } else if self.tokens[t].pos == Pos::Adv {
                Dep::Advmod
            } else if passive && Some(t) == last_be {
                Dep::AuxPass
            } else {
                Dep::Aux
            };
            self.set(t, main, dep);
        }

        let copula = self.tokens[main].pos == Pos::Aux && self.tokens[main].lemma == "be";

        if let Some(prep) = self.pending_prep.take() {
            self.set(main, prep, Dep::Pcomp);
            let mut nested = Clause::new(Attach::Nested);
            nested.switch_verb(main, passive, copula);
            self.open(nested);
            return;
        }

        if self.pending_cc.is_none() && !infinitive {
            self.close_if_outer_waits();
        }

        let Some(current) = self.clause.verb else {
            self.start_clause_verb(main, passive, copula);
            return;
        };

        if infinitive {
            self.set(main, current, Dep::Xcomp);
        } else if let Some((cc, _)) = self.pending_cc.take() {
            self.set(main, current, Dep::Conj);
            self.set(cc, current, Dep::Cc);
        } else if let Some(UnitKind::Noun { head }) = self.prev {
            let participle = !has_aux && matches!(form, VerbForm::Past | VerbForm::Gerund);
            if participle {
                self.set(main, head, Dep::Acl);
                self.clause.switch_verb(main, form == VerbForm::Past, false);
                return;
            }
            if matches!(self.arcs[head], Some((v, Dep::Dobj | Dep::Attr)) if v == current) {
                let dep = if passive { Dep::NsubjPass } else { Dep::Nsubj };
                self.set(head, main, dep);
                self.set(main, current, Dep::Ccomp);
            } else {
                self.set(main, current, Dep::Dep);
            }
        } else {
            self.set(main, current, Dep::Dep);
        }
        self.clause.switch_verb(main, passive, copula);
    }

    fn start_clause_verb(&mut self, main: usize, passive: bool, copula: bool) {
        self.clause.switch_verb(main, passive, copula);

        match self.clause.attach {
            Attach::Main => match self.root {
                Some(root) => self.set(main, root, Dep::Conj),
                None => {
                    self.root = Some(main);
                    self.set(main, main, Dep::Root);
                    for orphan in std::mem::take(&mut self.orphan_verbs) {
                        self.set(orphan, main, Dep::Advcl);
                    }
                }
            },
            Attach::Adverbial => match self.root {
                Some(root) => self.set(main, root, Dep::Advcl),
                None => self.orphan_verbs.push(main),
            },
            Attach::Relative(noun) => self.set(main, noun, Dep::Relcl),
            Attach::Complement(verb) => self.set(main, verb, Dep::Ccomp),
            Attach::Nested => {}
        }

        let subject_dep = if passive { Dep::NsubjPass } else { Dep::Nsubj };
        match (self.clause.subject, self.clause.relative) {
            (Some(subject), relative) => {
                self.set(subject, main, subject_dep);
                if let Some(pronoun) = relative {
                    self.set(pronoun, main, Dep::Dobj);
                }
            }
            (None, Some(pronoun)) => self.set(pronoun, main, subject_dep),
            (None, None) => {}
        }
        if let Some(mark) = self.clause.mark {
            self.set(mark, main, Dep::Mark);
        }
    }

    fn adposition(&mut self, prep: usize) {
        let word = lower(&self.tokens[prep]);
        match (self.clause.verb, self.prev) {
            (Some(verb), _) if word == "by" && self.clause.passive => {
                self.set(prep, verb, Dep::Agent)
            }
            (verb, Some(UnitKind::Noun { head })) if word == "of" || verb.is_none() => {
                self.set(prep, head, Dep::Prep)
            }
            (Some(verb), _) => self.set(prep, verb, Dep::Prep),
            (None, _) => self.deferred.push((prep, Dep::Prep)),
        }
        self.pending_prep = Some(prep);
    }

    fn mark(&mut self, marker: usize) {
        let word = lower(&self.tokens[marker]);
        let attach = match self.clause.verb {
            Some(verb) if word == "that" => Attach::Complement(verb),
            _ => Attach::Adverbial,
        };
        let mut clause = Clause::new(attach);
        clause.mark = Some(marker);
        self.pending_prep = None;
        self.open(clause);
    }

    fn relative(&mut self, pronoun: usize) {
        let antecedent = match (self.prev, self.before_prev) {
            (Some(UnitKind::Noun { head }), _) => Some(head),
            (Some(UnitKind::Punct { comma: true }), Some(UnitKind::Noun { head })) => Some(head),
            _ => None,
        };
        let Some(head) = antecedent else {
            self.deferred.push((pronoun, Dep::Dep));
            return;
        };
        let mut clause = Clause::new(Attach::Relative(head));
        clause.relative = Some(pronoun);
        self.pending_prep = None;
        self.open(clause);
    }

    fn other(&mut self, index: usize) {
        let tokens = self.tokens;
        let token = &tokens[index];
        let word = lower(token);
        match (token.pos, self.clause.verb) {
            (Pos::Adj, Some(verb)) if self.clause.copula => self.set(index, verb, Dep::Acomp),
            (Pos::Adj, _) => match self.prev {
                Some(UnitKind::Noun { head }) => self.set(index, head, Dep::Amod),
                _ => self.deferred.push((index, Dep::Dep)),
            },
            (Pos::Adv | Pos::Part, Some(verb)) => {
                let dep = if NEGATIONS.contains(word.as_str()) {
                    Dep::Neg
                } else {
                    Dep::Advmod
                };
                self.set(index, verb, dep);
            }
            (Pos::Adv, None) => self.deferred.push((index, Dep::Advmod)),
            _ => self.deferred.push((index, Dep::Dep)),
        }
    }

    fn first_unattached(&self, pred: impl Fn(&Token) -> bool) -> Option<usize> {
        (0..self.tokens.len()).find(|&i| self.arcs[i].is_none() && pred(&self.tokens[i]))
    }

    fn pick_root(&self) -> usize {
        self.first_unattached(|t| matches!(t.pos, Pos::Verb | Pos::Aux))
            .or_else(|| self.first_unattached(|t| matches!(t.pos, Pos::Noun | Pos::Propn | Pos::Pron)))
            .or_else(|| self.first_unattached(|t| !matches!(t.pos, Pos::Punct | Pos::X)))
            .or_else(|| self.first_unattached(|_| true))
            .unwrap_or(0)
    }

    fn finish(mut self) -> SentenceParse {
        if self.tokens.is_empty() {
            return SentenceParse::default();
        }

        let root = match self.root {
            Some(root) => root,
            None => {
                let root = self.pick_root();
                self.set(root, root, Dep::Root);
                root
            }
        };

        let orphans = std::mem::take(&mut self.orphan_verbs);
        let subjects: Vec<usize> = std::iter::once(&self.clause)
            .chain(self.outer.iter())
            .filter_map(|c| c.subject)
            .collect();
        let mut leftovers: Vec<(usize, Dep)> = orphans.into_iter().map(|o| (o, Dep::Advcl)).collect();
        leftovers.extend(subjects.into_iter().map(|s| (s, Dep::Dep)));
        if let Some((cc, _)) = self.pending_cc {
            leftovers.push((cc, Dep::Cc));
        }
        leftovers.append(&mut self.deferred);

        for (token, dep) in leftovers {
            if token != root && self.arcs[token].is_none() {
                self.set(token, root, dep);
            }
        }

        let arcs = self
            .arcs
            .iter()
            .enumerate()
            .map(|(i, arc)| match arc {
                Some(arc) => *arc,
                None if i == root => (root, Dep::Root),
                None => (root, Dep::Dep),
            })
            .collect();

        SentenceParse {
            arcs,
            noun_chunks: self.noun_chunks,
        }
    }
}

/// Parse one tagged and lemmatized sentence
pub fn parse(tokens: &[Token]) -> SentenceParse {
    let mut builder = Builder::new(tokens);
    for unit in chunk(tokens) {
        builder.push_unit(&unit);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemma::lemmatize;
    use crate::tagger::{tag, tests::tokens};

    fn analyze(text: &str) -> (Vec<Token>, SentenceParse) {
        let mut tokens = tokens(text);
        let tags = tag(&tokens);
        for (token, pos) in tokens.iter_mut().zip(tags) {
            token.pos = pos;
            token.lemma = lemmatize(&token.text, pos);
        }
        let parse = parse(&tokens);
        (tokens, parse)
    }

    fn arc(tokens: &[Token], parse: &SentenceParse, word: &str) -> (String, Dep) {
        let i = tokens.iter().position(|t| t.text == word).unwrap();
        let (head, dep) = parse.arcs[i];
        (tokens[head].text.clone(), dep)
    }

    #[test]
    fn test_transitive_clause() {
        let (tokens, parse) = analyze("UNMIK discusses the mandate.");
        assert_eq!(arc(&tokens, &parse, "UNMIK"), ("discusses".into(), Dep::Nsubj));
        assert_eq!(arc(&tokens, &parse, "discusses"), ("discusses".into(), Dep::Root));
        assert_eq!(arc(&tokens, &parse, "mandate"), ("discusses".into(), Dep::Dobj));
        assert_eq!(arc(&tokens, &parse, "the"), ("mandate".into(), Dep::Det));
        assert_eq!(arc(&tokens, &parse, "."), ("discusses".into(), Dep::Punct));
        assert_eq!(parse.noun_chunks, vec![0..1, 2..4]);
    }

    #[test]
    fn test_passive_with_agent() {
        let (tokens, parse) = analyze("The assets were transferred by UNMIK to KTA.");
        assert_eq!(arc(&tokens, &parse, "assets"), ("transferred".into(), Dep::NsubjPass));
        assert_eq!(arc(&tokens, &parse, "were"), ("transferred".into(), Dep::AuxPass));
        assert_eq!(arc(&tokens, &parse, "by"), ("transferred".into(), Dep::Agent));
        assert_eq!(arc(&tokens, &parse, "UNMIK"), ("by".into(), Dep::Pobj));
        assert_eq!(arc(&tokens, &parse, "to"), ("transferred".into(), Dep::Prep));
        assert_eq!(arc(&tokens, &parse, "KTA"), ("to".into(), Dep::Pobj));
    }

    #[test]
    fn test_of_attaches_to_noun() {
        let (tokens, parse) = analyze("The head of UNMIK supports the reform of KTA.");
        assert_eq!(arc(&tokens, &parse, "head"), ("supports".into(), Dep::Nsubj));
        assert_eq!(arc(&tokens, &parse, "UNMIK"), ("of".into(), Dep::Pobj));
        assert_eq!(arc(&tokens, &parse, "reform"), ("supports".into(), Dep::Dobj));
        let of_positions: Vec<usize> = tokens
            .iter()
            .filter(|t| t.text == "of")
            .map(|t| parse.arcs[t.index].0)
            .collect();
        assert_eq!(tokens[of_positions[0]].text, "head");
        assert_eq!(tokens[of_positions[1]].text, "reform");
    }

    #[test]
    fn test_relative_clause_returns_to_main_clause() {
        let (tokens, parse) = analyze("The agency that UNMIK created manages the assets.");
        assert_eq!(arc(&tokens, &parse, "manages"), ("manages".into(), Dep::Root));
        assert_eq!(arc(&tokens, &parse, "agency"), ("manages".into(), Dep::Nsubj));
        assert_eq!(arc(&tokens, &parse, "created"), ("agency".into(), Dep::Relcl));
        assert_eq!(arc(&tokens, &parse, "UNMIK"), ("created".into(), Dep::Nsubj));
        assert_eq!(arc(&tokens, &parse, "assets"), ("manages".into(), Dep::Dobj));
    }

    #[test]
    fn test_verbless_header() {
        let (tokens, parse) = analyze("[HEADER] 1. Introduction");
        assert_eq!(arc(&tokens, &parse, "Introduction"), ("Introduction".into(), Dep::Root));
        assert_eq!(parse.arcs.iter().filter(|(_, d)| *d == Dep::Root).count(), 1);
    }

    #[test]
    fn test_single_root_and_no_cycles() {
        let text = "Although KTA was created in 2002, UNMIK and the PISG, which oversee it, \
                    continue to discuss the privatization of enterprises.";
        let (_, parse) = analyze(text);
        let roots: Vec<usize> = (0..parse.arcs.len())
            .filter(|&i| parse.arcs[i].1 == Dep::Root)
            .collect();
        assert_eq!(roots.len(), 1);
        for start in 0..parse.arcs.len() {
            let mut current = start;
            let mut steps = 0;
            while parse.arcs[current].1 != Dep::Root {
                current = parse.arcs[current].0;
                steps += 1;
                assert!(steps <= parse.arcs.len(), "cycle from token {start}");
            }
        }
    }
}
