//! Closed-class word lists and open-class seed vocabularies
//!
//! All entries are lowercase. Open classes (verbs, nouns, adjectives) only
//! need to cover frequent words; the tagger falls back to suffix rules.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

pub static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "the", "a", "an", "this", "these", "those", "each", "every", "some", "any", "no",
        "all", "both", "another", "either", "neither", "such", "several", "many", "few",
        "much", "most", "more", "less", "fewer", "various", "certain", "other",
    ])
});

pub static POSSESSIVES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["my", "your", "his", "her", "its", "our", "their", "whose"]));

pub static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
        "what", "which", "something", "anything", "nothing", "everything", "someone",
        "anyone", "everyone", "nobody", "somebody", "anybody", "everybody", "one", "ones",
        "mine", "yours", "ours", "theirs", "hers",
    ])
});

/// Pronouns that introduce a relative clause after a noun phrase
pub static RELATIVE_PRONOUNS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["that", "which", "who", "whom"]));

pub static PREPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "over",
        "under", "between", "among", "amongst", "through", "during", "within", "without",
        "about", "against", "across", "after", "before", "behind", "below", "beneath",
        "beside", "besides", "beyond", "despite", "except", "inside", "near", "off",
        "outside", "since", "toward", "towards", "until", "upon", "via", "per", "regarding",
        "concerning", "throughout", "amid", "like", "as", "along", "around", "above",
        "alongside", "following", "including", "excluding", "unlike", "versus", "up",
        "down", "out",
    ])
});

pub static COORDINATORS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["and", "or", "but", "nor", "&"]));

pub static SUBORDINATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "because", "although", "though", "while", "whereas", "if", "unless", "whether",
        "when", "where", "once",
    ])
});

pub static BE_FORMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&["be", "is", "am", "are", "was", "were", "been", "being", "'s", "'re", "'m"])
});

pub static HAVE_FORMS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["have", "has", "had", "having", "'ve", "'d"]));

pub static DO_FORMS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["do", "does", "did", "doing", "done"]));

pub static MODALS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "will", "would", "shall", "should", "can", "could", "may", "might", "must", "'ll",
        "ought", "ca", "wo",
    ])
});

pub static NEGATIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["not", "n't", "never"]));

pub static ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "also", "very", "often", "however", "only", "still", "already", "now", "then",
        "here", "there", "currently", "recently", "further", "furthermore", "well", "just",
        "even", "again", "thus", "therefore", "together", "always", "usually", "jointly",
        "primarily", "mainly", "largely", "particularly", "especially", "directly",
        "subsequently", "previously", "finally", "initially", "later", "soon", "yet",
        "almost", "quite", "rather", "too", "so", "instead", "moreover", "nevertheless",
        "meanwhile", "accordingly", "hence", "indeed", "fully", "partly", "approximately",
        "nearly", "respectively", "effectively", "formally", "officially", "newly",
        "widely", "closely", "ever", "perhaps", "away", "back", "forward", "abroad",
        "ago", "whilst",
    ])
});

pub static NUMBER_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "zero", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
        "eighteen", "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy",
        "eighty", "ninety", "hundred", "thousand", "million", "billion", "trillion",
        "dozen",
    ])
});

pub static ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "new", "old", "large", "small", "big", "good", "bad", "great", "high", "low",
        "long", "short", "early", "late", "young", "important", "major", "minor", "main",
        "key", "public", "private", "local", "national", "international", "regional",
        "economic", "political", "social", "legal", "financial", "civil", "military",
        "federal", "central", "general", "special", "joint", "full", "responsible",
        "independent", "available", "possible", "necessary", "relevant", "significant",
        "current", "former", "future", "final", "first", "second", "third", "last", "next",
        "same", "different", "similar", "certain", "clear", "common", "difficult", "easy",
        "free", "human", "likely", "open", "own", "real", "recent", "strong", "weak",
        "total", "whole", "wide", "able", "additional", "annual", "direct", "effective",
        "entire", "external", "internal", "foreign", "domestic", "global", "initial",
        "interim", "temporary", "permanent", "provisional", "administrative", "executive",
        "judicial", "constitutional", "municipal", "technical", "operational", "strategic",
        "senior", "junior", "chief", "deputy", "acting", "overall", "further", "various",
        "multiple", "sufficient", "adequate", "appropriate", "existing", "proposed",
        "specific", "serious", "critical", "primary", "secondary", "essential", "basic",
        "particular", "due", "active", "democratic", "ethnic", "economical", "transitional",
    ])
});

/// Verb base forms
pub static VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "accept", "achieve", "acquire", "add", "address", "adopt", "advise", "affect",
        "agree", "allocate", "allow", "amend", "announce", "appear", "apply", "appoint",
        "approve", "argue", "arrange", "arrive", "ask", "assess", "assign", "assist",
        "assume", "attend", "authorize", "authorise", "avoid", "become", "begin",
        "believe", "belong", "bring", "build", "buy", "carry", "cease", "choose",
        "collaborate", "collect", "combine", "come", "commit", "compare", "complete",
        "comply", "conduct", "confirm", "consider", "consist", "constitute", "construct",
        "consult", "contain", "continue", "contribute", "convene", "coordinate", "create",
        "decide", "declare", "define", "deliver", "deploy", "describe", "determine",
        "develop", "direct", "discuss", "dissolve", "distribute", "divide", "draw",
        "eliminate", "emerge", "employ", "enable", "encourage", "enforce", "engage",
        "ensure", "enter", "establish", "evaluate", "examine", "expand", "expect",
        "explain", "express", "extend", "facilitate", "fail", "find", "follow", "gain",
        "get", "give", "go", "govern", "grant", "grow", "handle", "happen", "hear", "hire",
        "identify", "implement", "improve", "include", "indicate", "inform", "initiate",
        "install", "intend", "introduce", "investigate", "invest", "invite", "involve",
        "join", "keep", "know", "launch", "learn", "leave", "let", "lose", "maintain",
        "make", "manage", "mean", "meet", "mention", "negotiate", "note", "obtain",
        "occur", "operate", "organize", "organise", "oversee", "own", "participate",
        "perform", "privatize", "privatise", "prepare", "prevent", "produce", "propose",
        "protect", "provide", "publish", "pursue", "put", "raise", "receive", "recognize",
        "recognise", "recommend", "reduce", "refer", "reflect", "refuse", "regulate",
        "reject", "relate", "rely", "remain", "remove", "replace", "represent", "require",
        "resolve", "restore", "restructure", "retain", "reveal", "say", "see", "seek",
        "seem", "select", "sell", "send", "serve", "sit", "solve", "speak", "spend",
        "strengthen", "submit", "succeed", "suggest", "take", "tell", "tend", "think",
        "transform", "try", "understand", "undertake", "unite", "urge", "verify", "want",
        "win", "write", "administer", "appeal", "liquidate", "sponsor", "chair",
        "supervise", "conclude", "oblige", "prohibit", "elect", "enact", "ratify",
        "announce", "assure", "commence", "demonstrate", "hand", "observe", "settle",
        "accompany", "mandate", "discover", "reach", "receive", "transfer", "merge",
        "split", "cut", "set", "hold", "run", "pay", "lead", "meet", "show", "help", "work",
        "fund", "report", "support", "plan", "process", "control", "review", "change",
        "focus", "need", "aim", "request", "result", "increase", "decrease", "use", "act",
        "call", "cause", "claim", "cost", "deal", "demand", "design", "estimate", "export",
        "import", "face", "form", "hope", "issue", "lack", "list", "measure", "monitor",
        "name", "order", "place", "present", "promise", "protest", "question", "rate",
        "record", "reform", "release", "reply", "respect", "return", "rule", "schedule",
        "share", "sign", "start", "state", "study", "survey", "test", "trade", "transport",
        "trust", "turn", "vote", "witness", "budget", "benefit", "finance", "target",
        "train", "progress", "access", "account", "approach", "attack", "balance",
        "charge", "check", "comment", "concern", "contact", "contract", "cover", "credit",
        "damage", "debate", "delay", "display", "draft", "end", "exchange", "file",
        "guarantee", "guide", "head", "hold", "limit", "link", "loan", "look", "mark",
        "offer", "outline", "permit", "practice", "price", "purchase", "range", "regard",
        "register", "remark", "repair", "risk", "search", "shift", "source", "staff",
        "stand", "step", "supply", "task", "tax", "total", "track", "value", "view",
        "visit", "house", "host", "update", "upgrade", "aid", "effect", "experience",
        "figure", "land", "point", "position", "project", "research", "service", "move",
        "structure", "interest",
    ])
});

/// Base forms that are at least as often nouns as verbs
pub static NOUN_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "report", "support", "mandate", "fund", "plan", "process", "control", "lead",
        "review", "change", "focus", "need", "aim", "request", "result", "increase",
        "decrease", "use", "act", "aid", "call", "cause", "claim", "cost", "deal", "demand",
        "design", "effect", "estimate", "experience", "export", "import", "face", "figure",
        "form", "help", "hope", "issue", "lack", "land", "list", "measure", "monitor",
        "name", "order", "place", "point", "position", "present", "project", "promise",
        "protest", "question", "rate", "record", "reform", "release", "reply", "research",
        "respect", "return", "rule", "schedule", "service", "share", "show", "sign",
        "start", "state", "study", "survey", "test", "trade", "transfer", "transport",
        "trust", "turn", "vote", "witness", "work", "budget", "benefit", "finance",
        "target", "train", "progress", "access", "account", "appeal", "approach", "attack",
        "balance", "charge", "check", "comment", "concern", "contact", "contract", "cover",
        "credit", "damage", "debate", "delay", "display", "draft", "end", "exchange",
        "file", "guarantee", "guide", "head", "hold", "interest", "limit", "link", "loan",
        "look", "mark", "offer", "outline", "pay", "permit", "practice", "price",
        "purchase", "range", "regard", "register", "remark", "repair", "risk", "run",
        "search", "set", "shift", "source", "staff", "stand", "step", "supply", "task",
        "tax", "total", "track", "value", "view", "visit", "house", "host", "update",
        "upgrade", "move", "structure", "meet", "cut", "split", "chair", "sponsor", "note",
        "hand",
    ])
});

/// Frequent common nouns (singular)
pub static NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "agency", "agreement", "administration", "assembly", "assistance", "asset",
        "authority", "board", "company", "committee", "community", "country", "court",
        "decision", "development", "document", "donor", "economy", "enterprise",
        "government", "group", "institution", "law", "member", "ministry", "mission",
        "office", "official", "organization", "organisation", "party", "people", "person",
        "policy", "power", "privatization", "privatisation", "programme", "program",
        "property", "province", "region", "regulation", "resolution", "responsibility",
        "sector", "security", "system", "time", "year", "month", "week", "day", "area",
        "city", "town", "village", "municipality", "unit", "team", "staff", "employee",
        "worker", "manager", "director", "minister", "president", "representative",
        "council", "commission", "department", "division", "framework", "strategy",
        "initiative", "activity", "operation", "institution", "capacity", "framework",
        "implementation", "management", "oversight", "reconstruction", "recovery",
        "pillar", "table", "section", "chapter", "annex", "page", "figure", "information",
        "data", "number", "percent", "percentage", "amount", "money", "budget", "revenue",
        "cost", "price", "market", "business", "industry", "company", "firm", "bank",
        "loan", "grant", "donation", "contribution", "partner", "partnership",
        "stakeholder", "role", "task", "duty", "function", "goal", "objective", "priority",
        "problem", "issue", "challenge", "risk", "opportunity", "progress", "success",
        "failure", "way", "part", "case", "point", "fact", "example", "level", "rate",
        "share", "privatisation", "transition", "election", "status", "population",
        "minority", "majority", "right", "rights", "peace", "war", "conflict", "crisis",
        "reform", "framework", "procedure", "process", "mechanism", "structure", "body",
        "entity", "trust", "fund", "plan", "report", "mandate", "support", "control",
        "review", "service", "project", "work", "report", "school", "hospital", "police",
        "justice", "judge", "land", "property", "infrastructure", "energy", "water",
        "health", "education", "agriculture", "trade", "tax", "customs", "border",
    ])
});

/// Abbreviations that keep their trailing period
pub static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "inc", "ltd", "co", "corp",
        "vs", "etc", "no", "nos", "art", "para", "fig", "approx", "dept", "gen", "gov",
        "e.g", "i.e", "u.s", "u.k", "u.n", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
        "sep", "sept", "oct", "nov", "dec",
    ])
});

/// Irregular verb forms and their lemmas
pub static IRREGULAR_VERBS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("is", "be"), ("am", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"), ("'s", "be"), ("'re", "be"), ("'m", "be"),
        ("has", "have"), ("had", "have"), ("having", "have"), ("'ve", "have"),
        ("'d", "would"), ("'ll", "will"), ("ca", "can"), ("wo", "will"), ("does", "do"), ("did", "do"), ("done", "do"),
        ("went", "go"), ("gone", "go"), ("goes", "go"), ("made", "make"), ("took", "take"),
        ("taken", "take"), ("gave", "give"), ("given", "give"), ("came", "come"),
        ("became", "become"), ("began", "begin"), ("begun", "begin"), ("brought", "bring"),
        ("built", "build"), ("bought", "buy"), ("chose", "choose"), ("chosen", "choose"),
        ("drew", "draw"), ("drawn", "draw"), ("found", "find"), ("got", "get"),
        ("gotten", "get"), ("grew", "grow"), ("grown", "grow"), ("heard", "hear"),
        ("held", "hold"), ("kept", "keep"), ("knew", "know"), ("known", "know"),
        ("led", "lead"), ("left", "leave"), ("lost", "lose"), ("meant", "mean"),
        ("met", "meet"), ("paid", "pay"), ("ran", "run"), ("said", "say"), ("saw", "see"),
        ("seen", "see"), ("sought", "seek"), ("sold", "sell"), ("sent", "send"),
        ("sat", "sit"), ("spoke", "speak"), ("spoken", "speak"), ("spent", "spend"),
        ("stood", "stand"), ("told", "tell"), ("thought", "think"),
        ("understood", "understand"), ("undertook", "undertake"),
        ("undertaken", "undertake"), ("won", "win"), ("wrote", "write"),
        ("written", "write"), ("oversaw", "oversee"), ("overseen", "oversee"),
        ("shown", "show"), ("dealt", "deal"), ("arisen", "arise"), ("arose", "arise"),
        ("fell", "fall"), ("fallen", "fall"), ("felt", "feel"), ("forgot", "forget"),
        ("forgotten", "forget"), ("froze", "freeze"), ("frozen", "freeze"),
        ("withdrew", "withdraw"), ("withdrawn", "withdraw"),
    ]
    .into_iter()
    .collect()
});

/// Irregular noun plurals
pub static IRREGULAR_NOUNS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("people", "person"), ("men", "man"), ("women", "woman"), ("children", "child"),
        ("data", "data"), ("criteria", "criterion"), ("media", "media"),
        ("analyses", "analysis"), ("crises", "crisis"), ("bases", "basis"),
        ("feet", "foot"), ("teeth", "tooth"), ("mice", "mouse"), ("series", "series"),
        ("news", "news"), ("statistics", "statistics"), ("economics", "economics"),
        ("politics", "politics"),
    ]
    .into_iter()
    .collect()
});

/// Personal titles that precede a name
pub static TITLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "mr", "mr.", "mrs", "mrs.", "ms", "ms.", "dr", "dr.", "prof", "prof.", "sir",
        "madam", "president", "minister", "ambassador", "judge", "general", "governor",
        "senator", "secretary", "commissioner", "chairman", "chairperson", "director",
        "representative", "deputy", "prime", "special",
    ])
});

pub static MONTHS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december",
    ])
});

pub static CURRENCIES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["$", "€", "£", "eur", "usd", "dm", "euro", "euros", "dollars"]));

/// Check whether a lowercase word is any kind of function word
pub fn is_function_word(lower: &str) -> bool {
    DETERMINERS.contains(lower)
        || POSSESSIVES.contains(lower)
        || PRONOUNS.contains(lower)
        || PREPOSITIONS.contains(lower)
        || COORDINATORS.contains(lower)
        || SUBORDINATORS.contains(lower)
        || is_auxiliary(lower)
        || NEGATIONS.contains(lower)
        || lower == "that"
}

/// be/have/do forms and modals
pub fn is_auxiliary(lower: &str) -> bool {
    BE_FORMS.contains(lower)
        || HAVE_FORMS.contains(lower)
        || DO_FORMS.contains(lower)
        || MODALS.contains(lower)
}

/// Check whether a lowercase word belongs to any closed or seed list
pub fn is_known(lower: &str) -> bool {
    is_function_word(lower)
        || ADVERBS.contains(lower)
        || ADJECTIVES.contains(lower)
        || NUMBER_WORDS.contains(lower)
        || VERBS.contains(lower)
        || NOUNS.contains(lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_are_lowercase() {
        for list in [&*VERBS, &*NOUNS, &*ADJECTIVES, &*ADVERBS, &*PREPOSITIONS] {
            for word in list {
                assert_eq!(*word, word.to_lowercase());
            }
        }
    }

    #[test]
    fn test_noun_verbs_are_verbs() {
        for word in NOUN_VERBS.iter() {
            assert!(VERBS.contains(word), "{word} missing from VERBS");
        }
    }

    #[test]
    fn test_known_words() {
        assert!(is_known("the"));
        assert!(is_known("discuss"));
        assert!(is_auxiliary("was"));
        assert!(!is_known("unmik"));
    }
}
