//! Lemmatization.
//!
//! [`RuleLemmatizer`] maps a token and its tag to a dictionary form:
//!
//! - pronouns lemmatize to the [`PRON_LEMMA`] placeholder
//! - irregular forms come from an exception table (extendable by a lexicon)
//! - nouns, verbs and adjectives go through suffix rules
//! - proper nouns keep their case; everything else is lowercased

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::analysis::token::PartOfSpeech;

/// Placeholder lemma assigned to pronouns.
pub const PRON_LEMMA: &str = "-PRON-";

/// Trait for lemmatizers.
pub trait Lemmatizer: Send + Sync {
    /// Return the lemma of `text` given its tag.
    fn lemmatize(&self, text: &str, pos: PartOfSpeech) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

static EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        // be / have / do
        ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"), ("'re", "be"), ("’re", "be"), ("'m", "be"),
        ("’m", "be"), ("has", "have"), ("had", "have"), ("having", "have"), ("'ve", "have"),
        ("’ve", "have"), ("does", "do"), ("did", "do"), ("done", "do"),
        // clitics and modals
        ("n't", "not"), ("n’t", "not"), ("'ll", "will"), ("’ll", "will"), ("'d", "would"),
        ("’d", "would"), ("ca", "can"), ("wo", "will"), ("sha", "shall"),
        // irregular verbs
        ("went", "go"), ("gone", "go"), ("goes", "go"), ("got", "get"), ("gotten", "get"),
        ("made", "make"), ("took", "take"), ("taken", "take"), ("said", "say"),
        ("came", "come"), ("knew", "know"), ("known", "know"), ("thought", "think"),
        ("felt", "feel"), ("gave", "give"), ("given", "give"), ("told", "tell"),
        ("saw", "see"), ("seen", "see"), ("left", "leave"), ("began", "begin"),
        ("begun", "begin"), ("lost", "lose"), ("kept", "keep"), ("heard", "hear"),
        ("paid", "pay"), ("found", "find"), ("became", "become"), ("brought", "bring"),
        ("bought", "buy"), ("sent", "send"), ("spent", "spend"), ("meant", "mean"),
        ("met", "meet"), ("ran", "run"), ("sat", "sit"), ("slept", "sleep"), ("ate", "eat"),
        ("eaten", "eat"), ("wrote", "write"), ("written", "write"), ("fell", "fall"),
        ("fallen", "fall"), ("broke", "break"), ("broken", "break"), ("drove", "drive"),
        ("driven", "drive"), ("understood", "understand"), ("dealt", "deal"),
        // irregular nouns
        ("children", "child"), ("men", "man"), ("women", "woman"), ("feet", "foot"),
        ("teeth", "tooth"), ("mice", "mouse"), ("lives", "life"), ("wives", "wife"),
        ("knives", "knife"), ("leaves", "leaf"), ("selves", "self"), ("halves", "half"),
        ("shelves", "shelf"), ("crises", "crisis"), ("analyses", "analysis"),
        ("diagnoses", "diagnosis"),
        // irregular adjectives
        ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
        ("more", "much"), ("most", "much"), ("less", "little"), ("least", "little"),
    ]
    .into_iter()
    .collect()
});

/// Comparative-looking adjectives that are already base forms.
const ADJECTIVE_BASES: &[&str] = &[
    "other", "super", "proper", "clever", "eager", "tender", "bitter", "sober", "former",
    "latter", "inner", "outer", "upper", "lower", "under", "never", "over", "honest", "modest",
    "earnest", "interest", "forest", "sinister", "whether", "together", "bizarre",
];

/// Stem endings after which a dropped `e` is restored (`living` → `live`).
const E_RESTORING_ENDINGS: &[&str] = &[
    "v", "c", "z", "us", "iz", "yz", "ag", "dg", "rs", "os", "as",
];

const UNDOUBLE: &[char] = &['b', 'd', 'g', 'm', 'n', 'p', 'r', 't'];

/// A lemmatizer based on exception tables and suffix rules.
#[derive(Clone, Debug, Default)]
pub struct RuleLemmatizer {
    extra_exceptions: HashMap<String, String>,
}

impl RuleLemmatizer {
    /// Create a new lemmatizer with the built-in exception table.
    pub fn new() -> Self {
        RuleLemmatizer {
            extra_exceptions: HashMap::new(),
        }
    }

    /// Add lemma exceptions keyed by lowercased surface form.
    pub fn with_exceptions(mut self, exceptions: HashMap<String, String>) -> Self {
        self.extra_exceptions.extend(exceptions);
        self
    }

    fn noun(word: &str) -> String {
        let len = word.chars().count();
        if len <= 3 || !word.ends_with('s') {
            return word.to_string();
        }
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_string();
        }
        if len > 4 && word.ends_with("ies") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        for suffix in ["ches", "shes", "xes", "zes", "sses"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        word[..word.len() - 1].to_string()
    }

    /// Undo doubling or restore a silent `e` on a stripped verb stem.
    fn repair_stem(stem: &str) -> String {
        let chars: Vec<char> = stem.chars().collect();
        let n = chars.len();
        if n >= 3 && chars[n - 1] == chars[n - 2] && UNDOUBLE.contains(&chars[n - 1]) {
            return chars[..n - 1].iter().collect();
        }
        if n >= 2 && E_RESTORING_ENDINGS.iter().any(|e| stem.ends_with(e)) && !stem.ends_with("ck")
        {
            return format!("{stem}e");
        }
        stem.to_string()
    }

    fn verb(word: &str) -> String {
        let len = word.chars().count();
        if len > 4 && word.ends_with("ies") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        if len > 4 && word.ends_with("ied") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        if len > 5 && word.ends_with("ing") {
            return Self::repair_stem(&word[..word.len() - 3]);
        }
        if len > 4 && word.ends_with("eed") {
            return word.to_string();
        }
        if len > 3 && word.ends_with("ed") {
            return Self::repair_stem(&word[..word.len() - 2]);
        }
        if len > 3 && word.ends_with('s') && !word.ends_with("ss") {
            for suffix in ["ches", "shes", "xes", "sses", "zes", "oes"] {
                if word.ends_with(suffix) {
                    return word[..word.len() - 2].to_string();
                }
            }
            return word[..word.len() - 1].to_string();
        }
        word.to_string()
    }

    fn adjective(word: &str) -> String {
        let len = word.chars().count();
        if len <= 4 || ADJECTIVE_BASES.contains(&word) {
            return word.to_string();
        }
        if word.ends_with("iest") {
            return format!("{}y", &word[..word.len() - 4]);
        }
        if word.ends_with("ier") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        if word.ends_with("est") {
            return Self::repair_adjective(&word[..word.len() - 3]);
        }
        if word.ends_with("er") {
            return Self::repair_adjective(&word[..word.len() - 2]);
        }
        word.to_string()
    }

    fn repair_adjective(stem: &str) -> String {
        let chars: Vec<char> = stem.chars().collect();
        let n = chars.len();
        if n >= 3 && chars[n - 1] == chars[n - 2] && UNDOUBLE.contains(&chars[n - 1]) {
            return chars[..n - 1].iter().collect();
        }
        if ["r", "g", "s", "v", "n"].iter().any(|e| stem.ends_with(e)) && !stem.ends_with("rr") {
            return format!("{stem}e");
        }
        stem.to_string()
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, text: &str, pos: PartOfSpeech) -> String {
        match pos {
            PartOfSpeech::Pron => return PRON_LEMMA.to_string(),
            PartOfSpeech::Propn
            | PartOfSpeech::Punct
            | PartOfSpeech::Space
            | PartOfSpeech::Num
            | PartOfSpeech::Sym
            | PartOfSpeech::X => return text.to_string(),
            _ => {}
        }

        let lower = text.to_lowercase();
        if let Some(lemma) = self.extra_exceptions.get(&lower) {
            return lemma.clone();
        }
        if let Some(lemma) = EXCEPTIONS.get(lower.as_str()) {
            return lemma.to_string();
        }

        match pos {
            PartOfSpeech::Noun => Self::noun(&lower),
            PartOfSpeech::Verb | PartOfSpeech::Aux => Self::verb(&lower),
            PartOfSpeech::Adj => Self::adjective(&lower),
            _ => lower,
        }
    }

    fn name(&self) -> &'static str {
        "rule"
    }
}
