//! Part-of-speech tagging.
//!
//! [`RuleBasedTagger`] assigns universal tags from closed-class word lists,
//! lexical flags, a small open-class lexicon and suffix heuristics. Tags are
//! decided left to right and may look at the previous token's tag.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::analysis::token::{PartOfSpeech, Token};

/// Trait for part-of-speech taggers.
pub trait PosTagger: Send + Sync {
    /// Assign a tag to every token in place.
    fn tag(&self, tokens: &mut [Token]);

    /// Get the name of this tagger.
    fn name(&self) -> &'static str;
}

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static PRONOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves", "he",
        "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we",
        "us", "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves",
        "someone", "somebody", "something", "anyone", "anybody", "anything", "everyone",
        "everybody", "everything", "nobody", "nothing", "who", "whom", "whose", "what", "which",
    ])
});

static DETERMINERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "a", "an", "the", "this", "that", "these", "those", "some", "any", "every", "each", "no",
        "all", "both", "either", "neither", "another", "such",
    ])
});

static ADPOSITIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
        "during", "before", "after", "above", "below", "from", "up", "down", "of", "off", "over",
        "under", "around", "among", "within", "without", "toward", "towards", "upon", "across",
        "behind", "beside", "near", "since", "until", "via", "per", "like", "despite",
    ])
});

static COORDINATORS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| set(&["and", "or", "but", "nor", "yet", "so", "&"]));

static SUBORDINATORS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "if", "because", "although", "though", "while", "whereas", "unless", "whether", "than",
        "once", "when", "where", "whenever", "wherever",
    ])
});

static AUXILIARIES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "be", "am", "is", "are", "was", "were", "been", "being", "'re", "’re", "'m", "’m", "have",
        "has", "had", "having", "'ve", "’ve", "do", "does", "did", "will", "would", "shall",
        "should", "can", "could", "may", "might", "must", "ca", "wo", "sha", "'ll", "’ll", "'d",
        "’d",
    ])
});

static PARTICLES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| set(&["to", "not", "n't", "n’t", "'s", "’s"]));

static INTERJECTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "oh", "wow", "lol", "yes", "yeah", "ok", "okay", "hey", "hi", "hello", "ugh", "thanks",
        "please", "um", "uh", "haha", "omg",
    ])
});

static ADVERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "very", "too", "also", "just", "only", "even", "still", "already", "never", "always",
        "often", "sometimes", "now", "then", "here", "there", "again", "almost", "really", "quite",
        "soon", "well", "ever", "how", "why", "maybe", "perhaps", "rather", "together", "away",
    ])
});

static NUMBER_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
        "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand", "million",
    ])
});

static COMMON_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "live", "love", "feel", "get", "go", "know", "think", "want", "need", "work", "make",
        "take", "see", "say", "come", "help", "try", "find", "give", "tell", "use", "ask", "seem",
        "leave", "call", "keep", "let", "begin", "hate", "hope", "walk", "talk", "start", "stop",
        "hear", "pay", "apply", "deal", "struggle", "cope", "wish", "look", "wait", "understand",
        "become", "remember", "believe", "lose", "happen", "sleep", "eat", "move", "care",
        "went", "got", "made", "took", "said", "came", "knew", "thought", "felt", "gave", "told",
        "saw", "left", "began", "lost", "kept", "heard", "paid",
    ])
});

static COMMON_ADJECTIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "good", "bad", "new", "old", "big", "small", "great", "little", "long", "short", "high",
        "low", "hard", "easy", "able", "sick", "ill", "deaf", "blind", "disabled", "chronic",
        "mental", "physical", "social", "real", "same", "different", "other", "free", "full",
        "happy", "sad", "tired", "sure", "late", "early", "young", "whole", "best", "better",
        "worse", "worst", "last", "next", "own", "right", "wrong", "normal", "severe", "mild",
        "daily", "weird", "fine", "okay", "important", "possible", "impossible", "difficult",
    ])
});

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish", "ary", "ent", "ant",
];

/// Tags that may be followed by a verb.
const VERB_CONTEXT: &[PartOfSpeech] = &[
    PartOfSpeech::Pron,
    PartOfSpeech::Aux,
    PartOfSpeech::Part,
    PartOfSpeech::Adv,
];

/// A tagger driven by word lists and suffix heuristics.
#[derive(Clone, Debug, Default)]
pub struct RuleBasedTagger {
    overrides: HashMap<String, PartOfSpeech>,
}

impl RuleBasedTagger {
    /// Create a new tagger with the built-in lexicons.
    pub fn new() -> Self {
        RuleBasedTagger {
            overrides: HashMap::new(),
        }
    }

    /// Force a tag for specific lowercased words.
    pub fn with_overrides(mut self, overrides: HashMap<String, PartOfSpeech>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    fn is_sentence_start(previous: Option<&Token>) -> bool {
        match previous {
            None => true,
            Some(prev) => prev.is_space || matches!(prev.text.as_str(), "." | "!" | "?" | "\"" | ":"),
        }
    }

    /// Decide the tag of one token given the previous (already tagged) token.
    pub fn tag_one(&self, token: &Token, previous: Option<&Token>) -> PartOfSpeech {
        if token.is_space {
            return PartOfSpeech::Space;
        }
        if token.is_punct {
            return PartOfSpeech::Punct;
        }
        if token.is_digit {
            return PartOfSpeech::Num;
        }

        let lower = token.lower();
        if let Some(pos) = self.overrides.get(&lower) {
            return *pos;
        }
        if !token.text.chars().any(char::is_alphanumeric) {
            return PartOfSpeech::Sym;
        }
        if token.text.contains("://") || token.text.contains('@') {
            return PartOfSpeech::X;
        }
        if token.text.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return PartOfSpeech::Num;
        }

        let word = lower.as_str();
        if PARTICLES.contains(word) {
            return PartOfSpeech::Part;
        }
        if PRONOUNS.contains(word) {
            return PartOfSpeech::Pron;
        }
        if AUXILIARIES.contains(word) {
            return PartOfSpeech::Aux;
        }
        if DETERMINERS.contains(word) {
            return PartOfSpeech::Det;
        }
        if ADPOSITIONS.contains(word) {
            return PartOfSpeech::Adp;
        }
        if COORDINATORS.contains(word) {
            return PartOfSpeech::Cconj;
        }
        if SUBORDINATORS.contains(word) {
            return PartOfSpeech::Sconj;
        }
        if INTERJECTIONS.contains(word) {
            return PartOfSpeech::Intj;
        }
        if NUMBER_WORDS.contains(word) {
            return PartOfSpeech::Num;
        }
        if ADVERBS.contains(word) {
            return PartOfSpeech::Adv;
        }

        let capitalized = token.text.chars().next().is_some_and(char::is_uppercase);
        if capitalized && !Self::is_sentence_start(previous) {
            return PartOfSpeech::Propn;
        }

        let prev_pos = previous.map(|p| p.pos);
        let verb_context = prev_pos.is_some_and(|p| VERB_CONTEXT.contains(&p));
        if COMMON_VERBS.contains(word) {
            return if verb_context {
                PartOfSpeech::Verb
            } else {
                PartOfSpeech::Noun
            };
        }
        if COMMON_ADJECTIVES.contains(word) {
            return PartOfSpeech::Adj;
        }

        let len = word.chars().count();
        if len > 4 && word.ends_with("ly") {
            return PartOfSpeech::Adv;
        }
        if len > 5 && word.ends_with("ing") {
            return match prev_pos {
                Some(PartOfSpeech::Det) | Some(PartOfSpeech::Adj) => PartOfSpeech::Noun,
                _ => PartOfSpeech::Verb,
            };
        }
        if len > 4 && word.ends_with("ed") {
            return PartOfSpeech::Verb;
        }
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return PartOfSpeech::Adj;
        }

        PartOfSpeech::Noun
    }
}

impl PosTagger for RuleBasedTagger {
    fn tag(&self, tokens: &mut [Token]) {
        for i in 0..tokens.len() {
            let (before, rest) = tokens.split_at_mut(i);
            let pos = self.tag_one(&rest[0], before.last());
            rest[0].pos = pos;
        }
    }

    fn name(&self) -> &'static str {
        "rule_based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::Tokenizer;
    use crate::analysis::tokenizer::english::EnglishTokenizer;

    fn tags(text: &str) -> Vec<(String, PartOfSpeech)> {
        let mut tokens: Vec<Token> = EnglishTokenizer::new()
            .unwrap()
            .tokenize(text)
            .unwrap()
            .collect();
        RuleBasedTagger::new().tag(&mut tokens);
        tokens.into_iter().map(|t| (t.text, t.pos)).collect()
    }

    #[test]
    fn test_closed_classes() {
        let tagged = tags("I live in New York City.");
        assert_eq!(tagged[0].1, PartOfSpeech::Pron);
        assert_eq!(tagged[1].1, PartOfSpeech::Verb);
        assert_eq!(tagged[2].1, PartOfSpeech::Adp);
        assert_eq!(tagged[3].1, PartOfSpeech::Propn);
        assert_eq!(tagged[4].1, PartOfSpeech::Propn);
        assert_eq!(tagged[6].1, PartOfSpeech::Punct);
    }

    #[test]
    fn test_open_class_heuristics() {
        let tagged = tags("the wonderful doctors quickly helped");
        assert_eq!(tagged[1].1, PartOfSpeech::Adj);
        assert_eq!(tagged[2].1, PartOfSpeech::Noun);
        assert_eq!(tagged[3].1, PartOfSpeech::Adv);
        assert_eq!(tagged[4].1, PartOfSpeech::Verb);
    }

    #[test]
    fn test_verb_depends_on_context() {
        assert_eq!(tags("they work")[1].1, PartOfSpeech::Verb);
        assert_eq!(tags("the work")[1].1, PartOfSpeech::Noun);
    }

    #[test]
    fn test_possessive_clitic_is_particle() {
        let tagged = tags("mom's car");
        assert_eq!(tagged[1], ("'s".to_string(), PartOfSpeech::Part));
    }

    #[test]
    fn test_overrides_win() {
        let mut overrides = HashMap::new();
        overrides.insert("ssdi".to_string(), PartOfSpeech::Propn);
        let tagger = RuleBasedTagger::new().with_overrides(overrides);
        assert_eq!(tagger.tag_one(&Token::new("ssdi", 0), None), PartOfSpeech::Propn);
    }
}
