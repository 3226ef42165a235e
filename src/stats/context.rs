//! Distributional contexts: which words appear between the same neighbours.
//!
//! The context of a token is its lowercased left and right neighbours, with
//! `*START*` and `*END*` at the edges of the token list.

use ahash::{AHashMap, AHashSet};

const START: &str = "*START*";
const END: &str = "*END*";

/// A `(left, right)` neighbour pair.
pub type Context = (String, String);

/// Maps words to the contexts they occur in, and contexts back to words.
#[derive(Clone, Debug, Default)]
pub struct ContextIndex {
    /// word → (context → (count, first seen))
    word_to_contexts: AHashMap<String, AHashMap<Context, (u64, usize)>>,
    /// Insertion rank of each word, for stable tie-breaking.
    word_rank: AHashMap<String, usize>,
}

impl ContextIndex {
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Self {
        let lowered: Vec<String> = tokens.iter().map(|t| t.as_ref().to_lowercase()).collect();
        let mut index = ContextIndex::default();
        let mut seen = 0usize;

        for (i, word) in lowered.iter().enumerate() {
            let left = if i == 0 { START } else { lowered[i - 1].as_str() };
            let right = lowered.get(i + 1).map(String::as_str).unwrap_or(END);
            let context = (left.to_string(), right.to_string());

            let next_rank = index.word_rank.len();
            index.word_rank.entry(word.clone()).or_insert(next_rank);
            index
                .word_to_contexts
                .entry(word.clone())
                .or_default()
                .entry(context)
                .or_insert((0, seen))
                .0 += 1;
            seen += 1;
        }
        index
    }

    /// Distinct contexts of a word.
    pub fn contexts(&self, word: &str) -> Vec<Context> {
        let mut contexts: Vec<(&Context, &(u64, usize))> = self
            .word_to_contexts
            .get(&word.to_lowercase())
            .map(|m| m.iter().collect())
            .unwrap_or_default();
        contexts.sort_by_key(|(_, (_, first))| *first);
        contexts.into_iter().map(|(c, _)| c.clone()).collect()
    }

    /// Contexts shared by every word in `words`, most frequent first.
    ///
    /// Frequency is summed over all the given words; ties keep first
    /// occurrence order. Returns nothing when any word is unknown.
    pub fn common_contexts<S: AsRef<str>>(&self, words: &[S]) -> Vec<Context> {
        let maps: Vec<&AHashMap<Context, (u64, usize)>> = match words
            .iter()
            .map(|w| self.word_to_contexts.get(&w.as_ref().to_lowercase()))
            .collect::<Option<Vec<_>>>()
        {
            Some(maps) if !maps.is_empty() => maps,
            _ => return Vec::new(),
        };

        let mut shared: Vec<(Context, u64, usize)> = maps[0]
            .keys()
            .filter(|c| maps[1..].iter().all(|m| m.contains_key(*c)))
            .map(|c| {
                let stats = maps.iter().filter_map(|m| m.get(c));
                let total = stats.clone().map(|(count, _)| count).sum();
                let first = stats.map(|(_, first)| *first).min().unwrap_or(usize::MAX);
                (c.clone(), total, first)
            })
            .collect();
        shared.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        shared.into_iter().map(|(c, _, _)| c).collect()
    }

    /// Up to `num` words that share the most distinct contexts with `word`.
    pub fn similar(&self, word: &str, num: usize) -> Vec<String> {
        let word = word.to_lowercase();
        let Some(contexts) = self.word_to_contexts.get(&word) else {
            return Vec::new();
        };
        let wanted: AHashSet<&Context> = contexts.keys().collect();

        let mut scored: Vec<(&String, usize, usize)> = self
            .word_to_contexts
            .iter()
            .filter(|(other, _)| **other != word)
            .map(|(other, ctx)| {
                let shared = ctx.keys().filter(|c| wanted.contains(c)).count();
                (other, shared, self.word_rank.get(other).copied().unwrap_or(usize::MAX))
            })
            .filter(|(_, shared, _)| *shared > 0)
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        scored
            .into_iter()
            .take(num)
            .map(|(w, _, _)| w.clone())
            .collect()
    }
}

/// Render a context the way it is usually displayed: `left_right`.
pub fn display_context(context: &Context) -> String {
    format!("{}_{}", context.0, context.1)
}
