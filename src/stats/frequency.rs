//! Token frequency measures.

use ahash::AHashMap;

/// Distinct tokens divided by total tokens, or `None` for an empty list.
pub fn type_token_ratio<S: AsRef<str>>(tokens: &[S]) -> Option<f64> {
    if tokens.is_empty() {
        return None;
    }
    let types: ahash::AHashSet<&str> = tokens.iter().map(AsRef::as_ref).collect();
    Some(types.len() as f64 / tokens.len() as f64)
}

/// Token counts that remember first-occurrence order.
#[derive(Clone, Debug, Default)]
pub struct TermFrequencies {
    counts: AHashMap<String, (u64, usize)>,
    total: u64,
}

impl TermFrequencies {
    /// Count a token list.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut freqs = TermFrequencies::default();
        for token in tokens {
            freqs.add(token.as_ref());
        }
        freqs
    }

    /// Count one more occurrence of `token`.
    pub fn add(&mut self, token: &str) {
        let next_rank = self.counts.len();
        self.counts
            .entry(token.to_string())
            .or_insert((0, next_rank))
            .0 += 1;
        self.total += 1;
    }

    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).map(|(c, _)| *c).unwrap_or(0)
    }

    /// Total number of tokens counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent tokens. Ties go to the token seen first.
    pub fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(&String, &(u64, usize))> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));
        entries
            .into_iter()
            .take(n)
            .map(|(token, (count, _))| (token.clone(), *count))
            .collect()
    }
}
