//! Windowed bigram collocations ranked by log-likelihood ratio.
//!
//! A pair `(a, b)` is counted whenever `b` follows `a` within `window_size - 1`
//! tokens. Pairs seen fewer than [`MIN_PAIR_FREQUENCY`] times are discarded,
//! as are pairs containing a word shorter than three characters or a stop
//! word. The rest are ranked by Dunning's log-likelihood ratio.

use ahash::AHashMap;
use serde::Serialize;

use crate::analysis::token_filter::stop::DEFAULT_ENGLISH_STOP_WORDS_SET;
use crate::error::{LexiphraseError, Result};

/// Minimum raw window count for a pair to be ranked.
pub const MIN_PAIR_FREQUENCY: u64 = 2;

/// A ranked collocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Collocation {
    pub left: String,
    pub right: String,
    pub count: u64,
    pub score: f64,
}

/// Windowed pair counts over a token list.
#[derive(Clone, Debug)]
pub struct CollocationFinder {
    word_counts: AHashMap<String, u64>,
    pair_counts: AHashMap<(String, String), u64>,
    total_words: u64,
    window_size: usize,
}

/// `x * ln(x / e)`, taken as zero for an empty cell.
fn llr_term(observed: f64, expected: f64) -> f64 {
    if observed <= 0.0 || expected <= 0.0 {
        0.0
    } else {
        observed * (observed / expected).ln()
    }
}

/// Dunning's log-likelihood ratio for a 2x2 contingency table.
///
/// `n_ii` co-occurrences, `n_ix`/`n_xi` marginal counts of each word, `n_xx`
/// the corpus size.
pub fn likelihood_ratio(n_ii: f64, n_ix: f64, n_xi: f64, n_xx: f64) -> f64 {
    let n_io = n_ix - n_ii;
    let n_oi = n_xi - n_ii;
    let n_oo = n_xx - n_ii - n_io - n_oi;

    let cells = [
        (n_ii, n_ix * n_xi / n_xx),
        (n_io, n_ix * (n_xx - n_xi) / n_xx),
        (n_oi, (n_xx - n_ix) * n_xi / n_xx),
        (n_oo, (n_xx - n_ix) * (n_xx - n_xi) / n_xx),
    ];
    2.0 * cells.iter().map(|&(o, e)| llr_term(o, e)).sum::<f64>()
}

impl CollocationFinder {
    /// Count a token list with the given window.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], window_size: usize) -> Result<Self> {
        if window_size < 2 {
            return Err(LexiphraseError::invalid_config(
                "collocation window_size must be at least 2",
            ));
        }

        let mut word_counts: AHashMap<String, u64> = AHashMap::new();
        let mut pair_counts: AHashMap<(String, String), u64> = AHashMap::new();
        for (i, token) in tokens.iter().enumerate() {
            let left = token.as_ref();
            *word_counts.entry(left.to_string()).or_insert(0) += 1;
            let end = (i + window_size).min(tokens.len());
            for right in &tokens[i + 1..end] {
                *pair_counts
                    .entry((left.to_string(), right.as_ref().to_string()))
                    .or_insert(0) += 1;
            }
        }

        Ok(CollocationFinder {
            word_counts,
            pair_counts,
            total_words: tokens.len() as u64,
            window_size,
        })
    }

    fn is_ignored(word: &str) -> bool {
        word.chars().count() < 3 || DEFAULT_ENGLISH_STOP_WORDS_SET.contains(&word.to_lowercase())
    }

    pub fn word_count(&self, word: &str) -> u64 {
        self.word_counts.get(word).copied().unwrap_or(0)
    }

    /// Raw window count of `(left, right)`.
    pub fn pair_count(&self, left: &str, right: &str) -> u64 {
        self.pair_counts
            .get(&(left.to_string(), right.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// The `num` best collocations, highest score first.
    pub fn best(&self, num: usize) -> Vec<Collocation> {
        let n_xx = self.total_words as f64;
        // A pair can be counted once per window position it fits in.
        let window_factor = (self.window_size - 1) as f64;

        let mut ranked: Vec<Collocation> = self
            .pair_counts
            .iter()
            .filter(|(_, count)| **count >= MIN_PAIR_FREQUENCY)
            .filter(|((a, b), _)| !Self::is_ignored(a) && !Self::is_ignored(b))
            .map(|((a, b), count)| {
                let n_ii = *count as f64 / window_factor;
                let n_ix = self.word_count(a) as f64;
                let n_xi = self.word_count(b) as f64;
                Collocation {
                    left: a.clone(),
                    right: b.clone(),
                    count: *count,
                    score: likelihood_ratio(n_ii, n_ix, n_xi, n_xx),
                }
            })
            .collect();

        ranked.sort_by(|x, y| {
            y.score
                .total_cmp(&x.score)
                .then_with(|| x.left.cmp(&y.left))
                .then_with(|| x.right.cmp(&y.right))
        });
        ranked.truncate(num);
        ranked
    }
}
