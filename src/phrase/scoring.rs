//! Collocation scoring functions.

use serde::{Deserialize, Serialize};

/// How a candidate pair is scored.
///
/// Pairs seen fewer than `min_count` times are never scored; the caller
/// enforces that gate before calling [`Scoring::score`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scoring {
    /// `(count(a,b) - min_count) * N / (count(a) * count(b))`.
    #[default]
    Default,
    /// Normalized pointwise mutual information, in `[-1, 1]`.
    Npmi,
}

/// Counts needed to score one pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairCounts {
    pub worda_count: u64,
    pub wordb_count: u64,
    pub bigram_count: u64,
    /// Total number of tokens in the training corpus.
    pub corpus_word_count: u64,
}

impl Scoring {
    /// Score a pair. Returns `None` when the counts cannot produce a score
    /// (a zero unigram count or an empty corpus).
    pub fn score(&self, counts: PairCounts, min_count: u64) -> Option<f64> {
        let PairCounts {
            worda_count,
            wordb_count,
            bigram_count,
            corpus_word_count,
        } = counts;
        if worda_count == 0 || wordb_count == 0 || corpus_word_count == 0 {
            return None;
        }

        match self {
            Scoring::Default => {
                let numerator = (bigram_count as f64 - min_count as f64) * corpus_word_count as f64;
                Some(numerator / (worda_count as f64 * wordb_count as f64))
            }
            Scoring::Npmi => {
                if bigram_count == 0 {
                    return None;
                }
                let n = corpus_word_count as f64;
                let pa = worda_count as f64 / n;
                let pb = wordb_count as f64 / n;
                let pab = bigram_count as f64 / n;
                // Every token of the corpus is this pair: perfect association.
                if pab >= 1.0 {
                    return Some(1.0);
                }
                Some((pab / (pa * pb)).ln() / -pab.ln())
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scoring::Default => "default",
            Scoring::Npmi => "npmi",
        }
    }
}

impl std::fmt::Display for Scoring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(a: u64, b: u64, ab: u64, n: u64) -> PairCounts {
        PairCounts {
            worda_count: a,
            wordb_count: b,
            bigram_count: ab,
            corpus_word_count: n,
        }
    }

    #[test]
    fn test_default_formula() {
        // (20 - 10) * 1000 / (25 * 40) = 10
        let score = Scoring::Default.score(counts(25, 40, 20, 1000), 10).unwrap();
        assert!((score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_at_min_count_is_zero() {
        let score = Scoring::Default.score(counts(10, 10, 10, 100), 10).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_zero_counts_have_no_score() {
        assert!(Scoring::Default.score(counts(0, 5, 0, 10), 1).is_none());
        assert!(Scoring::Default.score(counts(5, 5, 5, 0), 1).is_none());
        assert!(Scoring::Npmi.score(counts(5, 5, 0, 10), 1).is_none());
    }

    #[test]
    fn test_npmi_bounds() {
        // Words that only ever occur together.
        let perfect = Scoring::Npmi.score(counts(10, 10, 10, 100), 1).unwrap();
        assert!((perfect - 1.0).abs() < 1e-9);

        let weak = Scoring::Npmi.score(counts(50, 50, 1, 100), 1).unwrap();
        assert!(weak < 0.0 && weak >= -1.0);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Scoring::Npmi).unwrap(), "\"npmi\"");
        let parsed: Scoring = serde_json::from_str("\"default\"").unwrap();
        assert_eq!(parsed, Scoring::Default);
    }
}
