//! Phrase models.
//!
//! [`Phrases`] accumulates unigram and adjacent-pair counts over a corpus.
//! Once counting is done it can be [frozen](Phrases::freeze) into a
//! [`FrozenPhrases`], which keeps only the pairs that scored above the
//! threshold and is all that is needed to rewrite documents.
//!
//! Pair counts are kept as a nested map (`left → right → count`) so that a
//! delimiter occurring inside a token can never make two different pairs
//! collide.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ahash::AHashMap;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{LexiphraseError, Result};
use crate::phrase::scoring::{PairCounts, Scoring};

/// Default token joiner for merged phrases.
pub const DEFAULT_DELIMITER: &str = "_";

/// Parameters of one phrase pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseConfig {
    /// Pairs seen fewer times than this never merge.
    pub min_count: u64,
    /// A pair merges when its score is strictly greater than this.
    pub threshold: f64,
    /// String placed between merged tokens.
    pub delimiter: String,
    pub scoring: Scoring,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        Self::bigram()
    }
}

impl PhraseConfig {
    /// Parameters of the first (bigram) pass.
    pub fn bigram() -> Self {
        PhraseConfig {
            min_count: 10,
            threshold: 100.0,
            delimiter: DEFAULT_DELIMITER.to_string(),
            scoring: Scoring::Default,
        }
    }

    /// Parameters of the second (trigram) pass.
    pub fn trigram() -> Self {
        PhraseConfig {
            threshold: 50.0,
            ..Self::bigram()
        }
    }

    pub fn with_min_count(mut self, min_count: u64) -> Self {
        self.min_count = min_count;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_delimiter<S: Into<String>>(mut self, delimiter: S) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Check the configuration for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if self.min_count == 0 {
            return Err(LexiphraseError::invalid_config("min_count must be at least 1"));
        }
        if !self.threshold.is_finite() {
            return Err(LexiphraseError::invalid_config("threshold must be finite"));
        }
        if self.scoring == Scoring::Npmi && !(-1.0..=1.0).contains(&self.threshold) {
            return Err(LexiphraseError::invalid_config(
                "npmi threshold must be within [-1, 1]",
            ));
        }
        if self.delimiter.is_empty() || self.delimiter.contains(char::is_whitespace) {
            return Err(LexiphraseError::invalid_config(
                "delimiter must be non-empty and contain no whitespace",
            ));
        }
        Ok(())
    }
}

/// A learned phrase: two adjacent tokens and their collocation score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phrasegram {
    pub left: String,
    pub right: String,
    pub score: f64,
}

impl Phrasegram {
    /// The merged token for this phrase.
    pub fn joined(&self, delimiter: &str) -> String {
        format!("{}{}{}", self.left, delimiter, self.right)
    }
}

/// Greedy left-to-right merge shared by both model forms.
///
/// A token consumed by a merge never starts another merge, so merged pairs
/// never overlap.
fn merge_pairs<S, F>(tokens: &[S], delimiter: &str, mut is_phrase: F) -> Vec<String>
where
    S: AsRef<str>,
    F: FnMut(&str, &str) -> bool,
{
    let mut merged = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let left = tokens[i].as_ref();
        if let Some(right) = tokens.get(i + 1).map(AsRef::as_ref) {
            if is_phrase(left, right) {
                merged.push(format!("{left}{delimiter}{right}"));
                i += 2;
                continue;
            }
        }
        merged.push(left.to_string());
        i += 1;
    }
    merged
}

/// A phrase model that is still learning.
#[derive(Clone, Debug)]
pub struct Phrases {
    config: PhraseConfig,
    vocab: AHashMap<String, u64>,
    pair_counts: AHashMap<String, AHashMap<String, u64>>,
    corpus_word_count: u64,
    document_count: usize,
}

impl Phrases {
    /// Create an empty model.
    pub fn new(config: PhraseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Phrases {
            config,
            vocab: AHashMap::new(),
            pair_counts: AHashMap::new(),
            corpus_word_count: 0,
            document_count: 0,
        })
    }

    /// Count a materialized corpus in parallel and return the trained model.
    ///
    /// Fails with [`LexiphraseError::InsufficientData`] when the corpus has
    /// no documents. Documents without tokens are counted but contribute
    /// nothing.
    pub fn fit<D, S>(config: PhraseConfig, documents: &[D]) -> Result<Self>
    where
        D: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        if documents.is_empty() {
            return Err(LexiphraseError::insufficient_data(
                "cannot learn phrases from an empty corpus",
            ));
        }
        let empty = Self::new(config)?;

        let model = documents
            .par_iter()
            .fold(
                || empty.clone(),
                |mut partial, doc| {
                    partial.add_document(doc.as_ref());
                    partial
                },
            )
            .reduce(|| empty.clone(), Phrases::merge);

        info!(
            "Learned phrase counts from {} documents: {} tokens, {} types, {} pairs",
            model.document_count,
            model.corpus_word_count,
            model.vocab.len(),
            model.pair_count()
        );
        Ok(model)
    }

    /// Count one document. Pairs never span two documents.
    pub fn add_document<S: AsRef<str>>(&mut self, tokens: &[S]) {
        self.document_count += 1;
        self.corpus_word_count += tokens.len() as u64;
        for token in tokens {
            *self.vocab.entry(token.as_ref().to_string()).or_insert(0) += 1;
        }
        for pair in tokens.windows(2) {
            *self
                .pair_counts
                .entry(pair[0].as_ref().to_string())
                .or_default()
                .entry(pair[1].as_ref().to_string())
                .or_insert(0) += 1;
        }
    }

    /// Count every document of an iterator.
    pub fn add_documents<I, D, S>(&mut self, documents: I)
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        for doc in documents {
            self.add_document(doc.as_ref());
        }
    }

    /// Fold another model's counts into this one.
    pub fn merge(mut self, other: Phrases) -> Phrases {
        self.document_count += other.document_count;
        self.corpus_word_count += other.corpus_word_count;
        for (word, count) in other.vocab {
            *self.vocab.entry(word).or_insert(0) += count;
        }
        for (left, rights) in other.pair_counts {
            let entry = self.pair_counts.entry(left).or_default();
            for (right, count) in rights {
                *entry.entry(right).or_insert(0) += count;
            }
        }
        self
    }

    pub fn config(&self) -> &PhraseConfig {
        &self.config
    }

    /// Total number of tokens counted.
    pub fn corpus_word_count(&self) -> u64 {
        self.corpus_word_count
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of distinct tokens.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Number of distinct adjacent pairs.
    pub fn pair_count(&self) -> usize {
        self.pair_counts.values().map(|m| m.len()).sum()
    }

    /// Count of a single token.
    pub fn word_count(&self, word: &str) -> u64 {
        self.vocab.get(word).copied().unwrap_or(0)
    }

    /// Count of the adjacent pair `(left, right)`.
    pub fn bigram_count(&self, left: &str, right: &str) -> u64 {
        self.pair_counts
            .get(left)
            .and_then(|rights| rights.get(right))
            .copied()
            .unwrap_or(0)
    }

    /// Score a pair, or `None` if it is below `min_count` or unseen.
    pub fn score(&self, left: &str, right: &str) -> Option<f64> {
        let bigram_count = self.bigram_count(left, right);
        if bigram_count == 0 || bigram_count < self.config.min_count {
            return None;
        }
        self.config.scoring.score(
            PairCounts {
                worda_count: self.word_count(left),
                wordb_count: self.word_count(right),
                bigram_count,
                corpus_word_count: self.corpus_word_count,
            },
            self.config.min_count,
        )
    }

    /// Whether the pair merges under the current threshold.
    pub fn is_phrase(&self, left: &str, right: &str) -> bool {
        self.score(left, right)
            .is_some_and(|score| score > self.config.threshold)
    }

    /// Rewrite a document, merging qualifying pairs.
    pub fn apply<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        merge_pairs(tokens, &self.config.delimiter, |l, r| self.is_phrase(l, r))
    }

    /// Every pair that currently qualifies as a phrase, best first.
    pub fn phrasegrams(&self) -> Vec<Phrasegram> {
        let mut grams: Vec<Phrasegram> = self
            .pair_counts
            .iter()
            .flat_map(|(left, rights)| {
                rights.keys().filter_map(move |right| {
                    self.score(left, right)
                        .filter(|score| *score > self.config.threshold)
                        .map(|score| Phrasegram {
                            left: left.clone(),
                            right: right.clone(),
                            score,
                        })
                })
            })
            .collect();
        sort_phrasegrams(&mut grams);
        grams
    }

    /// Drop the counts and keep only the qualifying phrases.
    pub fn freeze(&self) -> FrozenPhrases {
        let grams = self.phrasegrams();
        debug!(
            "Froze phrase model: {} of {} pairs qualify (threshold {}, min_count {})",
            grams.len(),
            self.pair_count(),
            self.config.threshold,
            self.config.min_count
        );
        FrozenPhrases::from_phrasegrams(self.config.clone(), grams)
    }
}

fn sort_phrasegrams(grams: &mut [Phrasegram]) {
    grams.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.left.cmp(&b.left))
            .then_with(|| a.right.cmp(&b.right))
    });
}

/// On-disk form of a frozen model.
#[derive(Serialize, Deserialize)]
struct FrozenSnapshot {
    config: PhraseConfig,
    phrasegrams: Vec<Phrasegram>,
}

/// An immutable, apply-only phrase model.
#[derive(Clone, Debug, Default)]
pub struct FrozenPhrases {
    config: PhraseConfig,
    phrasegrams: AHashMap<String, AHashMap<String, f64>>,
}

impl FrozenPhrases {
    /// A model that merges nothing.
    pub fn empty(config: PhraseConfig) -> Self {
        FrozenPhrases {
            config,
            phrasegrams: AHashMap::new(),
        }
    }

    /// Build a model from explicit phrases.
    ///
    /// Every given phrase merges regardless of its score.
    pub fn from_phrasegrams<I>(config: PhraseConfig, phrasegrams: I) -> Self
    where
        I: IntoIterator<Item = Phrasegram>,
    {
        let mut map: AHashMap<String, AHashMap<String, f64>> = AHashMap::new();
        for gram in phrasegrams {
            map.entry(gram.left).or_default().insert(gram.right, gram.score);
        }
        FrozenPhrases {
            config,
            phrasegrams: map,
        }
    }

    pub fn config(&self) -> &PhraseConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.phrasegrams.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Score of a known phrase.
    pub fn score(&self, left: &str, right: &str) -> Option<f64> {
        self.phrasegrams
            .get(left)
            .and_then(|rights| rights.get(right))
            .copied()
    }

    /// Rewrite a document, merging known phrases.
    pub fn apply<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        merge_pairs(tokens, &self.config.delimiter, |l, r| {
            self.score(l, r).is_some()
        })
    }

    /// All phrases, best first.
    pub fn phrasegrams(&self) -> Vec<Phrasegram> {
        let mut grams: Vec<Phrasegram> = self
            .phrasegrams
            .iter()
            .flat_map(|(left, rights)| {
                rights.iter().map(move |(right, score)| Phrasegram {
                    left: left.clone(),
                    right: right.clone(),
                    score: *score,
                })
            })
            .collect();
        sort_phrasegrams(&mut grams);
        grams
    }

    /// Write the model to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = FrozenSnapshot {
            config: self.config.clone(),
            phrasegrams: self.phrasegrams(),
        };
        let writer = BufWriter::new(File::create(path.as_ref())?);
        bincode::serialize_into(writer, &snapshot)?;
        Ok(())
    }

    /// Read a model written by [`FrozenPhrases::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let snapshot: FrozenSnapshot = bincode::deserialize_from(reader)?;
        snapshot.config.validate()?;
        Ok(Self::from_phrasegrams(snapshot.config, snapshot.phrasegrams))
    }
}
