//! Two-pass phrase extraction.
//!
//! The first pass learns bigrams over the cleaned corpus. The second pass
//! learns over the *bigram-merged* corpus, so it can join a merged token with
//! its neighbour (`new_york` + `city` → `new_york_city`) or two merged tokens
//! with each other. Both models are frozen before they are applied.
//!
//! # Examples
//!
//! ```
//! use lexiphrase::phrase::extractor::PhraseExtractor;
//! use lexiphrase::phrase::model::{FrozenPhrases, PhraseConfig, Phrasegram};
//!
//! let bigram = FrozenPhrases::from_phrasegrams(
//!     PhraseConfig::bigram(),
//!     vec![Phrasegram { left: "new".into(), right: "york".into(), score: 250.0 }],
//! );
//! let extractor = PhraseExtractor::from_models(bigram, FrozenPhrases::empty(PhraseConfig::trigram()));
//!
//! let tokens = ["live", "new", "york", "city"];
//! assert_eq!(extractor.transform_to_string(&tokens), "live new_york city");
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::phrase::model::{FrozenPhrases, PhraseConfig, Phrasegram, Phrases};

/// Parameters of both passes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub bigram: PhraseConfig,
    pub trigram: PhraseConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            bigram: PhraseConfig::bigram(),
            trigram: PhraseConfig::trigram(),
        }
    }
}

impl ExtractorConfig {
    /// Check both passes.
    pub fn validate(&self) -> Result<()> {
        self.bigram.validate()?;
        self.trigram.validate()
    }
}

#[derive(Serialize, Deserialize)]
struct ExtractorSnapshot {
    bigram: (PhraseConfig, Vec<Phrasegram>),
    trigram: (PhraseConfig, Vec<Phrasegram>),
}

/// Frozen bigram and trigram models applied in sequence.
#[derive(Clone, Debug)]
pub struct PhraseExtractor {
    bigram: FrozenPhrases,
    trigram: FrozenPhrases,
}

impl PhraseExtractor {
    /// Learn both passes from a cleaned corpus.
    ///
    /// The corpus must be materialized: the second pass needs the whole
    /// corpus rewritten by the first.
    pub fn fit<D, S>(documents: &[D], config: &ExtractorConfig) -> Result<Self>
    where
        D: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        config.validate()?;

        let bigram = Phrases::fit(config.bigram.clone(), documents)?.freeze();
        let merged: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| bigram.apply(doc.as_ref()))
            .collect();

        let trigram = Phrases::fit(config.trigram.clone(), &merged)?.freeze();
        info!(
            "Fitted phrase extractor: {} bigram phrases, {} trigram phrases",
            bigram.len(),
            trigram.len()
        );
        Ok(PhraseExtractor { bigram, trigram })
    }

    /// Assemble an extractor from already-frozen models.
    pub fn from_models(bigram: FrozenPhrases, trigram: FrozenPhrases) -> Self {
        PhraseExtractor { bigram, trigram }
    }

    pub fn bigram(&self) -> &FrozenPhrases {
        &self.bigram
    }

    pub fn trigram(&self) -> &FrozenPhrases {
        &self.trigram
    }

    /// Rewrite one document through both passes.
    ///
    /// Documents never seen during fitting are fine; unknown pairs simply do
    /// not merge.
    pub fn transform<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        self.trigram.apply(&self.bigram.apply(tokens))
    }

    /// Rewrite one document and join the result with single spaces.
    pub fn transform_to_string<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        self.transform(tokens).join(" ")
    }

    /// Rewrite a corpus, one space-joined string per document, in order.
    pub fn transform_corpus<D, S>(&self, documents: &[D]) -> Vec<String>
    where
        D: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .map(|doc| self.transform_to_string(doc.as_ref()))
            .collect()
    }

    /// Fit on a corpus and rewrite that same corpus.
    pub fn fit_transform<D, S>(documents: &[D], config: &ExtractorConfig) -> Result<(Self, Vec<String>)>
    where
        D: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        let extractor = Self::fit(documents, config)?;
        let phrase_tokens = extractor.transform_corpus(documents);
        Ok((extractor, phrase_tokens))
    }

    /// Write both models to one file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = ExtractorSnapshot {
            bigram: (self.bigram.config().clone(), self.bigram.phrasegrams()),
            trigram: (self.trigram.config().clone(), self.trigram.phrasegrams()),
        };
        let writer = BufWriter::new(File::create(path.as_ref())?);
        bincode::serialize_into(writer, &snapshot)?;
        Ok(())
    }

    /// Read an extractor written by [`PhraseExtractor::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let snapshot: ExtractorSnapshot = bincode::deserialize_from(reader)?;
        let (bigram_config, bigram_grams) = snapshot.bigram;
        let (trigram_config, trigram_grams) = snapshot.trigram;
        bigram_config.validate()?;
        trigram_config.validate()?;
        Ok(PhraseExtractor {
            bigram: FrozenPhrases::from_phrasegrams(bigram_config, bigram_grams),
            trigram: FrozenPhrases::from_phrasegrams(trigram_config, trigram_grams),
        })
    }
}
