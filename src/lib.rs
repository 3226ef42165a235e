//! # lexiphrase
//!
//! Lemma cleaning and phrase detection for forum post corpora.
//!
//! ## Features
//!
//! - Deterministic English model: tokenization, part-of-speech tags, lemmas
//! - Batched, order-preserving preprocessing on the rayon thread pool
//! - Two-level collocation detection (bigrams, then trigrams over bigrams)
//! - CSV and JSON Lines corpus input and record output
//! - Descriptive statistics: frequencies, concordance, collocations, contexts
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lexiphrase::analysis::{EnglishModel, PreprocessorConfig, TextPreprocessor};
//! use lexiphrase::phrase::{ExtractorConfig, PhraseExtractor};
//!
//! let model = Arc::new(EnglishModel::new().unwrap());
//! let preprocessor = TextPreprocessor::new(model, PreprocessorConfig::default()).unwrap();
//! let cleaned = preprocessor.preprocess(&["Doctors helped.", ""]).unwrap();
//!
//! let (_, phrase_tokens) = PhraseExtractor::fit_transform(&cleaned, &ExtractorConfig::default()).unwrap();
//! assert_eq!(phrase_tokens, vec!["doctor help", ""]);
//! ```

pub mod analysis;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod phrase;
pub mod pipeline;
pub mod stats;

pub mod prelude {
    pub use crate::analysis::{
        CleanedDocument, EnglishModel, LanguageModel, PreprocessorConfig, TextPreprocessor,
    };
    pub use crate::corpus::{CorpusFilter, CorpusFormat, PhraseRecord, Submission};
    pub use crate::error::{LexiphraseError, Result};
    pub use crate::phrase::{ExtractorConfig, FrozenPhrases, PhraseExtractor, Phrases};
    pub use crate::pipeline::{Pipeline, PipelineConfig};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
