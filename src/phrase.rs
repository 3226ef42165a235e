//! Collocation detection and phrase merging.
//!
//! A phrase model learns which adjacent token pairs co-occur often enough to
//! be treated as one unit, then rewrites documents by joining those pairs
//! with a delimiter (`new york` → `new_york`). Two passes chained together
//! ([`extractor::PhraseExtractor`]) yield phrases of up to four tokens.
//!
//! - [`scoring`]: collocation scores
//! - [`model`]: the learning model ([`model::Phrases`]) and its frozen,
//!   apply-only form ([`model::FrozenPhrases`])
//! - [`extractor`]: the bigram → trigram pipeline

pub mod extractor;
pub mod model;
pub mod scoring;

pub use extractor::{ExtractorConfig, PhraseExtractor};
pub use model::{FrozenPhrases, PhraseConfig, Phrasegram, Phrases};
pub use scoring::Scoring;
