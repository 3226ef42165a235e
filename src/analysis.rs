//! Text analysis for lexiphrase.
//!
//! This module turns raw post text into cleaned lemma sequences. The pieces
//! are layered the same way on every path:
//!
//! - [`char_filter`]: text normalization before tokenization
//! - [`model`]: the linguistic model (tokenizer, tagger, lemmatizer)
//! - [`token_filter`]: filters over the annotated token stream
//! - [`preprocessor`]: the corpus-level driver with batching

pub mod char_filter;
pub mod lemmatizer;
pub mod model;
pub mod preprocessor;
pub mod tagger;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use model::{EnglishModel, LanguageModel, Lexicon, ModelSource};
pub use preprocessor::{CleanedDocument, DocumentText, PreprocessorConfig, TextPreprocessor};
pub use token::*;
pub use token_filter::Filter;
