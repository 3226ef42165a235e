//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first stage of the linguistic model: they split a
//! normalized document into surface tokens and set the lexical flags
//! (`is_punct`, `is_space`, `is_digit`) that the clean filter relies on.
//!
//! # Available Tokenizers
//!
//! - [`english::EnglishTokenizer`] - Rule-based English tokenizer
//!
//! # Examples
//!
//! ```
//! use lexiphrase::analysis::tokenizer::Tokenizer;
//! use lexiphrase::analysis::tokenizer::english::EnglishTokenizer;
//!
//! let tokenizer = EnglishTokenizer::new().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("I don't know.").unwrap().collect();
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["I", "do", "n't", "know", "."]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can be shared by the
/// annotation batches that run in parallel.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod english;
