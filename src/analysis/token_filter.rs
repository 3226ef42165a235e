//! Token filter implementations for token transformation.
//!
//! Filters transform the annotated token stream produced by the linguistic
//! model. The preprocessor chains them in this order:
//!
//! ```text
//! Model → Clean → Lemma → Artifact → Stop → CleanedDocument
//! ```
//!
//! # Available Filters
//!
//! - [`clean::CleanFilter`] - Drops punctuation, whitespace and digit tokens
//! - [`lemma::LemmaFilter`] - Rewrites token text to the lowercased lemma
//! - [`artifact::ArtifactFilter`] - Drops possessive artifacts and literal tag names
//! - [`stop::StopFilter`] - Removes stop words

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod artifact;
pub mod clean;
pub mod lemma;
pub mod stop;

pub use artifact::ArtifactFilter;
pub use clean::CleanFilter;
pub use lemma::LemmaFilter;
pub use stop::StopFilter;
