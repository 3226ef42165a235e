//! Lemma filter implementation.
//!
//! Replaces each token's text with its lowercased lemma. Pronouns carry the
//! [`PRON_LEMMA`] placeholder instead of a real lemma; for those the
//! lowercased surface form is used.

use crate::analysis::lemmatizer::PRON_LEMMA;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that rewrites token text to the lowercased lemma.
#[derive(Clone, Debug, Default)]
pub struct LemmaFilter;

impl LemmaFilter {
    /// Create a new lemma filter.
    pub fn new() -> Self {
        LemmaFilter
    }

    /// The normalized form of a single token.
    pub fn normalize(token: &Token) -> String {
        if token.lemma == PRON_LEMMA {
            token.lower()
        } else {
            token.lemma.to_lowercase()
        }
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let rewritten: Vec<Token> = tokens
            .map(|token| {
                let text = Self::normalize(&token);
                token.with_text(text)
            })
            .collect();
        Ok(Box::new(rewritten.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
