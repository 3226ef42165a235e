//! Clean filter implementation.
//!
//! Drops every token flagged as punctuation, whitespace or digit-only.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes punctuation, space and digit tokens.
#[derive(Clone, Debug, Default)]
pub struct CleanFilter;

impl CleanFilter {
    /// Create a new clean filter.
    pub fn new() -> Self {
        CleanFilter
    }

    /// Whether the token is discarded by this filter.
    pub fn is_noise(token: &Token) -> bool {
        token.is_punct || token.is_space || token.is_digit
    }
}

impl Filter for CleanFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let kept: Vec<Token> = tokens.filter(|t| !Self::is_noise(t)).collect();
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "clean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_filter() {
        let mut punct = Token::new(".", 1);
        punct.is_punct = true;
        let mut space = Token::new("\t", 2);
        space.is_space = true;
        let mut digit = Token::new("42", 3);
        digit.is_digit = true;
        let tokens = vec![Token::new("pain", 0), punct, space, digit, Token::new("3rd", 4)];

        let result: Vec<Token> = CleanFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        let texts: Vec<_> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["pain", "3rd"]);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(CleanFilter::new().name(), "clean");
    }
}
