//! Artifact filter implementation.
//!
//! Removes possessive and apostrophe leftovers of lemmatization (`'s`, `’s`,
//! `’`) and any token whose text is exactly one of the allow-listed
//! part-of-speech labels (e.g. the literal string `NOUN`).
//!
//! The tag comparison is case-sensitive against upper-case labels while the
//! token text has already been lowercased, so in the standard pipeline it
//! never matches. It is kept for output parity with existing corpora.

use std::collections::HashSet;

use crate::analysis::token::{PartOfSpeech, Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Possessive/contraction artifacts removed by default.
pub const DEFAULT_ARTIFACTS: &[&str] = &["'s", "’s", "’"];

/// A filter that removes lemmatization artifacts and literal tag names.
#[derive(Clone, Debug)]
pub struct ArtifactFilter {
    artifacts: HashSet<String>,
    literal_tags: HashSet<String>,
}

impl ArtifactFilter {
    /// Create a filter with the default artifacts and the given tag labels.
    pub fn new(allowed_postags: &[PartOfSpeech]) -> Self {
        ArtifactFilter {
            artifacts: DEFAULT_ARTIFACTS.iter().map(|s| s.to_string()).collect(),
            literal_tags: allowed_postags.iter().map(|t| t.as_str().to_string()).collect(),
        }
    }

    /// Replace the artifact list.
    pub fn with_artifacts<I, S>(mut self, artifacts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artifacts = artifacts.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a normalized token text is discarded.
    pub fn is_artifact(&self, text: &str) -> bool {
        self.artifacts.contains(text) || self.literal_tags.contains(text)
    }
}

impl Filter for ArtifactFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let kept: Vec<Token> = tokens.filter(|t| !self.is_artifact(&t.text)).collect();
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "artifact"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(filter: &ArtifactFilter, words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();
        filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_possessive_artifacts_removed() {
        let filter = ArtifactFilter::new(&[PartOfSpeech::Noun, PartOfSpeech::Adj]);
        assert_eq!(run(&filter, &["mom", "'s", "’s", "’", "car"]), vec!["mom", "car"]);
    }

    #[test]
    fn test_literal_tag_guard_is_case_sensitive() {
        let filter = ArtifactFilter::new(&[PartOfSpeech::Noun, PartOfSpeech::Adj]);
        assert_eq!(
            run(&filter, &["NOUN", "noun", "ADJ", "VERB"]),
            vec!["noun", "VERB"]
        );
    }

    #[test]
    fn test_custom_artifacts() {
        let filter = ArtifactFilter::new(&[]).with_artifacts(vec!["amp"]);
        assert_eq!(run(&filter, &["amp", "'s"]), vec!["'s"]);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(ArtifactFilter::new(&[]).name(), "artifact");
    }
}
