//! Descriptive statistics over phrase tokens.
//!
//! Everything here works on a flat token list: the `phrase_tokens` of every
//! record split on whitespace and concatenated in corpus order.

pub mod collocation;
pub mod concordance;
pub mod context;
pub mod frequency;
pub mod summary;

pub use collocation::{Collocation, CollocationFinder};
pub use concordance::{Concordance, ConcordanceLine};
pub use context::ContextIndex;
pub use frequency::{TermFrequencies, type_token_ratio};
pub use summary::CorpusSummary;

/// Flatten space-joined documents into one token list.
pub fn flatten_tokens<I, S>(documents: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    documents
        .into_iter()
        .flat_map(|doc| {
            doc.as_ref()
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_tokens() {
        let docs = vec!["live new_york", "", "love  city"];
        assert_eq!(flatten_tokens(docs), vec!["live", "new_york", "love", "city"]);
    }
}
