//! Token types and utilities for text analysis.
//!
//! This module defines the annotated token that flows from the linguistic
//! model through the token filters of the preprocessor.
//!
//! # Core Types
//!
//! - [`Token`] - A single annotated token with surface text, lemma and tag
//! - [`PartOfSpeech`] - Universal part-of-speech tag set
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//!
//! # Examples
//!
//! ```
//! use lexiphrase::analysis::token::{PartOfSpeech, Token};
//!
//! let token = Token::new("Cats", 0)
//!     .with_lemma("cat")
//!     .with_pos(PartOfSpeech::Noun);
//!
//! assert_eq!(token.text, "Cats");
//! assert_eq!(token.lemma, "cat");
//! assert_eq!(token.lower(), "cats");
//! assert!(!token.is_punct);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LexiphraseError, Result};

/// Universal part-of-speech tags.
///
/// The string form of each tag (see [`PartOfSpeech::as_str`]) is the
/// upper-case universal dependencies label, e.g. `NOUN`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    Space,
    X,
}

impl PartOfSpeech {
    /// All tags, in declaration order.
    pub const ALL: [PartOfSpeech; 18] = [
        PartOfSpeech::Adj,
        PartOfSpeech::Adp,
        PartOfSpeech::Adv,
        PartOfSpeech::Aux,
        PartOfSpeech::Cconj,
        PartOfSpeech::Det,
        PartOfSpeech::Intj,
        PartOfSpeech::Noun,
        PartOfSpeech::Num,
        PartOfSpeech::Part,
        PartOfSpeech::Pron,
        PartOfSpeech::Propn,
        PartOfSpeech::Punct,
        PartOfSpeech::Sconj,
        PartOfSpeech::Sym,
        PartOfSpeech::Verb,
        PartOfSpeech::Space,
        PartOfSpeech::X,
    ];

    /// The tag label, e.g. `"NOUN"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Adj => "ADJ",
            PartOfSpeech::Adp => "ADP",
            PartOfSpeech::Adv => "ADV",
            PartOfSpeech::Aux => "AUX",
            PartOfSpeech::Cconj => "CCONJ",
            PartOfSpeech::Det => "DET",
            PartOfSpeech::Intj => "INTJ",
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Num => "NUM",
            PartOfSpeech::Part => "PART",
            PartOfSpeech::Pron => "PRON",
            PartOfSpeech::Propn => "PROPN",
            PartOfSpeech::Punct => "PUNCT",
            PartOfSpeech::Sconj => "SCONJ",
            PartOfSpeech::Sym => "SYM",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Space => "SPACE",
            PartOfSpeech::X => "X",
        }
    }
}

impl FromStr for PartOfSpeech {
    type Err = LexiphraseError;

    fn from_str(s: &str) -> Result<Self> {
        PartOfSpeech::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LexiphraseError::invalid_config(format!("unknown POS tag '{s}'")))
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token represents a single annotated unit of a document.
///
/// The linguistic model fills in `lemma`, `pos` and the boolean flags. Token
/// filters rewrite `text` (e.g. to the lowercased lemma) or drop the token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The dictionary form assigned by the lemmatizer
    pub lemma: String,

    /// The part-of-speech tag assigned by the tagger
    pub pos: PartOfSpeech,

    /// The position of the token in the document (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the analyzed text
    pub start_offset: usize,

    /// The byte offset where this token ends in the analyzed text
    pub end_offset: usize,

    pub is_punct: bool,
    pub is_space: bool,
    pub is_digit: bool,
    pub is_stop: bool,
}

impl Token {
    /// Create a new token with the given text and position.
    ///
    /// The lemma defaults to the text and the tag to [`PartOfSpeech::X`].
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        let text = text.into();
        Token {
            lemma: text.clone(),
            text,
            pos: PartOfSpeech::X,
            position,
            start_offset: 0,
            end_offset: 0,
            is_punct: false,
            is_space: false,
            is_digit: false,
            is_stop: false,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        let mut token = Token::new(text, position);
        token.start_offset = start_offset;
        token.end_offset = end_offset;
        token
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The lowercased surface form.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Set the lemma.
    pub fn with_lemma<S: Into<String>>(mut self, lemma: S) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Set the part-of-speech tag.
    pub fn with_pos(mut self, pos: PartOfSpeech) -> Self {
        self.pos = pos;
        self
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.lemma, "hello");
        assert_eq!(token.pos, PartOfSpeech::X);
        assert_eq!(token.position, 0);
        assert!(!token.is_stop);
    }

    #[test]
    fn test_token_with_offsets() {
        let token = Token::with_offsets("world", 1, 6, 11);
        assert_eq!(token.text, "world");
        assert_eq!(token.start_offset, 6);
        assert_eq!(token.end_offset, 11);
    }

    #[test]
    fn test_pos_round_trip_through_str() {
        for tag in PartOfSpeech::ALL {
            assert_eq!(tag.as_str().parse::<PartOfSpeech>().unwrap(), tag);
        }
        assert_eq!("noun".parse::<PartOfSpeech>().unwrap(), PartOfSpeech::Noun);
        assert!("NOUNISH".parse::<PartOfSpeech>().is_err());
    }

    #[test]
    fn test_pos_serde_uses_labels() {
        let json = serde_json::to_string(&PartOfSpeech::Propn).unwrap();
        assert_eq!(json, "\"PROPN\"");
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("hello", 0), Token::new("world", 1)];

        let collected: Vec<_> = tokens.into_token_stream().collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[1].text, "world");
    }
}
