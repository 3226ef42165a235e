//! Rule-based English tokenizer.
//!
//! Splitting happens in three passes:
//!
//! 1. URLs and e-mail addresses are carved out as atomic tokens.
//! 2. The remaining text is split on Unicode word boundaries (UAX #29).
//! 3. Clitics (`'s`, `n't`, `'re`, `'ve`, `'ll`, `'d`, `'m`, with either a
//!    straight or a curly apostrophe) are split off their host word. A
//!    clitic the word bounds already detached from its letters is rejoined.
//!
//! A single ASCII space between tokens is treated as trailing whitespace and
//! produces no token; any other whitespace run becomes a space token.

use std::sync::Arc;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{LexiphraseError, Result};

const URL_OR_EMAIL_PATTERN: &str =
    r"(?i)\b(?:https?://|www\.)[^\s<>]+[^\s<>.,;:!?)\]]|\b[\w.+-]+@[\w-]+(?:\.[\w-]+)+";

/// Suffix clitics split off a host word, longest first.
const CLITICS: &[&str] = &[
    "n't", "n’t", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'s", "’s", "'d", "’d", "'m", "’m",
];

/// A tokenizer for English social media text.
#[derive(Clone, Debug)]
pub struct EnglishTokenizer {
    url_pattern: Arc<Regex>,
    punct_pattern: Arc<Regex>,
    digit_pattern: Arc<Regex>,
}

impl EnglishTokenizer {
    /// Create a new English tokenizer.
    pub fn new() -> Result<Self> {
        Ok(EnglishTokenizer {
            url_pattern: Arc::new(compile(URL_OR_EMAIL_PATTERN)?),
            punct_pattern: Arc::new(compile(r"^\p{P}+$")?),
            digit_pattern: Arc::new(compile(r"^\p{Nd}+$")?),
        })
    }

    /// Whether the text consists solely of Unicode punctuation.
    pub fn is_punct(&self, text: &str) -> bool {
        self.punct_pattern.is_match(text)
    }

    /// Whether the text consists solely of decimal digits.
    pub fn is_digit(&self, text: &str) -> bool {
        self.digit_pattern.is_match(text)
    }

    /// Whether the text is a URL or an e-mail address.
    pub fn is_url_like(&self, text: &str) -> bool {
        self.url_pattern
            .find(text)
            .is_some_and(|m| m.start() == 0 && m.end() == text.len())
    }

    fn push_token(&self, tokens: &mut Vec<Token>, text: &str, start: usize) {
        let position = tokens.len();
        let mut token = Token::with_offsets(text, position, start, start + text.len());
        token.is_space = text.chars().all(char::is_whitespace);
        token.is_punct = !token.is_space && self.is_punct(text);
        token.is_digit = self.is_digit(text);
        tokens.push(token);
    }

    /// Split a UAX #29 segment into host word and trailing clitic.
    ///
    /// `can't` and `won't` fall out as `ca`/`wo` + `n't`.
    fn split_clitic(word: &str) -> (&str, Option<&str>) {
        for clitic in CLITICS {
            if word.len() > clitic.len() {
                let split = word.len() - clitic.len();
                if word.is_char_boundary(split) && word[split..].eq_ignore_ascii_case(clitic) {
                    return (&word[..split], Some(&word[split..]));
                }
            }
        }
        (word, None)
    }

    /// Whether a lone apostrophe and the following piece form a clitic.
    ///
    /// After a digit, quote or bracket the word bounds separate the
    /// apostrophe from its letters, as in `2020's` or `(ex)'s`.
    fn is_detached_clitic(apostrophe: &str, next: &str) -> bool {
        matches!(apostrophe, "'" | "’")
            && CLITICS.iter().any(|clitic| {
                clitic.starts_with(apostrophe)
                    && clitic[apostrophe.len()..].eq_ignore_ascii_case(next)
            })
    }

    fn tokenize_segment(&self, tokens: &mut Vec<Token>, segment: &str, base: usize) {
        let mut pieces = segment.split_word_bound_indices().peekable();
        while let Some((offset, piece)) = pieces.next() {
            let start = base + offset;
            if let Some(&(next_offset, next)) = pieces.peek() {
                if Self::is_detached_clitic(piece, next) {
                    let end = next_offset + next.len();
                    self.push_token(tokens, &segment[offset..end], start);
                    pieces.next();
                    continue;
                }
            }
            if piece.chars().all(char::is_whitespace) {
                if piece != " " {
                    self.push_token(tokens, piece, start);
                }
                continue;
            }

            match Self::split_clitic(piece) {
                (host, Some(clitic)) => {
                    self.push_token(tokens, host, start);
                    self.push_token(tokens, clitic, start + host.len());
                }
                (word, None) => self.push_token(tokens, word, start),
            }
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| LexiphraseError::analysis(format!("Invalid regex pattern: {e}")))
}

impl Tokenizer for EnglishTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut last_end = 0;

        for mat in self.url_pattern.find_iter(text) {
            if mat.start() > last_end {
                self.tokenize_segment(&mut tokens, &text[last_end..mat.start()], last_end);
            }
            self.push_token(&mut tokens, mat.as_str(), mat.start());
            last_end = mat.end();
        }
        if last_end < text.len() {
            self.tokenize_segment(&mut tokens, &text[last_end..], last_end);
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        EnglishTokenizer::new()
            .unwrap()
            .tokenize(input)
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        assert_eq!(
            texts("I live in New York City."),
            vec!["I", "live", "in", "New", "York", "City", "."]
        );
    }

    #[test]
    fn test_clitics_are_split() {
        assert_eq!(texts("it's"), vec!["it", "'s"]);
        assert_eq!(texts("Mom’s car"), vec!["Mom", "’s", "car"]);
        assert_eq!(texts("they're"), vec!["they", "'re"]);
        assert_eq!(texts("don't"), vec!["do", "n't"]);
    }

    #[test]
    fn test_detached_clitics_stay_whole() {
        assert_eq!(texts("2020's"), vec!["2020", "'s"]);
        assert_eq!(texts("(ex)'s lawyer"), vec!["(", "ex", ")", "'s", "lawyer"]);
        assert_eq!(
            texts("\"doctor\"’s note"),
            vec!["\"", "doctor", "\"", "’s", "note"]
        );
        assert_eq!(texts("“I”’M"), vec!["“", "I", "”", "’M"]);
    }

    #[test]
    fn test_quoted_words_are_not_clitics() {
        assert_eq!(texts("'sure'"), vec!["'", "sure", "'"]);
        assert_eq!(texts("'s'"), vec!["'s", "'"]);
    }

    #[test]
    fn test_irregular_negations() {
        assert_eq!(texts("can't"), vec!["ca", "n't"]);
        assert_eq!(texts("Won't"), vec!["Wo", "n't"]);
    }

    #[test]
    fn test_urls_stay_whole() {
        assert_eq!(
            texts("see https://example.com/a-b?x=1 now"),
            vec!["see", "https://example.com/a-b?x=1", "now"]
        );
        assert_eq!(texts("mail me@example.org."), vec!["mail", "me@example.org", "."]);
    }

    #[test]
    fn test_flags() {
        let tokenizer = EnglishTokenizer::new().unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("Got 42 pills!\tOk").unwrap().collect();

        let digits: Vec<_> = tokens.iter().filter(|t| t.is_digit).map(|t| &t.text).collect();
        assert_eq!(digits, vec!["42"]);

        let puncts: Vec<_> = tokens.iter().filter(|t| t.is_punct).map(|t| &t.text).collect();
        assert_eq!(puncts, vec!["!"]);

        assert!(tokens.iter().any(|t| t.is_space));
    }

    #[test]
    fn test_single_space_produces_no_token() {
        let tokenizer = EnglishTokenizer::new().unwrap();
        assert!(tokenizer.tokenize("a b").unwrap().all(|t| !t.is_space));
    }

    #[test]
    fn test_offsets_and_positions() {
        let tokenizer = EnglishTokenizer::new().unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("hi there").unwrap().collect();

        assert_eq!(tokens[1].position, 1);
        assert_eq!(tokens[1].start_offset, 3);
        assert_eq!(tokens[1].end_offset, 8);
    }

    #[test]
    fn test_empty_text() {
        assert!(texts("").is_empty());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(EnglishTokenizer::new().unwrap().name(), "english");
    }
}
