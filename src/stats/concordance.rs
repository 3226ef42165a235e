//! Keyword-in-context display.

use ahash::AHashMap;
use serde::Serialize;

/// Default display width of a concordance line, in characters.
pub const DEFAULT_WIDTH: usize = 79;

/// One keyword-in-context line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConcordanceLine {
    /// Token index of the match.
    pub offset: usize,
    pub left: String,
    pub query: String,
    pub right: String,
    /// The rendered line: `left query right`, trimmed to the width.
    pub line: String,
}

/// Index of token positions for concordance lookups. Matching ignores case.
#[derive(Clone, Debug)]
pub struct Concordance {
    tokens: Vec<String>,
    offsets: AHashMap<String, Vec<usize>>,
}

fn tail_chars(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}

fn head_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

impl Concordance {
    pub fn new(tokens: Vec<String>) -> Self {
        let mut offsets: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (i, token) in tokens.iter().enumerate() {
            offsets.entry(token.to_lowercase()).or_default().push(i);
        }
        Concordance { tokens, offsets }
    }

    /// Positions of `word` in the token list.
    pub fn offsets(&self, word: &str) -> &[usize] {
        self.offsets
            .get(&word.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Up to `limit` lines for `word`, each about `width` characters wide.
    pub fn lines(&self, word: &str, width: usize, limit: usize) -> Vec<ConcordanceLine> {
        let query_len = word.chars().count();
        let half_width = width.saturating_sub(query_len + 2) / 2;
        let context = (width / 4).max(1);

        self.offsets(word)
            .iter()
            .take(limit)
            .map(|&i| {
                let start = i.saturating_sub(context);
                let end = (i + context).min(self.tokens.len());
                let left = format!(
                    "{}{}",
                    " ".repeat(half_width),
                    self.tokens[start..i].join(" ")
                );
                let right = self.tokens[i + 1..end].join(" ");
                let left = tail_chars(&left, half_width);
                let right = head_chars(&right, half_width);
                let query = self.tokens[i].clone();
                let line = format!("{left} {query} {right}");
                ConcordanceLine {
                    offset: i,
                    left,
                    query,
                    right,
                    line,
                }
            })
            .collect()
    }
}
