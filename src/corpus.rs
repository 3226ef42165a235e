//! Corpus input and output.
//!
//! Submissions are read from CSV or JSON Lines, cleaned of moderation
//! placeholders and duplicates by [`filter::CorpusFilter`], and written back
//! as [`record::PhraseRecord`]s once phrase tokens have been computed.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexiphraseError, Result};

pub mod filter;
pub mod reader;
pub mod record;
pub mod writer;

pub use filter::CorpusFilter;
pub use reader::CorpusReader;
pub use record::{PhraseRecord, Submission};
pub use writer::RecordWriter;

/// Serialization format of a corpus file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusFormat {
    #[default]
    Csv,
    Jsonl,
}

impl CorpusFormat {
    /// Guess the format from a file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(CorpusFormat::Csv),
            Some("jsonl") | Some("ndjson") => Ok(CorpusFormat::Jsonl),
            _ => Err(LexiphraseError::invalid_input(format!(
                "cannot infer corpus format of {}; use a .csv or .jsonl file",
                path.display()
            ))),
        }
    }
}
