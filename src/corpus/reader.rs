//! Corpus readers for CSV and JSON Lines.
//!
//! CSV files need a header row; JSON Lines files hold one object per line,
//! and blank lines are skipped. In both formats unknown fields are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::corpus::CorpusFormat;
use crate::corpus::record::Submission;
use crate::error::{LexiphraseError, Result};

/// Reads [`Submission`]s, or any other record type, from a corpus file.
#[derive(Clone, Debug)]
pub struct CorpusReader {
    format: CorpusFormat,
    delimiter: u8,
}

impl CorpusReader {
    /// Create a reader for the given format.
    pub fn new(format: CorpusFormat) -> Self {
        CorpusReader {
            format,
            delimiter: b',',
        }
    }

    /// Set the CSV delimiter character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn format(&self) -> CorpusFormat {
        self.format
    }

    /// Read every submission of a file.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Submission>> {
        self.read_path_as(path)
    }

    /// Read every submission from a reader.
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<Submission>> {
        self.read_as(reader)
    }

    /// Read every record of a file as `T`.
    pub fn read_path_as<T: DeserializeOwned, P: AsRef<Path>>(&self, path: P) -> Result<Vec<T>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            LexiphraseError::invalid_input(format!("cannot open corpus {}: {e}", path.display()))
        })?;
        let records = self.read_as(BufReader::new(file))?;
        debug!("Read {} records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Read every record from a reader as `T`.
    pub fn read_as<T: DeserializeOwned, R: Read>(&self, reader: R) -> Result<Vec<T>> {
        match self.format {
            CorpusFormat::Csv => self.read_csv(reader),
            CorpusFormat::Jsonl => Self::read_jsonl(BufReader::new(reader)),
        }
    }

    fn read_csv<T: DeserializeOwned, R: Read>(&self, reader: R) -> Result<Vec<T>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for (row, result) in reader.deserialize::<T>().enumerate() {
            let record = result.map_err(|e| {
                LexiphraseError::invalid_input(format!("CSV row {}: {e}", row + 1))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    fn read_jsonl<T: DeserializeOwned, R: BufRead>(reader: R) -> Result<Vec<T>> {
        let mut records = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(&line).map_err(|e| {
                LexiphraseError::invalid_input(format!("line {}: invalid JSON: {e}", line_num + 1))
            })?;
            if !value.is_object() {
                return Err(LexiphraseError::invalid_input(format!(
                    "line {}: expected a JSON object",
                    line_num + 1
                )));
            }
            if let Some(selftext) = value.get("selftext") {
                if !(selftext.is_string() || selftext.is_null()) {
                    return Err(LexiphraseError::invalid_input(format!(
                        "line {}: selftext is not text",
                        line_num + 1
                    )));
                }
            }

            let record: T = serde_json::from_value(value).map_err(|e| {
                LexiphraseError::invalid_input(format!("line {}: {e}", line_num + 1))
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_read_csv() {
        let data = "\
id,author,selftext,score,created_utc,link_flair_text,extra
a1,bob,\"I live in\nNew York\",5,1609459200.0,Advice,ignored
a2,amy,,x,,,
";
        let subs = CorpusReader::new(CorpusFormat::Csv).read(data.as_bytes()).unwrap();

        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].id, "a1");
        assert_eq!(subs[0].selftext.as_deref(), Some("I live in\nNew York"));
        assert_eq!(subs[0].score, Some(5));
        assert_eq!(subs[0].year(), Some(2021));
        assert_eq!(subs[0].link_flair_text.as_deref(), Some("Advice"));
        assert_eq!(subs[1].selftext, None);
        assert_eq!(subs[1].score, None);
    }

    #[test]
    fn test_read_jsonl() {
        let data = r#"{"id": "a1", "selftext": "first post", "score": 3}

{"id": "a2", "selftext": null, "num_comments": 7}
"#;
        let subs = CorpusReader::new(CorpusFormat::Jsonl).read(data.as_bytes()).unwrap();

        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].selftext.as_deref(), Some("first post"));
        assert_eq!(subs[1].selftext, None);
        assert_eq!(subs[1].num_comments, Some(7));
    }

    #[test]
    fn test_jsonl_non_text_selftext_is_invalid_input() {
        let data = "{\"id\": \"a1\", \"selftext\": 42}\n";
        let err = CorpusReader::new(CorpusFormat::Jsonl)
            .read(data.as_bytes())
            .unwrap_err();
        match err {
            LexiphraseError::InvalidInput(msg) => assert!(msg.contains("line 1")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_jsonl_malformed_line() {
        let data = "{\"id\": \"a1\"}\nnot json\n";
        let err = CorpusReader::new(CorpusFormat::Jsonl)
            .read(data.as_bytes())
            .unwrap_err();
        assert!(matches!(err, LexiphraseError::InvalidInput(_)));
    }

    #[test]
    fn test_read_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,selftext").unwrap();
        writeln!(file, "p1,hello world").unwrap();

        let subs = CorpusReader::new(CorpusFormat::Csv).read_path(file.path()).unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].selftext.as_deref(), Some("hello world"));
    }

    #[test]
    fn test_missing_file() {
        let err = CorpusReader::new(CorpusFormat::Csv)
            .read_path("/nonexistent/corpus.csv")
            .unwrap_err();
        assert!(matches!(err, LexiphraseError::InvalidInput(_)));
    }
}
