//! Record writers for CSV and JSON Lines.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::corpus::CorpusFormat;
use crate::corpus::record::PhraseRecord;
use crate::error::Result;

/// Writes [`PhraseRecord`]s in a corpus format.
#[derive(Clone, Debug)]
pub struct RecordWriter {
    format: CorpusFormat,
}

impl RecordWriter {
    pub fn new(format: CorpusFormat) -> Self {
        RecordWriter { format }
    }

    /// Write records to a file, replacing it if it exists.
    pub fn write_path<P: AsRef<Path>>(&self, path: P, records: &[PhraseRecord]) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write(BufWriter::new(file), records)?;
        info!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    /// Write records to any writer.
    pub fn write<W: Write>(&self, writer: W, records: &[PhraseRecord]) -> Result<()> {
        match self.format {
            CorpusFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(writer);
                for record in records {
                    csv_writer.serialize(record)?;
                }
                csv_writer.flush()?;
            }
            CorpusFormat::Jsonl => {
                let mut writer = writer;
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writer.write_all(b"\n")?;
                }
                writer.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::corpus::reader::CorpusReader;
    use crate::corpus::record::Submission;

    fn records() -> Vec<PhraseRecord> {
        vec![
            PhraseRecord::from_submission(
                Submission::new("a", "I love New York").with_created_utc(1_609_459_200.0),
                "love new_york".to_string(),
            ),
            PhraseRecord::from_submission(Submission::new("b", "the of to"), String::new()),
        ]
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let mut out = Vec::new();
        RecordWriter::new(CorpusFormat::Csv).write(&mut out, &records()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("id,author,title,created_datetime,selftext"));
        assert!(header.ends_with("phrase_tokens"));
        assert!(lines.next().unwrap().ends_with("love new_york"));
    }

    #[test]
    fn test_write_jsonl() {
        let mut out = Vec::new();
        RecordWriter::new(CorpusFormat::Jsonl).write(&mut out, &records()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["phrase_tokens"], "");
        assert_eq!(second["id"], "b");
    }

    #[test]
    fn test_written_csv_reads_back_as_submissions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        RecordWriter::new(CorpusFormat::Csv).write_path(&path, &records()).unwrap();

        let subs = CorpusReader::new(CorpusFormat::Csv).read_path(&path).unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].selftext.as_deref(), Some("I love New York"));
        assert_eq!(subs[0].year(), Some(2021));
    }
}
