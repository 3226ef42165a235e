//! Corpus record types.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Convert fractional Unix seconds to a UTC time.
pub fn datetime_from_unix(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let secs = ts.floor();
    let nanos = ((ts - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
}

/// One forum submission as found in an input corpus.
///
/// Columns not listed here are ignored. Numeric columns that fail to parse
/// are read as missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub id: String,
    pub author: Option<String>,
    pub title: Option<String>,
    pub selftext: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub score: Option<i64>,
    /// Creation time in Unix seconds.
    #[serde(deserialize_with = "csv::invalid_option")]
    pub created_utc: Option<f64>,
    pub link_flair_text: Option<String>,
    pub author_flair_text: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub num_comments: Option<i64>,
}

impl Submission {
    /// Create a submission with only an id and body text.
    pub fn new<S: Into<String>, T: Into<String>>(id: S, selftext: T) -> Self {
        Submission {
            id: id.into(),
            selftext: Some(selftext.into()),
            ..Default::default()
        }
    }

    pub fn with_created_utc(mut self, created_utc: f64) -> Self {
        self.created_utc = Some(created_utc);
        self
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_link_flair<S: Into<String>>(mut self, flair: S) -> Self {
        self.link_flair_text = Some(flair.into());
        self
    }

    /// Creation time, if the record has a valid timestamp.
    pub fn created_datetime(&self) -> Option<DateTime<Utc>> {
        self.created_utc.and_then(datetime_from_unix)
    }

    /// Calendar year of creation (UTC).
    pub fn year(&self) -> Option<i32> {
        self.created_datetime().map(|dt| dt.year())
    }

    /// Calendar month of creation (UTC), 1-based.
    pub fn month(&self) -> Option<u32> {
        self.created_datetime().map(|dt| dt.month())
    }
}

/// A submission annotated with its phrase tokens.
///
/// This is the output schema: every field is named, and `phrase_tokens`
/// holds the document's phrase-merged tokens joined by single spaces.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseRecord {
    pub id: String,
    pub author: Option<String>,
    pub title: Option<String>,
    /// RFC 3339 creation time derived from `created_utc`.
    pub created_datetime: Option<String>,
    pub selftext: Option<String>,
    pub score: Option<i64>,
    pub created_utc: Option<f64>,
    pub link_flair_text: Option<String>,
    pub author_flair_text: Option<String>,
    pub num_comments: Option<i64>,
    pub phrase_tokens: String,
}

impl PhraseRecord {
    /// Attach phrase tokens to a submission.
    pub fn from_submission(submission: Submission, phrase_tokens: String) -> Self {
        let created_datetime = submission
            .created_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true));
        PhraseRecord {
            id: submission.id,
            author: submission.author,
            title: submission.title,
            created_datetime,
            selftext: submission.selftext,
            score: submission.score,
            created_utc: submission.created_utc,
            link_flair_text: submission.link_flair_text,
            author_flair_text: submission.author_flair_text,
            num_comments: submission.num_comments,
            phrase_tokens,
        }
    }

    /// Creation time, if the record has a valid timestamp.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_utc.and_then(datetime_from_unix)
    }

    /// The phrase tokens as a list.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.phrase_tokens.split_whitespace()
    }
}
