//! Corpus cleaning before preprocessing.

use std::collections::HashSet;

use log::info;
use serde::{Deserialize, Serialize};

use crate::corpus::record::Submission;

/// Body text left behind by moderators or deleting authors.
pub const REMOVED_MARKERS: &[&str] = &["[removed]", "[deleted]"];

/// Selects which submissions enter the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusFilter {
    /// Drop submissions with missing, removed or deleted body text.
    pub drop_removed: bool,
    /// Keep only the first submission for each distinct body text.
    pub dedup: bool,
    /// Drop submissions scored below this.
    pub min_score: Option<i64>,
}

impl Default for CorpusFilter {
    fn default() -> Self {
        CorpusFilter {
            drop_removed: true,
            dedup: false,
            min_score: None,
        }
    }
}

impl CorpusFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_min_score(mut self, min_score: Option<i64>) -> Self {
        self.min_score = min_score;
        self
    }

    /// Whether a body text is a moderation placeholder.
    pub fn is_removed(selftext: Option<&str>) -> bool {
        match selftext {
            None => true,
            Some(text) => REMOVED_MARKERS.contains(&text),
        }
    }

    /// Apply the filter, keeping the order of the surviving submissions.
    pub fn apply(&self, submissions: Vec<Submission>) -> Vec<Submission> {
        let total = submissions.len();
        let mut seen: HashSet<String> = HashSet::new();

        let kept: Vec<Submission> = submissions
            .into_iter()
            .filter(|s| !(self.drop_removed && Self::is_removed(s.selftext.as_deref())))
            .filter(|s| match (self.min_score, s.score) {
                (Some(min), Some(score)) => score >= min,
                (Some(_), None) => false,
                (None, _) => true,
            })
            .filter(|s| {
                if !self.dedup {
                    return true;
                }
                // Missing text only survives when drop_removed is off; treat it as its own key.
                seen.insert(s.selftext.clone().unwrap_or_default())
            })
            .collect();

        info!("Corpus filter kept {} of {} submissions", kept.len(), total);
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(subs: &[Submission]) -> Vec<&str> {
        subs.iter().map(|s| s.id.as_str()).collect()
    }

    fn corpus() -> Vec<Submission> {
        vec![
            Submission::new("a", "my first post").with_score(10),
            Submission::new("b", "[removed]").with_score(50),
            Submission::new("c", "my first post").with_score(3),
            Submission {
                id: "d".to_string(),
                ..Default::default()
            },
            Submission::new("e", " [deleted] "),
            Submission::new("f", "another post"),
        ]
    }

    #[test]
    fn test_drops_removed_and_missing() {
        let kept = CorpusFilter::new().apply(corpus());
        assert_eq!(ids(&kept), vec!["a", "c", "e", "f"]);
    }

    #[test]
    fn test_markers_match_exactly() {
        assert!(CorpusFilter::is_removed(Some("[removed]")));
        assert!(CorpusFilter::is_removed(Some("[deleted]")));
        assert!(CorpusFilter::is_removed(None));
        assert!(!CorpusFilter::is_removed(Some(" [deleted] ")));
        assert!(!CorpusFilter::is_removed(Some("[removed]\n")));
        assert!(!CorpusFilter::is_removed(Some("[Removed]")));
    }

    #[test]
    fn test_dedup_keeps_first() {
        let kept = CorpusFilter::new().with_dedup(true).apply(corpus());
        assert_eq!(ids(&kept), vec!["a", "e", "f"]);
    }

    #[test]
    fn test_min_score() {
        let kept = CorpusFilter::new().with_min_score(Some(5)).apply(corpus());
        assert_eq!(ids(&kept), vec!["a"]);
    }

    #[test]
    fn test_disabled_filter_keeps_everything() {
        let filter = CorpusFilter {
            drop_removed: false,
            dedup: false,
            min_score: None,
        };
        assert_eq!(filter.apply(corpus()).len(), 6);
    }
}
