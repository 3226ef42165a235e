//! Per-year and per-flair submission counts.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::corpus::record::{PhraseRecord, Submission};

/// Submissions sharing a year and a flair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct YearFlairCount {
    pub year: i32,
    pub flair: String,
    pub count: usize,
}

/// Counts of submissions grouped by creation time and flair.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CorpusSummary {
    pub documents: usize,
    /// Submissions without a usable timestamp.
    pub undated: usize,
    pub by_year: BTreeMap<i32, usize>,
    /// Keyed by `YYYY-MM`.
    pub by_month: BTreeMap<String, usize>,
    pub by_flair: BTreeMap<String, usize>,
    pub by_year_flair: Vec<YearFlairCount>,
}

impl CorpusSummary {
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        Self::from_entries(
            submissions
                .iter()
                .map(|s| (s.created_datetime(), s.link_flair_text.as_deref())),
        )
    }

    pub fn from_records(records: &[PhraseRecord]) -> Self {
        Self::from_entries(
            records
                .iter()
                .map(|r| (r.created(), r.link_flair_text.as_deref())),
        )
    }

    fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Option<DateTime<Utc>>, Option<&'a str>)>,
    {
        let mut summary = CorpusSummary::default();
        let mut year_flair: BTreeMap<(i32, String), usize> = BTreeMap::new();

        for (created, flair) in entries {
            summary.documents += 1;
            if let Some(flair) = flair {
                *summary.by_flair.entry(flair.to_string()).or_insert(0) += 1;
            }
            let Some(created) = created else {
                summary.undated += 1;
                continue;
            };
            let year = created.year();
            *summary.by_year.entry(year).or_insert(0) += 1;
            *summary
                .by_month
                .entry(created.format("%Y-%m").to_string())
                .or_insert(0) += 1;
            if let Some(flair) = flair {
                *year_flair.entry((year, flair.to_string())).or_insert(0) += 1;
            }
        }

        summary.by_year_flair = year_flair
            .into_iter()
            .map(|((year, flair), count)| YearFlairCount { year, flair, count })
            .collect();
        summary
    }

    /// Month counts (1-12) of a single year.
    pub fn months_of(&self, year: i32) -> Vec<(u32, usize)> {
        let prefix = format!("{year:04}-");
        self.by_month
            .iter()
            .filter_map(|(key, count)| {
                key.strip_prefix(&prefix)
                    .and_then(|m| m.parse::<u32>().ok())
                    .map(|m| (m, *count))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2021-01-01, 2021-03-15, 2022-06-01 (UTC)
    const JAN_2021: f64 = 1_609_459_200.0;
    const MAR_2021: f64 = 1_615_766_400.0;
    const JUN_2022: f64 = 1_654_041_600.0;

    #[test]
    fn test_summary_groups() {
        let subs = vec![
            Submission::new("a", "x").with_created_utc(JAN_2021).with_link_flair("Advice"),
            Submission::new("b", "x").with_created_utc(MAR_2021).with_link_flair("Advice"),
            Submission::new("c", "x").with_created_utc(JUN_2022).with_link_flair("Vent"),
            Submission::new("d", "x").with_link_flair("Vent"),
        ];
        let summary = CorpusSummary::from_submissions(&subs);

        assert_eq!(summary.documents, 4);
        assert_eq!(summary.undated, 1);
        assert_eq!(summary.by_year.get(&2021), Some(&2));
        assert_eq!(summary.by_year.get(&2022), Some(&1));
        assert_eq!(summary.by_flair.get("Vent"), Some(&2));
        assert_eq!(summary.months_of(2021), vec![(1, 1), (3, 1)]);
        assert_eq!(
            summary.by_year_flair[0],
            YearFlairCount {
                year: 2021,
                flair: "Advice".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn test_summary_from_records() {
        let records = vec![
            PhraseRecord::from_submission(
                Submission::new("a", "x").with_created_utc(JUN_2022).with_link_flair("Vent"),
                "x".to_string(),
            ),
            PhraseRecord::from_submission(Submission::new("b", "y"), "y".to_string()),
        ];
        let summary = CorpusSummary::from_records(&records);
        assert_eq!(summary.documents, 2);
        assert_eq!(summary.undated, 1);
        assert_eq!(summary.months_of(2022), vec![(6, 1)]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = CorpusSummary::from_submissions(&[]);
        assert_eq!(summary.documents, 0);
        assert!(summary.by_year.is_empty());
    }
}
