//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{LexiphraseArgs, OutputFormat};
use crate::error::Result;
use crate::phrase::model::Phrasegram;
use crate::stats::collocation::Collocation;
use crate::stats::concordance::ConcordanceLine;
use crate::stats::summary::CorpusSummary;

/// Result structure for corpus processing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResult {
    pub input: String,
    pub output: String,
    pub submissions_read: usize,
    pub records_written: usize,
    pub empty_records: usize,
    pub bigram_phrases: usize,
    pub trigram_phrases: usize,
    pub duration_ms: u64,
}

/// Descriptive statistics of processed records.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub tokens: usize,
    pub types: usize,
    pub type_token_ratio: Option<f64>,
    pub top_terms: Vec<(String, u64)>,
    pub collocations: Vec<Collocation>,
    pub concordance: Option<Vec<ConcordanceLine>>,
    pub similar: Option<Vec<String>>,
    pub common_contexts: Option<Vec<String>>,
    pub summary: CorpusSummary,
}

/// Learned phrases of both levels.
#[derive(Debug, Serialize, Deserialize)]
pub struct PhraseListing {
    pub delimiter: String,
    pub bigrams: Vec<Phrasegram>,
    pub trigrams: Vec<Phrasegram>,
}

/// Results that know how to print themselves for a terminal.
pub trait HumanOutput {
    fn print_human(&self, args: &LexiphraseArgs);
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &LexiphraseArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LexiphraseArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

impl HumanOutput for ProcessResult {
    fn print_human(&self, args: &LexiphraseArgs) {
        println!("Input:              {}", self.input);
        println!("Output:             {}", self.output);
        println!("Submissions read:   {}", self.submissions_read);
        println!("Records written:    {}", self.records_written);
        println!("Empty records:      {}", self.empty_records);
        println!("Bigram phrases:     {}", self.bigram_phrases);
        println!("Trigram phrases:    {}", self.trigram_phrases);
        if args.verbosity() > 1 {
            println!("Duration:           {} ms", self.duration_ms);
        }
    }
}

impl HumanOutput for StatsReport {
    fn print_human(&self, _args: &LexiphraseArgs) {
        println!("Tokens: {}  Types: {}", self.tokens, self.types);
        match self.type_token_ratio {
            Some(ttr) => println!("Type-token ratio: {ttr:.4}"),
            None => println!("Type-token ratio: n/a"),
        }

        println!();
        println!("Most common terms:");
        for (term, count) in &self.top_terms {
            println!("  {term:<30} {count:>8}");
        }

        println!();
        println!("Collocations:");
        let pairs: Vec<String> = self
            .collocations
            .iter()
            .map(|c| format!("{} {}", c.left, c.right))
            .collect();
        println!("  {}", pairs.join("; "));

        if let Some(lines) = &self.concordance {
            println!();
            println!("Concordance ({} lines):", lines.len());
            for line in lines {
                println!("{}", line.line);
            }
        }
        if let Some(similar) = &self.similar {
            println!();
            println!("Similar words:");
            println!("  {}", similar.join(" "));
        }
        if let Some(contexts) = &self.common_contexts {
            println!();
            println!("Common contexts:");
            println!("  {}", contexts.join(" "));
        }

        println!();
        println!(
            "Documents: {} ({} undated)",
            self.summary.documents, self.summary.undated
        );
        for (year, count) in &self.summary.by_year {
            println!("  {year}: {count}");
        }
        if !self.summary.by_year_flair.is_empty() {
            println!("By year and flair:");
            for row in &self.summary.by_year_flair {
                println!("  {} {:<40} {:>6}", row.year, row.flair, row.count);
            }
        }
    }
}

impl HumanOutput for PhraseListing {
    fn print_human(&self, _args: &LexiphraseArgs) {
        for (title, grams) in [("Bigram phrases", &self.bigrams), ("Trigram phrases", &self.trigrams)] {
            println!("{title} ({}):", grams.len());
            for gram in grams {
                println!("  {:<40} {:>10.2}", gram.joined(&self.delimiter), gram.score);
            }
            println!();
        }
    }
}
