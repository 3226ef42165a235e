//! Command line argument parsing for the lexiphrase CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::corpus::CorpusFormat;

/// lexiphrase - lemma cleaning and phrase detection for forum corpora
#[derive(Parser, Debug, Clone)]
#[command(name = "lexiphrase")]
#[command(about = "Clean forum posts into lemmas and detect multi-word phrases")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexiphraseArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexiphraseArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Clean a corpus, detect phrases and write annotated records
    Process(ProcessArgs),

    /// Show descriptive statistics of processed records
    Stats(StatsArgs),

    /// List the phrases learned from a corpus
    Phrases(PhrasesArgs),
}

/// File format of a corpus or record file.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Jsonl,
}

impl From<FileFormat> for CorpusFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Csv => CorpusFormat::Csv,
            FileFormat::Jsonl => CorpusFormat::Jsonl,
        }
    }
}

/// Options shared by commands that run the pipeline.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Lexicon file extending the built-in English model (JSON)
    #[arg(long, value_name = "LEXICON_FILE")]
    pub lexicon: Option<PathBuf>,

    /// Keep only the first post for each distinct body text
    #[arg(long)]
    pub dedup: bool,

    /// Drop posts scored below this
    #[arg(long, value_name = "SCORE", allow_negative_numbers = true)]
    pub min_score: Option<i64>,

    /// Documents annotated per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Annotate on a single thread
    #[arg(long)]
    pub no_parallel: bool,

    /// Input format (default: from the file extension)
    #[arg(long, value_name = "FORMAT")]
    pub input_format: Option<FileFormat>,
}

/// Arguments for processing a corpus
#[derive(Parser, Debug, Clone)]
pub struct ProcessArgs {
    /// Corpus file (CSV or JSONL)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output record file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Output record format (default: from the file extension)
    #[arg(long, value_name = "FORMAT")]
    pub record_format: Option<FileFormat>,

    /// Drop records without phrase tokens
    #[arg(long)]
    pub drop_empty: bool,

    /// Save the fitted phrase models to this file
    #[arg(long, value_name = "MODEL_FILE")]
    pub save_model: Option<PathBuf>,

    #[command(flatten)]
    pub pipeline: PipelineOptions,
}

/// Arguments for corpus statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Processed record file (CSV or JSONL)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Input format (default: from the file extension)
    #[arg(long, value_name = "FORMAT")]
    pub input_format: Option<FileFormat>,

    /// Number of most frequent terms to show
    #[arg(long, default_value = "20")]
    pub top: usize,

    /// Number of collocations to show
    #[arg(long, default_value = "20")]
    pub collocations: usize,

    /// Collocation window size
    #[arg(long, default_value = "2")]
    pub window: usize,

    /// Show keyword-in-context lines for a word
    #[arg(long, value_name = "WORD")]
    pub concordance: Option<String>,

    /// Width of concordance lines
    #[arg(long, default_value = "79")]
    pub width: usize,

    /// Maximum number of concordance lines
    #[arg(long, default_value = "25")]
    pub lines: usize,

    /// Show words used in the same contexts as a word
    #[arg(long, value_name = "WORD")]
    pub similar: Option<String>,

    /// Show contexts shared by comma-separated words
    #[arg(long, value_name = "WORDS", value_delimiter = ',')]
    pub contexts: Vec<String>,
}

/// Arguments for listing learned phrases
#[derive(Parser, Debug, Clone)]
pub struct PhrasesArgs {
    /// Corpus file (CSV or JSONL); ignored with --model
    #[arg(value_name = "INPUT", required_unless_present = "model")]
    pub input: Option<PathBuf>,

    /// Read phrases from a saved model instead of fitting
    #[arg(long, value_name = "MODEL_FILE")]
    pub model: Option<PathBuf>,

    /// Maximum number of phrases per level
    #[arg(short, long, default_value = "50")]
    pub limit: usize,

    #[command(flatten)]
    pub pipeline: PipelineOptions,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
