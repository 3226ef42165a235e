//! Command implementations for the lexiphrase CLI.

use std::path::Path;
use std::time::Instant;

use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::reader::CorpusReader;
use crate::corpus::record::PhraseRecord;
use crate::corpus::writer::RecordWriter;
use crate::corpus::CorpusFormat;
use crate::error::{LexiphraseError, Result};
use crate::phrase::extractor::PhraseExtractor;
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::stats::collocation::CollocationFinder;
use crate::stats::concordance::Concordance;
use crate::stats::context::{ContextIndex, display_context};
use crate::stats::frequency::{TermFrequencies, type_token_ratio};
use crate::stats::summary::CorpusSummary;
use crate::stats::flatten_tokens;

/// Execute a CLI command.
pub fn execute_command(args: LexiphraseArgs) -> Result<()> {
    match &args.command {
        Command::Process(process_args) => process_corpus(process_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
        Command::Phrases(phrases_args) => list_phrases(phrases_args.clone(), &args),
    }
}

fn resolve_format(explicit: Option<FileFormat>, path: &Path) -> Result<CorpusFormat> {
    match explicit {
        Some(format) => Ok(format.into()),
        None => CorpusFormat::from_path(path),
    }
}

/// Build the pipeline configuration from the config file and flag overrides.
fn build_config(options: &PipelineOptions) -> Result<PipelineConfig> {
    let mut config = match &options.config {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };

    if options.lexicon.is_some() {
        config.lexicon = options.lexicon.clone();
    }
    if options.dedup {
        config.filter.dedup = true;
    }
    if options.min_score.is_some() {
        config.filter.min_score = options.min_score;
    }
    if let Some(batch_size) = options.batch_size {
        config.preprocessor.batch_size = batch_size;
    }
    if options.no_parallel {
        config.preprocessor.parallel = false;
    }
    config.validate()?;
    Ok(config)
}

/// Clean a corpus, detect phrases and write the annotated records.
fn process_corpus(args: ProcessArgs, cli_args: &LexiphraseArgs) -> Result<()> {
    let start_time = Instant::now();

    let mut config = build_config(&args.pipeline)?;
    if args.drop_empty {
        config.drop_empty = true;
    }

    let input_format = resolve_format(args.pipeline.input_format, &args.input)?;
    let record_format = resolve_format(args.record_format, &args.output)?;

    info!("Reading corpus from {}", args.input.display());
    let submissions = CorpusReader::new(input_format).read_path(&args.input)?;
    let submissions_read = submissions.len();

    let pipeline = Pipeline::from_config(config)?;
    let (records, extractor) = pipeline.process_submissions(submissions)?;
    let empty_records = records.iter().filter(|r| r.phrase_tokens.is_empty()).count();
    if empty_records > 0 {
        warn!("{empty_records} records have no phrase tokens");
    }

    RecordWriter::new(record_format).write_path(&args.output, &records)?;

    if let Some(model_path) = &args.save_model {
        extractor.save(model_path)?;
        info!("Saved phrase models to {}", model_path.display());
    }

    output_result(
        "Corpus processed successfully",
        &ProcessResult {
            input: args.input.to_string_lossy().to_string(),
            output: args.output.to_string_lossy().to_string(),
            submissions_read,
            records_written: records.len(),
            empty_records,
            bigram_phrases: extractor.bigram().len(),
            trigram_phrases: extractor.trigram().len(),
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Compute statistics over processed records.
fn show_stats(args: StatsArgs, cli_args: &LexiphraseArgs) -> Result<()> {
    let format = resolve_format(args.input_format, &args.input)?;
    let records: Vec<PhraseRecord> = CorpusReader::new(format).read_path_as(&args.input)?;
    let tokens = flatten_tokens(records.iter().map(|r| r.phrase_tokens.as_str()));

    let frequencies = TermFrequencies::from_tokens(&tokens);
    let collocations = CollocationFinder::from_tokens(&tokens, args.window)?.best(args.collocations);

    let concordance = args.concordance.as_ref().map(|word| {
        Concordance::new(tokens.clone()).lines(word, args.width, args.lines)
    });

    let needs_contexts = args.similar.is_some() || !args.contexts.is_empty();
    let context_index = needs_contexts.then(|| ContextIndex::new(&tokens));
    let similar = match (&args.similar, &context_index) {
        (Some(word), Some(index)) => Some(index.similar(word, 20)),
        _ => None,
    };
    let common_contexts = match &context_index {
        Some(index) if !args.contexts.is_empty() => Some(
            index
                .common_contexts(&args.contexts)
                .iter()
                .map(display_context)
                .collect(),
        ),
        _ => None,
    };

    output_result(
        &format!("Statistics for {}", args.input.display()),
        &StatsReport {
            tokens: tokens.len(),
            types: frequencies.len(),
            type_token_ratio: type_token_ratio(&tokens),
            top_terms: frequencies.most_common(args.top),
            collocations,
            concordance,
            similar,
            common_contexts,
            summary: CorpusSummary::from_records(&records),
        },
        cli_args,
    )
}

/// List the phrases of a saved model or of a model fitted on a corpus.
fn list_phrases(args: PhrasesArgs, cli_args: &LexiphraseArgs) -> Result<()> {
    let extractor = match (&args.model, &args.input) {
        (Some(model_path), _) => PhraseExtractor::load(model_path)?,
        (None, Some(input)) => {
            let config = build_config(&args.pipeline)?;
            let format = resolve_format(args.pipeline.input_format, input)?;
            let submissions = CorpusReader::new(format).read_path(input)?;
            let pipeline = Pipeline::from_config(config)?;
            pipeline.process_submissions(submissions)?.1
        }
        (None, None) => {
            return Err(LexiphraseError::invalid_input(
                "either an input corpus or --model is required",
            ));
        }
    };

    let mut bigrams = extractor.bigram().phrasegrams();
    let mut trigrams = extractor.trigram().phrasegrams();
    bigrams.truncate(args.limit);
    trigrams.truncate(args.limit);

    output_result(
        "Learned phrases",
        &PhraseListing {
            delimiter: extractor.bigram().config().delimiter.clone(),
            bigrams,
            trigrams,
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_build_config_overrides() {
        let options = PipelineOptions {
            dedup: true,
            min_score: Some(3),
            batch_size: Some(10),
            no_parallel: true,
            ..Default::default()
        };
        let config = build_config(&options).unwrap();
        assert!(config.filter.dedup);
        assert_eq!(config.filter.min_score, Some(3));
        assert_eq!(config.preprocessor.batch_size, 10);
        assert!(!config.preprocessor.parallel);
    }

    #[test]
    fn test_build_config_rejects_zero_batch() {
        let options = PipelineOptions {
            batch_size: Some(0),
            ..Default::default()
        };
        assert!(build_config(&options).is_err());
    }

    #[test]
    fn test_process_then_stats() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("posts.csv");
        let output = dir.path().join("records.jsonl");
        let model = dir.path().join("phrases.bin");
        fs::write(
            &input,
            "id,selftext,created_utc\n\
             a,My chronic pain is bad.,1609459200\n\
             b,[removed],1609459200\n\
             c,Doctors helped.,1640995200\n",
        )
        .unwrap();

        let args = LexiphraseArgs::try_parse_from([
            "lexiphrase",
            "-q",
            "-f",
            "json",
            "process",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--save-model",
            model.to_str().unwrap(),
        ])
        .unwrap();
        execute_command(args).unwrap();

        let records: Vec<PhraseRecord> = CorpusReader::new(CorpusFormat::Jsonl)
            .read_path_as(&output)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].phrase_tokens, "doctor help");
        assert!(model.exists());

        let args = LexiphraseArgs::try_parse_from([
            "lexiphrase",
            "-q",
            "-f",
            "json",
            "stats",
            output.to_str().unwrap(),
            "--concordance",
            "doctor",
        ])
        .unwrap();
        execute_command(args).unwrap();

        let args = LexiphraseArgs::try_parse_from([
            "lexiphrase",
            "-q",
            "-f",
            "json",
            "phrases",
            "--model",
            model.to_str().unwrap(),
        ])
        .unwrap();
        execute_command(args).unwrap();
    }

    #[test]
    fn test_unknown_extension_needs_explicit_format() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("posts.txt");
        fs::write(&input, "id,selftext\na,text\n").unwrap();

        let args = LexiphraseArgs::try_parse_from([
            "lexiphrase",
            "-q",
            "stats",
            input.to_str().unwrap(),
        ])
        .unwrap();
        assert!(matches!(
            execute_command(args),
            Err(LexiphraseError::InvalidInput(_))
        ));
    }
}
