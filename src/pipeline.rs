//! End-to-end corpus processing.
//!
//! A [`Pipeline`] runs the two stages in order:
//!
//! ```text
//! raw documents ─▶ TextPreprocessor ─▶ Vec<CleanedDocument> ─▶ PhraseExtractor ─▶ phrase_tokens
//!                   (lazy, batched)     (materialized)          (bigram → trigram)
//! ```
//!
//! Preprocessing can stream, but phrase learning needs two full passes, so
//! the cleaned corpus is collected before fitting.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::model::{EnglishModel, LanguageModel, ModelSource};
use crate::analysis::preprocessor::{
    CleanedDocument, DocumentText, PreprocessorConfig, TextPreprocessor,
};
use crate::corpus::filter::CorpusFilter;
use crate::corpus::record::{PhraseRecord, Submission};
use crate::error::{LexiphraseError, Result};
use crate::phrase::extractor::{ExtractorConfig, PhraseExtractor};

/// Configuration of a full run, loadable from JSON.
///
/// ```json
/// {
///   "preprocessor": { "allowed_postags": ["NOUN", "ADJ"], "batch_size": 1000 },
///   "phrases": { "bigram": { "min_count": 10, "threshold": 100.0 } },
///   "filter": { "dedup": true },
///   "drop_empty": false
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub preprocessor: PreprocessorConfig,
    pub phrases: ExtractorConfig,
    pub filter: CorpusFilter,
    /// Lexicon extending the built-in English model.
    pub lexicon: Option<PathBuf>,
    /// Drop records whose phrase tokens are empty after processing.
    pub drop_empty: bool,
}

impl PipelineConfig {
    /// Read a configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&content).map_err(|e| {
            LexiphraseError::invalid_config(format!("{}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.preprocessor.validate()?;
        self.phrases.validate()
    }

    /// Where the linguistic model comes from.
    pub fn model_source(&self) -> ModelSource {
        match &self.lexicon {
            Some(path) => ModelSource::Lexicon(path.clone()),
            None => ModelSource::Builtin,
        }
    }
}

/// Result of running a pipeline over a corpus.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Cleaned lemma sequences, one per input document.
    pub cleaned: Vec<CleanedDocument>,
    /// The fitted phrase models.
    pub extractor: PhraseExtractor,
    /// Space-joined phrase tokens, one per input document.
    pub phrase_tokens: Vec<String>,
}

/// Preprocessing and phrase extraction wired together.
#[derive(Clone, Debug)]
pub struct Pipeline {
    preprocessor: TextPreprocessor,
    config: PipelineConfig,
}

impl Pipeline {
    /// Build a pipeline around an injected model.
    pub fn new(model: Arc<dyn LanguageModel>, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let preprocessor = TextPreprocessor::new(model, config.preprocessor.clone())?;
        Ok(Pipeline {
            preprocessor,
            config,
        })
    }

    /// Build a pipeline with the bundled English model.
    ///
    /// Fails with [`LexiphraseError::DependencyUnavailable`] when the
    /// configured lexicon cannot be loaded.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let model = EnglishModel::load(&config.model_source())?;
        Self::new(Arc::new(model), config)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn preprocessor(&self) -> &TextPreprocessor {
        &self.preprocessor
    }

    /// Clean a corpus, fit phrase models on it and rewrite it.
    pub fn run<D: DocumentText + Sync>(&self, documents: &[D]) -> Result<PipelineOutput> {
        let cleaned = self.preprocessor.preprocess(documents)?;
        let (extractor, phrase_tokens) =
            PhraseExtractor::fit_transform(&cleaned, &self.config.phrases)?;
        info!(
            "Pipeline produced phrase tokens for {} documents",
            phrase_tokens.len()
        );
        Ok(PipelineOutput {
            cleaned,
            extractor,
            phrase_tokens,
        })
    }

    /// Clean a corpus and rewrite it with already-fitted phrase models.
    pub fn transform<D: DocumentText + Sync>(
        &self,
        documents: &[D],
        extractor: &PhraseExtractor,
    ) -> Result<Vec<String>> {
        let cleaned = self.preprocessor.preprocess(documents)?;
        Ok(extractor.transform_corpus(&cleaned))
    }

    /// Filter submissions, run the pipeline on their body text and attach
    /// the phrase tokens to each surviving submission.
    pub fn process_submissions(
        &self,
        submissions: Vec<Submission>,
    ) -> Result<(Vec<PhraseRecord>, PhraseExtractor)> {
        let submissions = self.config.filter.apply(submissions);
        let texts: Vec<Option<&str>> = submissions.iter().map(|s| s.selftext.as_deref()).collect();
        let output = self.run(&texts)?;

        let mut records: Vec<PhraseRecord> = submissions
            .into_iter()
            .zip(output.phrase_tokens)
            .map(|(submission, tokens)| PhraseRecord::from_submission(submission, tokens))
            .collect();

        if self.config.drop_empty {
            let before = records.len();
            records.retain(|r| !r.phrase_tokens.is_empty());
            info!("Dropped {} records without phrase tokens", before - records.len());
        }
        Ok((records, output.extractor))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::analysis::token::PartOfSpeech;

    #[test]
    fn test_run_keeps_positions() {
        let pipeline = Pipeline::from_config(PipelineConfig::default()).unwrap();
        let docs = ["My chronic pain is bad.", "", "Doctors helped."];
        let output = pipeline.run(&docs).unwrap();

        assert_eq!(output.cleaned.len(), 3);
        assert_eq!(output.phrase_tokens.len(), 3);
        assert_eq!(output.phrase_tokens[1], "");
        assert_eq!(output.phrase_tokens[2], "doctor help");
    }

    #[test]
    fn test_empty_corpus_is_insufficient_data() {
        let pipeline = Pipeline::from_config(PipelineConfig::default()).unwrap();
        let docs: Vec<String> = Vec::new();
        assert!(matches!(
            pipeline.run(&docs),
            Err(LexiphraseError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_process_submissions() {
        let config = PipelineConfig {
            drop_empty: true,
            ..Default::default()
        };
        let pipeline = Pipeline::from_config(config).unwrap();
        let subs = vec![
            Submission::new("a", "Doctors helped."),
            Submission::new("b", "[removed]"),
            Submission::new("c", "the of to"),
        ];

        let (records, _) = pipeline.process_submissions(subs).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[0].phrase_tokens, "doctor help");
    }

    #[test]
    fn test_config_from_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"preprocessor": {{"allowed_postags": ["NOUN"], "batch_size": 50}},
                "phrases": {{"trigram": {{"threshold": 25.0}}}},
                "drop_empty": true}}"#
        )
        .unwrap();

        let config = PipelineConfig::from_path(file.path()).unwrap();
        assert_eq!(config.preprocessor.allowed_postags, vec![PartOfSpeech::Noun]);
        assert_eq!(config.preprocessor.batch_size, 50);
        assert!(config.preprocessor.parallel);
        assert_eq!(config.phrases.trigram.threshold, 25.0);
        assert_eq!(config.phrases.trigram.min_count, 10);
        assert_eq!(config.phrases.bigram.threshold, 100.0);
        assert!(config.drop_empty);
        assert!(config.filter.drop_removed);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"preprocessor": {{"batch_size": 0}}}}"#).unwrap();
        assert!(matches!(
            PipelineConfig::from_path(file.path()),
            Err(LexiphraseError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_lexicon_is_dependency_unavailable() {
        let config = PipelineConfig {
            lexicon: Some(PathBuf::from("/nonexistent/lexicon.json")),
            ..Default::default()
        };
        assert!(matches!(
            Pipeline::from_config(config),
            Err(LexiphraseError::DependencyUnavailable(_))
        ));
    }
}
