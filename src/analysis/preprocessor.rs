//! Corpus preprocessing: raw documents to cleaned lemma sequences.
//!
//! The [`TextPreprocessor`] applies processing in this order:
//! 1. Char filters: delete line breaks
//! 2. Linguistic model: tokenize, tag and lemmatize (in batches)
//! 3. Token filters: clean → lemma → artifact → stop
//!
//! Output is positional: the i-th [`CleanedDocument`] always belongs to the
//! i-th input document, and a document without surviving tokens yields an
//! empty `CleanedDocument`.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use lexiphrase::analysis::model::EnglishModel;
//! use lexiphrase::analysis::preprocessor::{PreprocessorConfig, TextPreprocessor};
//!
//! let model = Arc::new(EnglishModel::new().unwrap());
//! let preprocessor = TextPreprocessor::new(model, PreprocessorConfig::default()).unwrap();
//!
//! let cleaned = preprocessor.preprocess(&["The doctors helped my kids.", ""]).unwrap();
//! assert_eq!(cleaned.len(), 2);
//! assert_eq!(cleaned[0].join(), "doctor help kid");
//! assert!(cleaned[1].is_empty());
//! ```

use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::line_break::LineBreakCharFilter;
use crate::analysis::model::LanguageModel;
use crate::analysis::token::{PartOfSpeech, Token, TokenStream};
use crate::analysis::token_filter::{ArtifactFilter, CleanFilter, Filter, LemmaFilter, StopFilter};
use crate::error::{LexiphraseError, Result};

/// Default number of documents annotated per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Configuration of the preprocessor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    /// Part-of-speech allow-list. Only consulted by the literal-tag guard.
    pub allowed_postags: Vec<PartOfSpeech>,
    /// Documents annotated per batch. Never affects output.
    pub batch_size: usize,
    /// Annotate batches on the rayon thread pool.
    pub parallel: bool,
    /// Words added to the default stop list.
    pub extra_stop_words: Vec<String>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        PreprocessorConfig {
            allowed_postags: vec![PartOfSpeech::Noun, PartOfSpeech::Adj],
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: true,
            extra_stop_words: Vec::new(),
        }
    }
}

impl PreprocessorConfig {
    /// Check the configuration for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(LexiphraseError::invalid_config("batch_size must be at least 1"));
        }
        Ok(())
    }
}

/// A source document that may or may not carry usable text.
///
/// `None` from [`DocumentText::document_text`] means the document is not
/// text (a missing value or a non-string field) and fails preprocessing
/// with [`LexiphraseError::InvalidInput`].
pub trait DocumentText {
    fn document_text(&self) -> Option<&str>;
}

impl DocumentText for str {
    fn document_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl DocumentText for String {
    fn document_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: DocumentText + ?Sized> DocumentText for &T {
    fn document_text(&self) -> Option<&str> {
        (**self).document_text()
    }
}

impl<T: DocumentText> DocumentText for Option<T> {
    fn document_text(&self) -> Option<&str> {
        self.as_ref().and_then(|t| t.document_text())
    }
}

impl DocumentText for serde_json::Value {
    fn document_text(&self) -> Option<&str> {
        self.as_str()
    }
}

/// The ordered, filtered lemma sequence of one document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedDocument {
    pub tokens: Vec<String>,
}

impl CleanedDocument {
    /// Wrap a token list.
    pub fn new(tokens: Vec<String>) -> Self {
        CleanedDocument { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Render the tokens as one space-joined string.
    pub fn join(&self) -> String {
        self.tokens.join(" ")
    }
}

impl From<Vec<String>> for CleanedDocument {
    fn from(tokens: Vec<String>) -> Self {
        CleanedDocument::new(tokens)
    }
}

impl AsRef<[String]> for CleanedDocument {
    fn as_ref(&self) -> &[String] {
        &self.tokens
    }
}

/// Turns raw documents into [`CleanedDocument`]s.
#[derive(Clone)]
pub struct TextPreprocessor {
    model: Arc<dyn LanguageModel>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    config: PreprocessorConfig,
}

impl TextPreprocessor {
    /// Build a preprocessor around an injected linguistic model.
    pub fn new(model: Arc<dyn LanguageModel>, config: PreprocessorConfig) -> Result<Self> {
        config.validate()?;
        let stop = if config.extra_stop_words.is_empty() {
            StopFilter::new()
        } else {
            StopFilter::with_extra_words(config.extra_stop_words.iter().cloned())
        };
        let filters: Vec<Arc<dyn Filter>> = vec![
            Arc::new(CleanFilter::new()),
            Arc::new(LemmaFilter::new()),
            Arc::new(ArtifactFilter::new(&config.allowed_postags)),
            Arc::new(stop),
        ];
        Ok(TextPreprocessor {
            model,
            char_filters: vec![Arc::new(LineBreakCharFilter::new())],
            filters,
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Get the filters in application order.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    fn normalize(&self, text: &str) -> String {
        self.char_filters
            .iter()
            .fold(text.to_string(), |acc, filter| filter.filter(&acc))
    }

    fn apply_filters(&self, tokens: Vec<Token>) -> Result<TokenStream> {
        let mut stream: TokenStream = Box::new(tokens.into_iter());
        for filter in &self.filters {
            stream = filter.filter(stream)?;
        }
        Ok(stream)
    }

    /// Run the full single-document pipeline and return the surviving tokens.
    pub fn analyze(&self, text: &str) -> Result<TokenStream> {
        let tokens = self.model.annotate(&self.normalize(text))?;
        self.apply_filters(tokens)
    }

    /// Preprocess one document.
    pub fn preprocess_one(&self, text: &str) -> Result<CleanedDocument> {
        Ok(CleanedDocument::new(self.analyze(text)?.map(|t| t.text).collect()))
    }

    /// Preprocess one batch; `offset` is the corpus index of `docs[0]`.
    fn process_batch<D: DocumentText>(&self, docs: &[D], offset: usize) -> Result<Vec<CleanedDocument>> {
        let texts = docs
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                doc.document_text().map(|t| self.normalize(t)).ok_or_else(|| {
                    LexiphraseError::invalid_input(format!("document {} is not text", offset + i))
                })
            })
            .collect::<Result<Vec<String>>>()?;

        let annotated = self.model.annotate_batch(&texts)?;
        if annotated.len() != texts.len() {
            return Err(LexiphraseError::analysis(format!(
                "model {} returned {} annotations for {} documents",
                self.model.name(),
                annotated.len(),
                texts.len()
            )));
        }

        annotated
            .into_iter()
            .map(|tokens| {
                Ok(CleanedDocument::new(
                    self.apply_filters(tokens)?.map(|t| t.text).collect(),
                ))
            })
            .collect()
    }

    /// Preprocess a materialized corpus, preserving order.
    pub fn preprocess<D: DocumentText + Sync>(&self, docs: &[D]) -> Result<Vec<CleanedDocument>> {
        let batch_size = self.config.batch_size;
        info!(
            "Preprocessing {} documents in batches of {} with model {}",
            docs.len(),
            batch_size,
            self.model.name()
        );

        let batches: Vec<Vec<CleanedDocument>> = if self.config.parallel {
            docs.par_chunks(batch_size)
                .enumerate()
                .map(|(i, chunk)| self.process_batch(chunk, i * batch_size))
                .collect::<Result<_>>()?
        } else {
            docs.chunks(batch_size)
                .enumerate()
                .map(|(i, chunk)| self.process_batch(chunk, i * batch_size))
                .collect::<Result<_>>()?
        };

        let cleaned: Vec<CleanedDocument> = batches.into_iter().flatten().collect();
        let empty = cleaned.iter().filter(|d| d.is_empty()).count();
        debug!("Preprocessed {} documents ({} empty)", cleaned.len(), empty);
        Ok(cleaned)
    }

    /// Preprocess lazily, one batch at a time.
    ///
    /// The returned iterator is finite and single-pass; it pulls at most one
    /// batch from `docs` ahead of what has been yielded.
    pub fn preprocess_iter<I>(&self, docs: I) -> CleanedDocuments<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: DocumentText,
    {
        CleanedDocuments {
            preprocessor: self,
            source: docs.into_iter(),
            pending: Vec::new().into_iter(),
            consumed: 0,
            failed: false,
        }
    }
}

impl std::fmt::Debug for TextPreprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPreprocessor")
            .field("model", &self.model.name())
            .field(
                "char_filters",
                &self.char_filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .field("filters", &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

/// Lazy stream of cleaned documents produced by [`TextPreprocessor::preprocess_iter`].
pub struct CleanedDocuments<'a, I: Iterator> {
    preprocessor: &'a TextPreprocessor,
    source: I,
    pending: std::vec::IntoIter<CleanedDocument>,
    consumed: usize,
    failed: bool,
}

impl<I> Iterator for CleanedDocuments<'_, I>
where
    I: Iterator,
    I::Item: DocumentText,
{
    type Item = Result<CleanedDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(doc) = self.pending.next() {
            return Some(Ok(doc));
        }
        if self.failed {
            return None;
        }

        let batch: Vec<I::Item> = self
            .source
            .by_ref()
            .take(self.preprocessor.config.batch_size)
            .collect();
        if batch.is_empty() {
            return None;
        }

        let offset = self.consumed;
        self.consumed += batch.len();
        match self.preprocessor.process_batch(&batch, offset) {
            Ok(cleaned) => {
                self.pending = cleaned.into_iter();
                self.pending.next().map(Ok)
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::EnglishModel;

    fn preprocessor(config: PreprocessorConfig) -> TextPreprocessor {
        TextPreprocessor::new(Arc::new(EnglishModel::new().unwrap()), config).unwrap()
    }

    fn default_preprocessor() -> TextPreprocessor {
        preprocessor(PreprocessorConfig::default())
    }

    #[test]
    fn test_new_york_sentence() {
        let cleaned = default_preprocessor()
            .preprocess(&["I live in New York City. I love New York."])
            .unwrap();
        assert_eq!(
            cleaned[0].tokens,
            vec!["live", "new", "york", "city", "love", "new", "york"]
        );
    }

    #[test]
    fn test_empty_and_stop_only_documents() {
        let cleaned = default_preprocessor()
            .preprocess(&["", "the of to", "He she it"])
            .unwrap();
        assert_eq!(cleaned.len(), 3);
        assert!(cleaned.iter().all(CleanedDocument::is_empty));
    }

    #[test]
    fn test_line_breaks_are_deleted() {
        let cleaned = default_preprocessor().preprocess(&["wheel\nchair"]).unwrap();
        assert_eq!(cleaned[0].tokens, vec!["wheelchair"]);
    }

    #[test]
    fn test_possessives_punctuation_and_digits_removed() {
        let cleaned = default_preprocessor()
            .preprocess(&["My mom's 3 dogs! Mom’s cat."])
            .unwrap();
        assert_eq!(cleaned[0].tokens, vec!["mom", "dog", "mom", "cat"]);
    }

    #[test]
    fn test_clitics_after_quotes_brackets_and_digits_removed() {
        let preprocessor = default_preprocessor();
        let cases = [
            ("My (ex)'s lawyer called.", vec!["ex", "lawyer"]),
            ("The \"doctor\"’s note helped.", vec!["doctor", "note", "help"]),
            ("I’m tired, 2020's worst year.", vec!["tired", "bad", "year"]),
        ];
        for (text, expected) in cases {
            let cleaned = preprocessor.preprocess_one(text).unwrap();
            assert_eq!(cleaned.tokens, expected, "{text}");
        }
    }

    #[test]
    fn test_non_text_document_is_invalid_input() {
        let docs = vec![Some("fine text".to_string()), None];
        let err = default_preprocessor().preprocess(&docs).unwrap_err();
        match err {
            LexiphraseError::InvalidInput(msg) => assert!(msg.contains("document 1")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }

        let values = vec![serde_json::json!("text"), serde_json::json!(42)];
        assert!(matches!(
            default_preprocessor().preprocess(&values),
            Err(LexiphraseError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_batch_size_and_parallelism_do_not_change_output() {
        let docs: Vec<String> = (0..25)
            .map(|i| format!("Post number {i} about chronic pain and wheelchairs in Ohio"))
            .collect();

        let reference = preprocessor(PreprocessorConfig {
            batch_size: 1000,
            parallel: false,
            ..Default::default()
        })
        .preprocess(&docs)
        .unwrap();

        for (batch_size, parallel) in [(1, true), (3, true), (7, false), (25, true)] {
            let out = preprocessor(PreprocessorConfig {
                batch_size,
                parallel,
                ..Default::default()
            })
            .preprocess(&docs)
            .unwrap();
            assert_eq!(out, reference, "batch_size={batch_size} parallel={parallel}");
        }
    }

    #[test]
    fn test_lazy_iterator_matches_materialized() {
        let docs = vec!["Doctors ignored me.", "", "Chronic fatigue is exhausting."];
        let pre = preprocessor(PreprocessorConfig {
            batch_size: 2,
            ..Default::default()
        });

        let lazy: Vec<CleanedDocument> = pre
            .preprocess_iter(docs.iter().copied())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(lazy, pre.preprocess(&docs).unwrap());
    }

    #[test]
    fn test_lazy_iterator_stops_after_error() {
        let docs = vec![Some("text"), None, Some("more text")];
        let pre = preprocessor(PreprocessorConfig {
            batch_size: 1,
            ..Default::default()
        });

        let results: Vec<_> = pre.preprocess_iter(docs).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_cleaning_is_stable_on_own_output() {
        let pre = default_preprocessor();
        let first = pre
            .preprocess(&["My chronic pain keeps me awake. Doctors never listen to my symptoms."])
            .unwrap();
        let again = pre.preprocess(&[first[0].join()]).unwrap();
        assert_eq!(again[0], first[0]);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = TextPreprocessor::new(
            Arc::new(EnglishModel::new().unwrap()),
            PreprocessorConfig {
                batch_size: 0,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, LexiphraseError::InvalidConfig(_)));
    }
}
