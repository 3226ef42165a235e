//! Linguistic model capability.
//!
//! A [`LanguageModel`] turns normalized text into annotated tokens
//! (tokenization, part-of-speech tags, lemmas and lexical flags). The model
//! is constructed once by the caller and injected into the preprocessor; it
//! is read-only for the lifetime of a run.
//!
//! [`EnglishModel`] is the bundled deterministic English model. It can be
//! extended with a JSON [`Lexicon`] of lemma exceptions and tag overrides.
//!
//! # Examples
//!
//! ```
//! use lexiphrase::analysis::model::{EnglishModel, LanguageModel, ModelSource};
//!
//! let model = EnglishModel::load(&ModelSource::Builtin).unwrap();
//! let tokens = model.annotate("Doctors helped.").unwrap();
//! assert_eq!(tokens[0].lemma, "doctor");
//! assert_eq!(tokens[1].lemma, "help");
//! assert!(tokens[2].is_punct);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::lemmatizer::{Lemmatizer, RuleLemmatizer};
use crate::analysis::tagger::{PosTagger, RuleBasedTagger};
use crate::analysis::token::{PartOfSpeech, Token};
use crate::analysis::token_filter::stop::DEFAULT_ENGLISH_STOP_WORDS_SET;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::english::EnglishTokenizer;
use crate::error::{LexiphraseError, Result};

/// Trait for linguistic models that annotate raw text.
///
/// Implementations must be deterministic for a given input and must not
/// carry state between calls, so batches can be annotated in parallel.
pub trait LanguageModel: Send + Sync {
    /// Annotate a single document.
    fn annotate(&self, text: &str) -> Result<Vec<Token>>;

    /// Annotate a batch of documents, preserving order.
    fn annotate_batch(&self, texts: &[String]) -> Result<Vec<Vec<Token>>> {
        texts.iter().map(|text| self.annotate(text)).collect()
    }

    /// Get the name of this model.
    fn name(&self) -> &'static str;
}

/// Extra lexical knowledge layered over the built-in English rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Lowercased surface form → lemma.
    pub lemmas: HashMap<String, String>,
    /// Lowercased surface form → forced tag.
    pub tags: HashMap<String, PartOfSpeech>,
}

impl Lexicon {
    /// Read a lexicon from a JSON file.
    ///
    /// Any failure to read or parse the file is reported as
    /// [`LexiphraseError::DependencyUnavailable`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LexiphraseError::dependency_unavailable(format!(
                "cannot read lexicon {}: {e}",
                path.display()
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            LexiphraseError::dependency_unavailable(format!(
                "cannot parse lexicon {}: {e}",
                path.display()
            ))
        })
    }
}

/// Where the English model takes its lexical data from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ModelSource {
    /// Built-in rules only.
    #[default]
    Builtin,
    /// Built-in rules extended by a lexicon file.
    Lexicon(PathBuf),
}

/// The bundled English model.
#[derive(Clone, Debug)]
pub struct EnglishModel {
    tokenizer: EnglishTokenizer,
    tagger: RuleBasedTagger,
    lemmatizer: RuleLemmatizer,
}

impl EnglishModel {
    /// Create the model with built-in rules only.
    pub fn new() -> Result<Self> {
        Self::with_lexicon(Lexicon::default())
    }

    /// Create the model extended by a lexicon.
    pub fn with_lexicon(lexicon: Lexicon) -> Result<Self> {
        let tokenizer = EnglishTokenizer::new().map_err(|e| {
            LexiphraseError::dependency_unavailable(format!("tokenizer failed to build: {e}"))
        })?;
        Ok(EnglishModel {
            tokenizer,
            tagger: RuleBasedTagger::new().with_overrides(lexicon.tags),
            lemmatizer: RuleLemmatizer::new().with_exceptions(lexicon.lemmas),
        })
    }

    /// Load the model from the given source.
    pub fn load(source: &ModelSource) -> Result<Self> {
        match source {
            ModelSource::Builtin => Self::new(),
            ModelSource::Lexicon(path) => {
                let lexicon = Lexicon::from_path(path)?;
                debug!(
                    "Loaded lexicon {} ({} lemmas, {} tags)",
                    path.display(),
                    lexicon.lemmas.len(),
                    lexicon.tags.len()
                );
                Self::with_lexicon(lexicon)
            }
        }
    }
}

impl LanguageModel for EnglishModel {
    fn annotate(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens: Vec<Token> = self.tokenizer.tokenize(text)?.collect();
        self.tagger.tag(&mut tokens);
        for token in &mut tokens {
            token.lemma = self.lemmatizer.lemmatize(&token.text, token.pos);
            token.is_stop = DEFAULT_ENGLISH_STOP_WORDS_SET.contains(&token.lower());
        }
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "english"
    }
}
