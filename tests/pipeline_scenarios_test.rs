//! End-to-end scenarios for preprocessing and phrase extraction.

use std::sync::Arc;

use lexiphrase::analysis::model::EnglishModel;
use lexiphrase::analysis::preprocessor::{PreprocessorConfig, TextPreprocessor};
use lexiphrase::analysis::token::PartOfSpeech;
use lexiphrase::phrase::extractor::{ExtractorConfig, PhraseExtractor};
use lexiphrase::phrase::model::{FrozenPhrases, PhraseConfig, Phrasegram};
use lexiphrase::prelude::*;

fn english_preprocessor(allowed: Vec<PartOfSpeech>) -> TextPreprocessor {
    let model = Arc::new(EnglishModel::new().unwrap());
    TextPreprocessor::new(
        model,
        PreprocessorConfig {
            allowed_postags: allowed,
            ..Default::default()
        },
    )
    .unwrap()
}

fn new_york_extractor() -> PhraseExtractor {
    let bigram = FrozenPhrases::from_phrasegrams(
        PhraseConfig::bigram(),
        vec![Phrasegram {
            left: "new".to_string(),
            right: "york".to_string(),
            score: 1000.0,
        }],
    );
    PhraseExtractor::from_models(bigram, FrozenPhrases::empty(PhraseConfig::trigram()))
}

#[test]
fn test_new_york_is_merged_twice() -> Result<()> {
    let preprocessor = english_preprocessor(vec![PartOfSpeech::Noun]);
    let cleaned = preprocessor.preprocess(&["I live in New York City. I love New York."])?;
    let phrase_tokens = new_york_extractor().transform_corpus(&cleaned);

    assert_eq!(phrase_tokens.len(), 1);
    let tokens: Vec<&str> = phrase_tokens[0].split(' ').collect();
    assert_eq!(tokens.iter().filter(|t| **t == "new_york").count(), 2);
    assert!(
        tokens
            .iter()
            .all(|t| !t.is_empty() && t.chars().all(|c| c.is_alphanumeric() || c == '_'))
    );
    assert_eq!(phrase_tokens[0], "live new_york city love new_york");
    Ok(())
}

#[test]
fn test_empty_document() -> Result<()> {
    let pipeline = Pipeline::from_config(PipelineConfig::default())?;
    let output = pipeline.run(&[""])?;
    assert_eq!(output.phrase_tokens, vec![String::new()]);
    Ok(())
}

#[test]
fn test_stop_words_only() -> Result<()> {
    let pipeline = Pipeline::from_config(PipelineConfig::default())?;
    let output = pipeline.run(&["the of to"])?;
    assert_eq!(output.phrase_tokens, vec![String::new()]);
    Ok(())
}

#[test]
fn test_positions_survive_an_empty_middle_document() -> Result<()> {
    let pipeline = Pipeline::from_config(PipelineConfig::default())?;
    let docs = ["My wheelchair broke again.", "", "Doctors helped my kids."];
    let output = pipeline.run(&docs)?;

    assert_eq!(output.phrase_tokens.len(), 3);
    assert_eq!(output.phrase_tokens[1], "");
    assert!(!output.phrase_tokens[0].is_empty());
    assert_eq!(output.phrase_tokens[2], "doctor help kid");
    Ok(())
}

#[test]
fn test_pronouns_fall_back_to_surface_and_are_stopped() -> Result<()> {
    let pipeline = Pipeline::from_config(PipelineConfig::default())?;
    let output = pipeline.run(&["He she it"])?;
    assert_eq!(output.phrase_tokens, vec![String::new()]);
    Ok(())
}

#[test]
fn test_tag_name_guard_compares_against_upper_case_labels() -> Result<()> {
    // Lemmas are lowercased before the guard, so a post mentioning the
    // word "noun" keeps it.
    let preprocessor = english_preprocessor(vec![PartOfSpeech::Noun, PartOfSpeech::Adj]);
    let cleaned = preprocessor.preprocess(&["NOUN adj"])?;
    assert_eq!(cleaned[0].tokens, vec!["noun", "adj"]);
    Ok(())
}

#[test]
fn test_output_has_no_whitespace_artifacts() -> Result<()> {
    let pipeline = Pipeline::from_config(PipelineConfig::default())?;
    let docs = [
        "Line one\nline two\n\nline three.",
        "   leading and trailing   ",
        "Tabs\tand\tmore tabs!",
    ];
    for tokens in pipeline.run(&docs)?.phrase_tokens {
        assert!(!tokens.starts_with(' '));
        assert!(!tokens.ends_with(' '));
        assert!(!tokens.contains("  "));
        assert!(!tokens.contains('\n'));
        assert!(!tokens.contains('\t'));
    }
    Ok(())
}

#[test]
fn test_learned_phrases_from_repeated_posts() -> Result<()> {
    let preprocessor = english_preprocessor(vec![PartOfSpeech::Noun, PartOfSpeech::Adj]);
    let mut docs: Vec<String> = vec!["Social security disability was denied.".to_string(); 30];
    for i in 0..200 {
        docs.push(format!("Post {i} about groceries, weather and gardening."));
    }
    let cleaned = preprocessor.preprocess(&docs)?;

    let config = ExtractorConfig {
        bigram: PhraseConfig::bigram().with_threshold(5.0),
        trigram: PhraseConfig::trigram().with_threshold(5.0),
    };
    let (extractor, phrase_tokens) = PhraseExtractor::fit_transform(&cleaned, &config)?;

    assert!(extractor.bigram().score("social", "security").is_some());
    assert!(phrase_tokens[0].contains("social_security"));
    assert_eq!(phrase_tokens.len(), docs.len());
    Ok(())
}

#[test]
fn test_batch_size_does_not_change_pipeline_output() -> Result<()> {
    let docs: Vec<String> = (0..40)
        .map(|i| format!("Post {i}: my chronic pain and my wheelchair in New York."))
        .collect();

    let run = |batch_size: usize| -> Result<Vec<String>> {
        let config = PipelineConfig {
            preprocessor: PreprocessorConfig {
                batch_size,
                ..Default::default()
            },
            ..Default::default()
        };
        Ok(Pipeline::from_config(config)?.run(&docs)?.phrase_tokens)
    };

    let reference = run(1000)?;
    assert_eq!(run(1)?, reference);
    assert_eq!(run(7)?, reference);
    Ok(())
}
