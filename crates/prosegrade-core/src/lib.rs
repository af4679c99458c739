//! Core library for prosegrade: a readability metrics engine.
//!
//! The pipeline runs in stages over an immutable tokenized document:
//!
//! 1. [`tokenize`] turns text into a [`document::Document`]
//!    (words with attributes, sentences with validity, paragraphs);
//! 2. [`stats`] aggregates the numeric totals formulas consume;
//! 3. [`hard_words`] classifies words against familiar-word standards;
//! 4. [`registry`] dispatches ~40 readability tests plus configured
//!    custom formulas, isolating failures per test;
//! 5. [`goals`] checks configured score thresholds.
//!
//! [`Engine`] wires the stages together for callers that just want
//! scores for a piece of text.

pub mod config;
pub mod dictionaries;
pub mod document;
pub mod error;
pub mod formula;
pub mod formulas;
pub mod goals;
pub mod hard_words;
pub mod markdown;
pub mod registry;
pub mod resources;
pub mod result;
pub mod stats;
pub mod tokenize;

use std::sync::Arc;

/// Default cap on input size (5 MiB). Larger documents are rejected
/// unless the limit is raised or disabled in configuration.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use config::{Config, ConfigLoader};
pub use document::Document;
pub use error::{ConfigError, ConfigResult, TestError, TestOutcome};
pub use registry::{BatchResults, Language, Registry};
pub use result::TestResult;

use formulas::Context;
use goals::GoalReview;
use hard_words::HardWordAnalysis;
use stats::StatsSnapshot;

/// Everything computed for one document in one pass.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The tokenized document.
    pub document: Document,
    /// Statistics snapshot.
    pub stats: StatsSnapshot,
    /// Hard-word analysis.
    pub hard_words: HardWordAnalysis,
    /// Evaluation context for the formula roster.
    pub context: Context,
}

/// A configured engine: resources, registry, and policies, ready to
/// analyze documents.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    resources: Arc<resources::ResourceBundle>,
    registry: Registry,
}

impl Engine {
    /// Build an engine from configuration, compiling custom tests.
    pub fn from_config(config: Config) -> ConfigResult<Self> {
        let resources = resources::ResourceBundle::builtin();
        let mut registry = Registry::builtin();
        config.register_custom_tests(&mut registry)?;
        Ok(Self {
            config,
            resources,
            registry,
        })
    }

    /// The engine's configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The test registry.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The shared familiar-word resources.
    pub fn resources(&self) -> Arc<resources::ResourceBundle> {
        Arc::clone(&self.resources)
    }

    /// Tokenize and aggregate one document.
    ///
    /// Hard-word option construction can fail for invalid custom-test
    /// configuration; everything past that is infallible.
    #[tracing::instrument(skip_all, fields(input_len = text.len()))]
    pub fn analyze(&self, text: &str) -> ConfigResult<Analysis> {
        let document = tokenize::tokenize(text);
        let stats = stats::aggregate(&document, &self.config.stats_options());
        let hard_word_options = self.config.hard_word_options(&self.resources)?;
        let hard_words = hard_words::analyze(&document, &self.resources, &hard_word_options, None);
        let context = Context {
            stats: stats.clone(),
            hard_words: hard_words.clone(),
            use_valid: self.config.exclude_incomplete_sentences,
            numeral_policy: self.config.numeral_policy,
        };
        Ok(Analysis {
            document,
            stats,
            hard_words,
            context,
        })
    }

    /// Compute one test against an analysis.
    pub fn score(&self, analysis: &Analysis, test: &str) -> TestOutcome<TestResult> {
        self.registry
            .compute(test, &analysis.context, self.config.language)
    }

    /// Compute every applicable test against an analysis.
    pub fn score_all(&self, analysis: &Analysis) -> BatchResults {
        self.registry
            .compute_all(&analysis.context, self.config.language)
    }

    /// Evaluate the configured goals against an analysis.
    ///
    /// Goal subjects resolve to test grades or index values, falling
    /// back to named statistics (`words`, `syllables`, ...). Subjects
    /// that error or produce no score resolve to `None` and fail any
    /// active thresholds.
    pub fn review_goals(&self, analysis: &Analysis) -> GoalReview {
        goals::review(&self.config.goals, |subject| {
            self.score(analysis, subject)
                .ok()
                .and_then(|result| result.grade.or(result.index).or(result.cloze))
                .or_else(|| formula::statistic_value(subject, &analysis.context))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "The committee considered the proposal carefully. \
        Revenue projections improved throughout the quarter. \
        Analysts expected substantial organizational restructuring. \
        The dog sat quietly near the door.";

    #[test]
    fn engine_scores_plain_text() {
        let engine = Engine::from_config(Config::default()).unwrap();
        let analysis = engine.analyze(SAMPLE).unwrap();
        let result = engine.score(&analysis, "flesch-kincaid").unwrap();
        assert!(result.grade.is_some());
    }

    #[test]
    fn batch_results_are_deterministic() {
        let engine = Engine::from_config(Config::default()).unwrap();
        let first = engine.analyze(SAMPLE).unwrap();
        let second = engine.analyze(SAMPLE).unwrap();
        let batch_a = engine.score_all(&first);
        let batch_b = engine.score_all(&second);
        assert_eq!(batch_a.outcomes.len(), batch_b.outcomes.len());
        for ((id_a, out_a), (id_b, out_b)) in
            batch_a.outcomes.iter().zip(batch_b.outcomes.iter())
        {
            assert_eq!(id_a, id_b);
            assert_eq!(out_a.as_ref().ok().and_then(|r| r.grade), out_b.as_ref().ok().and_then(|r| r.grade));
        }
    }

    #[test]
    fn empty_document_deactivates_tests_without_panicking() {
        let engine = Engine::from_config(Config::default()).unwrap();
        let analysis = engine.analyze("").unwrap();
        let batch = engine.score_all(&analysis);
        assert!(!batch.deactivated.is_empty());
    }

    #[test]
    fn goals_flow_through_the_engine() {
        let config = Config {
            goals: vec![goals::Goal {
                subject: "flesch-kincaid".to_string(),
                min: None,
                max: Some(19.0),
            }],
            ..Config::default()
        };
        let engine = Engine::from_config(config).unwrap();
        let analysis = engine.analyze(SAMPLE).unwrap();
        let review = engine.review_goals(&analysis);
        assert!(review.all_passed());
    }

    #[test]
    fn goals_accept_statistic_subjects() {
        let config = Config {
            goals: vec![goals::Goal {
                subject: "words".to_string(),
                min: Some(1.0),
                max: None,
            }],
            ..Config::default()
        };
        let engine = Engine::from_config(config).unwrap();
        let analysis = engine.analyze(SAMPLE).unwrap();
        let review = engine.review_goals(&analysis);
        assert!(review.all_passed());
        assert_eq!(
            review.outcomes[0].value,
            Some(analysis.stats.all.words as f64)
        );
    }

    #[test]
    fn numeral_policy_flows_into_scores() {
        use crate::dictionaries::syllable_dict::NumeralSyllabication;

        let text = "The committee met in 1812 to review the annual budget.";
        let default_engine = Engine::from_config(Config::default()).unwrap();
        let full_engine = Engine::from_config(Config {
            numeral_policy: NumeralSyllabication::FullySyllabized,
            ..Config::default()
        })
        .unwrap();

        let a = default_engine.analyze(text).unwrap();
        let b = full_engine.analyze(text).unwrap();
        let grade_a = default_engine.score(&a, "flesch-kincaid").unwrap().grade.unwrap();
        let grade_b = full_engine.score(&b, "flesch-kincaid").unwrap().grade.unwrap();
        // "1812" sounds out to four syllables instead of one
        assert!(grade_b > grade_a);
    }

    #[test]
    fn custom_test_end_to_end() {
        let config = Config {
            custom_tests: vec![config::CustomTestConfig {
                name: "asl".to_string(),
                formula: "WordCount / SentenceCount".to_string(),
                ..config::CustomTestConfig::default()
            }],
            ..Config::default()
        };
        let engine = Engine::from_config(config).unwrap();
        let analysis = engine.analyze(SAMPLE).unwrap();
        let result = engine.score(&analysis, "asl").unwrap();
        assert!(result.grade.is_some());
    }
}
