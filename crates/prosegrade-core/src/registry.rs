//! Test registry and dispatch.
//!
//! Tests are registered under stable string ids in a sorted map; lookup
//! falls back to a linear scan that also matches display names
//! case-insensitively. Computing a test runs four steps in order:
//! descriptor lookup, language applicability, data preconditions, and
//! the handler itself. Soft failures (wrong language, not enough data)
//! deactivate the test; one test's failure never aborts the batch.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dictionaries::syllable_dict::NumeralSyllabication;
use crate::error::{TestError, TestOutcome};
use crate::formula::{CompiledFormula, unpack_grade_range};
use crate::formulas::{self, Context, GRADE_CEILING, finish_grade, flesch_band};
use crate::result::TestResult;

/// Document languages the formula roster covers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    /// English.
    #[default]
    English,
    /// German.
    German,
    /// Spanish.
    Spanish,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::English => "english",
            Self::German => "german",
            Self::Spanish => "spanish",
        })
    }
}

/// What kind of score a test produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TestKind {
    /// A reading grade level.
    Grade,
    /// A difficulty index.
    Index,
    /// A predicted cloze percentage.
    Cloze,
    /// A chart lookup that may yield no score.
    Graph,
}

/// Minimum data a test needs before its handler runs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
pub struct Preconditions {
    /// Minimum word count.
    pub min_words: u64,
    /// Minimum sentence count.
    pub min_sentences: u64,
    /// Minimum sentence-unit count.
    pub min_units: u64,
}

impl Preconditions {
    /// Standard requirements: at least one word and one sentence.
    pub const STANDARD: Self = Self {
        min_words: 1,
        min_sentences: 1,
        min_units: 0,
    };

    /// Unit-based requirements (Fog, Wheeler-Smith).
    pub const UNITS: Self = Self {
        min_words: 1,
        min_sentences: 0,
        min_units: 1,
    };

    /// Word-only requirements (FORCAST).
    pub const WORDS_ONLY: Self = Self {
        min_words: 1,
        min_sentences: 0,
        min_units: 0,
    };

    fn check(&self, test: &str, totals: &crate::stats::Totals) -> TestOutcome<()> {
        let checks: [(&'static str, u64, u64); 3] = [
            ("words", self.min_words, totals.words),
            ("sentences", self.min_sentences, totals.sentences),
            ("sentence units", self.min_units, totals.units),
        ];
        for (quantity, required, actual) in checks {
            if actual < required {
                return Err(TestError::InsufficientData {
                    test: test.to_string(),
                    quantity,
                    required,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Static description of a registered test.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct TestDescriptor {
    /// Stable string id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Output family.
    pub kind: TestKind,
    /// Languages the test applies to.
    pub languages: Vec<Language>,
    /// Data requirements.
    pub preconditions: Preconditions,
    /// Whether the test came from configuration rather than the
    /// built-in roster.
    pub custom: bool,
}

/// How a custom formula's value becomes a result.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum CustomOutput {
    /// The value is a grade level.
    #[default]
    Grade,
    /// The value is a packed grade range (two `u32` halves in a `u64`).
    GradeRange,
    /// The value is a 0-100 difficulty index.
    Index,
}

/// A compiled custom test.
#[derive(Debug, Clone)]
struct CustomTest {
    formula: CompiledFormula,
    output: CustomOutput,
    numeral_policy: NumeralSyllabication,
}

#[derive(Debug, Clone)]
enum Handler {
    Builtin(fn(&Context) -> TestOutcome<TestResult>),
    Custom(CustomTest),
}

#[derive(Debug, Clone)]
struct RegisteredTest {
    descriptor: TestDescriptor,
    handler: Handler,
}

/// Outcome of computing every registered test against one document.
#[derive(Debug)]
pub struct BatchResults {
    /// Per-test outcomes, in registry (id) order.
    pub outcomes: Vec<(String, TestOutcome<TestResult>)>,
    /// Tests deactivated by soft failures during this batch.
    pub deactivated: BTreeSet<String>,
}

/// The test registry.
#[derive(Debug, Clone)]
pub struct Registry {
    tests: BTreeMap<String, RegisteredTest>,
}

const EN: &[Language] = &[Language::English];
const DE: &[Language] = &[Language::German];
const ES: &[Language] = &[Language::Spanish];
const ALL: &[Language] = &[Language::English, Language::German, Language::Spanish];

type BuiltinRow = (
    &'static str,
    &'static str,
    TestKind,
    &'static [Language],
    Preconditions,
    fn(&Context) -> TestOutcome<TestResult>,
);

#[rustfmt::skip]
const BUILTINS: &[BuiltinRow] = &[
    ("ari", "Automated Readability Index", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::ari),
    ("new-ari", "New ARI", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::new_ari),
    ("flesch-kincaid", "Flesch-Kincaid", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::flesch_kincaid),
    ("psk-flesch", "PSK Flesch", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::psk_flesch),
    ("gunning-fog", "Gunning Fog", TestKind::Grade, EN, Preconditions::UNITS, formulas::grade::gunning_fog),
    ("psk-fog", "PSK Gunning Fog", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::psk_fog),
    ("new-fog-count", "New Fog Count", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::new_fog_count),
    ("smog", "SMOG", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::smog),
    ("smog-simplified", "SMOG (simplified)", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::smog_simplified),
    ("smog-bamberger-vanecek", "SMOG (Bamberger-Vanecek)", TestKind::Grade, DE, Preconditions::STANDARD, formulas::grade::smog_bamberger_vanecek),
    ("forcast", "FORCAST", TestKind::Grade, EN, Preconditions::WORDS_ONLY, formulas::grade::forcast),
    ("coleman-liau", "Coleman-Liau", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::coleman_liau),
    ("new-dale-chall", "New Dale-Chall", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::new_dale_chall),
    ("psk-dale-chall", "PSK Dale-Chall", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::psk_dale_chall),
    ("spache", "Spache", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::spache),
    ("harris-jacobson", "Harris-Jacobson Wide Range", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::harris_jacobson),
    ("bormuth-grade-placement", "Bormuth Grade Placement", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::bormuth_grade_placement),
    ("crawford", "Crawford", TestKind::Grade, ES, Preconditions::STANDARD, formulas::grade::crawford),
    ("elf", "Easy Listening Formula", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::elf),
    ("danielson-bryan-1", "Danielson-Bryan 1", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::danielson_bryan_1),
    ("lix-grade", "Lix Grade", TestKind::Grade, ALL, Preconditions::STANDARD, formulas::grade::lix_grade),
    ("rix", "Rix", TestKind::Grade, ALL, Preconditions::STANDARD, formulas::grade::rix),
    ("wheeler-smith", "Wheeler-Smith", TestKind::Grade, EN, Preconditions::UNITS, formulas::grade::wheeler_smith),
    ("wheeler-smith-bamberger-vanecek", "Wheeler-Smith (Bamberger-Vanecek)", TestKind::Grade, DE, Preconditions::UNITS, formulas::grade::wheeler_smith_bamberger_vanecek),
    ("nws1", "Neue Wiener Sachtextformel 1", TestKind::Grade, DE, Preconditions::STANDARD, formulas::grade::nws1),
    ("nws2", "Neue Wiener Sachtextformel 2", TestKind::Grade, DE, Preconditions::STANDARD, formulas::grade::nws2),
    ("nws3", "Neue Wiener Sachtextformel 3", TestKind::Grade, DE, Preconditions::STANDARD, formulas::grade::nws3),
    ("qu-bamberger-vanecek", "Qu (Bamberger-Vanecek)", TestKind::Grade, DE, Preconditions::STANDARD, formulas::grade::qu_bamberger_vanecek),
    ("psk-farr-jenkins-paterson", "PSK Farr-Jenkins-Paterson", TestKind::Grade, EN, Preconditions::STANDARD, formulas::grade::psk_farr_jenkins_paterson),
    ("flesch-reading-ease", "Flesch Reading Ease", TestKind::Index, EN, Preconditions::STANDARD, formulas::index::flesch_reading_ease),
    ("amstad", "Amstad", TestKind::Index, DE, Preconditions::STANDARD, formulas::index::amstad),
    ("farr-jenkins-paterson", "Farr-Jenkins-Paterson", TestKind::Index, EN, Preconditions::STANDARD, formulas::index::farr_jenkins_paterson),
    ("danielson-bryan-2", "Danielson-Bryan 2", TestKind::Index, EN, Preconditions::STANDARD, formulas::index::danielson_bryan_2),
    ("lix", "Lix", TestKind::Index, ALL, Preconditions::STANDARD, formulas::index::lix_index),
    ("eflaw", "McAlpine EFLAW", TestKind::Index, EN, Preconditions::STANDARD, formulas::index::eflaw),
    ("degrees-of-reading-power", "Degrees of Reading Power", TestKind::Index, EN, Preconditions::STANDARD, formulas::index::degrees_of_reading_power),
    ("bormuth-cloze-mean", "Bormuth Cloze Mean", TestKind::Cloze, EN, Preconditions::STANDARD, formulas::cloze::bormuth_cloze_mean),
    ("fry", "Fry Graph", TestKind::Graph, EN, Preconditions::STANDARD, formulas::graph::fry),
    ("raygor", "Raygor Estimate", TestKind::Graph, EN, Preconditions::STANDARD, formulas::graph::raygor),
    ("schwartz", "Schwartz", TestKind::Graph, DE, Preconditions::STANDARD, formulas::graph::schwartz),
    ("frase", "FRASE Graph", TestKind::Graph, ES, Preconditions::STANDARD, formulas::graph::frase),
    ("gpm-fry", "Gilliam-Peña-Mountain Fry", TestKind::Graph, ES, Preconditions::STANDARD, formulas::graph::gpm_fry),
];

impl Registry {
    /// A registry holding the full built-in roster.
    pub fn builtin() -> Self {
        let mut tests = BTreeMap::new();
        for (id, name, kind, languages, preconditions, handler) in BUILTINS {
            tests.insert(
                (*id).to_string(),
                RegisteredTest {
                    descriptor: TestDescriptor {
                        id: (*id).to_string(),
                        name: (*name).to_string(),
                        kind: *kind,
                        languages: languages.to_vec(),
                        preconditions: *preconditions,
                        custom: false,
                    },
                    handler: Handler::Builtin(*handler),
                },
            );
        }
        Self { tests }
    }

    /// Register a custom test. The formula must already have parsed.
    /// The test's numeral policy overrides the engine-level one when
    /// its formula reads syllable counts.
    pub fn register_custom(
        &mut self,
        id: &str,
        name: &str,
        formula: CompiledFormula,
        output: CustomOutput,
        languages: Vec<Language>,
        numeral_policy: NumeralSyllabication,
    ) {
        let kind = match output {
            CustomOutput::Grade | CustomOutput::GradeRange => TestKind::Grade,
            CustomOutput::Index => TestKind::Index,
        };
        self.tests.insert(
            id.to_string(),
            RegisteredTest {
                descriptor: TestDescriptor {
                    id: id.to_string(),
                    name: name.to_string(),
                    kind,
                    languages,
                    preconditions: Preconditions::STANDARD,
                    custom: true,
                },
                handler: Handler::Custom(CustomTest {
                    formula,
                    output,
                    numeral_policy,
                }),
            },
        );
    }

    /// All descriptors in id order.
    pub fn descriptors(&self) -> impl Iterator<Item = &TestDescriptor> {
        self.tests.values().map(|t| &t.descriptor)
    }

    /// Descriptors applicable to a language.
    pub fn descriptors_for(&self, language: Language) -> impl Iterator<Item = &TestDescriptor> {
        self.descriptors()
            .filter(move |d| d.languages.contains(&language))
    }

    /// Exact id lookup with a linear fallback over ids and names,
    /// case-insensitively.
    fn lookup(&self, id: &str) -> Option<&RegisteredTest> {
        if let Some(test) = self.tests.get(id) {
            return Some(test);
        }
        self.tests.values().find(|t| {
            t.descriptor.id.eq_ignore_ascii_case(id) || t.descriptor.name.eq_ignore_ascii_case(id)
        })
    }

    /// Compute one test: lookup, language check, preconditions, handler.
    #[tracing::instrument(skip(self, ctx))]
    pub fn compute(&self, id: &str, ctx: &Context, language: Language) -> TestOutcome<TestResult> {
        let test = self
            .lookup(id)
            .ok_or_else(|| TestError::UnknownTest(id.to_string()))?;

        if !test.descriptor.languages.contains(&language) {
            return Err(TestError::LanguageIncompatible {
                test: test.descriptor.id.clone(),
                language: language.to_string(),
            });
        }

        test.descriptor
            .preconditions
            .check(&test.descriptor.id, ctx.totals())?;

        match &test.handler {
            Handler::Builtin(handler) => handler(ctx),
            Handler::Custom(custom) => run_custom(&test.descriptor, custom, ctx),
        }
    }

    /// Compute every applicable test, isolating failures per test and
    /// collecting the ids deactivated by soft failures.
    #[tracing::instrument(skip(self, ctx))]
    pub fn compute_all(&self, ctx: &Context, language: Language) -> BatchResults {
        let mut outcomes = Vec::new();
        let mut deactivated = BTreeSet::new();
        for descriptor in self.descriptors_for(language) {
            let outcome = self.compute(&descriptor.id, ctx, language);
            if let Err(err) = &outcome
                && err.deactivates()
            {
                deactivated.insert(descriptor.id.clone());
            }
            outcomes.push((descriptor.id.clone(), outcome));
        }
        BatchResults {
            outcomes,
            deactivated,
        }
    }
}

fn run_custom(
    descriptor: &TestDescriptor,
    custom: &CustomTest,
    ctx: &Context,
) -> TestOutcome<TestResult> {
    let counts = ctx.hard_words.custom.get(&descriptor.id);
    let value = if custom.numeral_policy == ctx.numeral_policy {
        custom.formula.evaluate(ctx, counts, &descriptor.id)?
    } else {
        let ctx = Context {
            numeral_policy: custom.numeral_policy,
            ..ctx.clone()
        };
        custom.formula.evaluate(&ctx, counts, &descriptor.id)?
    };
    let result = TestResult::new(&descriptor.id, &descriptor.name);
    Ok(match custom.output {
        CustomOutput::Grade => result.with_grade(finish_grade(value, GRADE_CEILING)),
        CustomOutput::GradeRange => {
            if value < 0.0 || value.fract() != 0.0 {
                return Err(TestError::ArithmeticDomain {
                    test: descriptor.id.clone(),
                    reason: "grade-range formula must produce a packed whole number".to_string(),
                });
            }
            let (lower, upper) = unpack_grade_range(value as u64);
            result.with_grade_range(lower, upper)
        }
        CustomOutput::Index => {
            let score = value.clamp(0.0, 100.0).round();
            result.with_index(score, flesch_band(score))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hard_words::HardWordAnalysis;
    use crate::stats::{StatsSnapshot, Totals};

    fn context(words: u64, sentences: u64, syllables: u64) -> Context {
        let totals = Totals {
            words,
            sentences,
            units: sentences,
            syllables,
            chars: words * 4,
            chars_with_punct: words * 4 + sentences,
            monosyllabic: words / 2,
            ..Totals::default()
        };
        Context {
            stats: StatsSnapshot {
                all: totals,
                valid: totals,
                ..StatsSnapshot::default()
            },
            hard_words: HardWordAnalysis::default(),
            use_valid: false,
            numeral_policy: NumeralSyllabication::default(),
        }
    }

    #[test]
    fn unknown_test() {
        let registry = Registry::builtin();
        let ctx = context(100, 5, 150);
        assert!(matches!(
            registry.compute("no-such-test", &ctx, Language::English),
            Err(TestError::UnknownTest(_))
        ));
    }

    #[test]
    fn lookup_falls_back_to_names() {
        let registry = Registry::builtin();
        let ctx = context(100, 5, 150);
        let by_id = registry.compute("flesch-kincaid", &ctx, Language::English);
        let by_name = registry.compute("Flesch-Kincaid", &ctx, Language::English);
        assert_eq!(by_id.unwrap().grade, by_name.unwrap().grade);
    }

    #[test]
    fn language_gate_is_soft() {
        let registry = Registry::builtin();
        let ctx = context(100, 5, 150);
        let err = registry
            .compute("amstad", &ctx, Language::English)
            .unwrap_err();
        assert!(matches!(err, TestError::LanguageIncompatible { .. }));
        assert!(err.deactivates());
    }

    #[test]
    fn empty_document_is_insufficient_data() {
        let registry = Registry::builtin();
        let ctx = context(0, 0, 0);
        let err = registry
            .compute("flesch-kincaid", &ctx, Language::English)
            .unwrap_err();
        match &err {
            TestError::InsufficientData { quantity, actual, .. } => {
                assert_eq!(*quantity, "words");
                assert_eq!(*actual, 0);
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
        assert!(err.deactivates());
    }

    #[test]
    fn batch_isolates_failures_and_reports_deactivations() {
        let registry = Registry::builtin();
        let ctx = context(0, 0, 0);
        let batch = registry.compute_all(&ctx, Language::English);
        assert!(!batch.outcomes.is_empty());
        assert!(batch.outcomes.iter().all(|(_, outcome)| outcome.is_err()));
        // every English test fails preconditions on an empty document
        assert_eq!(batch.deactivated.len(), batch.outcomes.len());
    }

    #[test]
    fn batch_on_real_text_mostly_succeeds() {
        let registry = Registry::builtin();
        let ctx = context(100, 8, 140);
        let batch = registry.compute_all(&ctx, Language::English);
        let successes = batch
            .outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_ok())
            .count();
        assert!(successes > 10);
        assert!(batch.deactivated.is_empty());
    }

    #[test]
    fn custom_grade_test_dispatches() {
        let mut registry = Registry::builtin();
        let formula =
            CompiledFormula::parse("WordCount / SentenceCount").expect("formula parses");
        registry.register_custom(
            "my-asl",
            "Average Sentence Length",
            formula,
            CustomOutput::Grade,
            vec![Language::English],
            NumeralSyllabication::default(),
        );
        let ctx = context(100, 5, 150);
        let result = registry.compute("my-asl", &ctx, Language::English).unwrap();
        assert_eq!(result.grade, Some(19.0));
    }

    #[test]
    fn custom_grade_range_unpacks() {
        let mut registry = Registry::builtin();
        let packed = crate::formula::pack_grade_range(7, 8);
        let formula = CompiledFormula::parse(&packed.to_string()).expect("formula parses");
        registry.register_custom(
            "my-range",
            "My Range",
            formula,
            CustomOutput::GradeRange,
            vec![Language::English],
            NumeralSyllabication::default(),
        );
        let ctx = context(100, 5, 150);
        let result = registry.compute("my-range", &ctx, Language::English).unwrap();
        assert_eq!(result.grade_range, Some((7, 8)));
    }

    #[test]
    fn custom_test_numeral_policy_overrides_the_engine_policy() {
        let mut registry = Registry::builtin();
        let formula = CompiledFormula::parse("SyllableCount").expect("formula parses");
        registry.register_custom(
            "my-syllables",
            "My Syllables",
            formula,
            CustomOutput::Index,
            vec![Language::English],
            NumeralSyllabication::Ignored,
        );
        let mut ctx = context(100, 5, 90);
        ctx.stats.all.syllables_numerals_ignored = 60;
        let result = registry
            .compute("my-syllables", &ctx, Language::English)
            .unwrap();
        assert_eq!(result.index, Some(60.0));
    }

    #[test]
    fn descriptors_cover_every_language() {
        let registry = Registry::builtin();
        assert!(registry.descriptors_for(Language::English).count() > 25);
        assert!(registry.descriptors_for(Language::German).count() >= 8);
        assert!(registry.descriptors_for(Language::Spanish).count() >= 5);
    }
}
