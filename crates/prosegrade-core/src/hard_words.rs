//! Hard-word aggregation.
//!
//! Classifies every distinct word against familiar-word standards
//! (Dale-Chall, Spache, Harris-Jacobson, Fog's syllable rule, and any
//! custom-list standards), applying a proper-noun counting policy, and
//! derives the word sets the formulas and reports consume. All counts
//! are produced twice, over the full document and restricted to complete
//! sentences and headers. An empty document yields all-zero counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::{Document, FrequencyEntry, WordFrequency};
use crate::resources::{DolchCategory, FamiliarWordList, ResourceBundle};

/// How proper nouns contribute to unfamiliar-word counts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ProperNounPolicy {
    /// Proper-noun occurrences are always familiar. Entries that are
    /// 100% proper are skipped entirely.
    AllFamiliar,
    /// Proper-noun occurrences count the same as any other.
    AllUnfamiliar,
    /// Only the first proper-noun occurrence of an unfamiliar word
    /// counts; repeats are assumed learned.
    #[default]
    FirstInstanceUnfamiliar,
}

impl ProperNounPolicy {
    /// Occurrences an unfamiliar entry contributes under this policy.
    pub const fn contribution(self, entry: &FrequencyEntry) -> u32 {
        let non_proper = entry.total - entry.proper;
        match self {
            Self::AllFamiliar => non_proper,
            Self::AllUnfamiliar => entry.total,
            Self::FirstInstanceUnfamiliar => {
                if entry.proper > 0 {
                    non_proper + 1
                } else {
                    non_proper
                }
            }
        }
    }
}

/// Unfamiliar-word counts for one standard over one word population.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
pub struct UnfamiliarCounts {
    /// Distinct unfamiliar words (entries with a nonzero contribution).
    pub unique: u32,
    /// Total unfamiliar occurrences after the proper-noun policy.
    pub total: u32,
}

/// Counts for one standard, over all words and over valid-sentence words.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
pub struct StandardCounts {
    /// Counts over every word in the document.
    pub all: UnfamiliarCounts,
    /// Counts restricted to complete sentences and headers.
    pub valid: UnfamiliarCounts,
}

/// A word set derived from per-word attributes rather than a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DerivedSet {
    /// Distinct words in the set, sorted.
    pub words: Vec<String>,
    /// Total occurrences over the whole document.
    pub total: u32,
    /// Total occurrences within complete sentences and headers.
    pub total_valid: u32,
}

/// Attribute-derived word sets used by formulas and reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DerivedSets {
    /// Words of three or more syllables.
    pub polysyllabic: DerivedSet,
    /// Words of six or more characters.
    pub long_six: DerivedSet,
    /// Words of seven or more characters.
    pub long_seven: DerivedSet,
    /// Monosyllabic words.
    pub monosyllabic: DerivedSet,
    /// Numerals.
    pub numerals: DerivedSet,
    /// Proper nouns.
    pub proper_nouns: DerivedSet,
    /// Mini words (three characters or fewer, non-numeric).
    pub mini: DerivedSet,
}

/// Dolch sight-word coverage of the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DolchCoverage {
    /// Document words that are Dolch words, by category label.
    pub used: BTreeMap<String, Vec<String>>,
    /// Dolch words the document never uses, sorted.
    pub unused: Vec<String>,
}

/// A custom familiar-word standard from configuration.
#[derive(Debug, Clone)]
pub struct CustomStandard {
    /// Standard name (also its report key).
    pub name: String,
    /// The combined familiar-word list.
    pub list: FamiliarWordList,
    /// Whether numerals are automatically familiar.
    pub numerals_familiar: bool,
    /// Proper-noun policy for this standard.
    pub policy: ProperNounPolicy,
}

/// Options controlling hard-word aggregation.
#[derive(Debug, Clone, Default)]
pub struct HardWordOptions {
    /// Proper-noun policy applied to the built-in standards.
    pub policy: ProperNounPolicy,
    /// Custom standards to evaluate alongside the built-ins.
    pub custom: Vec<CustomStandard>,
}

/// Receives per-word classification detail during aggregation.
///
/// Counting never depends on whether a sink is attached; a sink only
/// observes.
pub trait DetailSink {
    /// Called once per distinct word per standard.
    fn record(&mut self, standard: &str, word: &str, entry: &FrequencyEntry, unfamiliar: bool);
}

/// The full hard-word analysis of a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HardWordAnalysis {
    /// Dale-Chall unfamiliar counts.
    pub dale_chall: StandardCounts,
    /// Spache unfamiliar counts.
    pub spache: StandardCounts,
    /// Harris-Jacobson unfamiliar counts.
    pub harris_jacobson: StandardCounts,
    /// Fog hard words (three or more syllables, numerals excluded).
    pub fog: StandardCounts,
    /// Custom-standard counts by standard name.
    pub custom: BTreeMap<String, StandardCounts>,
    /// Attribute-derived word sets.
    pub derived: DerivedSets,
    /// Dolch sight-word coverage.
    pub dolch: DolchCoverage,
}

/// Run the hard-word aggregation over a document.
#[tracing::instrument(skip_all, fields(words = document.words.len()))]
pub fn analyze(
    document: &Document,
    resources: &ResourceBundle,
    options: &HardWordOptions,
    mut sink: Option<&mut dyn DetailSink>,
) -> HardWordAnalysis {
    let all = document.word_frequency();
    let valid = document.word_frequency_valid_only();

    let list_counts = |list: &FamiliarWordList, numerals_familiar: bool, policy: ProperNounPolicy, sink: &mut Option<&mut dyn DetailSink>, name: &str| {
        StandardCounts {
            all: count_by_list(&all, list, numerals_familiar, policy, sink, name),
            valid: count_by_list(&valid, list, numerals_familiar, policy, &mut None, name),
        }
    };

    let policy = options.policy;
    let dale_chall = list_counts(&resources.dale_chall, true, policy, &mut sink, "dale-chall");
    let spache = list_counts(&resources.spache, true, policy, &mut sink, "spache");
    let harris_jacobson = list_counts(
        &resources.harris_jacobson,
        true,
        policy,
        &mut sink,
        "harris-jacobson",
    );

    let fog = StandardCounts {
        all: count_fog(&all, policy, &mut sink),
        valid: count_fog(&valid, policy, &mut None),
    };

    let mut custom = BTreeMap::new();
    for standard in &options.custom {
        custom.insert(
            standard.name.clone(),
            StandardCounts {
                all: count_by_list(
                    &all,
                    &standard.list,
                    standard.numerals_familiar,
                    standard.policy,
                    &mut sink,
                    &standard.name,
                ),
                valid: count_by_list(
                    &valid,
                    &standard.list,
                    standard.numerals_familiar,
                    standard.policy,
                    &mut None,
                    &standard.name,
                ),
            },
        );
    }

    HardWordAnalysis {
        dale_chall,
        spache,
        harris_jacobson,
        fog,
        custom,
        derived: derive_sets(&all, &valid),
        dolch: dolch_coverage(&all, resources),
    }
}

/// Classify a frequency map against a familiar-word list.
fn count_by_list(
    frequency: &WordFrequency,
    list: &FamiliarWordList,
    numerals_familiar: bool,
    policy: ProperNounPolicy,
    sink: &mut Option<&mut dyn DetailSink>,
    standard: &str,
) -> UnfamiliarCounts {
    let mut counts = UnfamiliarCounts::default();
    for (word, entry) in frequency.iter() {
        let familiar = (numerals_familiar && entry.numeric) || list.contains(word);
        if let Some(sink) = sink {
            sink.record(standard, word, entry, !familiar);
        }
        if familiar {
            continue;
        }
        let contribution = policy.contribution(entry);
        if contribution > 0 {
            counts.unique += 1;
            counts.total += contribution;
        }
    }
    counts
}

/// Fog hard words: three or more syllables, numerals excluded.
fn count_fog(
    frequency: &WordFrequency,
    policy: ProperNounPolicy,
    sink: &mut Option<&mut dyn DetailSink>,
) -> UnfamiliarCounts {
    let mut counts = UnfamiliarCounts::default();
    for (word, entry) in frequency.iter() {
        let hard = entry.syllables >= 3 && !entry.numeric;
        if let Some(sink) = sink {
            sink.record("fog", word, entry, hard);
        }
        if !hard {
            continue;
        }
        let contribution = policy.contribution(entry);
        if contribution > 0 {
            counts.unique += 1;
            counts.total += contribution;
        }
    }
    counts
}

fn derive_sets(all: &WordFrequency, valid: &WordFrequency) -> DerivedSets {
    let build = |select: &dyn Fn(&FrequencyEntry) -> bool| {
        let mut set = DerivedSet::default();
        for (word, entry) in all.iter() {
            if select(entry) {
                set.words.push(word.to_string());
                set.total += entry.total;
            }
        }
        for (_, entry) in valid.iter().filter(|(_, e)| select(e)) {
            set.total_valid += entry.total;
        }
        set
    };

    DerivedSets {
        polysyllabic: build(&|e| e.syllables >= 3 && !e.numeric),
        long_six: build(&|e| e.letters >= 6),
        long_seven: build(&|e| e.letters >= 7),
        monosyllabic: build(&|e| e.syllables == 1),
        numerals: build(&|e| e.numeric),
        proper_nouns: build(&|e| e.proper > 0),
        mini: build(&|e| e.letters <= 3 && !e.numeric),
    }
}

fn dolch_coverage(all: &WordFrequency, resources: &ResourceBundle) -> DolchCoverage {
    let mut coverage = DolchCoverage::default();
    for (word, _) in all.iter() {
        if let Some(category) = resources.dolch.category_of(word) {
            coverage
                .used
                .entry(category.as_str().to_string())
                .or_default()
                .push(word.to_string());
        }
    }
    for category in DolchCategory::ALL {
        for word in resources.dolch.words(category) {
            if all.get(word).is_none() {
                coverage.unused.push(word.to_string());
            }
        }
    }
    coverage.unused.sort_unstable();
    coverage
}
