//! Document statistics aggregation.
//!
//! Produces the numeric totals every formula consumes: word, sentence,
//! unit, syllable, and character counts, under both sentence-inclusion
//! policies (all sentences vs. complete sentences, optionally with
//! headers). Syllable totals come in the numeral-handling variants the
//! formulas disagree on. Recomputing from an unchanged document gives
//! bit-identical output.

use serde::{Deserialize, Serialize};

use crate::dictionaries::syllable_dict::{NumeralSyllabication, numeral_syllables_full};
use crate::document::{Document, Sentence, Word};

/// How the difficult-sentence threshold is determined.
///
/// Accepted config forms: the string `"outlier"`, a bare word count,
/// or a map `{ fixed: <count> }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdRule {
    /// A fixed word-count cutoff.
    Fixed(usize),
    /// Upper-outlier boundary of the sentence-length distribution
    /// (third quartile plus 1.5 interquartile ranges).
    Outlier,
}

impl Default for ThresholdRule {
    fn default() -> Self {
        Self::Fixed(22)
    }
}

impl Serialize for ThresholdRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Outlier => serializer.serialize_str("outlier"),
            Self::Fixed(cutoff) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("fixed", cutoff)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ThresholdRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RuleVisitor;

        impl<'de> serde::de::Visitor<'de> for RuleVisitor {
            type Value = ThresholdRule;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("\"outlier\", a word count, or a map with a `fixed` key")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if value.eq_ignore_ascii_case("outlier") {
                    return Ok(ThresholdRule::Outlier);
                }
                // Env-sourced values arrive as strings
                if let Ok(cutoff) = value.parse::<usize>() {
                    return Ok(ThresholdRule::Fixed(cutoff));
                }
                Err(E::unknown_variant(value, &["outlier", "fixed"]))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                usize::try_from(value)
                    .map(ThresholdRule::Fixed)
                    .map_err(|_| E::custom("threshold cutoff is too large"))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                usize::try_from(value)
                    .map(ThresholdRule::Fixed)
                    .map_err(|_| E::custom("threshold cutoff must be non-negative"))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut fixed = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == "fixed" {
                        fixed = Some(map.next_value()?);
                    } else {
                        return Err(serde::de::Error::unknown_field(&key, &["fixed"]));
                    }
                }
                fixed
                    .map(ThresholdRule::Fixed)
                    .ok_or_else(|| serde::de::Error::missing_field("fixed"))
            }
        }

        deserializer.deserialize_any(RuleVisitor)
    }
}

impl schemars::JsonSchema for ThresholdRule {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "ThresholdRule".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "anyOf": [
                { "type": "string", "const": "outlier" },
                { "type": "integer", "minimum": 0 },
                {
                    "type": "object",
                    "properties": { "fixed": { "type": "integer", "minimum": 0 } },
                    "required": ["fixed"],
                    "additionalProperties": false
                }
            ]
        })
    }
}

/// Options controlling statistics aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct StatsOptions {
    /// Whether headers count as valid sentences.
    pub include_headers: bool,
    /// Difficult-sentence threshold rule.
    pub threshold: ThresholdRule,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            include_headers: true,
            threshold: ThresholdRule::default(),
        }
    }
}

/// Numeric totals over one sentence population.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
pub struct Totals {
    /// Word count.
    pub words: u64,
    /// Sentence count.
    pub sentences: u64,
    /// Sentence-unit count (strong-punctuation sub-clauses).
    pub units: u64,
    /// Syllables with numerals counted as one syllable each.
    pub syllables: u64,
    /// Syllables with numerals fully syllabized from spoken digits.
    pub syllables_numerals_full: u64,
    /// Syllables with numerals contributing nothing.
    pub syllables_numerals_ignored: u64,
    /// Syllables excluding both numerals and proper nouns.
    pub syllables_no_numerals_or_proper: u64,
    /// Characters excluding punctuation.
    pub chars: u64,
    /// Characters including punctuation.
    pub chars_with_punct: u64,
    /// Monosyllabic words.
    pub monosyllabic: u64,
    /// Words of three or more syllables (numerals excluded).
    pub polysyllabic: u64,
    /// Words of two or more syllables (numerals excluded).
    pub disyllabic_plus: u64,
    /// Numerals.
    pub numerals: u64,
    /// Proper nouns.
    pub proper_nouns: u64,
    /// Words of six or more characters.
    pub long_six: u64,
    /// Words of seven or more characters.
    pub long_seven: u64,
    /// Mini words (three characters or fewer, non-numeric).
    pub mini: u64,
    /// Interrogative sentences.
    pub interrogative: u64,
    /// Exclamatory sentences.
    pub exclamatory: u64,
}

impl Totals {
    fn add_word(&mut self, word: &Word) {
        self.words += 1;
        self.chars += word.letters as u64;
        self.chars_with_punct += word.chars_with_punct() as u64;

        if word.numeric {
            self.numerals += 1;
            self.syllables += 1;
            self.monosyllabic += 1;
            self.syllables_numerals_full += numeral_syllables_full(&word.text).max(1) as u64;
        } else {
            let syllables = word.syllables as u64;
            self.syllables += syllables;
            self.syllables_numerals_full += syllables;
            self.syllables_numerals_ignored += syllables;
            if !word.proper {
                self.syllables_no_numerals_or_proper += syllables;
            }
            if word.syllables == 1 {
                self.monosyllabic += 1;
            }
            if word.syllables >= 3 {
                self.polysyllabic += 1;
            }
            if word.syllables >= 2 {
                self.disyllabic_plus += 1;
            }
            if word.letters <= 3 {
                self.mini += 1;
            }
        }
        if word.proper {
            self.proper_nouns += 1;
        }
        if word.letters >= 6 {
            self.long_six += 1;
        }
        if word.letters >= 7 {
            self.long_seven += 1;
        }
    }

    fn add_sentence(&mut self, sentence: &Sentence) {
        self.sentences += 1;
        self.units += sentence.units as u64;
        if sentence.is_interrogative() {
            self.interrogative += 1;
        }
        if sentence.is_exclamatory() {
            self.exclamatory += 1;
        }
    }

    /// Syllable total under a numeral syllabization policy.
    pub const fn syllables_with(&self, policy: NumeralSyllabication) -> u64 {
        match policy {
            NumeralSyllabication::OneSyllable => self.syllables,
            NumeralSyllabication::FullySyllabized => self.syllables_numerals_full,
            NumeralSyllabication::Ignored => self.syllables_numerals_ignored,
        }
    }

    /// Average sentence length in words. Zero when there are no sentences.
    pub fn words_per_sentence(&self) -> f64 {
        ratio(self.words, self.sentences)
    }

    /// Average syllables per word. Zero when there are no words.
    pub fn syllables_per_word(&self) -> f64 {
        ratio(self.syllables, self.words)
    }

    /// Average characters (excluding punctuation) per word.
    pub fn chars_per_word(&self) -> f64 {
        ratio(self.chars, self.words)
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// A complete statistics snapshot of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct StatsSnapshot {
    /// Totals over every sentence.
    pub all: Totals,
    /// Totals restricted per the inclusion policy (complete sentences,
    /// optionally headers).
    pub valid: Totals,
    /// Paragraph count.
    pub paragraphs: u64,
    /// Word-count cutoff above which a sentence is considered difficult.
    pub difficult_sentence_threshold: f64,
    /// Sentences whose word count exceeds the threshold.
    pub difficult_sentences: u64,
    /// Non-fatal notes produced during aggregation.
    pub diagnostics: Vec<String>,
}

/// Aggregate statistics over a document.
#[tracing::instrument(skip_all, fields(words = document.words.len(), sentences = document.sentences.len()))]
pub fn aggregate(document: &Document, options: &StatsOptions) -> StatsSnapshot {
    let mut snapshot = StatsSnapshot {
        paragraphs: document.paragraphs.len() as u64,
        ..StatsSnapshot::default()
    };

    for (sentence, words) in document.sentences_with_words() {
        snapshot.all.add_sentence(sentence);
        for word in words {
            snapshot.all.add_word(word);
        }

        let included = match sentence.validity {
            crate::document::SentenceValidity::Complete => true,
            crate::document::SentenceValidity::Header => options.include_headers,
            crate::document::SentenceValidity::Incomplete => false,
        };
        if included {
            snapshot.valid.add_sentence(sentence);
            for word in words {
                snapshot.valid.add_word(word);
            }
        }
    }

    let lengths: Vec<usize> = document.sentences.iter().map(Sentence::word_count).collect();
    if lengths.is_empty() {
        snapshot.difficult_sentence_threshold = 0.0;
        snapshot
            .diagnostics
            .push("no sentences found; difficult-sentence threshold set to 0".to_string());
    } else {
        snapshot.difficult_sentence_threshold = match options.threshold {
            ThresholdRule::Fixed(cutoff) => cutoff as f64,
            ThresholdRule::Outlier => outlier_boundary(&lengths),
        };
        snapshot.difficult_sentences = lengths
            .iter()
            .filter(|&&len| len as f64 > snapshot.difficult_sentence_threshold)
            .count() as u64;
    }

    snapshot
}

/// Upper-outlier boundary: Q3 + 1.5 IQR, with linearly interpolated
/// quartiles.
fn outlier_boundary(lengths: &[usize]) -> f64 {
    let mut sorted: Vec<f64> = lengths.iter().map(|&l| l as f64).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let q1 = percentile(&sorted, 0.25);
    let q3 = percentile(&sorted, 0.75);
    q3 + 1.5 * (q3 - q1)
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = rank - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    #[test]
    fn basic_totals() {
        let doc = tokenize("The cat sat on the mat. Did the dog run?");
        let stats = aggregate(&doc, &StatsOptions::default());
        assert_eq!(stats.all.words, 10);
        assert_eq!(stats.all.sentences, 2);
        assert_eq!(stats.all.interrogative, 1);
        assert_eq!(stats.all.exclamatory, 0);
        assert_eq!(stats.paragraphs, 1);
    }

    #[test]
    fn valid_excludes_fragments() {
        let doc = tokenize("A complete sentence sits here. and a dangling fragment");
        let stats = aggregate(&doc, &StatsOptions::default());
        assert!(stats.valid.words < stats.all.words);
        assert_eq!(stats.valid.sentences, 1);
    }

    #[test]
    fn header_inclusion_is_configurable() {
        let text = "Quarterly Summary\n\nRevenue grew this quarter.";
        let doc = tokenize(text);

        let with_headers = aggregate(&doc, &StatsOptions::default());
        let without = aggregate(
            &doc,
            &StatsOptions {
                include_headers: false,
                ..StatsOptions::default()
            },
        );
        assert_eq!(with_headers.valid.sentences, 2);
        assert_eq!(without.valid.sentences, 1);
    }

    #[test]
    fn syllable_variants_differ_only_on_numerals() {
        let doc = tokenize("The year 1812 passed.");
        let stats = aggregate(&doc, &StatsOptions::default());
        // "1812" = one syllable normally, 4 fully syllabized, 0 ignored
        assert_eq!(stats.all.syllables_numerals_full, stats.all.syllables + 3);
        assert_eq!(stats.all.syllables_numerals_ignored, stats.all.syllables - 1);
    }

    #[test]
    fn empty_document_has_zero_threshold_and_a_diagnostic() {
        let doc = Document::default();
        let stats = aggregate(&doc, &StatsOptions::default());
        assert_eq!(stats.difficult_sentence_threshold, 0.0);
        assert_eq!(stats.difficult_sentences, 0);
        assert_eq!(stats.diagnostics.len(), 1);
    }

    #[test]
    fn outlier_threshold_flags_the_long_sentence() {
        let text = "Short one. Short two. Short three. Short four. \
                    This sentence runs much longer than every other sentence in the sample \
                    because it keeps adding clauses and words without stopping for breath.";
        let doc = tokenize(text);
        let stats = aggregate(
            &doc,
            &StatsOptions {
                threshold: ThresholdRule::Outlier,
                ..StatsOptions::default()
            },
        );
        assert_eq!(stats.difficult_sentences, 1);
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let doc = tokenize("Determinism matters. Run it twice, compare everything.");
        let options = StatsOptions::default();
        let first = aggregate(&doc, &options);
        let second = aggregate(&doc, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn syllables_with_selects_the_policy_variant() {
        let doc = tokenize("The year 1812 passed.");
        let stats = aggregate(&doc, &StatsOptions::default());
        let base = stats.all.syllables_with(NumeralSyllabication::OneSyllable);
        assert_eq!(base, stats.all.syllables);
        assert_eq!(stats.all.syllables_with(NumeralSyllabication::FullySyllabized), base + 3);
        assert_eq!(stats.all.syllables_with(NumeralSyllabication::Ignored), base - 1);
    }

    #[test]
    fn threshold_rule_serde_forms() {
        let json = serde_json::to_string(&ThresholdRule::Fixed(30)).unwrap();
        assert_eq!(json, r#"{"fixed":30}"#);
        assert_eq!(
            serde_json::from_str::<ThresholdRule>(&json).unwrap(),
            ThresholdRule::Fixed(30)
        );
        assert_eq!(
            serde_json::to_string(&ThresholdRule::Outlier).unwrap(),
            r#""outlier""#
        );
        assert_eq!(
            serde_json::from_str::<ThresholdRule>("25").unwrap(),
            ThresholdRule::Fixed(25)
        );
    }

    #[test]
    fn percentile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 1.0), 4.0);
        assert_eq!(percentile(&sorted, 0.5), 2.5);
    }
}
