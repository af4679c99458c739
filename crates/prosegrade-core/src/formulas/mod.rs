//! The standard readability formula library.
//!
//! Split by output family: grade-level tests in [`grade`], index-value
//! tests in [`index`], cloze predictors in [`cloze`], and graph-based
//! tests in [`graph`]. Every formula is a pure function of an evaluation
//! [`Context`] and returns a [`TestResult`] or a [`TestError`].

pub mod cloze;
pub mod grade;
pub mod graph;
pub mod index;

use crate::dictionaries::syllable_dict::NumeralSyllabication;
use crate::error::TestError;
use crate::hard_words::HardWordAnalysis;
use crate::stats::{StatsSnapshot, Totals};

/// Grade-level ceiling applied to most tests.
pub const GRADE_CEILING: f64 = 19.0;

/// Ceiling for the Lix/Rix grade conversions (college).
pub const RIX_CEILING: f64 = 13.0;

/// Ceiling for the German Wheeler-Smith variant.
pub const WHEELER_SMITH_DE_CEILING: f64 = 10.9;

/// Everything a formula may read: statistics, hard-word counts, and the
/// sentence-inclusion choice.
#[derive(Debug, Clone)]
pub struct Context {
    /// Document statistics.
    pub stats: StatsSnapshot,
    /// Hard-word analysis.
    pub hard_words: HardWordAnalysis,
    /// Whether formulas read the valid-sentence totals instead of the
    /// whole-document totals.
    pub use_valid: bool,
    /// How numerals contribute to syllable totals.
    pub numeral_policy: NumeralSyllabication,
}

impl Context {
    /// The totals selected by the inclusion policy.
    pub const fn totals(&self) -> &Totals {
        if self.use_valid {
            &self.stats.valid
        } else {
            &self.stats.all
        }
    }

    /// Average sentence length in words.
    pub fn asl(&self) -> f64 {
        self.totals().words_per_sentence()
    }

    /// Average sentence-unit length in words (Gunning Fog's sentence
    /// measure).
    pub fn unit_length(&self) -> f64 {
        let t = self.totals();
        if t.units == 0 {
            0.0
        } else {
            t.words as f64 / t.units as f64
        }
    }

    /// Syllable total under the configured numeral policy.
    pub const fn syllables(&self) -> u64 {
        self.totals().syllables_with(self.numeral_policy)
    }

    /// Average syllables per word under the configured numeral policy.
    pub fn syllables_per_word(&self) -> f64 {
        let words = self.totals().words;
        if words == 0 {
            0.0
        } else {
            self.syllables() as f64 / words as f64
        }
    }

    /// Syllables per 100 words.
    pub fn syllables_per_100(&self) -> f64 {
        self.syllables_per_word() * 100.0
    }

    /// Sentences per 100 words.
    pub fn sentences_per_100(&self) -> f64 {
        let t = self.totals();
        if t.words == 0 {
            0.0
        } else {
            t.sentences as f64 * 100.0 / t.words as f64
        }
    }

    /// Percentage of words matching a count, against total words.
    pub fn percent(&self, count: u64) -> f64 {
        let words = self.totals().words;
        if words == 0 {
            0.0
        } else {
            count as f64 * 100.0 / words as f64
        }
    }

    /// Fog hard-word occurrences (three or more syllables).
    pub const fn fog_hard_words(&self) -> u64 {
        let counts = if self.use_valid {
            self.hard_words.fog.valid
        } else {
            self.hard_words.fog.all
        };
        counts.total as u64
    }

    /// Dale-Chall unfamiliar occurrences.
    pub const fn dale_chall_unfamiliar(&self) -> u64 {
        let counts = if self.use_valid {
            self.hard_words.dale_chall.valid
        } else {
            self.hard_words.dale_chall.all
        };
        counts.total as u64
    }

    /// Spache distinct unfamiliar words.
    pub const fn spache_unique_unfamiliar(&self) -> u64 {
        let counts = if self.use_valid {
            self.hard_words.spache.valid
        } else {
            self.hard_words.spache.all
        };
        counts.unique as u64
    }

    /// Harris-Jacobson unfamiliar occurrences (always valid-only).
    pub const fn harris_jacobson_unfamiliar(&self) -> u64 {
        self.hard_words.harris_jacobson.valid.total as u64
    }
}

/// Clamp a grade to `[0, ceiling]` and keep one decimal.
pub fn finish_grade(raw: f64, ceiling: f64) -> f64 {
    let clamped = raw.clamp(0.0, ceiling);
    (clamped * 10.0).round() / 10.0
}

/// Truncate a grade to a whole number within `[0, ceiling]`.
pub fn truncate_grade(raw: f64, ceiling: f64) -> f64 {
    raw.clamp(0.0, ceiling).trunc()
}

/// Guard a denominator, mapping zero to an arithmetic-domain failure.
pub fn nonzero(value: f64, test: &str, reason: &str) -> Result<f64, TestError> {
    if value == 0.0 {
        Err(TestError::ArithmeticDomain {
            test: test.to_string(),
            reason: reason.to_string(),
        })
    } else {
        Ok(value)
    }
}

/// Difficulty band for a Flesch-style 0-100 ease score.
pub fn flesch_band(score: f64) -> &'static str {
    match score as u32 {
        90..=100 => "very easy",
        80..=89 => "easy",
        70..=79 => "fairly easy",
        60..=69 => "standard",
        50..=59 => "fairly difficult",
        30..=49 => "difficult",
        _ => "very difficult",
    }
}

/// Difficulty band for a Lix index.
pub fn lix_band(score: f64) -> &'static str {
    match score as u32 {
        0..=29 => "very easy",
        30..=39 => "easy",
        40..=49 => "standard",
        50..=59 => "difficult",
        _ => "very difficult",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_finishing() {
        assert_eq!(finish_grade(7.46, GRADE_CEILING), 7.5);
        assert_eq!(finish_grade(-2.0, GRADE_CEILING), 0.0);
        assert_eq!(finish_grade(25.0, GRADE_CEILING), 19.0);
        assert_eq!(truncate_grade(7.9, GRADE_CEILING), 7.0);
    }

    #[test]
    fn flesch_bands() {
        assert_eq!(flesch_band(95.0), "very easy");
        assert_eq!(flesch_band(60.0), "standard");
        assert_eq!(flesch_band(10.0), "very difficult");
    }

    #[test]
    fn nonzero_guard() {
        assert!(nonzero(1.0, "t", "r").is_ok());
        assert!(matches!(
            nonzero(0.0, "t", "no words"),
            Err(TestError::ArithmeticDomain { .. })
        ));
    }
}
