//! Cloze-score predictors.
//!
//! Cloze tests estimate the fraction of deleted words a reader could
//! restore. Scores are reported as percentages, scaled from the raw
//! [0, 1] mean and rounded.

use crate::error::TestOutcome;
use crate::result::TestResult;

use super::{Context, nonzero};

/// The Bormuth mean cloze estimate, in [0, 1].
///
/// Shared by the Bormuth grade placement and Degrees of Reading Power
/// tests. Familiarity is measured against the Dale-Chall list.
pub fn bormuth_mean(ctx: &Context, test: &str) -> TestOutcome<f64> {
    let t = ctx.totals();
    let words = nonzero(t.words as f64, test, "no words")?;
    let sentences = nonzero(t.sentences as f64, test, "no sentences")?;

    let chars_per_word = t.chars as f64 / words;
    let familiar = words - ctx.dale_chall_unfamiliar() as f64;
    let familiar_ratio = (familiar / words).max(0.0);
    let asl = words / sentences;

    let m = 0.886593 - 0.083640 * chars_per_word + 0.161911 * familiar_ratio.powi(3)
        - 0.021401 * asl
        + 0.000577 * asl.powi(2)
        - 0.000005 * asl.powi(3);
    Ok(m.clamp(0.0, 1.0))
}

/// Bormuth Cloze Mean, reported as a percentage.
pub fn bormuth_cloze_mean(ctx: &Context) -> TestOutcome<TestResult> {
    let m = bormuth_mean(ctx, "bormuth-cloze-mean")?;
    let pct = (m * 1000.0).round() / 10.0;
    Ok(TestResult::new("bormuth-cloze-mean", "Bormuth Cloze Mean").with_cloze(pct))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionaries::syllable_dict::NumeralSyllabication;
    use crate::hard_words::HardWordAnalysis;
    use crate::stats::{StatsSnapshot, Totals};

    fn context(totals: Totals) -> Context {
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
    fn mean_stays_in_unit_interval() {
        let t = Totals {
            words: 100,
            sentences: 8,
            units: 8,
            syllables: 150,
            chars: 420,
            ..Totals::default()
        };
        let m = bormuth_mean(&context(t), "test").unwrap();
        assert!((0.0..=1.0).contains(&m));
    }

    #[test]
    fn easier_text_scores_higher() {
        let easy = Totals {
            words: 100,
            sentences: 12,
            units: 12,
            syllables: 120,
            chars: 380,
            ..Totals::default()
        };
        let hard = Totals {
            words: 100,
            sentences: 3,
            units: 3,
            syllables: 190,
            chars: 620,
            ..Totals::default()
        };
        let mut hard_ctx = context(hard);
        hard_ctx.hard_words.dale_chall.all.total = 40;
        let m_easy = bormuth_mean(&context(easy), "test").unwrap();
        let m_hard = bormuth_mean(&hard_ctx, "test").unwrap();
        assert!(m_easy > m_hard);
    }

    #[test]
    fn cloze_mean_reports_percentage() {
        let t = Totals {
            words: 100,
            sentences: 10,
            units: 10,
            syllables: 130,
            chars: 400,
            ..Totals::default()
        };
        let result = bormuth_cloze_mean(&context(t)).unwrap();
        let pct = result.cloze.unwrap();
        assert!((0.0..=100.0).contains(&pct));
    }
}
