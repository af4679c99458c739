//! Index-value tests.
//!
//! These produce a difficulty index rather than a grade. Flesch-style
//! scores clamp to [0, 100] and round to whole numbers; Lix and EFLAW
//! use their own open scales. Each carries a fixed difficulty band label.

use crate::error::TestOutcome;
use crate::result::TestResult;

use super::{Context, flesch_band, lix_band, nonzero};

/// Flesch Reading Ease.
///
/// `206.835 - 1.015 * ASL - 84.6 * (syllables / words)`.
pub fn flesch_reading_ease(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "flesch-reading-ease", "no words")?;
    nonzero(t.sentences as f64, "flesch-reading-ease", "no sentences")?;
    let raw = 206.835 - 1.015 * ctx.asl() - 84.6 * ctx.syllables_per_word();
    let score = raw.clamp(0.0, 100.0).round();
    Ok(TestResult::new("flesch-reading-ease", "Flesch Reading Ease")
        .with_index(score, flesch_band(score)))
}

/// Amstad's German recalculation of Flesch Reading Ease.
pub fn amstad(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "amstad", "no words")?;
    nonzero(t.sentences as f64, "amstad", "no sentences")?;
    let raw = 180.0 - ctx.asl() - 58.5 * ctx.syllables_per_word();
    let score = raw.clamp(0.0, 100.0).round();
    Ok(TestResult::new("amstad", "Amstad").with_index(score, flesch_band(score)))
}

/// Farr-Jenkins-Paterson simplification of Flesch Reading Ease.
///
/// `-31.517 - 1.015 * ASL + 1.599 * monosyllables-per-100-words`.
pub fn farr_jenkins_paterson(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "farr-jenkins-paterson", "no words")?;
    nonzero(t.sentences as f64, "farr-jenkins-paterson", "no sentences")?;
    let raw = -31.517 - 1.015 * ctx.asl() + 1.599 * ctx.percent(t.monosyllabic);
    let score = raw.clamp(0.0, 100.0).round();
    Ok(TestResult::new("farr-jenkins-paterson", "Farr-Jenkins-Paterson")
        .with_index(score, flesch_band(score)))
}

/// Danielson-Bryan 2, a Flesch-scaled companion to Danielson-Bryan 1.
pub fn danielson_bryan_2(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "danielson-bryan-2", "no words")?;
    let sentences = nonzero(t.sentences as f64, "danielson-bryan-2", "no sentences")?;
    let blanks = (t.words.saturating_sub(1)).max(1) as f64;
    let chars = t.chars_with_punct as f64;
    let raw = 131.059 - 10.364 * (chars / blanks) - 0.194 * (chars / sentences);
    let score = raw.clamp(0.0, 100.0).round();
    Ok(TestResult::new("danielson-bryan-2", "Danielson-Bryan 2")
        .with_index(score, flesch_band(score)))
}

/// The raw Lix score: `ASL + percentage of words of 7+ characters`.
pub fn lix_score(ctx: &Context, test: &str) -> TestOutcome<f64> {
    let t = ctx.totals();
    nonzero(t.words as f64, test, "no words")?;
    nonzero(t.sentences as f64, test, "no sentences")?;
    Ok(ctx.asl() + ctx.percent(t.long_seven))
}

/// Lix as an index with Björnsson's difficulty bands.
pub fn lix_index(ctx: &Context) -> TestOutcome<TestResult> {
    let score = lix_score(ctx, "lix")?.round();
    Ok(TestResult::new("lix", "Lix").with_index(score, lix_band(score)))
}

/// McAlpine EFLAW, for text aimed at EFL readers.
///
/// `(words + mini words) / sentences`.
pub fn eflaw(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let sentences = nonzero(t.sentences as f64, "eflaw", "no sentences")?;
    let score = ((t.words + t.mini) as f64 / sentences).round();
    let band = match score as u32 {
        0..=20 => "very easy",
        21..=25 => "quite easy",
        26..=29 => "mildly difficult",
        _ => "very confusing",
    };
    Ok(TestResult::new("eflaw", "McAlpine EFLAW").with_index(score, band))
}

/// Degrees of Reading Power: the Bormuth mean cloze inverted onto a
/// 0-100 difficulty scale (higher is harder).
pub fn degrees_of_reading_power(ctx: &Context) -> TestOutcome<TestResult> {
    let m = super::cloze::bormuth_mean(ctx, "degrees-of-reading-power")?;
    let score = ((1.0 - m) * 100.0).clamp(0.0, 100.0).round();
    let band = match score as u32 {
        0..=42 => "very easy",
        43..=53 => "easy",
        54..=64 => "standard",
        65..=75 => "difficult",
        _ => "very difficult",
    };
    Ok(TestResult::new("degrees-of-reading-power", "Degrees of Reading Power")
        .with_index(score, band))
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
    fn flesch_reference_point() {
        // 100 words, 5 sentences, 150 syllables:
        // 206.835 - 1.015*20 - 84.6*1.5 = 59.635 -> 60
        let t = Totals {
            words: 100,
            sentences: 5,
            units: 5,
            syllables: 150,
            ..Totals::default()
        };
        let result = flesch_reading_ease(&context(t)).unwrap();
        assert_eq!(result.index, Some(60.0));
        assert_eq!(result.index_label.as_deref(), Some("standard"));
    }

    #[test]
    fn flesch_clamps_to_scale() {
        // Absurdly long sentences push the raw score negative
        let t = Totals {
            words: 400,
            sentences: 1,
            units: 1,
            syllables: 900,
            ..Totals::default()
        };
        let result = flesch_reading_ease(&context(t)).unwrap();
        assert_eq!(result.index, Some(0.0));
    }

    #[test]
    fn lix_combines_length_and_long_words() {
        let t = Totals {
            words: 100,
            sentences: 10,
            units: 10,
            syllables: 140,
            long_seven: 20,
            ..Totals::default()
        };
        // 10 + 20 = 30
        let result = lix_index(&context(t)).unwrap();
        assert_eq!(result.index, Some(30.0));
        assert_eq!(result.index_label.as_deref(), Some("easy"));
    }

    #[test]
    fn eflaw_counts_mini_words() {
        let t = Totals {
            words: 40,
            sentences: 4,
            units: 4,
            syllables: 50,
            mini: 20,
            ..Totals::default()
        };
        // (40+20)/4 = 15
        let result = eflaw(&context(t)).unwrap();
        assert_eq!(result.index, Some(15.0));
        assert_eq!(result.index_label.as_deref(), Some("very easy"));
    }
}
