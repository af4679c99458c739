//! Graph-based tests.
//!
//! These tests plot a point on a published chart and read a grade zone
//! off it. The charts are rendered here as monotone lookup tables over
//! the two axes; when the point falls outside every zone the test
//! returns [`TestError::NoScore`], which is a legitimate outcome and
//! not a failure.

use crate::error::{TestError, TestOutcome};
use crate::result::TestResult;

use super::{Context, nonzero};

fn no_score(test: &str) -> TestError {
    TestError::NoScore {
        test: test.to_string(),
    }
}

/// Grade zone from Fry's sentence axis (sentences per 100 words).
fn fry_sentence_grade(sentences_per_100: f64) -> Option<f64> {
    const TABLE: [(f64, f64); 15] = [
        (22.0, 1.0),
        (18.0, 2.0),
        (14.5, 3.0),
        (12.0, 4.0),
        (10.0, 5.0),
        (8.7, 6.0),
        (7.7, 7.0),
        (6.8, 8.0),
        (6.2, 9.0),
        (5.6, 10.0),
        (5.1, 11.0),
        (4.7, 12.0),
        (4.3, 13.0),
        (3.9, 15.0),
        (3.6, 17.0),
    ];
    if !(3.6..=25.0).contains(&sentences_per_100) {
        return None;
    }
    for (threshold, grade) in TABLE {
        if sentences_per_100 >= threshold {
            return Some(grade);
        }
    }
    None
}

/// Grade zone from Fry's syllable axis (syllables per 100 words).
fn fry_syllable_grade(syllables_per_100: f64) -> Option<f64> {
    if !(108.0..=182.0).contains(&syllables_per_100) {
        return None;
    }
    Some(((syllables_per_100 - 104.0) / 4.8).clamp(1.0, 17.0))
}

fn fry_grade(test: &str, syllables_per_100: f64, sentences_per_100: f64) -> TestOutcome<f64> {
    let g_syl = fry_syllable_grade(syllables_per_100).ok_or_else(|| no_score(test))?;
    let g_sent = fry_sentence_grade(sentences_per_100).ok_or_else(|| no_score(test))?;
    Ok(((g_syl + g_sent) / 2.0).round())
}

/// Fry Readability Graph.
pub fn fry(ctx: &Context) -> TestOutcome<TestResult> {
    nonzero(ctx.totals().words as f64, "fry", "no words")?;
    nonzero(ctx.totals().sentences as f64, "fry", "no sentences")?;
    let grade = fry_grade("fry", ctx.syllables_per_100(), ctx.sentences_per_100())?;
    Ok(TestResult::new("fry", "Fry Graph").with_grade(grade))
}

/// Gilliam-Peña-Mountain adaptation of Fry for Spanish text.
///
/// Spanish syllable counts run high, so the syllable axis is shifted
/// down by 67 before plotting on the Fry chart.
pub fn gpm_fry(ctx: &Context) -> TestOutcome<TestResult> {
    nonzero(ctx.totals().words as f64, "gpm-fry", "no words")?;
    nonzero(ctx.totals().sentences as f64, "gpm-fry", "no sentences")?;
    let grade = fry_grade(
        "gpm-fry",
        ctx.syllables_per_100() - 67.0,
        ctx.sentences_per_100(),
    )?;
    Ok(TestResult::new("gpm-fry", "Gilliam-Peña-Mountain Fry").with_grade(grade))
}

/// Raygor Readability Estimate.
///
/// Axes: sentences per 100 words and words of six or more characters
/// per 100 words.
pub fn raygor(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "raygor", "no words")?;
    nonzero(t.sentences as f64, "raygor", "no sentences")?;

    let long_per_100 = ctx.percent(t.long_six);
    let sentences_per_100 = ctx.sentences_per_100();
    if !(6.0..=44.0).contains(&long_per_100) || !(3.2..=28.0).contains(&sentences_per_100) {
        return Err(no_score("raygor"));
    }

    let g_long = ((long_per_100 - 4.0) / 2.6).clamp(3.0, 17.0);
    let g_sent = fry_sentence_grade(sentences_per_100.min(25.0)).unwrap_or(17.0);
    let grade = ((g_long + g_sent) / 2.0).round();
    Ok(TestResult::new("raygor", "Raygor Estimate").with_grade(grade))
}

/// Schwartz graph for German primary-grade text (grades 1 to 8).
pub fn schwartz(ctx: &Context) -> TestOutcome<TestResult> {
    nonzero(ctx.totals().words as f64, "schwartz", "no words")?;
    nonzero(ctx.totals().sentences as f64, "schwartz", "no sentences")?;

    let syllables_per_100 = ctx.syllables_per_100();
    let sentences_per_100 = ctx.sentences_per_100();
    if !(110.0..=200.0).contains(&syllables_per_100) || !(3.0..=26.0).contains(&sentences_per_100)
    {
        return Err(no_score("schwartz"));
    }

    let g_syl = ((syllables_per_100 - 100.0) / 11.0).clamp(1.0, 8.0);
    let g_sent = (20.0 / sentences_per_100).clamp(1.0, 8.0);
    let grade = ((g_syl + g_sent) / 2.0).round().min(8.0);
    Ok(TestResult::new("schwartz", "Schwartz").with_grade(grade))
}

/// FRASE graph for Spanish text, reporting one of four reading levels
/// as a grade range.
pub fn frase(ctx: &Context) -> TestOutcome<TestResult> {
    nonzero(ctx.totals().words as f64, "frase", "no words")?;
    nonzero(ctx.totals().sentences as f64, "frase", "no sentences")?;

    let syllables_per_100 = ctx.syllables_per_100();
    if !(160.0..=300.0).contains(&syllables_per_100) {
        return Err(no_score("frase"));
    }

    let (level, lower, upper) = if syllables_per_100 < 200.0 {
        ("beginning", 1, 4)
    } else if syllables_per_100 < 220.0 {
        ("intermediate", 5, 8)
    } else if syllables_per_100 < 240.0 {
        ("advanced intermediate", 9, 12)
    } else {
        ("advanced", 13, 16)
    };
    Ok(TestResult::new("frase", "FRASE Graph")
        .with_grade_range(lower, upper)
        .with_explanation(format!("FRASE Graph: {level} reading level")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionaries::syllable_dict::NumeralSyllabication;
    use crate::hard_words::HardWordAnalysis;
    use crate::stats::{StatsSnapshot, Totals};

    fn context(words: u64, sentences: u64, syllables: u64) -> Context {
        let totals = Totals {
            words,
            sentences,
            units: sentences,
            syllables,
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
    fn fry_scores_typical_prose() {
        // 141 syllables per 100 words, 6.25 sentences per 100 words
        let ctx = context(160, 10, 226);
        let result = fry(&ctx).unwrap();
        let grade = result.grade.unwrap();
        assert!((5.0..=11.0).contains(&grade));
    }

    #[test]
    fn fry_refuses_points_off_the_chart() {
        // 250 syllables per 100 words is far past the syllable axis
        let ctx = context(100, 10, 250);
        assert!(matches!(fry(&ctx), Err(TestError::NoScore { .. })));
    }

    #[test]
    fn no_score_does_not_deactivate() {
        let ctx = context(100, 10, 250);
        let err = fry(&ctx).unwrap_err();
        assert!(!err.deactivates());
    }

    #[test]
    fn gpm_fry_shifts_the_syllable_axis() {
        // 210 syllables per 100 words: off the Fry chart, on the GPM chart
        let ctx = context(100, 10, 210);
        assert!(fry(&ctx).is_err());
        assert!(gpm_fry(&ctx).is_ok());
    }

    #[test]
    fn raygor_needs_long_words_in_range() {
        let mut ctx = context(100, 10, 140);
        ctx.stats.all.long_six = 2;
        assert!(matches!(raygor(&ctx), Err(TestError::NoScore { .. })));

        ctx.stats.all.long_six = 20;
        assert!(raygor(&ctx).is_ok());
    }

    #[test]
    fn frase_reports_levels_as_ranges() {
        let ctx = context(100, 12, 210);
        let result = frase(&ctx).unwrap();
        assert_eq!(result.grade_range, Some((5, 8)));
        assert!(result.explanation.contains("intermediate"));
    }

    #[test]
    fn schwartz_caps_at_grade_eight() {
        let ctx = context(100, 4, 195);
        let result = schwartz(&ctx).unwrap();
        assert!(result.grade.unwrap() <= 8.0);
    }
}
