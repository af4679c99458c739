//! Grade-level tests.
//!
//! Every function returns the reading grade a reader needs to follow the
//! document, with the test's own rounding policy applied (most round to
//! one decimal; the SMOG family truncates; Dale-Chall reports a range).

use crate::error::{TestError, TestOutcome};
use crate::result::TestResult;

use super::{Context, GRADE_CEILING, RIX_CEILING, WHEELER_SMITH_DE_CEILING};
use super::{finish_grade, nonzero, truncate_grade};

/// Automated Readability Index.
///
/// `4.71 * (characters / words) + 0.5 * (words / sentences) - 21.43`,
/// characters counted with punctuation.
pub fn ari(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let words = nonzero(t.words as f64, "ari", "no words")?;
    let raw = 4.71 * (t.chars_with_punct as f64 / words) + 0.5 * ctx.asl() - 21.43;
    Ok(TestResult::new("ari", "Automated Readability Index")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// New Automated Readability Index (Kincaid's 1981 recalculation).
pub fn new_ari(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let words = nonzero(t.words as f64, "new-ari", "no words")?;
    let raw = 5.84 * (t.chars_with_punct as f64 / words) + 0.37 * ctx.asl() - 26.01;
    Ok(TestResult::new("new-ari", "New ARI").with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Flesch-Kincaid grade level.
///
/// `0.39 * ASL + 11.8 * (syllables / words) - 15.59`.
pub fn flesch_kincaid(ctx: &Context) -> TestOutcome<TestResult> {
    nonzero(ctx.totals().words as f64, "flesch-kincaid", "no words")?;
    let raw = 0.39 * ctx.asl() + 11.8 * ctx.syllables_per_word() - 15.59;
    Ok(TestResult::new("flesch-kincaid", "Flesch-Kincaid")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Powers-Sumner-Kearl recalculation of Flesch.
pub fn psk_flesch(ctx: &Context) -> TestOutcome<TestResult> {
    nonzero(ctx.totals().words as f64, "psk-flesch", "no words")?;
    let raw = 0.0778 * ctx.asl() + 0.0455 * ctx.syllables_per_100() - 2.2029;
    Ok(TestResult::new("psk-flesch", "PSK Flesch").with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Gunning Fog index.
///
/// `0.4 * (unit length + hard-word percentage)`. Sentence units, not
/// sentences, are Fog's sentence measure.
pub fn gunning_fog(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let words = nonzero(t.words as f64, "gunning-fog", "no words")?;
    nonzero(t.units as f64, "gunning-fog", "no sentence units")?;
    let hard_pct = ctx.fog_hard_words() as f64 * 100.0 / words;
    let raw = 0.4 * (ctx.unit_length() + hard_pct);
    Ok(TestResult::new("gunning-fog", "Gunning Fog")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Powers-Sumner-Kearl recalculation of Gunning Fog.
pub fn psk_fog(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "psk-fog", "no words")?;
    let raw = 3.0680 + 0.0877 * ctx.asl() + 0.0984 * ctx.percent(t.polysyllabic);
    Ok(TestResult::new("psk-fog", "PSK Gunning Fog").with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// New Fog Count.
///
/// `(((easy + 3 * hard) / sentences) - 3) / 2`, easy words being those
/// under three syllables.
pub fn new_fog_count(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let sentences = nonzero(t.sentences as f64, "new-fog-count", "no sentences")?;
    let hard = ctx.fog_hard_words() as f64;
    let easy = t.words as f64 - hard;
    let raw = ((easy + 3.0 * hard) / sentences - 3.0) / 2.0;
    Ok(TestResult::new("new-fog-count", "New Fog Count")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// SMOG grade.
///
/// `1.0430 * sqrt(hard * 30 / sentences) + 3.1291`, truncated.
pub fn smog(ctx: &Context) -> TestOutcome<TestResult> {
    let sentences = nonzero(ctx.totals().sentences as f64, "smog", "no sentences")?;
    let hard = ctx.totals().polysyllabic as f64;
    let raw = 1.0430 * (hard * 30.0 / sentences).sqrt() + 3.1291;
    Ok(TestResult::new("smog", "SMOG").with_grade(truncate_grade(raw, GRADE_CEILING)))
}

/// Simplified SMOG: `sqrt(hard * 30 / sentences) + 3`, truncated.
pub fn smog_simplified(ctx: &Context) -> TestOutcome<TestResult> {
    let sentences = nonzero(ctx.totals().sentences as f64, "smog-simplified", "no sentences")?;
    let hard = ctx.totals().polysyllabic as f64;
    let raw = (hard * 30.0 / sentences).sqrt() + 3.0;
    Ok(TestResult::new("smog-simplified", "SMOG (simplified)")
        .with_grade(truncate_grade(raw, GRADE_CEILING)))
}

/// Bamberger-Vanecek adaptation of SMOG for German text.
pub fn smog_bamberger_vanecek(ctx: &Context) -> TestOutcome<TestResult> {
    let sentences = nonzero(
        ctx.totals().sentences as f64,
        "smog-bamberger-vanecek",
        "no sentences",
    )?;
    let hard = ctx.totals().polysyllabic as f64;
    let raw = (hard * 30.0 / sentences).sqrt() - 2.0;
    Ok(TestResult::new("smog-bamberger-vanecek", "SMOG (Bamberger-Vanecek)")
        .with_grade(truncate_grade(raw, GRADE_CEILING)))
}

/// FORCAST, designed for technical material without full sentences.
///
/// `20 - (monosyllables * 150 / words) / 10`.
pub fn forcast(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let words = nonzero(t.words as f64, "forcast", "no words")?;
    let raw = 20.0 - (t.monosyllabic as f64 * 150.0 / words) / 10.0;
    Ok(TestResult::new("forcast", "FORCAST").with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Coleman-Liau grade, with the predicted cloze score as a secondary
/// output.
pub fn coleman_liau(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let words = nonzero(t.words as f64, "coleman-liau", "no words")?;
    let chars_per_100 = t.chars as f64 * 100.0 / words;
    let sentences_per_100 = t.sentences as f64 * 100.0 / words;
    let cloze_pct =
        (141.8401 - 0.214_590 * chars_per_100 + 1.079_812 * sentences_per_100).clamp(0.0, 100.0);
    let raw = -27.4004 * (cloze_pct / 100.0) + 23.06395;
    Ok(TestResult::new("coleman-liau", "Coleman-Liau")
        .with_grade(finish_grade(raw, GRADE_CEILING))
        .with_cloze((cloze_pct * 10.0).round() / 10.0))
}

/// New Dale-Chall, reported as a grade range.
///
/// Raw score `0.1579 * unfamiliar% + 0.0496 * ASL`, plus 3.6365 when
/// more than 5% of words are unfamiliar, then mapped through the
/// published raw-score table.
pub fn new_dale_chall(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let words = nonzero(t.words as f64, "new-dale-chall", "no words")?;
    nonzero(t.sentences as f64, "new-dale-chall", "no sentences")?;
    let pct = ctx.dale_chall_unfamiliar() as f64 * 100.0 / words;
    let mut raw = 0.1579 * pct + 0.0496 * ctx.asl();
    if pct > 5.0 {
        raw += 3.6365;
    }
    let (lower, upper) = dale_chall_range(raw);
    Ok(TestResult::new("new-dale-chall", "New Dale-Chall").with_grade_range(lower, upper))
}

/// The published Dale-Chall raw-score to grade-range table.
pub const fn dale_chall_range(raw: f64) -> (u32, u32) {
    if raw < 5.0 {
        (1, 4)
    } else if raw < 6.0 {
        (5, 6)
    } else if raw < 7.0 {
        (7, 8)
    } else if raw < 8.0 {
        (9, 10)
    } else if raw < 9.0 {
        (11, 12)
    } else if raw < 10.0 {
        (13, 15)
    } else {
        (16, 19)
    }
}

/// Powers-Sumner-Kearl recalculation of Dale-Chall.
pub fn psk_dale_chall(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let words = nonzero(t.words as f64, "psk-dale-chall", "no words")?;
    let pct = ctx.dale_chall_unfamiliar() as f64 * 100.0 / words;
    let raw = 3.2672 + 0.1155 * pct + 0.0596 * ctx.asl();
    Ok(TestResult::new("psk-dale-chall", "PSK Dale-Chall")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Spache, for primary-age material. Uses distinct unfamiliar words.
pub fn spache(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let words = nonzero(t.words as f64, "spache", "no words")?;
    let unique_pct = ctx.spache_unique_unfamiliar() as f64 * 100.0 / words;
    let raw = 0.121 * ctx.asl() + 0.082 * unique_pct + 0.659;
    Ok(TestResult::new("spache", "Spache").with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Harris-Jacobson Wide Range. Always computed over complete sentences
/// and headers only.
pub fn harris_jacobson(ctx: &Context) -> TestOutcome<TestResult> {
    let t = &ctx.stats.valid;
    let words = nonzero(t.words as f64, "harris-jacobson", "no words in complete sentences")?;
    let sentences = nonzero(
        t.sentences as f64,
        "harris-jacobson",
        "no complete sentences",
    )?;
    let pct = ctx.harris_jacobson_unfamiliar() as f64 * 100.0 / words;
    let raw = 0.140 * pct + 0.153 * (t.words as f64 / sentences) + 0.560;
    Ok(TestResult::new("harris-jacobson", "Harris-Jacobson Wide Range")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Bormuth grade placement at the 35% cloze criterion.
pub fn bormuth_grade_placement(ctx: &Context) -> TestOutcome<TestResult> {
    let m = super::cloze::bormuth_mean(ctx, "bormuth-grade-placement")?;
    let c: f64 = 0.35;
    let mc = m * c;
    let raw = 4.275 + 12.881 * m - 34.934 * m.powi(2) + 20.388 * m.powi(3) + 26.194 * c
        - 2.046 * c.powi(2)
        - 11.767 * c.powi(3)
        - 44.285 * mc
        + 97.620 * mc.powi(2)
        - 59.538 * mc.powi(3);
    Ok(TestResult::new("bormuth-grade-placement", "Bormuth Grade Placement")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Crawford, for Spanish text.
///
/// `sentences-per-100-words * -0.205 + syllables-per-100-words * 0.049 - 3.407`.
pub fn crawford(ctx: &Context) -> TestOutcome<TestResult> {
    nonzero(ctx.totals().words as f64, "crawford", "no words")?;
    nonzero(ctx.totals().sentences as f64, "crawford", "no sentences")?;
    let raw = -0.205 * ctx.sentences_per_100() + 0.049 * ctx.syllables_per_100() - 3.407;
    Ok(TestResult::new("crawford", "Crawford").with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Easy Listening Formula: `(syllables - words) / sentences`.
pub fn elf(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let sentences = nonzero(t.sentences as f64, "elf", "no sentences")?;
    let raw = (ctx.syllables() as f64 - t.words as f64) / sentences;
    Ok(TestResult::new("elf", "Easy Listening Formula")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Danielson-Bryan 1.
///
/// Blanks are the between-word spaces, `max(words - 1, 1)`.
pub fn danielson_bryan_1(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "danielson-bryan-1", "no words")?;
    let sentences = nonzero(t.sentences as f64, "danielson-bryan-1", "no sentences")?;
    let blanks = (t.words.saturating_sub(1)).max(1) as f64;
    let chars = t.chars_with_punct as f64;
    let raw = 1.0364 * (chars / blanks) + 0.0194 * (chars / sentences) - 0.6059;
    Ok(TestResult::new("danielson-bryan-1", "Danielson-Bryan 1")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Lix converted to a grade through Anderson's table.
pub fn lix_grade(ctx: &Context) -> TestOutcome<TestResult> {
    let score = super::index::lix_score(ctx, "lix-grade")?;
    let grade = anderson_lix_grade(score);
    Ok(TestResult::new("lix-grade", "Lix Grade")
        .with_grade(finish_grade(grade, RIX_CEILING)))
}

fn anderson_lix_grade(lix: f64) -> f64 {
    match lix as u32 {
        0..=9 => 1.0,
        10..=14 => 2.0,
        15..=19 => 3.0,
        20..=23 => 4.0,
        24..=27 => 5.0,
        28..=31 => 6.0,
        32..=35 => 7.0,
        36..=39 => 8.0,
        40..=43 => 9.0,
        44..=47 => 10.0,
        48..=51 => 11.0,
        52..=55 => 12.0,
        _ => 13.0,
    }
}

/// Rix: long words per sentence, through Anderson's table.
pub fn rix(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    let sentences = nonzero(t.sentences as f64, "rix", "no sentences")?;
    let score = t.long_seven as f64 / sentences;
    let grade = anderson_rix_grade(score);
    Ok(TestResult::new("rix", "Rix").with_grade(finish_grade(grade, RIX_CEILING)))
}

fn anderson_rix_grade(rix: f64) -> f64 {
    const TABLE: [(f64, f64); 12] = [
        (7.2, 13.0),
        (6.2, 12.0),
        (5.3, 11.0),
        (4.5, 10.0),
        (3.7, 9.0),
        (3.0, 8.0),
        (2.4, 7.0),
        (1.8, 6.0),
        (1.3, 5.0),
        (0.8, 4.0),
        (0.5, 3.0),
        (0.2, 2.0),
    ];
    for (threshold, grade) in TABLE {
        if rix >= threshold {
            return grade;
        }
    }
    1.0
}

/// Wheeler-Smith score: unit length times the percentage of words of
/// two or more syllables, divided by ten.
fn wheeler_smith_score(ctx: &Context, test: &str) -> TestOutcome<f64> {
    let t = ctx.totals();
    nonzero(t.words as f64, test, "no words")?;
    nonzero(t.units as f64, test, "no sentence units")?;
    Ok(ctx.unit_length() * ctx.percent(t.disyllabic_plus) / 10.0)
}

/// Wheeler-Smith, for primary-grade English text.
pub fn wheeler_smith(ctx: &Context) -> TestOutcome<TestResult> {
    let score = wheeler_smith_score(ctx, "wheeler-smith")?;
    let grade = match score {
        s if s < 4.0 => 0.0,
        s if s <= 8.0 => 1.0,
        s if s <= 11.5 => 2.0,
        s if s <= 15.0 => 3.0,
        s if s <= 19.0 => 4.0,
        _ => 5.0,
    };
    Ok(TestResult::new("wheeler-smith", "Wheeler-Smith")
        .with_grade(finish_grade(grade, GRADE_CEILING)))
}

/// Bamberger-Vanecek adaptation of Wheeler-Smith for German text,
/// capped at grade 10.9.
pub fn wheeler_smith_bamberger_vanecek(ctx: &Context) -> TestOutcome<TestResult> {
    let score = wheeler_smith_score(ctx, "wheeler-smith-bamberger-vanecek")?;
    let grade = match score {
        s if s < 2.5 => 1.0,
        s if s < 4.0 => 2.0,
        s if s < 6.0 => 3.0,
        s if s < 8.0 => 4.0,
        s if s < 10.0 => 5.0,
        s if s < 12.0 => 6.0,
        s if s < 14.0 => 7.0,
        s if s < 16.0 => 8.0,
        s if s < 18.0 => 9.0,
        s if s < 20.0 => 10.0,
        _ => WHEELER_SMITH_DE_CEILING,
    };
    Ok(
        TestResult::new("wheeler-smith-bamberger-vanecek", "Wheeler-Smith (Bamberger-Vanecek)")
            .with_grade(finish_grade(grade, WHEELER_SMITH_DE_CEILING)),
    )
}

/// First neue Wiener Sachtextformel (German).
pub fn nws1(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "nws1", "no words")?;
    nonzero(t.sentences as f64, "nws1", "no sentences")?;
    let raw = 0.1935 * ctx.percent(t.polysyllabic) + 0.1672 * ctx.asl()
        + 0.1297 * ctx.percent(t.long_seven)
        - 0.0327 * ctx.percent(t.monosyllabic)
        - 0.875;
    Ok(TestResult::new("nws1", "Neue Wiener Sachtextformel 1")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Second neue Wiener Sachtextformel (German).
pub fn nws2(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "nws2", "no words")?;
    nonzero(t.sentences as f64, "nws2", "no sentences")?;
    let raw = 0.2007 * ctx.percent(t.polysyllabic) + 0.1682 * ctx.asl()
        + 0.1373 * ctx.percent(t.long_seven)
        - 2.779;
    Ok(TestResult::new("nws2", "Neue Wiener Sachtextformel 2")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Third neue Wiener Sachtextformel (German).
pub fn nws3(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "nws3", "no words")?;
    nonzero(t.sentences as f64, "nws3", "no sentences")?;
    let raw = 0.2963 * ctx.percent(t.polysyllabic) + 0.1905 * ctx.asl() - 1.1144;
    Ok(TestResult::new("nws3", "Neue Wiener Sachtextformel 3")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Bamberger-Vanecek's "Qu" formula for German text.
///
/// Coefficients follow the published regression against sentence length
/// and polysyllable share.
pub fn qu_bamberger_vanecek(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "qu-bamberger-vanecek", "no words")?;
    nonzero(t.sentences as f64, "qu-bamberger-vanecek", "no sentences")?;
    let raw = 0.2656 * ctx.asl() + 0.2744 * ctx.percent(t.polysyllabic) - 1.693;
    Ok(TestResult::new("qu-bamberger-vanecek", "Qu (Bamberger-Vanecek)")
        .with_grade(finish_grade(raw, GRADE_CEILING)))
}

/// Powers-Sumner-Kearl recalculation of Farr-Jenkins-Paterson.
pub fn psk_farr_jenkins_paterson(ctx: &Context) -> TestOutcome<TestResult> {
    let t = ctx.totals();
    nonzero(t.words as f64, "psk-farr-jenkins-paterson", "no words")?;
    nonzero(t.sentences as f64, "psk-farr-jenkins-paterson", "no sentences")?;
    let raw = 8.4335 + 0.0923 * ctx.asl() - 0.0648 * ctx.percent(t.monosyllabic);
    Ok(
        TestResult::new("psk-farr-jenkins-paterson", "PSK Farr-Jenkins-Paterson")
            .with_grade(finish_grade(raw, GRADE_CEILING)),
    )
}
